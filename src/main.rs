mod ops;
mod playback;
mod types;
mod ui;

use crate::types::choreography::Choreography;
use crate::types::formation::Formation;
use crate::types::project::Project;
use crate::types::roster::Dancer;
use crate::ui::app::FormioApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app = FormioApp::new(starter_project());

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Formio",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

/// A small demo project so the editor opens with something on stage.
fn starter_project() -> Project {
    let mia = Dancer::new("Mia", "#ff4f4f");
    let noah = Dancer::new("Noah", "#4fb4ff");
    let zoe = Dancer::new("Zoe", "#64dd64");

    let mut choreo = Choreography::new("Spring Recital", 120.0);

    let mut opening = Formation::new("Opening", 0.0);
    opening.entities.push(mia.place_at(4.0, 5.0));
    opening.entities.push(noah.place_at(6.0, 5.0));
    opening.entities.push(zoe.place_at(8.0, 5.0));

    let mut chorus = Formation::derived_from(&opening, "Chorus", 45.0);
    for (i, entity) in chorus.entities.iter_mut().enumerate() {
        entity.move_to(6.0, 2.0 + 2.0 * i as f64);
    }

    let finale = Formation::derived_from(&chorus, "Finale", 90.0);

    choreo.add_formation(opening);
    choreo.add_formation(chorus);
    choreo.add_formation(finale);

    let mut project = Project::new("Spring Recital 2026", choreo);
    project.roster.add(mia);
    project.roster.add(noah);
    project.roster.add(zoe);
    project
}
