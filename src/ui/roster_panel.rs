use eframe::egui;

use crate::types::roster::{Dancer, DancerRoster};
use crate::ui::stage_widget::parse_color;

/// Marker colors cycled through as dancers are added.
const PALETTE: [&str; 8] = [
    "#ff4f4f", "#4fb4ff", "#64dd64", "#ffb74f", "#c47fff", "#4fffd8", "#ff7fb8", "#d8d84f",
];

#[derive(Debug, Clone)]
pub enum RosterEvent {
    DancerAdded(Dancer),
    DancerRemoved(String),
    /// Place this dancer into the formation active at the playhead.
    PlaceOnStage(String),
}

pub fn roster_panel(
    ui: &mut egui::Ui,
    roster: &DancerRoster,
    new_dancer_name: &mut String,
) -> Vec<RosterEvent> {
    let mut events = Vec::new();

    ui.vertical(|ui| {
        ui.heading("Dancers");
        ui.separator();

        ui.horizontal(|ui| {
            let field = ui.add(
                egui::TextEdit::singleline(new_dancer_name)
                    .hint_text("Name")
                    .desired_width(110.0),
            );
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("Add").clicked() || submitted) && !new_dancer_name.trim().is_empty() {
                let color = PALETTE[roster.all().len() % PALETTE.len()];
                events.push(RosterEvent::DancerAdded(Dancer::new(
                    new_dancer_name.trim(),
                    color,
                )));
                new_dancer_name.clear();
            }
        });

        if roster.is_empty() {
            ui.label("No dancers yet");
            return;
        }

        for dancer in roster.all() {
            ui.horizontal(|ui| {
                let color = parse_color(&dancer.color).unwrap_or(egui::Color32::GRAY);
                let (dot_rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().circle_filled(dot_rect.center(), 5.0, color);
                ui.label(&dancer.name);
                if ui.button("Place").clicked() {
                    events.push(RosterEvent::PlaceOnStage(dancer.id.clone()));
                }
                if ui.button("✖").clicked() {
                    events.push(RosterEvent::DancerRemoved(dancer.id.clone()));
                }
            });
        }
    });

    events
}
