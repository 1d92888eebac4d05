use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;

use crate::ops::formation_ops::FormationPatch;
use crate::playback::engine::PlaybackEngine;
use crate::types::formation::Formation;
use crate::types::project::Project;
use crate::ui::formation_strip::{StripEvent, format_time, formation_strip};
use crate::ui::roster_panel::{RosterEvent, roster_panel};
use crate::ui::stage_widget::{StageEvent, stage_panel};

pub struct AppState {
    pub project: Project,
    pub engine: PlaybackEngine,
    pub selected_formation: Option<String>,
    pub new_dancer_name: String,
    pub project_path: Option<PathBuf>,
}

pub struct FormioApp {
    pub state: AppState,
}

impl FormioApp {
    pub fn new(project: Project) -> Self {
        let engine = PlaybackEngine::new(project.choreography.duration);
        FormioApp {
            state: AppState {
                project,
                engine,
                selected_formation: None,
                new_dancer_name: String::new(),
                project_path: None,
            },
        }
    }

    fn save_project(&mut self, path: PathBuf) {
        self.state.project.touch();
        match self.state.project.save_to_file(&path) {
            Ok(()) => self.state.project_path = Some(path),
            Err(err) => tracing::error!(%err, "failed to save project"),
        }
    }

    fn open_project(&mut self, path: PathBuf) {
        match Project::load_from_file(&path) {
            Ok(project) => {
                // A freshly loaded choreography gets a fresh transport.
                self.state.engine = PlaybackEngine::new(project.choreography.duration);
                self.state.project = project;
                self.state.selected_formation = None;
                self.state.project_path = Some(path);
            }
            Err(err) => tracing::error!(%err, "failed to open project"),
        }
    }

    fn add_formation_at_playhead(&mut self) {
        let time = self.state.engine.current_time();
        let choreo = &mut self.state.project.choreography;
        let name = format!("Formation {}", choreo.formations().len() + 1);
        let formation = match choreo.active_formation_at(time) {
            Some(active) => Formation::derived_from(active, name, time),
            None => Formation::new(name, time),
        };
        let id = formation.id.clone();
        choreo.add_formation(formation);
        self.state.selected_formation = Some(id);
    }

    fn place_dancer(&mut self, dancer_id: &str) {
        let time = self.state.engine.current_time();
        let Some(dancer) = self
            .state
            .project
            .roster
            .all()
            .iter()
            .find(|d| d.id == dancer_id)
            .cloned()
        else {
            return;
        };
        let stage = self.state.project.stage;
        let choreo = &mut self.state.project.choreography;
        let Some(active_id) = choreo.active_formation_at(time).map(|f| f.id.clone()) else {
            return;
        };
        if let Some(formation) = choreo.formation_mut(&active_id) {
            if formation.entities.iter().any(|e| e.id == dancer.id) {
                return; // already on stage in this formation
            }
            formation
                .entities
                .push(dancer.place_at(stage.width / 2.0, stage.depth / 2.0));
        }
    }
}

impl eframe::App for FormioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.engine.is_playing() {
            // The ticker advances the clock off-thread; keep redrawing so the
            // stage follows it.
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        let playhead = self.state.engine.current_time();
        let duration = self.state.engine.duration();

        // Top: project bar
        egui::TopBottomPanel::top("project_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.state.project.name);
                ui.separator();
                if ui.button("Open…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Formio project", &["json"])
                        .pick_file()
                    {
                        self.open_project(path);
                        return;
                    }
                }
                if ui.button("Save").clicked() {
                    match self.state.project_path.clone() {
                        Some(path) => self.save_project(path),
                        None => {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("Formio project", &["json"])
                                .save_file()
                            {
                                self.save_project(path);
                            }
                        }
                    }
                }
            });
        });

        // Left: dancer roster
        egui::SidePanel::left("roster_panel").show(ctx, |ui| {
            let events = roster_panel(
                ui,
                &self.state.project.roster,
                &mut self.state.new_dancer_name,
            );
            for event in events {
                match event {
                    RosterEvent::DancerAdded(dancer) => self.state.project.roster.add(dancer),
                    RosterEvent::DancerRemoved(id) => {
                        self.state.project.roster.remove_by_id(&id);
                    }
                    RosterEvent::PlaceOnStage(id) => self.place_dancer(&id),
                }
            }
        });

        // Bottom: transport controls and formation strip
        egui::TopBottomPanel::bottom("transport_panel")
            .resizable(true)
            .min_height(120.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let playing = self.state.engine.is_playing();
                    if ui.button(if playing { "Pause" } else { "Play" }).clicked() {
                        if playing {
                            self.state.engine.pause();
                        } else {
                            self.state.engine.play();
                        }
                    }
                    if ui.button("Stop").clicked() {
                        self.state.engine.stop();
                    }

                    let mut seek_time = playhead;
                    let slider = egui::Slider::new(&mut seek_time, 0.0..=duration)
                        .show_value(false)
                        .text("Seek");
                    if ui.add(slider).changed() {
                        self.state.engine.seek(seek_time);
                    }
                    ui.label(format!(
                        "{} / {}",
                        format_time(playhead),
                        format_time(duration)
                    ));

                    let mut rate = self.state.engine.snapshot().rate;
                    let rate_slider = egui::Slider::new(&mut rate, 0.25..=3.0).text("Speed");
                    if ui.add(rate_slider).changed() {
                        self.state.engine.set_rate(rate);
                    }
                });

                ui.horizontal(|ui| {
                    if ui.button("+ Formation").clicked() {
                        self.add_formation_at_playhead();
                    }
                    let selected = self.state.selected_formation.clone();
                    if let Some(id) = &selected {
                        if ui.button("Delete Formation").clicked() {
                            self.state.project.choreography.remove_formation(id);
                            self.state.selected_formation = None;
                        }
                        if ui.button("Move to Playhead").clicked() {
                            self.state.project.choreography.update_formation(
                                id,
                                &FormationPatch::retime(self.state.engine.current_time()),
                            );
                        }
                    }
                });

                let events = formation_strip(
                    ui,
                    &self.state.project.choreography,
                    playhead,
                    self.state.selected_formation.as_deref(),
                );
                for event in events {
                    match event {
                        StripEvent::PlayheadMoved(time) => self.state.engine.seek(time),
                        StripEvent::FormationSelected(id) => {
                            self.state.selected_formation = Some(id);
                        }
                    }
                }
            });

        // Center: stage view of the resolved formation
        egui::CentralPanel::default().show(ctx, |ui| {
            let time = self.state.engine.current_time();
            let choreo = &self.state.project.choreography;
            let active_id = choreo.active_formation_at(time).map(|f| f.id.clone());
            let events = stage_panel(
                ui,
                active_id
                    .as_deref()
                    .and_then(|id| choreo.formation(id)),
                &self.state.project.stage,
            );
            if let Some(id) = active_id {
                let choreo = &mut self.state.project.choreography;
                if let Some(formation) = choreo.formation_mut(&id) {
                    for event in events {
                        match event {
                            StageEvent::EntityMoved { entity_id, x, z } => {
                                if let Some(entity) =
                                    formation.entities.iter_mut().find(|e| e.id == entity_id)
                                {
                                    entity.move_to(x, z);
                                }
                            }
                        }
                    }
                }
            }
        });
    }
}
