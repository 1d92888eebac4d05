use eframe::egui;

use crate::types::formation::Formation;
use crate::types::project::StageSettings;

const DANCER_RADIUS: f32 = 12.0;

#[derive(Debug, Clone)]
pub enum StageEvent {
    /// A dancer marker was dragged to a new floor position.
    EntityMoved { entity_id: String, x: f64, z: f64 },
}

/// Top-down stage view. Draws every visible dancer of the active formation
/// as a colored disc on the floor plan; markers can be dragged to reposition
/// dancers within the formation. Downstage (z = 0) is at the bottom edge.
pub fn stage_panel(
    ui: &mut egui::Ui,
    formation: Option<&Formation>,
    stage: &StageSettings,
) -> Vec<StageEvent> {
    let mut events = Vec::new();

    let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 4.0, egui::Color32::from_gray(24));
    painter.rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(80)),
        egui::StrokeKind::Inside,
    );

    let Some(formation) = formation else {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No active formation",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
        return events;
    };

    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        &formation.name,
        egui::FontId::proportional(14.0),
        egui::Color32::LIGHT_GRAY,
    );

    for entity in &formation.entities {
        if !entity.is_visible {
            continue;
        }
        let center = floor_to_screen(rect, stage, entity.x, entity.z);
        let color = parse_color(&entity.color).unwrap_or(egui::Color32::GRAY);

        painter.circle_filled(center, DANCER_RADIUS, color);
        painter.circle_stroke(
            center,
            DANCER_RADIUS,
            egui::Stroke::new(1.0, egui::Color32::BLACK),
        );
        painter.text(
            center + egui::vec2(0.0, DANCER_RADIUS + 4.0),
            egui::Align2::CENTER_TOP,
            &entity.name,
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );

        let marker_rect = egui::Rect::from_center_size(
            center,
            egui::vec2(DANCER_RADIUS * 2.0, DANCER_RADIUS * 2.0),
        );
        let response = ui.interact(
            marker_rect,
            ui.id().with(("dancer_marker", &entity.id)),
            egui::Sense::drag(),
        );
        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let (x, z) = screen_to_floor(rect, stage, pointer);
                events.push(StageEvent::EntityMoved {
                    entity_id: entity.id.clone(),
                    x,
                    z,
                });
            }
        }
    }

    events
}

fn floor_to_screen(rect: egui::Rect, stage: &StageSettings, x: f64, z: f64) -> egui::Pos2 {
    let fx = (x / stage.width).clamp(0.0, 1.0) as f32;
    let fz = (z / stage.depth).clamp(0.0, 1.0) as f32;
    egui::pos2(
        rect.left() + fx * rect.width(),
        rect.bottom() - fz * rect.height(),
    )
}

fn screen_to_floor(rect: egui::Rect, stage: &StageSettings, pos: egui::Pos2) -> (f64, f64) {
    let fx = ((pos.x - rect.left()) / rect.width()).clamp(0.0, 1.0) as f64;
    let fz = ((rect.bottom() - pos.y) / rect.height()).clamp(0.0, 1.0) as f64;
    (fx * stage.width, fz * stage.depth)
}

/// Parse a "#rrggbb" hex color. Anything malformed yields `None` and the
/// caller falls back to gray.
pub fn parse_color(color: &str) -> Option<egui::Color32> {
    let hex = color.strip_prefix('#')?;
    // Length is in bytes; slicing below needs six ASCII digits, not six
    // bytes, or a multi-byte character would split a char boundary.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(egui::Color32::from_rgb(r, g, b))
}
