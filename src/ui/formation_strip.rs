use eframe::egui;

use crate::types::choreography::Choreography;

const STRIP_HEIGHT: f32 = 56.0;
const RULER_HEIGHT: f32 = 22.0;
const MARKER_WIDTH: f32 = 10.0;

#[derive(Debug, Clone)]
pub enum StripEvent {
    /// The playhead was clicked or dragged to a new time.
    PlayheadMoved(f64),
    /// A formation marker was clicked.
    FormationSelected(String),
}

/// Horizontal timeline strip: a time ruler, one marker per formation cue,
/// and the playhead. The whole choreography duration is fitted to the
/// available width. Clicking or dragging the ruler scrubs the playhead.
pub fn formation_strip(
    ui: &mut egui::Ui,
    choreography: &Choreography,
    playhead: f64,
    selected: Option<&str>,
) -> Vec<StripEvent> {
    let mut events = Vec::new();

    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, STRIP_HEIGHT),
        egui::Sense::click_and_drag(),
    );
    let painter = ui.painter_at(rect);
    let duration = choreography.duration;

    let time_to_x = |time: f64| rect.left() + (time / duration).clamp(0.0, 1.0) as f32 * rect.width();
    let x_to_time = |x: f32| (((x - rect.left()) / rect.width()).clamp(0.0, 1.0) as f64) * duration;

    // Ruler
    let ruler_rect = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), RULER_HEIGHT));
    painter.rect_filled(ruler_rect, 0.0, egui::Color32::from_gray(40));
    let major_interval = if duration > 240.0 {
        60.0
    } else if duration > 60.0 {
        30.0
    } else {
        10.0
    };
    let mut time = 0.0;
    while time <= duration {
        let x = time_to_x(time);
        painter.line_segment(
            [
                egui::pos2(x, ruler_rect.bottom() - 8.0),
                egui::pos2(x, ruler_rect.bottom()),
            ],
            egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
        );
        painter.text(
            egui::pos2(x + 2.0, ruler_rect.center().y),
            egui::Align2::LEFT_CENTER,
            format_time(time),
            egui::FontId::proportional(10.0),
            egui::Color32::LIGHT_GRAY,
        );
        time += major_interval;
    }

    // Formation markers
    let lane_rect = egui::Rect::from_min_max(
        egui::pos2(rect.left(), rect.top() + RULER_HEIGHT),
        rect.right_bottom(),
    );
    painter.rect_filled(lane_rect, 0.0, egui::Color32::from_gray(30));
    for formation in choreography.formations() {
        let x = time_to_x(formation.timestamp);
        let marker_rect = egui::Rect::from_center_size(
            egui::pos2(x, lane_rect.center().y),
            egui::vec2(MARKER_WIDTH, lane_rect.height() - 10.0),
        );
        let is_selected = selected == Some(formation.id.as_str());
        let color = if is_selected {
            egui::Color32::from_rgb(255, 180, 100)
        } else {
            egui::Color32::from_rgb(100, 180, 255)
        };
        painter.rect_filled(marker_rect, 2.0, color);
        painter.text(
            egui::pos2(x + MARKER_WIDTH, lane_rect.center().y),
            egui::Align2::LEFT_CENTER,
            &formation.name,
            egui::FontId::proportional(10.0),
            egui::Color32::GRAY,
        );

        let marker_response = ui.interact(
            marker_rect,
            ui.id().with(("formation_marker", &formation.id)),
            egui::Sense::click(),
        );
        if marker_response.clicked() {
            events.push(StripEvent::FormationSelected(formation.id.clone()));
        }
    }

    // Playhead
    let playhead_x = time_to_x(playhead);
    painter.line_segment(
        [
            egui::pos2(playhead_x, rect.top()),
            egui::pos2(playhead_x, rect.bottom()),
        ],
        egui::Stroke::new(2.0, egui::Color32::RED),
    );

    // Scrub on click or drag anywhere in the strip (markers consume their
    // own clicks first).
    if response.clicked() || response.dragged() {
        if let Some(pointer) = response.interact_pointer_pos() {
            events.push(StripEvent::PlayheadMoved(x_to_time(pointer.x)));
        }
    }

    events
}

/// Format seconds as MM:SS.mmm for the transport readout and ruler labels.
/// Rounds to whole milliseconds before splitting off the minutes so a value
/// just under a minute boundary carries into it instead of reading ":60".
pub fn format_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as i64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms % 60_000) as f64 / 1000.0;
    format!("{:02}:{:06.3}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00.000");
        assert_eq!(format_time(65.25), "01:05.250");
        assert_eq!(format_time(600.0), "10:00.000");
    }

    #[test]
    fn test_format_time_rounds_into_minute() {
        // Sub-millisecond remainders carry into the minutes field rather
        // than rendering a 60-second readout.
        assert_eq!(format_time(59.9996), "01:00.000");
        assert_eq!(format_time(119.9999), "02:00.000");
        assert_eq!(format_time(59.994), "00:59.994");
    }
}
