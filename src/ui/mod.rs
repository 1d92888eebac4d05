pub mod app;
pub mod formation_strip;
pub mod roster_panel;
pub mod stage_widget;
