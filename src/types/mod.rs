pub mod choreography;
pub mod entity;
pub mod formation;
pub mod playback_state;
pub mod project;
pub mod roster;
