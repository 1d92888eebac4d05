use serde::{Deserialize, Serialize};

/// One tracked dancer's stage position at the moment of the enclosing
/// formation. Owned by the formation; deriving a new formation copies these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: String,
    pub is_visible: bool,
}

impl EntitySnapshot {
    pub fn move_to(&mut self, x: f64, z: f64) {
        self.x = x;
        self.z = z;
    }
}
