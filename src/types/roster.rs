use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::entity::EntitySnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DancerRoster {
    dancers: Vec<Dancer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dancer {
    pub id: String,
    pub name: String,
    /// Hex color used for this dancer's stage marker, e.g. "#4fb4ff".
    pub color: String,
}

impl Dancer {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Dancer {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Place this dancer on stage at the given floor position. The snapshot
    /// is an independent copy; later roster edits don't rewrite formations.
    pub fn place_at(&self, x: f64, z: f64) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            x,
            y: 0.0,
            z,
            color: self.color.clone(),
            is_visible: true,
        }
    }
}

impl DancerRoster {
    pub fn new() -> Self {
        DancerRoster {
            dancers: Vec::new(),
        }
    }

    pub fn add(&mut self, dancer: Dancer) {
        tracing::debug!(name = %dancer.name, "add dancer to roster");
        self.dancers.push(dancer);
    }

    pub fn all(&self) -> &[Dancer] {
        &self.dancers
    }

    pub fn is_empty(&self) -> bool {
        self.dancers.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Dancer> {
        self.dancers.iter().find(|d| d.name == name)
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<Dancer> {
        let idx = self.dancers.iter().position(|d| d.id == id)?;
        Some(self.dancers.remove(idx))
    }
}

impl Default for DancerRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find_dancer() {
        let mut roster = DancerRoster::new();
        roster.add(Dancer::new("Mia", "#ff4f4f"));
        roster.add(Dancer::new("Noah", "#4fb4ff"));

        let found = roster.find_by_name("Mia").unwrap();
        assert_eq!(found.color, "#ff4f4f");
        assert!(roster.find_by_name("Zoe").is_none());
        assert_eq!(roster.all().len(), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let mut roster = DancerRoster::new();
        roster.add(Dancer::new("Mia", "#ff4f4f"));
        let id = roster.all()[0].id.clone();

        let removed = roster.remove_by_id(&id).unwrap();
        assert_eq!(removed.name, "Mia");
        assert!(roster.remove_by_id(&id).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_place_at_copies_dancer() {
        let dancer = Dancer::new("Mia", "#ff4f4f");
        let snapshot = dancer.place_at(2.0, 3.5);
        assert_eq!(snapshot.id, dancer.id);
        assert_eq!(snapshot.x, 2.0);
        assert_eq!(snapshot.z, 3.5);
        assert_eq!(snapshot.y, 0.0);
        assert!(snapshot.is_visible);
        assert_eq!(snapshot.color, "#ff4f4f");
    }
}
