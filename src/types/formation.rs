use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::entity::EntitySnapshot;

/// A named, timestamped snapshot of all tracked dancers' stage positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: String,
    pub name: String,
    /// Position on the choreography timeline, in seconds from the start.
    pub timestamp: f64,
    pub entities: Vec<EntitySnapshot>,
}

impl Formation {
    pub fn new(name: impl Into<String>, timestamp: f64) -> Self {
        Formation {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            timestamp: timestamp.max(0.0),
            entities: Vec::new(),
        }
    }

    /// Derive a new formation at a later cue from an existing one.
    /// Entities are copied, not shared, so edits to the new formation
    /// never bleed into its predecessor.
    pub fn derived_from(prev: &Formation, name: impl Into<String>, timestamp: f64) -> Self {
        Formation {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            timestamp: timestamp.max(0.0),
            entities: prev.entities.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str, x: f64) -> EntitySnapshot {
        EntitySnapshot {
            id: id.to_string(),
            name: format!("Dancer {}", id),
            x,
            y: 0.0,
            z: 1.0,
            color: "#ff8800".to_string(),
            is_visible: true,
        }
    }

    #[test]
    fn test_new_clamps_negative_timestamp() {
        let f = Formation::new("Opening", -3.0);
        assert_eq!(f.timestamp, 0.0);
        assert!(!f.id.is_empty());
    }

    #[test]
    fn test_derived_formation_copies_entities() {
        let mut first = Formation::new("Opening", 0.0);
        first.entities.push(snapshot("d1", 2.0));

        let mut second = Formation::derived_from(&first, "Chorus", 30.0);
        assert_eq!(second.entities, first.entities);
        assert_ne!(second.id, first.id);

        // Moving a dancer in the derived formation must not touch the original.
        second.entities[0].move_to(5.0, 4.0);
        assert_eq!(first.entities[0].x, 2.0);
        assert_eq!(second.entities[0].x, 5.0);
    }
}
