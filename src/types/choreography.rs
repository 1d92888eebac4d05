use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ops::formation_ops::{FormationPatch, apply_patch, resolve_active_formation};
use crate::types::formation::Formation;

/// An ordered timeline of formations bounded by a duration in seconds.
///
/// Invariant: `formations` is kept sorted ascending by timestamp after every
/// mutation. The sort is stable and additions append before sorting, so a
/// newly added formation lands after pre-existing ones that share its
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ChoreographyData")]
pub struct Choreography {
    pub id: String,
    pub name: String,
    pub duration: f64,
    formations: Vec<Formation>,
}

/// Raw deserialization shape. Project files are an external input, so the
/// invariants (positive duration, sorted formations) are re-established
/// here instead of trusting the file.
#[derive(Deserialize)]
struct ChoreographyData {
    id: String,
    name: String,
    duration: f64,
    formations: Vec<Formation>,
}

impl From<ChoreographyData> for Choreography {
    fn from(data: ChoreographyData) -> Self {
        let mut choreo = Choreography {
            id: data.id,
            name: data.name,
            // f64::max returns the other operand for NaN, so a NaN duration
            // in the file also lands on the floor value.
            duration: data.duration.max(1.0),
            formations: data.formations,
        };
        choreo.sort_formations();
        choreo
    }
}

impl Choreography {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Choreography {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            duration: duration.max(1.0),
            formations: Vec::new(),
        }
    }

    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    /// The formation active at `time`, i.e. the latest cue at or before it.
    pub fn active_formation_at(&self, time: f64) -> Option<&Formation> {
        resolve_active_formation(&self.formations, time)
    }

    pub fn formation(&self, id: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.id == id)
    }

    pub fn formation_mut(&mut self, id: &str) -> Option<&mut Formation> {
        self.formations.iter_mut().find(|f| f.id == id)
    }

    /// Append a formation and restore the timestamp ordering.
    pub fn add_formation(&mut self, formation: Formation) -> &[Formation] {
        tracing::debug!(id = %formation.id, timestamp = formation.timestamp, "add formation");
        self.formations.push(formation);
        self.sort_formations();
        &self.formations
    }

    /// Patch the formation with the given id and restore ordering (the cue
    /// time may have moved). Unknown ids are a silent no-op: absence is
    /// expected mid-creation in the editor. Returns whether a formation
    /// was patched.
    pub fn update_formation(&mut self, id: &str, patch: &FormationPatch) -> bool {
        let Some(formation) = self.formations.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        apply_patch(formation, patch);
        self.sort_formations();
        true
    }

    /// Remove the formation with the given id. Unknown ids are a no-op.
    /// Removal cannot disturb the ordering, so no re-sort happens here.
    pub fn remove_formation(&mut self, id: &str) -> bool {
        let before = self.formations.len();
        self.formations.retain(|f| f.id != id);
        before != self.formations.len()
    }

    // Stable sort keyed on timestamp alone; relative order of equal
    // timestamps is preserved.
    fn sort_formations(&mut self) {
        self.formations
            .sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    }
}
