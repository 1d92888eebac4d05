use crate::types::entity::EntitySnapshot;
use crate::types::formation::Formation;

/// Resolves which formation is active at the given playback time.
///
/// The input does not need to be sorted; it is treated as a set. The active
/// formation is the one with the largest timestamp not past `time`. When
/// several formations share that timestamp, the one appearing last in the
/// input wins, so the most recently added formation takes precedence.
/// Returns `None` before the first cue or for an empty set.
pub fn resolve_active_formation(formations: &[Formation], time: f64) -> Option<&Formation> {
    let mut active: Option<&Formation> = None;
    for formation in formations {
        if formation.timestamp > time {
            continue;
        }
        match active {
            // `>=` keeps the later entry among equal timestamps.
            Some(best) if formation.timestamp >= best.timestamp => active = Some(formation),
            None => active = Some(formation),
            _ => {}
        }
    }
    active
}

/// Field-wise edit applied to a formation by id. `None` fields are left
/// untouched, so the editor can patch a name, a cue time, or the dancer
/// layout independently.
#[derive(Debug, Clone, Default)]
pub struct FormationPatch {
    pub name: Option<String>,
    pub timestamp: Option<f64>,
    pub entities: Option<Vec<EntitySnapshot>>,
}

impl FormationPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        FormationPatch {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn retime(timestamp: f64) -> Self {
        FormationPatch {
            timestamp: Some(timestamp),
            ..Default::default()
        }
    }
}

pub fn apply_patch(formation: &mut Formation, patch: &FormationPatch) {
    if let Some(name) = &patch.name {
        formation.name = name.clone();
    }
    if let Some(timestamp) = patch.timestamp {
        formation.timestamp = timestamp.max(0.0);
    }
    if let Some(entities) = &patch.entities {
        formation.entities = entities.clone();
    }
}
