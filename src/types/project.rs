use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::choreography::Choreography;
use crate::types::roster::DancerRoster;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("project file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The persistent unit of work: one choreography plus the dancer roster and
/// stage dimensions, serialized as pretty JSON. Transport state is
/// deliberately absent; it is rebuilt when the project is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub last_modified: String,
    pub roster: DancerRoster,
    pub choreography: Choreography,
    pub stage: StageSettings,
}

/// Floor dimensions of the stage in meters, used to scale the stage view.
/// x runs across the stage, z runs upstage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StageSettings {
    pub width: f64,
    pub depth: f64,
}

impl Default for StageSettings {
    fn default() -> Self {
        StageSettings {
            width: 12.0,
            depth: 10.0,
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>, choreography: Choreography) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Project {
            name: name.into(),
            description: None,
            created_at: now.clone(),
            last_modified: now,
            roster: DancerRoster::new(),
            choreography,
            stage: StageSettings::default(),
        }
    }

    pub fn touch(&mut self) {
        self.last_modified = chrono::Utc::now().to_rfc3339();
    }

    /// Save the project to a JSON file at the given path.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(json.as_bytes())?;
        tracing::info!(path = %path.as_ref().display(), "project saved");
        Ok(())
    }

    /// Load a project from a JSON file at the given path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Project, ProjectError> {
        let mut file = File::open(path.as_ref())?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        let project = serde_json::from_str(&json)?;
        tracing::info!(path = %path.as_ref().display(), "project loaded");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::formation::Formation;
    use crate::types::roster::Dancer;

    fn sample_project() -> Project {
        let mut choreo = Choreography::new("Spring Recital", 180.0);
        let mut opening = Formation::new("Opening", 0.0);
        let dancer = Dancer::new("Mia", "#ff4f4f");
        opening.entities.push(dancer.place_at(6.0, 5.0));
        choreo.add_formation(opening);
        choreo.add_formation(Formation::new("Chorus", 60.0));

        let mut project = Project::new("Recital 2026", choreo);
        project.roster.add(dancer);
        project
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recital.formio.json");

        let project = sample_project();
        project.save_to_file(&path).unwrap();
        let loaded = Project::load_from_file(&path).unwrap();

        assert_eq!(loaded.name, project.name);
        assert_eq!(loaded.roster.all(), project.roster.all());
        assert_eq!(
            loaded.choreography.formations(),
            project.choreography.formations()
        );
        assert_eq!(loaded.stage.width, project.stage.width);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Project::load_from_file("/nonexistent/recital.json").unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn test_load_garbage_is_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json at all").unwrap();
        let err = Project::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Serde(_)));
    }
}
