//! Offline input: metadata and captured frames saved as JSON.
//!
//! A snapshot lets an adapter capture reflection facts in the process that
//! threw and render them somewhere else (a log viewer, the CLI, tests).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metadata::{MetadataTable, RawFrame};

/// Errors reading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Metadata plus the frames to render against it, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSnapshot {
    #[serde(default)]
    pub metadata: MetadataTable,
    #[serde(default)]
    pub frames: Vec<RawFrame>,
}

impl TraceSnapshot {
    pub fn new(metadata: MetadataTable, frames: Vec<RawFrame>) -> Self {
        Self { metadata, frames }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&contents)?;
        log::debug!(
            "loaded snapshot {}: {} types, {} routines, {} frames",
            path.display(),
            snapshot.metadata.type_count(),
            snapshot.metadata.routine_count(),
            snapshot.frames.len()
        );
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
