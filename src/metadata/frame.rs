//! Raw stack frames as captured by the host.

use serde::{Deserialize, Serialize};

use super::types::RoutineHandle;

/// One captured frame: the active routine plus whatever source location the
/// platform reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Routine active at this frame. Absent when the host could not resolve it.
    #[serde(default)]
    pub routine: Option<RoutineHandle>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub line_number: Option<u32>,
}

impl RawFrame {
    /// A frame without source information.
    pub fn new(routine: RoutineHandle) -> Self {
        Self {
            routine: Some(routine),
            file_name: None,
            line_number: None,
        }
    }

    /// Attach a source location.
    pub fn at(mut self, file_name: impl Into<String>, line_number: u32) -> Self {
        self.file_name = Some(file_name.into());
        self.line_number = Some(line_number);
        self
    }

    /// The `in {file}:line {n}` location text. Missing values render as an empty
    /// file name and line `0`, the way the platform reports them.
    pub fn line_info(&self) -> String {
        format!(
            "in {}:line {}",
            self.file_name.as_deref().unwrap_or_default(),
            self.line_number.unwrap_or_default()
        )
    }
}
