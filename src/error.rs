//! Error type shared by every component of the rendering engine.

/// Errors raised while decoding names, aliasing types or rendering frames.
///
/// `NullArgument` and `InvalidArgument` are caller mistakes raised at the
/// component boundary. `UnsupportedFrame` and `InternalConsistency` abort the
/// whole render call so no partially-rendered trace escapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// A required reference or structure is absent.
    #[error("required value is absent: {0}")]
    NullArgument(String),
    /// A required string is empty or whitespace.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No frame serializer claims the frame.
    #[error("no frame serializer claims routine '{0}'")]
    UnsupportedFrame(String),
    /// Metadata does not have the shape the engine relies on.
    #[error("internal consistency failure: {0}")]
    InternalConsistency(String),
}

impl TraceError {
    pub(crate) fn null(what: impl Into<String>) -> Self {
        TraceError::NullArgument(what.into())
    }
}
