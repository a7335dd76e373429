//! Layout and filtering options for [`StackRenderer`](super::StackRenderer).

use clr_trace_config::TraceConfig;

pub const DEFAULT_FRAME_PREFIX: &str = "   at ";
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// How a trace is laid out and which frames survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text before every frame line.
    pub frame_prefix: String,
    /// Text between frame lines. Never emitted after the last line.
    pub line_separator: String,
    /// Append ` in {file}:line {n}` to each frame.
    pub include_line_info: bool,
    /// Keep frames whose routine is marked hidden.
    pub show_hidden_frames: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            frame_prefix: DEFAULT_FRAME_PREFIX.to_string(),
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
            include_line_info: true,
            show_hidden_frames: false,
        }
    }
}

impl From<&TraceConfig> for RenderOptions {
    fn from(config: &TraceConfig) -> Self {
        Self {
            frame_prefix: config.frame_prefix.clone(),
            line_separator: config.line_separator.clone(),
            include_line_info: config.include_line_info,
            show_hidden_frames: config.show_hidden_frames,
        }
    }
}
