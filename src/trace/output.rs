//! Rendered output types.

use std::fmt;

/// One composed frame, line-info suffix included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame(String);

impl RenderedFrame {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered rendered frames plus the layout used to print them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedTrace {
    frames: Vec<RenderedFrame>,
    frame_prefix: String,
    line_separator: String,
}

impl EnhancedTrace {
    pub(crate) fn new(frames: Vec<RenderedFrame>, frame_prefix: String, line_separator: String) -> Self {
        Self {
            frames,
            frame_prefix,
            line_separator,
        }
    }

    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EnhancedTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.line_separator)?;
            }
            write!(f, "{}{frame}", self.frame_prefix)?;
        }
        Ok(())
    }
}
