//! First-match-wins selection of a [`FrameSerializer`].

use crate::error::TraceError;
use crate::metadata::RawFrame;

use super::{FrameContext, FrameSerializer, frame_routine};

/// Picks the serializer for a frame.
///
/// Variants are tried in [`PRIORITY`](Self::PRIORITY) order. The more
/// specific strategies (lambda, async) come before the general method
/// strategy, which claims every method.
#[derive(Debug, Clone)]
pub struct SerializerDispatcher {
    serializers: Vec<FrameSerializer>,
}

impl Default for SerializerDispatcher {
    fn default() -> Self {
        Self {
            serializers: Self::PRIORITY.to_vec(),
        }
    }
}

impl SerializerDispatcher {
    pub const PRIORITY: [FrameSerializer; 4] = [
        FrameSerializer::Lambda,
        FrameSerializer::AsyncState,
        FrameSerializer::Method,
        FrameSerializer::Constructor,
    ];

    /// A dispatcher limited to `enabled`, still tried in priority order.
    pub fn only(enabled: &[FrameSerializer]) -> Self {
        Self {
            serializers: Self::PRIORITY
                .into_iter()
                .filter(|s| enabled.contains(s))
                .collect(),
        }
    }

    pub fn serializers(&self) -> &[FrameSerializer] {
        &self.serializers
    }

    /// The first serializer in priority order that claims `frame`.
    ///
    /// # Errors
    ///
    /// `NullArgument` when the frame has no resolvable routine;
    /// `UnsupportedFrame` when no serializer claims it.
    pub fn create(&self, ctx: &FrameContext<'_>, frame: &RawFrame) -> Result<FrameSerializer, TraceError> {
        for &serializer in &self.serializers {
            if serializer.can_serialize(ctx, frame)? {
                return Ok(serializer);
            }
        }

        let (handle, routine) = frame_routine(ctx.md, frame)?;
        log::warn!("no serializer for routine #{} '{}'", handle.0, routine.name);
        Err(TraceError::UnsupportedFrame(routine.name.clone()))
    }

    /// Dispatch and render in one step.
    pub fn render(&self, ctx: &FrameContext<'_>, frame: &RawFrame) -> Result<String, TraceError> {
        let serializer = self.create(ctx, frame)?;
        log::debug!("rendering {:?} with {} serializer", frame.routine, serializer.name());
        serializer.render(ctx, frame)
    }
}
