//! `StackRenderer`: raw frames in, `EnhancedTrace` out.

use clr_trace_config::TraceConfig;

use crate::alias::Resolvers;
use crate::error::TraceError;
use crate::metadata::{MetadataProvider, RawFrame};
use crate::serializers::{FrameContext, SerializerDispatcher, frame_routine};

use super::options::RenderOptions;
use super::output::{EnhancedTrace, RenderedFrame};

/// Renders captured stacks. Holds no per-call state; one instance can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct StackRenderer {
    resolvers: Resolvers,
    dispatcher: SerializerDispatcher,
    options: RenderOptions,
}

impl StackRenderer {
    pub fn new(resolvers: Resolvers, options: RenderOptions) -> Self {
        Self {
            resolvers,
            dispatcher: SerializerDispatcher::default(),
            options,
        }
    }

    /// Renderer configured from a loaded [`TraceConfig`].
    pub fn from_config(config: &TraceConfig) -> Self {
        Self::new(
            Resolvers::with_system_prefix(config.system_namespace_prefix.clone()),
            RenderOptions::from(config),
        )
    }

    /// Replace the serializer dispatcher.
    pub fn with_dispatcher(mut self, dispatcher: SerializerDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `frames` (innermost first) against `md`.
    ///
    /// Frames whose routine is marked hidden are dropped unless
    /// `show_hidden_frames` is set; the rest keep their order.
    ///
    /// # Errors
    ///
    /// Any frame failing to resolve or render fails the whole call; no
    /// partial trace is returned.
    pub fn render(
        &self,
        md: &dyn MetadataProvider,
        frames: &[RawFrame],
    ) -> Result<EnhancedTrace, TraceError> {
        let ctx = FrameContext {
            include_line_info: self.options.include_line_info,
            ..FrameContext::new(md, &self.resolvers)
        };

        let mut rendered = Vec::with_capacity(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            let (handle, routine) = frame_routine(md, frame)?;
            if !self.options.show_hidden_frames && md.is_hidden_in_trace(handle) {
                log::debug!("frame {index}: dropping hidden routine '{}'", routine.name);
                continue;
            }
            rendered.push(RenderedFrame::new(self.dispatcher.render(&ctx, frame)?));
        }

        log::debug!("rendered {} of {} frames", rendered.len(), frames.len());
        Ok(EnhancedTrace::new(
            rendered,
            self.options.frame_prefix.clone(),
            self.options.line_separator.clone(),
        ))
    }
}
