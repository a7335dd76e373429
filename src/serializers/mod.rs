//! Per-frame rendering strategies and their dispatcher.
//!
//! Each [`FrameSerializer`] variant claims a class of routines and knows how
//! to print them. [`SerializerDispatcher`] tries the variants in a fixed
//! priority order and returns the first one that claims the frame.
//!
//! Sub-modules:
//! - [`lambda`]: lambdas stored in static delegate fields
//! - [`async_state`]: `MoveNext` of compiler-generated async state machines
//! - [`method`]: ordinary methods, local functions and indexers
//! - [`constructor`]: instance and static constructors
//! - [`dispatcher`]: `SerializerDispatcher`

mod async_state;
mod constructor;
mod dispatcher;
mod lambda;
mod method;


pub use dispatcher::SerializerDispatcher;

use crate::alias::Resolvers;
use crate::error::TraceError;
use crate::metadata::{
    MetadataProvider, ParameterInfo, RawFrame, RoutineHandle, RoutineInfo, TypeHandle, TypeInfo,
    require_routine, require_type,
};

/// Everything a serializer reads besides the frame itself.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub md: &'a dyn MetadataProvider,
    pub resolvers: &'a Resolvers,
    /// Append ` in {file}:line {n}` to each frame.
    pub include_line_info: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(md: &'a dyn MetadataProvider, resolvers: &'a Resolvers) -> Self {
        Self {
            md,
            resolvers,
            include_line_info: true,
        }
    }

    fn type_alias(&self, ty: TypeHandle) -> Result<String, TraceError> {
        self.resolvers.types.alias(self.md, ty)
    }

    fn parameter_alias(&self, parameter: &ParameterInfo) -> Result<String, TraceError> {
        self.resolvers
            .parameters
            .alias(self.md, &self.resolvers.types, parameter)
    }

    /// Alias of the routine's return value.
    fn return_alias(&self, routine: &RoutineInfo) -> Result<String, TraceError> {
        let ret = routine
            .return_parameter
            .as_ref()
            .ok_or_else(|| TraceError::null(format!("return parameter of '{}'", routine.name)))?;
        self.parameter_alias(ret)
    }

    /// Comma-separated parameter list, without parentheses.
    fn parameters(&self, routine: &RoutineInfo) -> Result<String, TraceError> {
        let parts = routine
            .parameters
            .iter()
            .map(|p| self.parameter_alias(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }

    /// Comma-separated generic arguments; empty for non-generic routines.
    fn generic_arguments(&self, routine: &RoutineInfo) -> Result<String, TraceError> {
        if !routine.is_generic_method {
            return Ok(String::new());
        }
        let parts = routine
            .generic_arguments
            .iter()
            .map(|ty| self.type_alias(*ty))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }

    /// The ` in {file}:line {n}` suffix, or nothing when disabled.
    fn line_info(&self, frame: &RawFrame) -> String {
        if self.include_line_info {
            format!(" {}", frame.line_info())
        } else {
            String::new()
        }
    }
}

/// Rendering strategy for one class of routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSerializer {
    Lambda,
    AsyncState,
    Method,
    Constructor,
}

impl FrameSerializer {
    pub fn name(self) -> &'static str {
        match self {
            FrameSerializer::Lambda => "lambda",
            FrameSerializer::AsyncState => "async_state",
            FrameSerializer::Method => "method",
            FrameSerializer::Constructor => "constructor",
        }
    }

    /// Whether this strategy claims the frame.
    ///
    /// # Errors
    ///
    /// `NullArgument` when the frame has no routine or the routine is unknown.
    pub fn can_serialize(self, ctx: &FrameContext<'_>, frame: &RawFrame) -> Result<bool, TraceError> {
        let (handle, routine) = frame_routine(ctx.md, frame)?;
        let claimed = match self {
            FrameSerializer::Lambda => lambda::applies(routine),
            FrameSerializer::AsyncState => async_state::applies(ctx, routine),
            FrameSerializer::Method => method::applies(routine),
            FrameSerializer::Constructor => constructor::applies(routine),
        };
        if claimed {
            log::trace!("{} claims routine #{}", self.name(), handle.0);
        }
        Ok(claimed)
    }

    /// Render the frame. Callers are expected to have checked
    /// [`can_serialize`](Self::can_serialize) first.
    pub fn render(self, ctx: &FrameContext<'_>, frame: &RawFrame) -> Result<String, TraceError> {
        let (handle, routine) = frame_routine(ctx.md, frame)?;
        match self {
            FrameSerializer::Lambda => lambda::render(ctx, frame, handle, routine),
            FrameSerializer::AsyncState => async_state::render(ctx, frame, routine),
            FrameSerializer::Method => method::render(ctx, frame, handle, routine),
            FrameSerializer::Constructor => constructor::render(ctx, frame, routine),
        }
    }
}

/// Resolve the frame's routine, reporting `NullArgument` when it is absent.
pub(crate) fn frame_routine<'a>(
    md: &'a dyn MetadataProvider,
    frame: &RawFrame,
) -> Result<(RoutineHandle, &'a RoutineInfo), TraceError> {
    let handle = frame
        .routine
        .ok_or_else(|| TraceError::null("frame routine"))?;
    Ok((handle, require_routine(md, handle)?))
}

/// The routine's declaring type, reporting `NullArgument` when it is absent.
fn declaring_type(routine: &RoutineInfo) -> Result<TypeHandle, TraceError> {
    routine
        .declaring_type
        .ok_or_else(|| TraceError::null(format!("declaring type of '{}'", routine.name)))
}

/// `{namespace}.{alias}` unless the namespace is blank or `prefix_of_alias`
/// already starts the alias.
fn qualify(namespace: Option<&str>, alias: String, prefix_of_alias: Option<&str>) -> String {
    match namespace.filter(|ns| !ns.trim().is_empty()) {
        Some(ns) if !prefix_of_alias.is_some_and(|p| alias.starts_with(p)) => {
            format!("{ns}.{alias}")
        }
        _ => alias,
    }
}

/// Resolve `ty` and compute its alias.
fn resolve_with_alias<'a>(
    ctx: &FrameContext<'a>,
    ty: TypeHandle,
) -> Result<(&'a TypeInfo, String), TraceError> {
    let info = require_type(ctx.md, ty)?;
    Ok((info, ctx.type_alias(ty)?))
}
