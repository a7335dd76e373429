//! `MoveNext` frames of compiler-generated async state machines.
//!
//! The state machine is nested in the type that declares the async method,
//! and that method carries a marker naming the state machine. The frame is
//! printed as the async method itself: `async Task<int> Ns.Type.Load(...)`.

use crate::error::TraceError;
use crate::metadata::{RawFrame, RoutineInfo, TypeHandle, require_type};
use crate::naming::decode;

use super::FrameContext;

/// Interface implemented by every compiler-generated async state machine.
pub const ASYNC_STATE_MACHINE: &str = "System.Runtime.CompilerServices.IAsyncStateMachine";

pub(super) fn applies(ctx: &FrameContext<'_>, routine: &RoutineInfo) -> bool {
    routine.is_method()
        && routine
            .reflected_type
            .and_then(|ty| ctx.md.type_info(ty))
            .is_some_and(|ty| ty.implements(ASYNC_STATE_MACHINE))
}

pub(super) fn render(
    ctx: &FrameContext<'_>,
    frame: &RawFrame,
    routine: &RoutineInfo,
) -> Result<String, TraceError> {
    let state_machine = routine
        .declaring_type
        .or(routine.reflected_type)
        .ok_or_else(|| TraceError::null(format!("state machine of '{}'", routine.name)))?;
    let outer = require_type(ctx.md, state_machine)?
        .declaring_type
        .ok_or_else(|| TraceError::null(format!("type enclosing state machine #{}", state_machine.0)))?;

    let task_method = find_task_method(ctx, outer, state_machine)?;
    let return_type = ctx.return_alias(task_method)?;
    let declaring = ctx.type_alias(outer)?;
    let name = decode(&task_method.name)?;
    let generics = ctx.generic_arguments(task_method)?;
    let parameters = ctx.parameters(task_method)?;

    let mut out = format!("async {return_type} {declaring}.{}", name.logical_name);
    if !generics.is_empty() {
        out.push_str(&format!("<{generics}>"));
    }
    out.push_str(&format!("({parameters})"));
    out.push_str(&ctx.line_info(frame));
    Ok(out)
}

/// The single method on `outer` whose state machine marker names
/// `state_machine`.
fn find_task_method<'a>(
    ctx: &FrameContext<'a>,
    outer: TypeHandle,
    state_machine: TypeHandle,
) -> Result<&'a RoutineInfo, TraceError> {
    let candidates: Vec<&'a RoutineInfo> = require_type(ctx.md, outer)?
        .methods
        .iter()
        .filter_map(|h| ctx.md.routine(*h))
        .filter(|r| r.state_machine_type == Some(state_machine))
        .collect();

    match candidates.as_slice() {
        [method] => Ok(*method),
        [] => {
            log::warn!("no async method owns state machine #{}", state_machine.0);
            Err(TraceError::InternalConsistency(format!(
                "no method on type #{} owns state machine #{}",
                outer.0, state_machine.0
            )))
        }
        many => {
            log::warn!(
                "{} async methods claim state machine #{}",
                many.len(),
                state_machine.0
            );
            Err(TraceError::InternalConsistency(format!(
                "{} methods on type #{} own state machine #{}",
                many.len(),
                outer.0,
                state_machine.0
            )))
        }
    }
}
