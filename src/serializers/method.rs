//! Ordinary methods, local functions and indexer accessors.

use crate::error::TraceError;
use crate::metadata::{RawFrame, RoutineHandle, RoutineInfo, require_type};
use crate::naming::decode;

use super::{FrameContext, declaring_type};

const INDEXER_GETTER: &str = "get_Item";
const INDEXER_SETTER: &str = "set_Item";

pub(super) fn applies(routine: &RoutineInfo) -> bool {
    routine.is_method()
}

pub(super) fn render(
    ctx: &FrameContext<'_>,
    frame: &RawFrame,
    handle: RoutineHandle,
    routine: &RoutineInfo,
) -> Result<String, TraceError> {
    let return_type = ctx.return_alias(routine)?;
    let owner = declaring_type(routine)?;
    let declaring = ctx.type_alias(owner)?;
    let parameters = ctx.parameters(routine)?;

    if is_indexer(ctx, handle, routine)? {
        return Ok(format!(
            "{return_type} {declaring}[{parameters}]{}",
            ctx.line_info(frame)
        ));
    }

    let name = decode(&routine.name)?;
    let generics = ctx.generic_arguments(routine)?;

    let mut out = format!("{return_type} {declaring}.{}", name.logical_name);
    if let Some(nested) = name.nested() {
        out.push_str(&format!("()+{nested}"));
    }
    if !generics.is_empty() {
        out.push_str(&format!("<{generics}>"));
    }
    out.push_str(&format!("({parameters})"));
    out.push_str(&ctx.line_info(frame));
    Ok(out)
}

/// `get_Item`/`set_Item` bound to a declared property that takes index
/// parameters.
fn is_indexer(
    ctx: &FrameContext<'_>,
    handle: RoutineHandle,
    routine: &RoutineInfo,
) -> Result<bool, TraceError> {
    if routine.name != INDEXER_GETTER && routine.name != INDEXER_SETTER {
        return Ok(false);
    }
    let Some(owner) = routine.declaring_type else {
        return Ok(false);
    };
    Ok(require_type(ctx.md, owner)?
        .properties
        .iter()
        .find(|p| p.is_accessor(handle))
        .is_some_and(|p| p.index_parameter_count > 0))
}
