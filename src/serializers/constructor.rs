//! Instance (`new Type(...)`) and static (`static Type()`) constructors.

use crate::error::TraceError;
use crate::metadata::{RawFrame, RoutineInfo};

use super::{FrameContext, declaring_type, qualify, resolve_with_alias};

pub(super) fn applies(routine: &RoutineInfo) -> bool {
    routine.is_constructor()
}

pub(super) fn render(
    ctx: &FrameContext<'_>,
    frame: &RawFrame,
    routine: &RoutineInfo,
) -> Result<String, TraceError> {
    let (owner, alias) = resolve_with_alias(ctx, declaring_type(routine)?)?;
    let namespace = owner.namespace.as_deref();
    let declaring = qualify(namespace, alias, namespace);
    let generics = ctx.generic_arguments(routine)?;
    let parameters = ctx.parameters(routine)?;

    let mut out = String::from(if routine.is_static { "static " } else { "new " });
    out.push_str(&declaring);
    if !generics.is_empty() {
        out.push_str(&format!("<{generics}>"));
    }
    out.push_str(&format!("({parameters})"));
    out.push_str(&ctx.line_info(frame));
    Ok(out)
}
