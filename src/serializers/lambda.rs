//! Lambdas compiled from static field initializers.
//!
//! A lambda assigned to a static delegate field is emitted as
//! `<.cctor>b__N_M` on a closure class. The frame is printed as the field it
//! was stored in: `Action Ns.Owner.Field()`.

use std::collections::HashSet;

use crate::error::TraceError;
use crate::metadata::{FieldInfo, RawFrame, RoutineHandle, RoutineInfo, TypeHandle, TypeInfo};
use crate::naming::{NestedKind, decode};

use super::{FrameContext, declaring_type, qualify, resolve_with_alias};

const STATIC_INITIALIZER: &str = ".cctor";

pub(super) fn applies(routine: &RoutineInfo) -> bool {
    if !routine.is_method() {
        return false;
    }
    decode(&routine.name).is_ok_and(|name| {
        name.logical_name == STATIC_INITIALIZER
            && name.nested_kind == Some(NestedKind::ClosureMethod)
    })
}

pub(super) fn render(
    ctx: &FrameContext<'_>,
    frame: &RawFrame,
    handle: RoutineHandle,
    routine: &RoutineInfo,
) -> Result<String, TraceError> {
    let (owner_handle, field) = find_delegate_field(ctx, declaring_type(routine)?, handle)?;
    let delegate = ctx.type_alias(field.field_type)?;
    let name = decode(&field.name)?;

    // The owner is left unqualified when its alias starts with its simple
    // name rather than its namespace.
    let (owner, alias) = resolve_with_alias(ctx, owner_handle)?;
    let declaring = qualify(owner.namespace.as_deref(), alias, Some(owner.name.as_str()));

    let line_info = ctx.line_info(frame);
    if name.nested_kind == Some(NestedKind::AutoPropertyBackingField) {
        return Ok(format!(
            "{delegate} {declaring}.{}{line_info}",
            name.logical_name
        ));
    }

    let generics = ctx.generic_arguments(routine)?;
    let mut out = format!("{delegate} {declaring}.{}", name.logical_name);
    if let Some(nested) = name.nested() {
        out.push_str(&format!("()+{nested}"));
    }
    if !generics.is_empty() {
        out.push_str(&format!("<{generics}>"));
    }
    out.push_str("()");
    out.push_str(&line_info);
    Ok(out)
}

/// Walk from `start` outward through enclosing types looking for a field
/// whose delegate invokes `target`.
fn find_delegate_field<'a>(
    ctx: &FrameContext<'a>,
    start: TypeHandle,
    target: RoutineHandle,
) -> Result<(TypeHandle, &'a FieldInfo), TraceError> {
    let mut visited = HashSet::new();
    let mut current = Some(start);
    while let Some(handle) = current {
        if !visited.insert(handle) {
            log::warn!("enclosing types of #{} form a cycle", start.0);
            return Err(TraceError::InternalConsistency(format!(
                "enclosing type chain of type #{} loops back to #{}",
                start.0, handle.0
            )));
        }
        let Some(info) = ctx.md.type_info(handle) else {
            break;
        };
        if let Some(field) = delegate_field(info, target) {
            return Ok((handle, field));
        }
        current = info.declaring_type;
    }

    log::warn!("no delegate field targets lambda routine #{}", target.0);
    Err(TraceError::InternalConsistency(format!(
        "no delegate field holds lambda routine #{}",
        target.0
    )))
}

fn delegate_field(info: &TypeInfo, target: RoutineHandle) -> Option<&FieldInfo> {
    info.fields
        .iter()
        .find(|f| f.delegate_target == Some(target))
}
