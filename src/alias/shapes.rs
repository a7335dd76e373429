//! Type shape predicates and the well-known alias table.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::TraceError;
use crate::metadata::{MetadataProvider, TypeHandle, TypeShape, require_type};

const TUPLE_PREFIX: &str = "System.Tuple";
const VALUE_TUPLE_PREFIX: &str = "System.ValueTuple";

/// Whether `ty` is a `System.Tuple` instance (or definition), optionally with
/// exactly `arity` generic arguments.
pub fn is_tuple_family(
    md: &dyn MetadataProvider,
    ty: TypeHandle,
    arity: Option<usize>,
) -> Result<bool, TraceError> {
    generic_family(md, ty, TUPLE_PREFIX, arity)
}

/// Whether `ty` is a `System.ValueTuple` instance (or definition), optionally
/// with exactly `arity` generic arguments.
pub fn is_value_tuple_family(
    md: &dyn MetadataProvider,
    ty: TypeHandle,
    arity: Option<usize>,
) -> Result<bool, TraceError> {
    generic_family(md, ty, VALUE_TUPLE_PREFIX, arity)
}

fn generic_family(
    md: &dyn MetadataProvider,
    ty: TypeHandle,
    prefix: &str,
    arity: Option<usize>,
) -> Result<bool, TraceError> {
    let info = require_type(md, ty)?;
    let TypeShape::Generic {
        definition,
        arguments,
    } = &info.shape
    else {
        return Ok(false);
    };

    let definition = match definition {
        Some(handle) => md.type_info(*handle),
        None => Some(info),
    };
    let in_family = definition
        .and_then(|d| d.full_name.as_deref())
        .is_some_and(|name| name.starts_with(prefix));

    Ok(in_family && arity.is_none_or(|n| arguments.len() == n))
}

fn well_known_table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            ("System.Void", "void"),
            ("System.Object", "object"),
            ("System.Boolean", "bool"),
            ("System.Byte", "byte"),
            ("System.SByte", "sbyte"),
            ("System.Char", "char"),
            ("System.Decimal", "decimal"),
            ("System.Double", "double"),
            ("System.Single", "float"),
            ("System.Int32", "int"),
            ("System.UInt32", "uint"),
            ("System.Int64", "long"),
            ("System.UInt64", "ulong"),
            ("System.Int16", "short"),
            ("System.UInt16", "ushort"),
            ("System.String", "string"),
        ])
    })
}

/// Keyword alias of a primitive framework type, looked up by full name.
pub fn well_known_alias(full_name: &str) -> Option<&'static str> {
    well_known_table().get(full_name).copied()
}
