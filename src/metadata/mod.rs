//! Reflection facts consumed by the engine.
//!
//! The engine never talks to a host introspection API directly. Adapters
//! publish what they know through [`MetadataProvider`]; [`MetadataTable`] is
//! the in-memory implementation used by snapshots and tests.
//!
//! Sub-modules:
//! - [`types`]: `TypeInfo`, `RoutineInfo`, `ParameterInfo` and friends
//! - [`frame`]: `RawFrame`
//! - [`table`]: `MetadataTable`

mod frame;
mod table;
mod types;


pub use frame::RawFrame;
pub use table::MetadataTable;
pub use types::{
    DefaultValue, FieldInfo, ParameterInfo, PropertyInfo, RoutineHandle, RoutineInfo, RoutineKind,
    TypeHandle, TypeInfo, TypeShape,
};

use crate::error::TraceError;

/// Read-only access to type and routine facts.
///
/// Implementations must be `Send + Sync` so one provider can serve
/// concurrent renders.
pub trait MetadataProvider: Send + Sync {
    /// Look up a type by handle.
    fn type_info(&self, handle: TypeHandle) -> Option<&TypeInfo>;

    /// Look up a routine by handle.
    fn routine(&self, handle: RoutineHandle) -> Option<&RoutineInfo>;

    /// Whether the routine carries the "do not show in stack traces" marker.
    fn is_hidden_in_trace(&self, handle: RoutineHandle) -> bool {
        self.routine(handle).is_some_and(|r| r.hidden_in_trace)
    }
}

/// Resolve a type handle, reporting `NullArgument` when the provider has no
/// entry for it.
pub fn require_type(
    md: &dyn MetadataProvider,
    handle: TypeHandle,
) -> Result<&TypeInfo, TraceError> {
    md.type_info(handle)
        .ok_or_else(|| TraceError::null(format!("type #{}", handle.0)))
}

/// Resolve a routine handle, reporting `NullArgument` when the provider has
/// no entry for it.
pub fn require_routine(
    md: &dyn MetadataProvider,
    handle: RoutineHandle,
) -> Result<&RoutineInfo, TraceError> {
    md.routine(handle)
        .ok_or_else(|| TraceError::null(format!("routine #{}", handle.0)))
}
