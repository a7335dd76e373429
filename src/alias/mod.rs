//! Source-like display names for types and parameters.
//!
//! Sub-modules:
//! - [`shapes`]: tuple family predicates and the well-known alias table
//! - [`type_alias`]: `TypeAliasResolver`
//! - [`parameter`]: `ParameterAliasResolver`

pub mod shapes;
mod parameter;
mod type_alias;


pub use parameter::ParameterAliasResolver;
pub use type_alias::{DEFAULT_SYSTEM_PREFIX, TypeAliasResolver};

/// The resolvers a render needs, constructed once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct Resolvers {
    pub types: TypeAliasResolver,
    pub parameters: ParameterAliasResolver,
}

impl Resolvers {
    /// Resolvers treating `system_prefix` as the framework namespace prefix.
    pub fn with_system_prefix(system_prefix: impl Into<String>) -> Self {
        Self {
            types: TypeAliasResolver::new(system_prefix),
            parameters: ParameterAliasResolver,
        }
    }
}
