//! `TypeAliasResolver`: type descriptor to source-like string.

use crate::error::TraceError;
use crate::metadata::{MetadataProvider, TypeHandle, TypeInfo, TypeShape, require_type};
use crate::naming::{decode, strip_arity};

use super::shapes::well_known_alias;

/// Framework namespace prefix used when none is configured.
pub const DEFAULT_SYSTEM_PREFIX: &str = "System.";

/// Turns type descriptors into the names a developer would write:
/// `int?`, `string[,]`, `List<int>`, `Outer.Inner`.
#[derive(Debug, Clone)]
pub struct TypeAliasResolver {
    system_prefix: String,
}

impl Default for TypeAliasResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PREFIX)
    }
}

impl TypeAliasResolver {
    pub fn new(system_prefix: impl Into<String>) -> Self {
        Self {
            system_prefix: system_prefix.into(),
        }
    }

    pub fn system_prefix(&self) -> &str {
        &self.system_prefix
    }

    /// Display alias of `ty`.
    ///
    /// # Errors
    ///
    /// `NullArgument` when `ty` or any type it refers to is not known to `md`;
    /// `InternalConsistency` when a type's shape refers back to itself.
    pub fn alias(&self, md: &dyn MetadataProvider, ty: TypeHandle) -> Result<String, TraceError> {
        self.alias_within(md, ty, &mut Vec::new())
    }

    /// `path` holds the types currently being aliased, outermost first.
    fn alias_within(
        &self,
        md: &dyn MetadataProvider,
        ty: TypeHandle,
        path: &mut Vec<TypeHandle>,
    ) -> Result<String, TraceError> {
        if path.contains(&ty) {
            log::warn!("type #{} is part of a shape cycle", ty.0);
            return Err(TraceError::InternalConsistency(format!(
                "type #{} refers back to itself",
                ty.0
            )));
        }
        path.push(ty);
        let alias = self.shape_alias(md, ty, path);
        path.pop();
        alias
    }

    fn shape_alias(
        &self,
        md: &dyn MetadataProvider,
        ty: TypeHandle,
        path: &mut Vec<TypeHandle>,
    ) -> Result<String, TraceError> {
        let info = require_type(md, ty)?;

        if let TypeShape::Nullable { underlying } = info.shape {
            let mut alias = self.alias_within(md, underlying, path)?;
            alias.push('?');
            return Ok(alias);
        }

        match &info.shape {
            TypeShape::Array { element, rank } => {
                let element = self.alias_within(md, *element, path)?;
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                Ok(format!("{element}[{commas}]"))
            }
            TypeShape::Generic {
                definition,
                arguments,
            } => {
                let definition = match definition {
                    Some(handle) => require_type(md, *handle)?,
                    None => info,
                };
                let name = self.named_alias(md, definition, path)?;
                let arguments = arguments
                    .iter()
                    .map(|arg| self.alias_within(md, *arg, path))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{name}<{}>", arguments.join(", ")))
            }
            _ => self.named_alias(md, info, path),
        }
    }

    /// Alias of a non-array, non-generic type, or of a generic definition's
    /// name.
    fn named_alias(
        &self,
        md: &dyn MetadataProvider,
        info: &TypeInfo,
        path: &mut Vec<TypeHandle>,
    ) -> Result<String, TraceError> {
        if let TypeShape::ByRef { element } = info.shape {
            return self.alias_within(md, element, path);
        }

        if let Some(full_name) = info.full_name.as_deref() {
            if let Some(keyword) = well_known_alias(full_name) {
                log::trace!("alias {full_name}: keyword {keyword}");
                return Ok(keyword.to_string());
            }
            if full_name.starts_with(&self.system_prefix) {
                log::trace!("alias {full_name}: framework type");
                return Ok(strip_arity(&info.name).to_string());
            }
        }

        let raw = info.full_name.as_deref().unwrap_or(&info.name);
        let decoded = decode(raw)?;
        Ok(match decoded.nested() {
            Some(nested) => format!("{}.{nested}", decoded.logical_name),
            None => decoded.logical_name,
        })
    }
}
