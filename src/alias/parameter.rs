//! `ParameterAliasResolver`: one parameter as it would be declared.

use crate::error::TraceError;
use crate::metadata::{DefaultValue, MetadataProvider, ParameterInfo, TypeShape, require_type};

use super::shapes::is_value_tuple_family;
use super::type_alias::TypeAliasResolver;

/// Renders a parameter as `[params ][out |in |ref ]type[ name][ = default]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterAliasResolver;

impl ParameterAliasResolver {
    /// Display form of `parameter`.
    ///
    /// # Errors
    ///
    /// `NullArgument` when the parameter's type (or a type it refers to) is
    /// not known to `md`.
    pub fn alias(
        &self,
        md: &dyn MetadataProvider,
        types: &TypeAliasResolver,
        parameter: &ParameterInfo,
    ) -> Result<String, TraceError> {
        let ty = require_type(md, parameter.parameter_type)?;
        let mut out = String::new();

        if parameter.is_params_array {
            out.push_str("params ");
        }
        if parameter.is_out {
            out.push_str("out ");
        } else if parameter.is_in {
            out.push_str("in ");
        } else if matches!(ty.shape, TypeShape::ByRef { .. }) {
            out.push_str("ref ");
        }

        out.push_str(&self.type_segment(md, types, parameter)?);

        if let Some(name) = parameter.name.as_deref().filter(|n| !n.trim().is_empty()) {
            out.push(' ');
            out.push_str(name);
        }
        if let Some(DefaultValue::Literal(value)) = &parameter.default_value {
            out.push_str(" = ");
            out.push_str(value);
        }
        Ok(out)
    }

    fn type_segment(
        &self,
        md: &dyn MetadataProvider,
        types: &TypeAliasResolver,
        parameter: &ParameterInfo,
    ) -> Result<String, TraceError> {
        if parameter.is_dynamic {
            return Ok("dynamic".to_string());
        }

        let ty = parameter.parameter_type;
        if !is_value_tuple_family(md, ty, None)? {
            return types.alias(md, ty);
        }

        let names = parameter.tuple_element_names.as_deref().unwrap_or_default();
        let elements = require_type(md, ty)?
            .generic_arguments()
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let alias = types.alias(md, *arg)?;
                Ok(match names.get(i).and_then(Option::as_deref) {
                    Some(name) if !name.trim().is_empty() => format!("{alias} {name}"),
                    _ => alias,
                })
            })
            .collect::<Result<Vec<_>, TraceError>>()?;
        Ok(format!("({})", elements.join(", ")))
    }
}
