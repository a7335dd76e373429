//! Decoding of compiler-synthesized routine and type names.
//!
//! Synthesized names follow `<Outer>tag__Inner|suffix`, where the single
//! letter `tag` says why the name was synthesized and `|suffix` is an
//! optional ordinal. Examples:
//!
//! - `<Main>b__0_0`: a lambda inside `Main`
//! - `<Run>g__Helper|1_0`: local function `Helper` inside `Run`
//! - `<Name>k__BackingField`: backing field of auto-property `Name`
//! - `<Program>$`: a top-level entry point

use crate::error::TraceError;

const NESTED_MARKER: &str = "__";

/// Why a routine name was synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedKind {
    /// Tag `b`: closure or lambda body.
    ClosureMethod,
    /// Tag `g`: local function.
    LocalFunction,
    /// Tag `k`: auto-property backing field.
    AutoPropertyBackingField,
}

impl NestedKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "b" => Some(NestedKind::ClosureMethod),
            "g" => Some(NestedKind::LocalFunction),
            "k" => Some(NestedKind::AutoPropertyBackingField),
            _ => None,
        }
    }
}

/// A raw name split into its logical parts.
///
/// `nested_kind` is only ever set together with `nested_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeconstructedName {
    pub logical_name: String,
    pub nested_name: Option<String>,
    pub nested_kind: Option<NestedKind>,
}

impl DeconstructedName {
    fn plain(logical_name: &str) -> Self {
        Self {
            logical_name: strip_arity(logical_name).to_string(),
            nested_name: None,
            nested_kind: None,
        }
    }

    /// Nested name, if present and not blank.
    pub fn nested(&self) -> Option<&str> {
        self.nested_name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Drop a trailing backtick arity suffix: ``List`1`` becomes `List`.
pub fn strip_arity(name: &str) -> &str {
    match name.rfind('`') {
        Some(tick) => &name[..tick],
        None => name,
    }
}

/// Split a raw synthesized name into logical name, nested name and kind.
///
/// Unknown tags and a missing `|` are tolerated: they yield `nested_kind =
/// None` and an end-of-string boundary respectively.
///
/// # Errors
///
/// `InvalidArgument` when `raw` is empty or whitespace.
pub fn decode(raw: &str) -> Result<DeconstructedName, TraceError> {
    if raw.trim().is_empty() {
        return Err(TraceError::InvalidArgument(
            "raw name must not be empty or whitespace".to_string(),
        ));
    }

    let Some(close) = raw.find('>') else {
        return Ok(DeconstructedName::plain(raw));
    };

    let open = raw[..close].rfind('<').map_or(0, |i| i + 1);
    let logical = DeconstructedName::plain(&raw[open..close]);

    let Some(marker) = raw[close..].find(NESTED_MARKER).map(|i| close + i) else {
        return Ok(logical);
    };

    // The tag sits between the last '>' before the marker and the marker.
    let tag_start = raw[..marker].rfind('>').unwrap_or(close) + 1;
    let nested_kind = NestedKind::from_tag(&raw[tag_start..marker]);

    let nested_start = marker + NESTED_MARKER.len();
    let nested_end = raw[nested_start..]
        .find('|')
        .map_or(raw.len(), |i| nested_start + i);
    let nested_name = strip_arity(&raw[nested_start..nested_end]).to_string();

    Ok(DeconstructedName {
        logical_name: logical.logical_name,
        nested_name: Some(nested_name),
        nested_kind,
    })
}
