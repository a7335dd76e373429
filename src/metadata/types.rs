//! Fact table describing types and routines, as reported by host reflection.
//!
//! Every struct here is plain data: the engine reads it, never mutates it.
//! Cross references use [`TypeHandle`] / [`RoutineHandle`] indices so that
//! cyclic relations (a type listing its methods, a method naming its
//! declaring type) need no shared ownership.

use serde::{Deserialize, Serialize};

/// Index of a type inside a metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeHandle(pub u32);

/// Index of a routine (method or constructor) inside a metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutineHandle(pub u32);

/// Structural shape of a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// Ordinary, primitive or generic-parameter type.
    #[default]
    Plain,
    /// `element[]` with `rank` dimensions.
    Array { element: TypeHandle, rank: u32 },
    /// A by-reference (`ref`/`out`/`in`) view of `element`.
    ByRef { element: TypeHandle },
    /// `underlying?` for value types.
    Nullable { underlying: TypeHandle },
    /// Generic type. `definition` is `None` when this type is itself the open
    /// definition, in which case `arguments` are its generic parameters.
    Generic {
        #[serde(default)]
        definition: Option<TypeHandle>,
        arguments: Vec<TypeHandle>,
    },
}

/// A field declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Raw field name (auto-property backing fields keep their synthesized name).
    pub name: String,
    pub field_type: TypeHandle,
    /// Routine invoked by the delegate currently stored in the field, if any.
    #[serde(default)]
    pub delegate_target: Option<RoutineHandle>,
}

/// A property declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(default)]
    pub getter: Option<RoutineHandle>,
    #[serde(default)]
    pub setter: Option<RoutineHandle>,
    /// Number of index parameters; non-zero for indexers.
    #[serde(default)]
    pub index_parameter_count: usize,
}

impl PropertyInfo {
    /// Whether `routine` is this property's getter or setter.
    pub fn is_accessor(&self, routine: RoutineHandle) -> bool {
        self.getter == Some(routine) || self.setter == Some(routine)
    }
}

/// A type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Simple name, including any backtick arity suffix (e.g. ``List`1``).
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Fully qualified name. Absent for generic parameters.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub shape: TypeShape,
    /// Enclosing type of a nested type.
    #[serde(default)]
    pub declaring_type: Option<TypeHandle>,
    /// Full names of implemented interfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    /// Declared methods (constructors excluded).
    #[serde(default)]
    pub methods: Vec<RoutineHandle>,
}

impl TypeInfo {
    /// A plain type; the full name is derived from namespace and name.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        let name = name.into();
        let full_name = match namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
            _ => name.clone(),
        };
        Self {
            name,
            namespace: namespace.map(str::to_string),
            full_name: Some(full_name),
            shape: TypeShape::Plain,
            declaring_type: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Whether the type is a generic instance or an open generic definition.
    pub fn is_generic(&self) -> bool {
        matches!(self.shape, TypeShape::Generic { .. })
    }

    /// Generic arguments (or parameters, for an open definition).
    pub fn generic_arguments(&self) -> &[TypeHandle] {
        match &self.shape {
            TypeShape::Generic { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Whether the type implements the interface with the given full name.
    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|i| i == interface)
    }
}

/// Whether a routine is an ordinary method or a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineKind {
    Method,
    Constructor,
}

/// A declared default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// Declared as `null` (never rendered).
    Null,
    /// Display form of a non-null default.
    Literal(String),
}

/// A routine parameter, or a routine's return value (which has no name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    #[serde(default)]
    pub name: Option<String>,
    pub parameter_type: TypeHandle,
    /// Marked as a variadic `params` array.
    #[serde(default)]
    pub is_params_array: bool,
    #[serde(default)]
    pub is_out: bool,
    #[serde(default)]
    pub is_in: bool,
    /// Carries the dynamic-typing marker.
    #[serde(default)]
    pub is_dynamic: bool,
    /// Tuple element names, positionally matched to the tuple's arguments.
    #[serde(default)]
    pub tuple_element_names: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub default_value: Option<DefaultValue>,
}

impl ParameterInfo {
    /// A named parameter with no modifiers.
    pub fn new(name: impl Into<String>, parameter_type: TypeHandle) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::returning(parameter_type)
        }
    }

    /// A return parameter: no name, no modifiers.
    pub fn returning(parameter_type: TypeHandle) -> Self {
        Self {
            name: None,
            parameter_type,
            is_params_array: false,
            is_out: false,
            is_in: false,
            is_dynamic: false,
            tuple_element_names: None,
            default_value: None,
        }
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineInfo {
    /// Raw (possibly compiler-synthesized) name.
    pub name: String,
    pub kind: RoutineKind,
    #[serde(default)]
    pub declaring_type: Option<TypeHandle>,
    /// Type the routine was obtained from; usually the declaring type.
    #[serde(default)]
    pub reflected_type: Option<TypeHandle>,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
    #[serde(default)]
    pub generic_arguments: Vec<TypeHandle>,
    #[serde(default)]
    pub is_generic_method: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Absent for constructors.
    #[serde(default)]
    pub return_parameter: Option<ParameterInfo>,
    /// Carries the "do not show in stack traces" marker.
    #[serde(default)]
    pub hidden_in_trace: bool,
    /// State machine type named by the compiler-attached async marker.
    #[serde(default)]
    pub state_machine_type: Option<TypeHandle>,
}

impl RoutineInfo {
    /// An instance method on `declaring_type` returning `return_type`.
    pub fn method(
        name: impl Into<String>,
        declaring_type: TypeHandle,
        return_type: TypeHandle,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RoutineKind::Method,
            declaring_type: Some(declaring_type),
            reflected_type: Some(declaring_type),
            parameters: Vec::new(),
            generic_arguments: Vec::new(),
            is_generic_method: false,
            is_static: false,
            return_parameter: Some(ParameterInfo::returning(return_type)),
            hidden_in_trace: false,
            state_machine_type: None,
        }
    }

    /// An instance (`.ctor`) or static (`.cctor`) constructor.
    pub fn constructor(declaring_type: TypeHandle, is_static: bool) -> Self {
        Self {
            name: if is_static { ".cctor" } else { ".ctor" }.to_string(),
            kind: RoutineKind::Constructor,
            declaring_type: Some(declaring_type),
            reflected_type: Some(declaring_type),
            parameters: Vec::new(),
            generic_arguments: Vec::new(),
            is_generic_method: false,
            is_static,
            return_parameter: None,
            hidden_in_trace: false,
            state_machine_type: None,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == RoutineKind::Constructor
    }

    pub fn is_method(&self) -> bool {
        self.kind == RoutineKind::Method
    }
}
