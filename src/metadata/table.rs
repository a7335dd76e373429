//! In-memory [`MetadataProvider`] built by adapters and tests.

use serde::{Deserialize, Serialize};

use super::MetadataProvider;
use super::types::{FieldInfo, RoutineHandle, RoutineInfo, RoutineKind, TypeHandle, TypeInfo, TypeShape};

/// Namespace of framework types.
const SYSTEM_NAMESPACE: &str = "System";

/// Arena of types and routines addressed by handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTable {
    #[serde(default)]
    types: Vec<TypeInfo>,
    #[serde(default)]
    routines: Vec<RoutineInfo>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn routine_count(&self) -> usize {
        self.routines.len()
    }

    /// Add a type and return its handle.
    pub fn add_type(&mut self, info: TypeInfo) -> TypeHandle {
        let handle = TypeHandle(self.types.len() as u32);
        self.types.push(info);
        handle
    }

    /// Add a routine and return its handle.
    ///
    /// Methods are also listed on their declaring type, matching what a
    /// declared-only method query would return; constructors are not.
    pub fn add_routine(&mut self, info: RoutineInfo) -> RoutineHandle {
        let handle = RoutineHandle(self.routines.len() as u32);
        if info.kind == RoutineKind::Method
            && let Some(owner) = info.declaring_type.and_then(|t| self.type_mut(t))
        {
            owner.methods.push(handle);
        }
        self.routines.push(info);
        handle
    }

    pub fn type_mut(&mut self, handle: TypeHandle) -> Option<&mut TypeInfo> {
        self.types.get_mut(handle.0 as usize)
    }

    pub fn routine_mut(&mut self, handle: RoutineHandle) -> Option<&mut RoutineInfo> {
        self.routines.get_mut(handle.0 as usize)
    }

    /// First type with the given full name.
    pub fn find_type(&self, full_name: &str) -> Option<TypeHandle> {
        self.types
            .iter()
            .position(|t| t.full_name.as_deref() == Some(full_name))
            .map(|i| TypeHandle(i as u32))
    }

    /// A type in the `System` namespace (e.g. `Int32`, ``List`1``), reusing
    /// an existing entry with the same full name.
    pub fn system_type(&mut self, name: &str) -> TypeHandle {
        let full_name = format!("{SYSTEM_NAMESPACE}.{name}");
        self.find_type(&full_name)
            .unwrap_or_else(|| self.add_type(TypeInfo::new(Some(SYSTEM_NAMESPACE), name)))
    }

    /// A plain type in an arbitrary namespace.
    pub fn named_type(&mut self, namespace: Option<&str>, name: &str) -> TypeHandle {
        self.add_type(TypeInfo::new(namespace, name))
    }

    /// A type nested in `outer`; its full name uses the `Outer+Inner` form.
    pub fn nested_type(&mut self, outer: TypeHandle, name: &str) -> TypeHandle {
        let (namespace, outer_full) = match self.type_info(outer) {
            Some(info) => (info.namespace.clone(), info.full_name.clone()),
            None => (None, None),
        };
        let mut info = TypeInfo::new(None, name);
        info.namespace = namespace;
        info.full_name = outer_full.map(|f| format!("{f}+{name}"));
        info.declaring_type = Some(outer);
        self.add_type(info)
    }

    /// A generic parameter such as `T`; it has no full name.
    pub fn generic_parameter(&mut self, name: &str) -> TypeHandle {
        let mut info = TypeInfo::new(None, name);
        info.full_name = None;
        self.add_type(info)
    }

    /// An open generic definition with fresh generic parameters.
    ///
    /// `name` carries the arity suffix, e.g. ``Dictionary`2``.
    pub fn generic_definition(
        &mut self,
        namespace: Option<&str>,
        name: &str,
        parameters: &[&str],
    ) -> TypeHandle {
        let arguments = parameters
            .iter()
            .map(|p| self.generic_parameter(p))
            .collect();
        let mut info = TypeInfo::new(namespace, name);
        info.shape = TypeShape::Generic {
            definition: None,
            arguments,
        };
        self.add_type(info)
    }

    /// A closed generic type built from `definition`.
    pub fn generic_instance(&mut self, definition: TypeHandle, arguments: &[TypeHandle]) -> TypeHandle {
        let mut info = self.derived_from(definition, "");
        info.declaring_type = self.type_info(definition).and_then(|d| d.declaring_type);
        info.shape = TypeShape::Generic {
            definition: Some(definition),
            arguments: arguments.to_vec(),
        };
        self.add_type(info)
    }

    /// An array of `element` with `rank` dimensions.
    pub fn array_of(&mut self, element: TypeHandle, rank: u32) -> TypeHandle {
        let suffix = format!("[{}]", ",".repeat(rank.saturating_sub(1) as usize));
        let mut info = self.derived_from(element, &suffix);
        info.shape = TypeShape::Array { element, rank };
        self.add_type(info)
    }

    /// A by-reference view of `element`.
    pub fn by_ref_of(&mut self, element: TypeHandle) -> TypeHandle {
        let mut info = self.derived_from(element, "&");
        info.shape = TypeShape::ByRef { element };
        self.add_type(info)
    }

    /// `underlying?`.
    pub fn nullable_of(&mut self, underlying: TypeHandle) -> TypeHandle {
        let mut info = TypeInfo::new(Some(SYSTEM_NAMESPACE), "Nullable`1");
        info.shape = TypeShape::Nullable { underlying };
        self.add_type(info)
    }

    /// Declare a field on `owner`. Unknown owners are ignored.
    pub fn add_field(&mut self, owner: TypeHandle, field: FieldInfo) {
        if let Some(info) = self.type_mut(owner) {
            info.fields.push(field);
        }
    }

    /// Names of a new type derived from `base` by appending `suffix`.
    fn derived_from(&self, base: TypeHandle, suffix: &str) -> TypeInfo {
        match self.type_info(base) {
            Some(b) => {
                let mut info = TypeInfo::new(None, format!("{}{suffix}", b.name));
                info.namespace = b.namespace.clone();
                info.full_name = b.full_name.as_ref().map(|f| format!("{f}{suffix}"));
                info
            }
            None => TypeInfo::new(None, suffix),
        }
    }
}

impl MetadataProvider for MetadataTable {
    fn type_info(&self, handle: TypeHandle) -> Option<&TypeInfo> {
        self.types.get(handle.0 as usize)
    }

    fn routine(&self, handle: RoutineHandle) -> Option<&RoutineInfo> {
        self.routines.get(handle.0 as usize)
    }
}
