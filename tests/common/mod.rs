//! Shared integration test helpers for clr-trace.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{SampleApp, at_my_file};
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use clr_trace::metadata::{
    FieldInfo, MetadataTable, ParameterInfo, PropertyInfo, RawFrame, RoutineHandle, RoutineInfo,
    TypeHandle, TypeShape,
};

pub const NAMESPACE: &str = "Sample.Tests";
/// Alias of the `Args` fixture type.
pub const ARGS: &str = "Sample.Tests.SerializerTests+Args";
pub const ASYNC_STATE_MACHINE: &str = "System.Runtime.CompilerServices.IAsyncStateMachine";

/// A frame reported at `MyFile:10`.
pub fn at_my_file(routine: RoutineHandle) -> RawFrame {
    RawFrame::new(routine).at("MyFile", 10)
}

/// Metadata for a small application: a `SerializerTests+Args` class with one
/// routine per rendering case.
pub struct SampleApp {
    pub md: MetadataTable,
    pub args: TypeHandle,

    pub method_void: RoutineHandle,
    pub method_with_result: RoutineHandle,
    pub local_method: RoutineHandle,
    pub generic_method: RoutineHandle,
    pub method_with_arguments: RoutineHandle,
    pub tuple_method: RoutineHandle,
    pub indexer_getter: RoutineHandle,
    pub hidden_guard: RoutineHandle,

    pub task_move_next: RoutineHandle,
    pub task_of_int_move_next: RoutineHandle,

    pub action_lambda: RoutineHandle,
    pub func_lambda: RoutineHandle,
    pub backing_field_lambda: RoutineHandle,

    pub generic_ctor: RoutineHandle,
    pub ctor_with_arguments: RoutineHandle,
    pub static_ctor: RoutineHandle,
}

impl SampleApp {
    pub fn new() -> Self {
        let mut md = MetadataTable::new();
        let void = md.system_type("Void");
        let int = md.system_type("Int32");
        let string = md.system_type("String");
        let action = md.system_type("Action");
        let func = md.generic_definition(Some("System"), "Func`1", &["TResult"]);
        let func_int = md.generic_instance(func, &[int]);
        let task = md.named_type(Some("System.Threading.Tasks"), "Task");
        let task_def =
            md.generic_definition(Some("System.Threading.Tasks"), "Task`1", &["TResult"]);
        let task_int = md.generic_instance(task_def, &[int]);
        let value_tuple = md.generic_definition(Some("System"), "ValueTuple`2", &["T1", "T2"]);
        let pair = md.generic_instance(value_tuple, &[int, string]);

        let tests = md.named_type(Some(NAMESPACE), "SerializerTests");
        let args = md.nested_type(tests, "Args");

        // -- Methods --
        let method_void = md.add_routine(RoutineInfo::method("MethodVoid", args, void));
        let method_with_result = md.add_routine(RoutineInfo::method("MethodWithResult", args, int));
        let local_method = md.add_routine(RoutineInfo::method(
            "<MethodWithLocalMethod>g__LocalMethod|0_0",
            args,
            void,
        ));

        let t_value = md.generic_parameter("TValue");
        let mut generic = RoutineInfo::method("MethodWithGenericArguments", args, void);
        generic.is_generic_method = true;
        generic.generic_arguments = vec![t_value];
        let generic_method = md.add_routine(generic);

        let mut with_arguments = RoutineInfo::method("MethodWithArguments", args, void);
        with_arguments.parameters.push(ParameterInfo::new("_", int));
        let method_with_arguments = md.add_routine(with_arguments);

        let mut tuple = RoutineInfo::method("MethodWithTuple", args, void);
        let mut tuple_param = ParameterInfo::new("pair", pair);
        tuple_param.tuple_element_names = Some(vec![Some("id".to_string()), Some("name".to_string())]);
        tuple.parameters.push(tuple_param);
        let tuple_method = md.add_routine(tuple);

        let mut getter = RoutineInfo::method("get_Item", args, string);
        getter.parameters.push(ParameterInfo::new("index", int));
        let indexer_getter = md.add_routine(getter);
        if let Some(info) = md.type_mut(args) {
            info.properties.push(PropertyInfo {
                name: "Item".to_string(),
                getter: Some(indexer_getter),
                setter: None,
                index_parameter_count: 1,
            });
        }

        let guard_type = md.named_type(Some("Sample.Runtime"), "Guard");
        let mut guard = RoutineInfo::method("ThrowIfNull", guard_type, void);
        guard.is_static = true;
        guard.hidden_in_trace = true;
        let hidden_guard = md.add_routine(guard);

        // -- Async state machines --
        let task_move_next = add_async(&mut md, args, "TaskWithNoReturnType", 1, task, void);
        let task_of_int_move_next =
            add_async(&mut md, args, "TaskWithReturnType", 2, task_int, void);

        // -- Lambdas in static fields --
        let closure = md.nested_type(args, "<>c");
        let action_lambda = md.add_routine(RoutineInfo::method("<.cctor>b__9_0", closure, void));
        let func_lambda = md.add_routine(RoutineInfo::method("<.cctor>b__9_1", closure, int));
        let backing_field_lambda =
            md.add_routine(RoutineInfo::method("<.cctor>b__9_2", closure, void));
        for (name, field_type, target) in [
            ("Action", action, action_lambda),
            ("Func", func_int, func_lambda),
            ("<AutoPropertyBackingField>k__BackingField", action, backing_field_lambda),
        ] {
            md.add_field(
                args,
                FieldInfo {
                    name: name.to_string(),
                    field_type,
                    delegate_target: Some(target),
                },
            );
        }

        // -- Constructors --
        let generic_owner = md.nested_type(args, "ConstructorGeneric`1");
        let t_owner = md.generic_parameter("TValue");
        if let Some(info) = md.type_mut(generic_owner) {
            info.shape = TypeShape::Generic {
                definition: None,
                arguments: vec![t_owner],
            };
        }
        let generic_ctor = md.add_routine(RoutineInfo::constructor(generic_owner, false));

        let with_args_owner = md.nested_type(args, "ConstructorWithArguments");
        let mut ctor = RoutineInfo::constructor(with_args_owner, false);
        ctor.parameters.push(ParameterInfo::new("argument", int));
        let ctor_with_arguments = md.add_routine(ctor);

        let static_owner = md.nested_type(args, "ConstructorStatic");
        let static_ctor = md.add_routine(RoutineInfo::constructor(static_owner, true));

        Self {
            md,
            args,
            method_void,
            method_with_result,
            local_method,
            generic_method,
            method_with_arguments,
            tuple_method,
            indexer_getter,
            hidden_guard,
            task_move_next,
            task_of_int_move_next,
            action_lambda,
            func_lambda,
            backing_field_lambda,
            generic_ctor,
            ctor_with_arguments,
            static_ctor,
        }
    }
}

impl Default for SampleApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Add an async method `name` on `owner` returning `returns`, plus its state
/// machine `<name>d__{ordinal}`. Returns the state machine's `MoveNext`.
fn add_async(
    md: &mut MetadataTable,
    owner: TypeHandle,
    name: &str,
    ordinal: u32,
    returns: TypeHandle,
    void: TypeHandle,
) -> RoutineHandle {
    let state_machine = md.nested_type(owner, &format!("<{name}>d__{ordinal}"));
    if let Some(info) = md.type_mut(state_machine) {
        info.interfaces.push(ASYNC_STATE_MACHINE.to_string());
    }
    let mut method = RoutineInfo::method(name, owner, returns);
    method.state_machine_type = Some(state_machine);
    md.add_routine(method);
    md.add_routine(RoutineInfo::method("MoveNext", state_machine, void))
}
