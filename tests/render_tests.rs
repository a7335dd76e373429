//! End-to-end rendering of the sample application's frames.

mod common;

use clr_trace::metadata::{RawFrame, RoutineHandle};
use clr_trace::serializers::{FrameContext, FrameSerializer, SerializerDispatcher};
use clr_trace::{RenderOptions, Resolvers, StackRenderer, TraceError};
use common::{ARGS, NAMESPACE, SampleApp, at_my_file};

fn render_one(app: &SampleApp, routine: RoutineHandle) -> String {
    let trace = StackRenderer::default()
        .render(&app.md, &[at_my_file(routine)])
        .unwrap();
    assert_eq!(trace.len(), 1);
    trace.frames()[0].to_string()
}

// -- Methods --

#[test]
fn test_method_cases() {
    let app = SampleApp::new();
    let cases = [
        (app.method_void, format!("void {ARGS}.MethodVoid() in MyFile:line 10")),
        (
            app.method_with_result,
            format!("int {ARGS}.MethodWithResult() in MyFile:line 10"),
        ),
        (
            app.local_method,
            format!("void {ARGS}.MethodWithLocalMethod()+LocalMethod() in MyFile:line 10"),
        ),
        (
            app.generic_method,
            format!("void {ARGS}.MethodWithGenericArguments<TValue>() in MyFile:line 10"),
        ),
        (
            app.method_with_arguments,
            format!("void {ARGS}.MethodWithArguments(int _) in MyFile:line 10"),
        ),
        (
            app.tuple_method,
            format!("void {ARGS}.MethodWithTuple((int id, string name) pair) in MyFile:line 10"),
        ),
        (
            app.indexer_getter,
            format!("string {ARGS}[int index] in MyFile:line 10"),
        ),
    ];
    for (routine, expected) in cases {
        assert_eq!(render_one(&app, routine), expected);
    }
}

// -- Async state machines --

#[test]
fn test_async_cases() {
    let app = SampleApp::new();
    assert_eq!(
        render_one(&app, app.task_move_next),
        format!("async Task {ARGS}.TaskWithNoReturnType() in MyFile:line 10")
    );
    assert_eq!(
        render_one(&app, app.task_of_int_move_next),
        format!("async Task<int> {ARGS}.TaskWithReturnType() in MyFile:line 10")
    );
}

// -- Lambdas --

#[test]
fn test_lambda_cases_repeat_namespace() {
    let app = SampleApp::new();
    assert_eq!(
        render_one(&app, app.action_lambda),
        format!("Action {NAMESPACE}.{ARGS}.Action() in MyFile:line 10")
    );
    assert_eq!(
        render_one(&app, app.func_lambda),
        format!("Func<int> {NAMESPACE}.{ARGS}.Func() in MyFile:line 10")
    );
    assert_eq!(
        render_one(&app, app.backing_field_lambda),
        format!("Action {NAMESPACE}.{ARGS}.AutoPropertyBackingField in MyFile:line 10")
    );
}

// -- Constructors --

#[test]
fn test_constructor_cases() {
    let app = SampleApp::new();
    assert_eq!(
        render_one(&app, app.generic_ctor),
        format!("new {ARGS}+ConstructorGeneric<TValue>() in MyFile:line 10")
    );
    assert_eq!(
        render_one(&app, app.ctor_with_arguments),
        format!("new {ARGS}+ConstructorWithArguments(int argument) in MyFile:line 10")
    );
    assert_eq!(
        render_one(&app, app.static_ctor),
        format!("static {ARGS}+ConstructorStatic() in MyFile:line 10")
    );
}

// -- Whole traces --

#[test]
fn test_full_trace_layout() {
    let app = SampleApp::new();
    let frames = vec![
        RawFrame::new(app.hidden_guard).at("Guard.cs", 4),
        RawFrame::new(app.local_method).at("Args.cs", 31),
        RawFrame::new(app.task_of_int_move_next).at("Args.cs", 22),
        RawFrame::new(app.static_ctor).at("Args.cs", 3),
    ];
    let trace = StackRenderer::default().render(&app.md, &frames).unwrap();

    let expected = [
        format!("   at void {ARGS}.MethodWithLocalMethod()+LocalMethod() in Args.cs:line 31"),
        format!("   at async Task<int> {ARGS}.TaskWithReturnType() in Args.cs:line 22"),
        format!("   at static {ARGS}+ConstructorStatic() in Args.cs:line 3"),
    ]
    .join("\n");
    assert_eq!(trace.to_string(), expected);
    assert!(!trace.to_string().ends_with('\n'));
}

#[test]
fn test_frames_without_source_location() {
    let app = SampleApp::new();
    let trace = StackRenderer::default()
        .render(&app.md, &[RawFrame::new(app.method_void)])
        .unwrap();
    assert_eq!(
        trace.to_string(),
        format!("   at void {ARGS}.MethodVoid() in :line 0")
    );
}

#[test]
fn test_every_sample_routine_is_claimed_by_expected_serializer() {
    let app = SampleApp::new();
    let resolvers = Resolvers::default();
    let ctx = FrameContext::new(&app.md, &resolvers);
    let dispatcher = SerializerDispatcher::default();

    let expectations = [
        (app.method_void, FrameSerializer::Method),
        (app.local_method, FrameSerializer::Method),
        (app.indexer_getter, FrameSerializer::Method),
        (app.task_move_next, FrameSerializer::AsyncState),
        (app.action_lambda, FrameSerializer::Lambda),
        (app.backing_field_lambda, FrameSerializer::Lambda),
        (app.static_ctor, FrameSerializer::Constructor),
    ];
    for (routine, serializer) in expectations {
        assert_eq!(
            dispatcher.create(&ctx, &RawFrame::new(routine)).unwrap(),
            serializer
        );
    }
}

#[test]
fn test_hidden_frames_only_shown_on_request() {
    let app = SampleApp::new();
    let frames = [at_my_file(app.hidden_guard), at_my_file(app.method_void)];

    let hidden = StackRenderer::default().render(&app.md, &frames).unwrap();
    assert_eq!(hidden.len(), 1);

    let shown = StackRenderer::new(
        Resolvers::default(),
        RenderOptions {
            show_hidden_frames: true,
            ..RenderOptions::default()
        },
    )
    .render(&app.md, &frames)
    .unwrap();
    assert_eq!(shown.len(), 2);
    assert_eq!(
        shown.frames()[0].as_str(),
        "void Sample.Runtime.Guard.ThrowIfNull() in MyFile:line 10"
    );
    assert_eq!(shown.frames()[1], hidden.frames()[0]);
}

#[test]
fn test_one_bad_frame_fails_the_trace() {
    let mut app = SampleApp::new();
    if let Some(info) = app.md.type_mut(app.args) {
        info.fields.clear();
    }
    let frames = [at_my_file(app.method_void), at_my_file(app.action_lambda)];
    assert!(matches!(
        StackRenderer::default().render(&app.md, &frames),
        Err(TraceError::InternalConsistency(_))
    ));
}
