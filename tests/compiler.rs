//! Full-pipeline tests: dependency resolution, step identifier assignment,
//! navigation rewriting and artifact persistence.
mod common;
use common::*;
use flowc::prelude::*;

#[test]
fn flow_compiles_to_an_execution_plan() {
    let artifact = compile(
        &greeting_flow(),
        &[print_message_operation(), send_mail_operation()],
    )
    .expect("compilation should succeed");

    let plan = &artifact.execution_plan;
    assert_eq!(plan.name, "greeting_flow");
    assert_eq!(plan.entry_id, 1);
    assert_eq!(plan.steps.len(), 3);

    let say_hello = &plan.steps[&1];
    assert_eq!(say_hello.name, "say_hello");
    match &say_hello.action {
        BoundAction::Operation { reference, action } => {
            assert_eq!(reference, "user.ops.print_message");
            assert_eq!(action.kind, "python_action");
        }
        other => panic!("expected an operation action, got: {:?}", other),
    }
    assert_eq!(say_hello.arguments.len(), 1);
    assert_eq!(say_hello.arguments[0].name, "message");
    assert_eq!(say_hello.publish.len(), 1);
    assert_eq!(say_hello.publish[0].name, "printed");
    assert_eq!(
        say_hello.navigation,
        vec![
            ("SUCCESS".to_string(), NavigationTarget::Step(2)),
            ("FAILURE".to_string(), NavigationTarget::Step(3)),
        ]
    );

    let say_goodbye = &plan.steps[&2];
    assert_eq!(
        say_goodbye.navigation,
        vec![
            (
                "SUCCESS".to_string(),
                NavigationTarget::Result("SUCCESS".to_string())
            ),
            ("FAILURE".to_string(), NavigationTarget::Step(3)),
        ]
    );

    let notify = &plan.steps[&3];
    assert_eq!(notify.name, "notify");
    assert_eq!(
        notify.navigation,
        vec![
            (
                "SUCCESS".to_string(),
                NavigationTarget::Result("SUCCESS".to_string())
            ),
            (
                "FAILURE".to_string(),
                NavigationTarget::Result("FAILURE".to_string())
            ),
        ]
    );

    assert_eq!(artifact.inputs.len(), 1);
    assert_eq!(artifact.inputs[0].name, "greeting");
    let result_names: Vec<&str> = artifact.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(result_names, ["SUCCESS", "FAILURE"]);
}

#[test]
fn operation_compiles_to_a_single_step_plan() {
    let artifact =
        compile(&print_message_operation(), &[]).expect("compilation should succeed");

    let plan = &artifact.execution_plan;
    assert_eq!(plan.name, "print_message");
    assert_eq!(plan.entry_id, 1);
    assert_eq!(plan.steps.len(), 1);

    let step = &plan.steps[&1];
    match &step.action {
        BoundAction::Operation { reference, action } => {
            assert_eq!(reference, "user.ops.print_message");
            assert_eq!(action.kind, "python_action");
            assert_eq!(action.properties.len(), 1);
            assert_eq!(action.properties[0].0, "script");
        }
        other => panic!("expected an operation action, got: {:?}", other),
    }
    assert_eq!(
        step.navigation,
        vec![(
            "SUCCESS".to_string(),
            NavigationTarget::Result("SUCCESS".to_string())
        )]
    );
    assert_eq!(artifact.inputs.len(), 1);
    assert_eq!(artifact.outputs.len(), 1);
}

#[test]
fn step_invoking_a_subflow_binds_a_flow_action() {
    let parent = Source::new(
        "parent_flow",
        r#"
namespace: user.flows
flow:
  name: parent_flow
  workflow:
    - greet_everyone:
        do:
          user.flows.greeting_flow: []
"#,
    );
    let artifact = compile(&parent, &[greeting_flow()]).expect("compilation should succeed");
    match &artifact.execution_plan.steps[&1].action {
        BoundAction::Flow { reference } => assert_eq!(reference, "user.flows.greeting_flow"),
        other => panic!("expected a flow action, got: {:?}", other),
    }
}

#[test]
fn bare_reference_resolves_against_a_unique_dependency_name() {
    let flow = Source::new(
        "bare_ref_flow",
        r#"
namespace: user.flows
flow:
  name: bare_ref_flow
  workflow:
    - greet:
        do:
          print_message:
            - message: 'hi'
"#,
    );
    let artifact =
        compile(&flow, &[print_message_operation()]).expect("compilation should succeed");
    match &artifact.execution_plan.steps[&1].action {
        BoundAction::Operation { reference, .. } => {
            assert_eq!(reference, "user.ops.print_message")
        }
        other => panic!("expected an operation action, got: {:?}", other),
    }
}

#[test]
fn root_source_errors_abort_compilation() {
    let broken = Source::new(
        "broken_flow",
        r#"
namespace: user.flows
flow:
  name: broken_flow
"#,
    );
    let err = compile(&broken, &[]).unwrap_err();
    match err {
        CompileError::SourceErrors { source_name, errors } => {
            assert_eq!(source_name, "broken_flow");
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors[0].to_string(),
                "Error compiling broken_flow. Flow: broken_flow has no workflow property"
            );
        }
        other => panic!("expected SourceErrors, got: {:?}", other),
    }
}

#[test]
fn dependency_errors_abort_compilation() {
    let broken_dependency = Source::new(
        "print_message",
        r#"
operation:
  name: print_message
  python_action:
    script: print(message)
"#,
    );
    let err = compile(&greeting_flow(), &[broken_dependency, send_mail_operation()]).unwrap_err();
    match err {
        CompileError::DependencyErrors { dependency, errors } => {
            assert_eq!(dependency, "print_message");
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors[0].to_string(),
                "Operation/Flow print_message must have a namespace"
            );
        }
        other => panic!("expected DependencyErrors, got: {:?}", other),
    }
}

#[test]
fn unresolved_references_are_all_reported() {
    let err = compile(&greeting_flow(), &[]).unwrap_err();
    match err {
        CompileError::SourceErrors { source_name, errors } => {
            assert_eq!(source_name, "greeting_flow");
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            assert_eq!(
                messages,
                [
                    "Reference: 'user.ops.print_message' in step: 'say_hello' \
                     was not found in the dependencies",
                    "Reference: 'user.ops.print_message' in step: 'say_goodbye' \
                     was not found in the dependencies",
                    "Reference: 'user.ops.send_mail' in step: 'notify' \
                     was not found in the dependencies",
                ]
            );
        }
        other => panic!("expected SourceErrors, got: {:?}", other),
    }
}

#[test]
fn unresolved_navigation_target_is_reported() {
    let flow = Source::new(
        "bad_target_flow",
        r#"
namespace: user.flows
flow:
  name: bad_target_flow
  workflow:
    - greet:
        do:
          user.ops.print_message:
            - message: 'hi'
        navigate:
          - SUCCESS: NOT_A_RESULT
          - FAILURE: FAILURE
"#,
    );
    let err = compile(&flow, &[print_message_operation()]).unwrap_err();
    match err {
        CompileError::SourceErrors { errors, .. } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors[0].to_string(),
                "Failed to resolve navigation target: 'NOT_A_RESULT' for step: 'greet'. \
                 Target must be a step name or a flow result"
            );
        }
        other => panic!("expected SourceErrors, got: {:?}", other),
    }
}

#[test]
fn artifact_survives_a_save_and_reload() {
    let artifact = compile(
        &greeting_flow(),
        &[print_message_operation(), send_mail_operation()],
    )
    .expect("compilation should succeed");

    let path = std::env::temp_dir().join(format!("flowc_artifact_{}.bin", std::process::id()));
    let path = path.to_string_lossy().to_string();
    artifact.save(&path).expect("save should succeed");
    let reloaded = CompilationArtifact::from_file(&path).expect("reload should succeed");
    std::fs::remove_file(&path).ok();

    assert_eq!(reloaded, artifact);
}

#[test]
fn one_compiler_serves_concurrent_compilations() {
    let compiler = Compiler::new();
    std::thread::scope(|scope| {
        let flow_handle = scope.spawn(|| {
            compiler.compile(
                &greeting_flow(),
                &[print_message_operation(), send_mail_operation()],
            )
        });
        let op_handle = scope.spawn(|| compiler.compile(&print_message_operation(), &[]));

        assert!(flow_handle.join().unwrap().is_ok());
        assert!(op_handle.join().unwrap().is_ok());
    });
}
