//! Common test utilities for building workflow-language sources.
use flowc::prelude::*;

/// A minimal, valid operation: `user.ops.print_message`.
#[allow(dead_code)]
pub fn print_message_operation() -> Source {
    Source::new(
        "print_message",
        r#"
namespace: user.ops
operation:
  name: print_message
  inputs:
    - message
  python_action:
    script: print(message)
  outputs:
    - printed: 'true'
  results:
    - SUCCESS
"#,
    )
}

/// A second operation used as a dependency: `user.ops.send_mail`.
#[allow(dead_code)]
pub fn send_mail_operation() -> Source {
    Source::new(
        "send_mail",
        r#"
namespace: user.ops
operation:
  name: send_mail
  inputs:
    - recipient
    - body: 'no body'
  python_action:
    script: send(recipient, body)
"#,
    )
}

/// A simple two-step flow over `print_message`, with a failure chain.
#[allow(dead_code)]
pub fn greeting_flow() -> Source {
    Source::new(
        "greeting_flow",
        r#"
namespace: user.flows
flow:
  name: greeting_flow
  inputs:
    - greeting: 'hello'
  workflow:
    - say_hello:
        do:
          user.ops.print_message:
            - message: 'hello'
        publish:
          - printed
    - say_goodbye:
        do:
          user.ops.print_message:
            - message: 'goodbye'
  on_failure:
    - notify:
        do:
          user.ops.send_mail:
            - recipient: 'admin'
  results:
    - SUCCESS
    - FAILURE
"#,
    )
}

/// Asserts that exactly one error was produced and its message equals the
/// expectation.
#[allow(dead_code)]
pub fn assert_single_error(result: &ExecutableModellingResult, expected: &str) {
    assert_eq!(
        result.errors.len(),
        1,
        "expected exactly one error, got: {:#?}",
        result.errors
    );
    assert_eq!(result.errors[0].to_string(), expected);
}

/// Asserts that the first error message equals the expectation.
#[allow(dead_code)]
pub fn assert_first_error(result: &ExecutableModellingResult, expected: &str) {
    assert!(
        !result.errors.is_empty(),
        "expected at least one error, got none"
    );
    assert_eq!(result.errors[0].to_string(), expected);
}
