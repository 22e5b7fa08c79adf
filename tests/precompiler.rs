//! Modelling-stage diagnostics: naming, namespace, file convention,
//! binding rules and unrecognized tags.
mod common;
use common::*;
use flowc::error::VALID_EXTENSIONS;
use flowc::prelude::*;

#[test]
fn source_without_executable_content() {
    let source = Source::new("no_op_flow_file", "namespace: user.ops\n");
    let result = pre_compile(&source);
    assert!(result.executable.is_none());
    assert_single_error(
        &result,
        "Error transforming source: no_op_flow_file to an executable model. \
         Source no_op_flow_file has no content associated with flow/operation/properties property.",
    );
}

#[test]
fn unparseable_yaml_reports_the_source() {
    let source = Source::new("broken", "flow: [unclosed\n");
    let result = pre_compile(&source);
    assert!(result.executable.is_none());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0]
        .to_string()
        .starts_with("There was a problem parsing the YAML source: broken."));
}

#[test]
fn operation_without_namespace() {
    let source = Source::new(
        "op_without_namespace",
        r#"
operation:
  name: test_op
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_first_error(&result, "Operation/Flow test_op must have a namespace");
}

#[test]
fn flow_without_name() {
    let source = Source::new(
        "missing_name_flow",
        r#"
namespace: user.flows
flow:
  workflow:
    - step1:
        do:
          print_message: []
"#,
    );
    let result = pre_compile(&source);
    assert!(result.executable.is_none());
    assert_first_error(&result, "Executable in source: missing_name_flow has no name");
}

#[test]
fn operation_with_wrong_file_base_name() {
    let source = Source::from_file_name(
        "wrong_name_operation.sl",
        r#"
namespace: user.ops
operation:
  name: test_op
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "Operation/Flow: 'test_op' is declared in a file named \"wrong_name_operation.sl\", \
         it should be declared in a file named \"test_op.sl\"",
    );
}

#[test]
fn operation_with_invalid_file_extension() {
    let source = Source::from_file_name(
        "wrong_name_operation.wrong",
        r#"
namespace: user.ops
operation:
  name: test_op
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "Operation/Flow: 'test_op' is declared in a file named \"wrong_name_operation.wrong\", \
         it should be declared in a file named \"test_op\" plus a valid \
         extension(sl, sl.yaml, sl.yml, prop.sl, yaml, yml)",
    );
}

#[test]
fn naming_round_trip_over_every_valid_extension() {
    for extension in VALID_EXTENSIONS {
        let source = Source::from_file_name(
            format!("test_op.{}", extension),
            r#"
namespace: user.ops
operation:
  name: test_op
  python_action:
    script: pass
"#,
        );
        let result = pre_compile(&source);
        assert!(
            result.errors.is_empty(),
            "extension {} should be accepted, got: {:#?}",
            extension,
            result.errors
        );
        let executable = result.executable.expect("executable should be modelled");
        assert_eq!(executable.name(), "test_op");
        assert_eq!(executable.qualified_name(), "user.ops.test_op");
    }
}

#[test]
fn same_input_and_output_name() {
    let source = Source::new(
        "get_value",
        r#"
namespace: io.cloudslang.base.json
operation:
  name: get_value
  inputs:
    - json_path
  python_action:
    script: pass
  outputs:
    - json_path
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "Inputs and outputs names should be different for \"io.cloudslang.base.json.get_value\". \
         Please rename input/output \"json_path\"",
    );
}

#[test]
fn duplicate_input_names() {
    let source = Source::new(
        "dup_inputs",
        r#"
namespace: user.ops
operation:
  name: dup_inputs
  inputs:
    - message
    - message
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "For operation 'dup_inputs' syntax is illegal.\nDuplicate input name found: message",
    );
}

#[test]
fn flow_with_inputs_as_string() {
    let source = Source::new(
        "inputs_type_string_flow",
        r#"
namespace: user.flows
flow:
  name: inputs_type_string_flow
  inputs: someString
  workflow:
    - step1:
        do:
          print_message: []
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "For flow 'inputs_type_string_flow' syntax is illegal.\n\
         Under property: 'inputs' there should be a list of values, but instead there is a string.",
    );
}

#[test]
fn flow_with_inputs_as_map() {
    let source = Source::new(
        "inputs_type_map_flow",
        r#"
namespace: user.flows
flow:
  name: inputs_type_map_flow
  inputs:
    input1: value1
  workflow:
    - step1:
        do:
          print_message: []
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "For flow 'inputs_type_map_flow' syntax is illegal.\n\
         Under property: 'inputs' there should be a list of values, but instead there is a map.\n\
         By the Yaml spec lists properties are marked with a '- ' (dash followed by a space)",
    );
}

#[test]
fn flow_with_illegal_typed_input() {
    let source = Source::new(
        "flow_with_wrong_type_input",
        r#"
namespace: user.flows
flow:
  name: flow_with_wrong_type_input
  inputs:
    - 3
  workflow:
    - step1:
        do:
          print_message: []
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "For flow 'flow_with_wrong_type_input' syntax is illegal.\nCould not transform Input : 3",
    );
}

#[test]
fn flow_with_null_value_input() {
    let source = Source::new(
        "flow_with_null_value_input",
        r#"
namespace: user.flows
flow:
  name: flow_with_null_value_input
  inputs:
    - input1:
  workflow:
    - step1:
        do:
          print_message: []
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "For flow 'flow_with_null_value_input' syntax is illegal.\n\
         Could not transform Input : {input1=null} since it has a null value.\n\n\
         Make sure a value is specified or that indentation is properly done.",
    );
}

#[test]
fn input_with_unknown_nested_key() {
    let source = Source::new(
        "illegal_key_in_input",
        r#"
namespace: user.ops
operation:
  name: illegal_key_in_input
  inputs:
    - input_with_illegal_key:
        karambula: some_value
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "For operation 'illegal_key_in_input' syntax is illegal.\n\
         key: karambula in input: input_with_illegal_key is not a known property",
    );
}

#[test]
fn private_input_without_default() {
    let source = Source::new(
        "private_input_without_default",
        r#"
namespace: user.ops
operation:
  name: private_input_without_default
  inputs:
    - input_without_default:
        private: true
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "For operation 'private_input_without_default' syntax is illegal.\n\
         input: input_without_default is private but no default value was specified",
    );
}

#[test]
fn private_input_with_default_is_accepted() {
    let source = Source::new(
        "private_input_with_default",
        r#"
namespace: user.ops
operation:
  name: private_input_with_default
  inputs:
    - secret:
        private: true
        default: 'fallback'
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert!(result.errors.is_empty(), "got: {:#?}", result.errors);
    let executable = result.executable.expect("executable should be modelled");
    let input = &executable.inputs()[0];
    assert!(input.private);
    assert_eq!(input.default.as_ref().map(|e| e.to_string()).as_deref(), Some("fallback"));
}

#[test]
fn unrecognized_executable_tag() {
    let source = Source::new(
        "private_input_without_default",
        r#"
namespace: user.ops
operation:
  name: private_input_without_default
  karambula:
    - something
  python_action:
    script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "Artifact {private_input_without_default} has unrecognized tag {karambula}. \
         Please take a look at the supported features per versions link",
    );
}

#[test]
fn operation_without_action_data() {
    let source = Source::new(
        "operation_with_no_action_data",
        r#"
namespace: user.ops
operation:
  name: operation_with_no_action_data
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "Error compiling operation_with_no_action_data. \
         Operation: operation_with_no_action_data has no action data",
    );
}

#[test]
fn operation_with_list_under_action() {
    let source = Source::new(
        "operation_with_list_of_action_types",
        r#"
namespace: user.ops
operation:
  name: operation_with_list_of_action_types
  python_action:
    - script: pass
"#,
    );
    let result = pre_compile(&source);
    assert_single_error(
        &result,
        "Action syntax is illegal.\n\
         Under property: 'python_action' there should be a map of values, but instead there is a list.\n\
         By the Yaml spec maps properties are NOT marked with a '- ' (dash followed by a space)",
    );
}
