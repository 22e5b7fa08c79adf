//! The executable modeller: assembles typed bindings and the step graph
//! into an [`Operation`] or [`Flow`] under strict naming and uniqueness
//! rules, accumulating every independent error instead of stopping at the
//! first one.

mod reachability;
mod workflow;

use crate::error::{BindingError, BindingKind, CompileError, SyntaxContext};
use crate::model::{
    Action, Executable, Flow, Input, Operation, Output, ResultSpec, Workflow,
    FAILURE_RESULT, SUCCESS_RESULT,
};
use crate::node::{Node, Scalar};
use crate::source::{matching_extension, Source};
use crate::transformer::{Scope, TransformedValue, TransformerRegistry};
use itertools::Itertools;
use tracing::debug;

pub(crate) use reachability::validate_reachability;
pub(crate) use workflow::WorkflowBuilder;

/// The outcome of modelling one source: the executable as far as it could
/// be assembled, plus every error found. A non-empty error list means the
/// executable may be partial or absent.
#[derive(Debug, Default)]
pub struct ExecutableModellingResult {
    pub executable: Option<Executable>,
    pub errors: Vec<CompileError>,
}

impl ExecutableModellingResult {
    fn failed(error: CompileError) -> Self {
        Self {
            executable: None,
            errors: vec![error],
        }
    }
}

/// Keys of an operation body that open its action section.
const ACTION_KEYS: [&str; 3] = ["action", "python_action", "java_action"];

#[derive(Clone, Copy, PartialEq)]
enum ExecutableTag {
    Operation,
    Flow,
}

pub(crate) struct ExecutableBuilder<'a> {
    registry: &'a TransformerRegistry,
}

impl<'a> ExecutableBuilder<'a> {
    pub(crate) fn new(registry: &'a TransformerRegistry) -> Self {
        Self { registry }
    }

    pub(crate) fn build(&self, source: &Source) -> ExecutableModellingResult {
        debug!(source = source.name(), "modelling source");

        let root = match source.parse() {
            Ok(node) => node,
            Err(error) => return ExecutableModellingResult::failed(error),
        };

        let (tag, body) = match Self::executable_section(&root) {
            Some(found) => found,
            None => {
                return ExecutableModellingResult::failed(CompileError::NoExecutableContent {
                    source_name: source.name().to_string(),
                });
            }
        };
        let Some(body_entries) = body.as_mapping() else {
            return ExecutableModellingResult::failed(CompileError::NoExecutableContent {
                source_name: source.name().to_string(),
            });
        };

        let mut errors = Vec::new();

        let name = body.get("name").and_then(Node::as_str).map(str::to_string);
        if name.is_none() {
            errors.push(CompileError::MissingName {
                source_name: source.name().to_string(),
            });
        }
        // Later diagnostics still need something to call the artifact.
        let display_name = name.clone().unwrap_or_else(|| source.name().to_string());

        let namespace = root
            .get("namespace")
            .and_then(Node::as_str)
            .filter(|ns| !ns.is_empty())
            .map(str::to_string);
        if namespace.is_none() {
            errors.push(CompileError::MissingNamespace {
                name: display_name.clone(),
            });
        }

        if let (Some(name), Some(file_name)) = (&name, source.file_name()) {
            validate_file_name(name, file_name, &mut errors);
        }

        let context = match tag {
            ExecutableTag::Flow => SyntaxContext::Flow(display_name.clone()),
            ExecutableTag::Operation => SyntaxContext::Operation(display_name.clone()),
        };

        let mut inputs: Vec<Input> = Vec::new();
        let mut outputs: Vec<Output> = Vec::new();
        let mut results: Vec<ResultSpec> = Vec::new();
        let mut workflow_node: Option<&Node> = None;
        let mut on_failure_node: Option<&Node> = None;
        let mut action_section: Option<(&str, &Node)> = None;

        for (key, value) in body_entries {
            let Some(key_str) = key.as_str() else {
                errors.push(CompileError::UnrecognizedTag {
                    artifact: display_name.clone(),
                    tag: key.to_string(),
                });
                continue;
            };
            match key_str {
                "name" => {}
                "workflow" if tag == ExecutableTag::Flow => workflow_node = Some(value),
                "on_failure" if tag == ExecutableTag::Flow => on_failure_node = Some(value),
                key if ACTION_KEYS.contains(&key) && tag == ExecutableTag::Operation => {
                    if action_section.is_some() {
                        errors.push(CompileError::UnrecognizedTag {
                            artifact: display_name.clone(),
                            tag: key.to_string(),
                        });
                    } else {
                        action_section = Some((key, value));
                    }
                }
                key => {
                    let transformer = self
                        .registry
                        .lookup(Scope::BeforeExecutable, key)
                        .or_else(|| self.registry.lookup(Scope::AfterExecutable, key));
                    let Some(transformer) = transformer else {
                        errors.push(CompileError::UnrecognizedTag {
                            artifact: display_name.clone(),
                            tag: key.to_string(),
                        });
                        continue;
                    };
                    let outcome = transformer.transform(value);
                    errors.extend(
                        outcome
                            .errors
                            .into_iter()
                            .map(|e| CompileError::illegal_syntax(context.clone(), e)),
                    );
                    match outcome.value {
                        Some(TransformedValue::Inputs(v)) => inputs = v,
                        Some(TransformedValue::Outputs(v)) => outputs = v,
                        Some(TransformedValue::Results(v)) => results = v,
                        _ => {}
                    }
                }
            }
        }

        let qualified = match &namespace {
            Some(ns) => format!("{}.{}", ns, display_name),
            None => display_name.clone(),
        };
        validate_binding_names(&inputs, &outputs, &qualified, &context, &mut errors);

        let executable = match tag {
            ExecutableTag::Operation => {
                let action = self.build_action(source, &display_name, action_section, &mut errors);
                if results.is_empty() {
                    results.push(ResultSpec::named(SUCCESS_RESULT));
                }
                name.map(|name| {
                    Executable::Operation(Operation {
                        name,
                        namespace: namespace.unwrap_or_default(),
                        inputs,
                        outputs,
                        results,
                        action,
                    })
                })
            }
            ExecutableTag::Flow => {
                results = validate_flow_results(&display_name, results, &mut errors);
                let workflow = self.build_flow_workflow(
                    source,
                    &display_name,
                    workflow_node,
                    on_failure_node,
                    &mut errors,
                );
                validate_step_uniqueness(&workflow, &mut errors);
                validate_reachability(&workflow, &mut errors);
                name.map(|name| {
                    Executable::Flow(Flow {
                        name,
                        namespace: namespace.unwrap_or_default(),
                        inputs,
                        outputs,
                        results,
                        workflow,
                    })
                })
            }
        };

        debug!(
            source = source.name(),
            errors = errors.len(),
            "finished modelling"
        );
        ExecutableModellingResult { executable, errors }
    }

    fn executable_section(root: &Node) -> Option<(ExecutableTag, &Node)> {
        if let Some(body) = root.get("flow") {
            return Some((ExecutableTag::Flow, body));
        }
        if let Some(body) = root.get("operation") {
            return Some((ExecutableTag::Operation, body));
        }
        None
    }

    fn build_action(
        &self,
        source: &Source,
        operation: &str,
        section: Option<(&str, &Node)>,
        errors: &mut Vec<CompileError>,
    ) -> Action {
        let missing = || CompileError::MissingActionData {
            source_name: source.name().to_string(),
            operation: operation.to_string(),
        };
        let Some((kind, node)) = section else {
            errors.push(missing());
            return Action {
                kind: "action".to_string(),
                properties: Vec::new(),
            };
        };
        let properties = match node {
            Node::Null => {
                errors.push(missing());
                Vec::new()
            }
            Node::Sequence(_) => {
                errors.push(CompileError::illegal_syntax(
                    SyntaxContext::Action,
                    crate::error::StructuralError::MapExpectedFoundList {
                        property: kind.to_string(),
                    },
                ));
                Vec::new()
            }
            Node::Scalar(_) => {
                errors.push(CompileError::illegal_syntax(
                    SyntaxContext::Action,
                    crate::error::StructuralError::IllegalPropertyData {
                        property: kind.to_string(),
                        value: node.render(),
                        transformer: "ActionTransformer".to_string(),
                    },
                ));
                Vec::new()
            }
            Node::Mapping(entries) => entries
                .iter()
                .map(|(key, value)| {
                    let scalar = match value.as_scalar() {
                        Some(s) => s.clone(),
                        // Nested structures are opaque to the compiler and
                        // carried for the runtime in rendered form.
                        None => Scalar::String(value.render()),
                    };
                    (key.to_string(), scalar)
                })
                .collect(),
        };
        Action {
            kind: kind.to_string(),
            properties,
        }
    }

    fn build_flow_workflow(
        &self,
        source: &Source,
        flow_name: &str,
        workflow_node: Option<&Node>,
        on_failure_node: Option<&Node>,
        errors: &mut Vec<CompileError>,
    ) -> Workflow {
        let missing = |errors: &mut Vec<CompileError>| {
            errors.push(CompileError::MissingWorkflow {
                source_name: source.name().to_string(),
                flow: flow_name.to_string(),
            });
            Workflow::default()
        };
        match workflow_node {
            None | Some(Node::Null) => missing(errors),
            Some(Node::Sequence(items)) if items.is_empty() => missing(errors),
            Some(node) => {
                WorkflowBuilder::new(flow_name, self.registry).build(node, on_failure_node, errors)
            }
        }
    }
}

fn validate_file_name(name: &str, file_name: &str, errors: &mut Vec<CompileError>) {
    match matching_extension(file_name) {
        Some(extension) => {
            let expected = format!("{}.{}", name, extension);
            if file_name != expected {
                errors.push(CompileError::FileNameMismatch {
                    name: name.to_string(),
                    file_name: file_name.to_string(),
                    extension: extension.to_string(),
                });
            }
        }
        None => errors.push(CompileError::InvalidFileExtension {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
        }),
    }
}

/// Enforces uniqueness within inputs and outputs, and disjointness between
/// them. Each offending name yields exactly one error.
fn validate_binding_names(
    inputs: &[Input],
    outputs: &[Output],
    qualified: &str,
    context: &SyntaxContext,
    errors: &mut Vec<CompileError>,
) {
    for name in inputs.iter().map(|i| i.name.as_str()).duplicates() {
        errors.push(CompileError::illegal_syntax(
            context.clone(),
            BindingError::DuplicateName {
                kind: BindingKind::Input,
                name: name.to_string(),
            },
        ));
    }
    for name in outputs.iter().map(|o| o.name.as_str()).duplicates() {
        errors.push(CompileError::illegal_syntax(
            context.clone(),
            BindingError::DuplicateName {
                kind: BindingKind::Output,
                name: name.to_string(),
            },
        ));
    }
    for input in inputs {
        if outputs.iter().any(|o| o.name == input.name) {
            errors.push(CompileError::InputOutputNameCollision {
                executable_id: qualified.to_string(),
                name: input.name.clone(),
            });
        }
    }
}

/// Flow results must be bare names. Offending entries each produce one
/// error, in declaration order; the names are kept so navigation against
/// them still resolves. Absent results fall back to the defaults.
fn validate_flow_results(
    flow_name: &str,
    results: Vec<ResultSpec>,
    errors: &mut Vec<CompileError>,
) -> Vec<ResultSpec> {
    if results.is_empty() {
        return vec![
            ResultSpec::named(SUCCESS_RESULT),
            ResultSpec::named(FAILURE_RESULT),
        ];
    }
    results
        .into_iter()
        .map(|result| {
            if result.condition.is_some() {
                errors.push(CompileError::FlowResultWithExpression {
                    flow: flow_name.to_string(),
                    result: result.name.clone(),
                });
            }
            ResultSpec::named(result.name)
        })
        .collect()
}

/// Step names must be unique across the union of the main workflow and the
/// failure chain. One error per duplicated name.
fn validate_step_uniqueness(workflow: &Workflow, errors: &mut Vec<CompileError>) {
    for name in workflow.all_steps().map(|s| s.name.as_str()).duplicates() {
        errors.push(CompileError::DuplicateStepName {
            step: name.to_string(),
        });
    }
}
