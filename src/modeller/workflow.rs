//! Builds a flow's `workflow` / `on_failure` sections into an ordered step
//! graph with per-step navigation tables.

use crate::error::{CompileError, SyntaxContext};
use crate::model::{
    Input, NavigationEntry, Output, Step, Workflow, FAILURE_RESULT, SUCCESS_RESULT,
};
use crate::node::Node;
use crate::transformer::{Scope, TransformedValue, TransformerRegistry};

pub(crate) struct WorkflowBuilder<'a> {
    flow_name: &'a str,
    registry: &'a TransformerRegistry,
}

impl<'a> WorkflowBuilder<'a> {
    pub(crate) fn new(flow_name: &'a str, registry: &'a TransformerRegistry) -> Self {
        Self {
            flow_name,
            registry,
        }
    }

    /// Builds both step chains and fills in default navigation. Errors are
    /// accumulated; a malformed item never hides its siblings.
    pub(crate) fn build(
        &self,
        workflow_node: &Node,
        on_failure_node: Option<&Node>,
        errors: &mut Vec<CompileError>,
    ) -> Workflow {
        let mut steps = self.build_section("workflow", workflow_node, false, errors);
        let mut on_failure_steps = match on_failure_node {
            Some(node) => self.build_section("on_failure", node, true, errors),
            None => Vec::new(),
        };

        let failure_entry = on_failure_steps.first().map(|s| s.name.clone());
        let step_names: Vec<String> = steps.iter().map(|s| s.name.clone()).collect();
        for (index, step) in steps.iter_mut().enumerate() {
            if step.navigation.is_empty() {
                let success_target = step_names
                    .get(index + 1)
                    .cloned()
                    .unwrap_or_else(|| SUCCESS_RESULT.to_string());
                let failure_target = failure_entry
                    .clone()
                    .unwrap_or_else(|| FAILURE_RESULT.to_string());
                step.navigation = vec![
                    NavigationEntry {
                        result: SUCCESS_RESULT.to_string(),
                        target: success_target,
                    },
                    NavigationEntry {
                        result: FAILURE_RESULT.to_string(),
                        target: failure_target,
                    },
                ];
            }
        }

        for step in &mut on_failure_steps {
            if step.navigation.is_empty() {
                step.navigation = vec![
                    NavigationEntry {
                        result: SUCCESS_RESULT.to_string(),
                        target: SUCCESS_RESULT.to_string(),
                    },
                    NavigationEntry {
                        result: FAILURE_RESULT.to_string(),
                        target: FAILURE_RESULT.to_string(),
                    },
                ];
            }
        }

        Workflow {
            steps,
            on_failure_steps,
        }
    }

    fn build_section(
        &self,
        section: &str,
        node: &Node,
        on_failure: bool,
        errors: &mut Vec<CompileError>,
    ) -> Vec<Step> {
        let items = match node {
            Node::Sequence(items) => items,
            // A non-list section is uninterpretable; stop processing it but
            // leave sibling sections alone.
            _ => {
                errors.push(CompileError::WorkflowStepsNotSequence {
                    flow: self.flow_name.to_string(),
                    section: section.to_string(),
                });
                return Vec::new();
            }
        };

        let mut steps = Vec::new();
        for item in items {
            match item.as_mapping() {
                Some(entries) if entries.len() == 1 => {
                    let (name, body) = &entries[0];
                    if let Some(step) = self.build_step(&name.to_string(), body, on_failure, errors)
                    {
                        steps.push(step);
                    }
                }
                _ => errors.push(CompileError::MalformedWorkflowItem {
                    flow: self.flow_name.to_string(),
                }),
            }
        }
        steps
    }

    fn build_step(
        &self,
        name: &str,
        body: &Node,
        on_failure: bool,
        errors: &mut Vec<CompileError>,
    ) -> Option<Step> {
        let entries = match body {
            Node::Null => {
                errors.push(CompileError::StepWithoutData {
                    step: name.to_string(),
                });
                return None;
            }
            Node::Mapping(entries) => entries,
            _ => {
                errors.push(CompileError::StepBodyNotMapping {
                    step: name.to_string(),
                });
                return None;
            }
        };

        let mut reference: Option<String> = None;
        let mut arguments: Vec<Input> = Vec::new();
        let mut publish: Vec<Output> = Vec::new();
        let mut navigation: Vec<NavigationEntry> = Vec::new();

        for (key, value) in entries {
            let Some(key_str) = key.as_str() else {
                errors.push(CompileError::UnrecognizedTag {
                    artifact: name.to_string(),
                    tag: key.to_string(),
                });
                continue;
            };
            let transformer = self
                .registry
                .lookup(Scope::BeforeStep, key_str)
                .or_else(|| self.registry.lookup(Scope::AfterStep, key_str));
            let Some(transformer) = transformer else {
                errors.push(CompileError::UnrecognizedTag {
                    artifact: name.to_string(),
                    tag: key_str.to_string(),
                });
                continue;
            };

            let outcome = transformer.transform(value);
            errors.extend(outcome.errors.into_iter().map(|e| {
                CompileError::illegal_syntax(SyntaxContext::Step(name.to_string()), e)
            }));
            match outcome.value {
                Some(TransformedValue::Do {
                    reference: r,
                    arguments: args,
                }) => {
                    reference = Some(r);
                    arguments = args;
                }
                Some(TransformedValue::Outputs(outputs)) => publish = outputs,
                Some(TransformedValue::Navigation(entries)) => navigation = entries,
                _ => {}
            }
        }

        let Some(reference) = reference else {
            errors.push(CompileError::StepWithoutReference {
                step: name.to_string(),
            });
            return None;
        };

        Some(Step {
            name: name.to_string(),
            reference,
            arguments,
            publish,
            navigation,
            on_failure,
        })
    }
}
