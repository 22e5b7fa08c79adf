//! The compiler front door: single-document pre-compilation and full
//! compilation against a resolved dependency set.
//!
//! `pre_compile` models one source and reports every error it can find.
//! `compile` additionally resolves each step's `do` reference to a concrete
//! dependency executable, assigns plan-local step identifiers, rewrites
//! navigation tables against them and emits the final
//! [`CompilationArtifact`]. Dependency assembly (which sources a flow needs)
//! is the caller's concern and assumed complete.

use crate::error::CompileError;
use crate::model::{
    BoundAction, CompilationArtifact, Executable, ExecutionPlan, ExecutionStep, Flow,
    NavigationTarget, Operation, Step, StepId,
};
use crate::modeller::{ExecutableBuilder, ExecutableModellingResult};
use crate::source::Source;
use crate::transformer::TransformerRegistry;
use ahash::AHashMap;
use tracing::debug;

pub struct Compiler {
    registry: TransformerRegistry,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            registry: TransformerRegistry::new(),
        }
    }

    /// Models a single document. No dependency resolution happens here; the
    /// result carries the executable (possibly partial) and all errors.
    pub fn pre_compile(&self, source: &Source) -> ExecutableModellingResult {
        ExecutableBuilder::new(&self.registry).build(source)
    }

    /// Runs the full pipeline over a root source and its already-assembled
    /// dependency sources. Fails if the root or any dependency carries
    /// modelling errors, surfacing those errors verbatim.
    pub fn compile(
        &self,
        source: &Source,
        dependencies: &[Source],
    ) -> Result<CompilationArtifact, CompileError> {
        let root_result = self.pre_compile(source);
        if !root_result.errors.is_empty() {
            return Err(CompileError::SourceErrors {
                source_name: source.name().to_string(),
                errors: root_result.errors,
            });
        }
        let root = root_result
            .executable
            .ok_or_else(|| CompileError::NoExecutableContent {
                source_name: source.name().to_string(),
            })?;

        let mut resolved: AHashMap<String, Executable> = AHashMap::new();
        for dependency in dependencies {
            let result = self.pre_compile(dependency);
            if !result.errors.is_empty() {
                return Err(CompileError::DependencyErrors {
                    dependency: dependency.name().to_string(),
                    errors: result.errors,
                });
            }
            if let Some(executable) = result.executable {
                resolved.insert(executable.qualified_name(), executable);
            }
        }
        debug!(
            root = source.name(),
            dependencies = resolved.len(),
            "compiling execution plan"
        );

        let artifact = match root {
            Executable::Operation(operation) => compile_operation(operation),
            Executable::Flow(flow) => compile_flow(source.name(), flow, &resolved)?,
        };
        Ok(artifact)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper over [`Compiler::pre_compile`].
pub fn pre_compile(source: &Source) -> ExecutableModellingResult {
    Compiler::new().pre_compile(source)
}

/// Convenience wrapper over [`Compiler::compile`].
pub fn compile(
    source: &Source,
    dependencies: &[Source],
) -> Result<CompilationArtifact, CompileError> {
    Compiler::new().compile(source, dependencies)
}

/// An operation compiles to a single-step plan bound to its own action,
/// with every declared result terminal.
fn compile_operation(operation: Operation) -> CompilationArtifact {
    let reference = format!("{}.{}", operation.namespace, operation.name);
    let navigation = operation
        .results
        .iter()
        .map(|r| (r.name.clone(), NavigationTarget::Result(r.name.clone())))
        .collect();
    let step = ExecutionStep {
        id: 1,
        name: operation.name.clone(),
        action: BoundAction::Operation {
            reference,
            action: operation.action,
        },
        arguments: Vec::new(),
        publish: Vec::new(),
        navigation,
    };
    let mut steps = AHashMap::new();
    steps.insert(step.id, step);
    CompilationArtifact {
        execution_plan: ExecutionPlan {
            name: operation.name,
            entry_id: 1,
            steps,
        },
        inputs: operation.inputs,
        outputs: operation.outputs,
        results: operation.results,
    }
}

fn compile_flow(
    source_name: &str,
    flow: Flow,
    resolved: &AHashMap<String, Executable>,
) -> Result<CompilationArtifact, CompileError> {
    let ordered: Vec<&Step> = flow.workflow.all_steps().collect();
    let ids: AHashMap<&str, StepId> = ordered
        .iter()
        .enumerate()
        .map(|(index, step)| (step.name.as_str(), (index + 1) as StepId))
        .collect();

    let mut errors = Vec::new();
    let mut steps: AHashMap<StepId, ExecutionStep> = AHashMap::new();

    for step in &ordered {
        let id = ids[step.name.as_str()];

        let action = match resolve_reference(&step.reference, resolved) {
            Some(Executable::Operation(op)) => BoundAction::Operation {
                reference: format!("{}.{}", op.namespace, op.name),
                action: op.action.clone(),
            },
            Some(Executable::Flow(sub)) => BoundAction::Flow {
                reference: format!("{}.{}", sub.namespace, sub.name),
            },
            None => {
                errors.push(CompileError::UnresolvedReference {
                    reference: step.reference.clone(),
                    step: step.name.clone(),
                });
                continue;
            }
        };

        let mut navigation = Vec::with_capacity(step.navigation.len());
        for entry in &step.navigation {
            if let Some(&target_id) = ids.get(entry.target.as_str()) {
                navigation.push((entry.result.clone(), NavigationTarget::Step(target_id)));
            } else if flow.results.iter().any(|r| r.name == entry.target) {
                navigation.push((
                    entry.result.clone(),
                    NavigationTarget::Result(entry.target.clone()),
                ));
            } else {
                errors.push(CompileError::UnresolvedNavigationTarget {
                    target: entry.target.clone(),
                    step: step.name.clone(),
                });
            }
        }

        steps.insert(
            id,
            ExecutionStep {
                id,
                name: step.name.clone(),
                action,
                arguments: step.arguments.clone(),
                publish: step.publish.clone(),
                navigation,
            },
        );
    }

    if !errors.is_empty() {
        return Err(CompileError::SourceErrors {
            source_name: source_name.to_string(),
            errors,
        });
    }

    Ok(CompilationArtifact {
        execution_plan: ExecutionPlan {
            name: flow.name,
            entry_id: 1,
            steps,
        },
        inputs: flow.inputs,
        outputs: flow.outputs,
        results: flow.results,
    })
}

/// Resolves a step reference: an exact `namespace.name` match first, then a
/// unique bare-name match across the dependency set.
fn resolve_reference<'a>(
    reference: &str,
    resolved: &'a AHashMap<String, Executable>,
) -> Option<&'a Executable> {
    if let Some(executable) = resolved.get(reference) {
        return Some(executable);
    }
    let mut by_name = resolved.values().filter(|e| e.name() == reference);
    let first = by_name.next();
    match (first, by_name.next()) {
        (Some(executable), None) => Some(executable),
        _ => None,
    }
}
