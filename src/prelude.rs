//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions of the crate.

// Compilation entry points
pub use crate::compiler::{compile, pre_compile, Compiler};
pub use crate::modeller::ExecutableModellingResult;

// Source documents and the generic node tree
pub use crate::node::{Node, NodeShape, Scalar};
pub use crate::source::Source;

// The typed model
pub use crate::model::{
    Action, BoundAction, CompilationArtifact, Executable, ExecutionPlan, ExecutionStep,
    Expression, Flow, Input, NavigationEntry, NavigationTarget, Operation, Output, ResultSpec,
    Step, StepId, Workflow, FAILURE_RESULT, SUCCESS_RESULT,
};

// Error types
pub use crate::error::{
    ArtifactError, BindingError, BindingKind, CompileError, ErrorKind, SectionError,
    StructuralError, SyntaxContext,
};
