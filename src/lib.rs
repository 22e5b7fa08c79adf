//! # flowc - Workflow Description Language Compiler
//!
//! **flowc** compiles textual workflow documents — operations (single
//! invocable units) and flows (graphs of steps that invoke operations or
//! other flows) — into a strongly-typed, validated execution plan that a
//! separate execution engine runs step by step.
//!
//! ## Core Pipeline
//!
//! 1. **Parse**: a [`Source`](source::Source) document is parsed into a
//!    generic [`Node`](node::Node) tree (scalars, ordered sequences,
//!    key-ordered mappings).
//! 2. **Transform**: a fixed registry of transformers converts each raw
//!    section (`inputs`, `do`, `navigate`, ...) into typed bindings,
//!    accumulating every error it can find instead of stopping at the first.
//! 3. **Model**: the executable modeller assembles the bindings and the
//!    step graph into an `Operation` or `Flow`, enforcing namespace, naming
//!    and uniqueness rules, and proves every step reachable.
//! 4. **Compile**: with the dependency set resolved, step identifiers are
//!    assigned, navigation tables rewritten, and a
//!    [`CompilationArtifact`](model::CompilationArtifact) emitted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowc::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let operation = Source::new(
//!         "print_message",
//!         r#"
//! namespace: examples.ops
//! operation:
//!   name: print_message
//!   inputs:
//!     - message
//!   python_action:
//!     script: print(message)
//! "#,
//!     );
//!     let flow = Source::new(
//!         "greeting_flow",
//!         r#"
//! namespace: examples.flows
//! flow:
//!   name: greeting_flow
//!   workflow:
//!     - greet:
//!         do:
//!           examples.ops.print_message:
//!             - message: 'hello'
//! "#,
//!     );
//!
//!     // Model a single document and inspect its diagnostics.
//!     let result = pre_compile(&flow);
//!     assert!(result.errors.is_empty());
//!
//!     // Full pipeline: resolve dependencies and emit the artifact.
//!     let artifact = compile(&flow, &[operation])?;
//!     println!(
//!         "compiled plan '{}' with {} steps",
//!         artifact.execution_plan.name,
//!         artifact.execution_plan.steps.len()
//!     );
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod error;
pub mod model;
pub mod modeller;
pub mod node;
pub mod prelude;
pub mod source;
pub mod transformer;
