//! The transformer framework: pure functions from generic nodes to typed
//! bindings, organized in a fixed registry keyed by pipeline scope and
//! structural key.
//!
//! Each transformer declares the shape it accepts and rejects anything else
//! with a structural diagnostic. Within a section, independent entries are
//! transformed without short-circuiting: one bad input does not hide its
//! siblings' errors.

use crate::error::SectionError;
use crate::model::{Input, NavigationEntry, Output, ResultSpec};
use crate::node::Node;
use ahash::AHashMap;
use std::sync::Arc;

mod inputs;
mod navigate;
mod outputs;
mod results;
mod step_do;

pub use inputs::InputsTransformer;
pub use navigate::NavigateTransformer;
pub use outputs::{OutputsTransformer, PublishTransformer};
pub use results::ResultsTransformer;
pub use step_do::DoTransformer;

/// Where in the pipeline a transformer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    BeforeExecutable,
    AfterExecutable,
    BeforeStep,
    AfterStep,
}

/// The typed value a transformer produces.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformedValue {
    Inputs(Vec<Input>),
    Outputs(Vec<Output>),
    Results(Vec<ResultSpec>),
    Navigation(Vec<NavigationEntry>),
    Do {
        reference: String,
        arguments: Vec<Input>,
    },
}

/// A transformer's result: the typed value as far as it could be built,
/// plus every error found along the way.
#[derive(Debug, Default)]
pub struct TransformOutcome {
    pub value: Option<TransformedValue>,
    pub errors: Vec<SectionError>,
}

impl TransformOutcome {
    pub fn value(value: TransformedValue) -> Self {
        Self {
            value: Some(value),
            errors: Vec::new(),
        }
    }

    pub fn error(error: impl Into<SectionError>) -> Self {
        Self {
            value: None,
            errors: vec![error.into()],
        }
    }

    pub fn new(value: TransformedValue, errors: Vec<SectionError>) -> Self {
        Self {
            value: Some(value),
            errors,
        }
    }
}

/// Contract for turning one structural section into a typed value.
pub trait Transformer: Send + Sync {
    /// The structural key this transformer is bound to (`inputs`, `do`, ...).
    fn key(&self) -> &'static str;

    fn scopes(&self) -> &'static [Scope];

    fn transform(&self, node: &Node) -> TransformOutcome;
}

/// The fixed transformer set, built once at startup and shared read-only
/// across concurrent compiles.
pub struct TransformerRegistry {
    entries: AHashMap<(Scope, String), Arc<dyn Transformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: AHashMap::new(),
        };
        registry.register(Arc::new(InputsTransformer));
        registry.register(Arc::new(OutputsTransformer));
        registry.register(Arc::new(ResultsTransformer));
        registry.register(Arc::new(DoTransformer));
        registry.register(Arc::new(PublishTransformer));
        registry.register(Arc::new(NavigateTransformer));
        registry
    }

    fn register(&mut self, transformer: Arc<dyn Transformer>) {
        for scope in transformer.scopes() {
            self.entries
                .insert((*scope, transformer.key().to_string()), Arc::clone(&transformer));
        }
    }

    pub fn lookup(&self, scope: Scope, key: &str) -> Option<&dyn Transformer> {
        self.entries.get(&(scope, key.to_string())).map(Arc::as_ref)
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
