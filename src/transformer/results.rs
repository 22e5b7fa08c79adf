//! Transforms `results` sections into typed [`ResultSpec`]s.
//!
//! Operation results may carry a condition expression; flow results must be
//! bare. Bareness is a flow-level rule and is enforced by the modeller,
//! which knows the owning flow's name — here both forms are captured.

use crate::error::{BindingError, BindingKind, StructuralError};
use crate::model::{Expression, ResultSpec};
use crate::node::{Node, Scalar};
use crate::transformer::{Scope, TransformOutcome, TransformedValue, Transformer};

pub struct ResultsTransformer;

impl Transformer for ResultsTransformer {
    fn key(&self) -> &'static str {
        "results"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::AfterExecutable]
    }

    fn transform(&self, node: &Node) -> TransformOutcome {
        match node {
            Node::Null => TransformOutcome::value(TransformedValue::Results(Vec::new())),
            Node::Scalar(_) => TransformOutcome::error(StructuralError::ListExpectedFoundString {
                property: self.key().to_string(),
            }),
            Node::Mapping(_) => TransformOutcome::error(StructuralError::ListExpectedFoundMap {
                property: self.key().to_string(),
            }),
            Node::Sequence(items) => {
                let mut errors = Vec::new();
                let mut results = Vec::new();
                for item in items {
                    match item {
                        // Bare: `- SUCCESS` (a trailing colon parses to a null value)
                        Node::Scalar(Scalar::String(name)) => {
                            results.push(ResultSpec::named(name.clone()));
                        }
                        Node::Mapping(entries) if entries.len() == 1 => {
                            let (name, value) = &entries[0];
                            match value {
                                Node::Null => results.push(ResultSpec::named(name.to_string())),
                                Node::Scalar(scalar) => results.push(ResultSpec {
                                    name: name.to_string(),
                                    condition: Some(Expression::new(scalar.clone())),
                                }),
                                _ => errors.push(
                                    BindingError::Untransformable {
                                        kind: BindingKind::Result,
                                        raw: item.render(),
                                    }
                                    .into(),
                                ),
                            }
                        }
                        other => errors.push(
                            BindingError::Untransformable {
                                kind: BindingKind::Result,
                                raw: other.render(),
                            }
                            .into(),
                        ),
                    }
                }
                TransformOutcome::new(TransformedValue::Results(results), errors)
            }
        }
    }
}
