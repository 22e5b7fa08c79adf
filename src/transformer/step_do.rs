//! Transforms a step's `do` section into a reference plus argument bindings.

use crate::error::StructuralError;
use crate::node::Node;
use crate::transformer::inputs::transform_input_entries;
use crate::transformer::{Scope, TransformOutcome, TransformedValue, Transformer};

pub struct DoTransformer;

impl Transformer for DoTransformer {
    fn key(&self) -> &'static str {
        "do"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::BeforeStep]
    }

    fn transform(&self, node: &Node) -> TransformOutcome {
        let entries = match node {
            Node::Sequence(_) => {
                return TransformOutcome::error(StructuralError::MapExpectedFoundList {
                    property: self.key().to_string(),
                });
            }
            Node::Mapping(entries) => entries,
            // An empty `do:` has no reference; the workflow builder reports it.
            Node::Null => return TransformOutcome::default(),
            other => {
                return TransformOutcome::error(StructuralError::IllegalPropertyData {
                    property: self.key().to_string(),
                    value: other.render(),
                    transformer: "DoTransformer".to_string(),
                });
            }
        };

        match entries.len() {
            0 => TransformOutcome::default(),
            1 => {
                let (reference, raw_arguments) = &entries[0];
                let reference = reference.to_string();
                match raw_arguments {
                    Node::Null => TransformOutcome::value(TransformedValue::Do {
                        reference,
                        arguments: Vec::new(),
                    }),
                    Node::Sequence(items) => {
                        let mut errors = Vec::new();
                        let arguments = transform_input_entries(items, &mut errors);
                        TransformOutcome::new(
                            TransformedValue::Do {
                                reference,
                                arguments,
                            },
                            errors,
                        )
                    }
                    Node::Mapping(_) => {
                        TransformOutcome::error(StructuralError::ListExpectedFoundMap {
                            property: reference,
                        })
                    }
                    Node::Scalar(_) => {
                        TransformOutcome::error(StructuralError::ListExpectedFoundString {
                            property: reference,
                        })
                    }
                }
            }
            _ => TransformOutcome::error(StructuralError::TooManyKeysUnderDo),
        }
    }
}
