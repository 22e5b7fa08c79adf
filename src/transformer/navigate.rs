//! Transforms `navigate` sections into ordered navigation tables.

use crate::error::StructuralError;
use crate::model::NavigationEntry;
use crate::node::{Node, Scalar};
use crate::transformer::{Scope, TransformOutcome, TransformedValue, Transformer};

pub struct NavigateTransformer;

impl Transformer for NavigateTransformer {
    fn key(&self) -> &'static str {
        "navigate"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::AfterStep]
    }

    fn transform(&self, node: &Node) -> TransformOutcome {
        let items = match node {
            Node::Null => return TransformOutcome::value(TransformedValue::Navigation(Vec::new())),
            Node::Scalar(_) => {
                return TransformOutcome::error(StructuralError::ListExpectedFoundString {
                    property: self.key().to_string(),
                });
            }
            Node::Mapping(_) => {
                return TransformOutcome::error(StructuralError::ListExpectedFoundMap {
                    property: self.key().to_string(),
                });
            }
            Node::Sequence(items) => items,
        };

        let mut errors = Vec::new();
        let mut entries = Vec::new();
        for item in items {
            match item {
                Node::Mapping(pairs) if pairs.len() == 1 => {
                    let (key, value) = &pairs[0];
                    let result = match key {
                        Scalar::String(s) => s.clone(),
                        _ => {
                            errors.push(StructuralError::NavigateKeyNotString.into());
                            continue;
                        }
                    };
                    let target = match value.as_str() {
                        Some(s) => s.to_string(),
                        None => {
                            errors.push(StructuralError::NavigateValueNotString.into());
                            continue;
                        }
                    };
                    entries.push(NavigationEntry { result, target });
                }
                Node::Mapping(_) => {
                    errors.push(StructuralError::NavigateEntryNotSinglePair.into());
                }
                other => {
                    errors.push(
                        StructuralError::IllegalPropertyData {
                            property: self.key().to_string(),
                            value: other.render(),
                            transformer: "NavigateTransformer".to_string(),
                        }
                        .into(),
                    );
                }
            }
        }
        TransformOutcome::new(TransformedValue::Navigation(entries), errors)
    }
}
