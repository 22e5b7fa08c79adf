//! Transforms `outputs` and `publish` sections into typed [`Output`]s.

use crate::error::{BindingError, BindingKind, SectionError, StructuralError};
use crate::model::{Expression, Output};
use crate::node::{Node, Scalar};
use crate::transformer::{Scope, TransformOutcome, TransformedValue, Transformer};

pub struct OutputsTransformer;

impl Transformer for OutputsTransformer {
    fn key(&self) -> &'static str {
        "outputs"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::AfterExecutable]
    }

    fn transform(&self, node: &Node) -> TransformOutcome {
        transform_outputs_node(self.key(), node)
    }
}

/// Same transformation as `outputs`, bound to a step's `publish` section.
pub struct PublishTransformer;

impl Transformer for PublishTransformer {
    fn key(&self) -> &'static str {
        "publish"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::AfterStep]
    }

    fn transform(&self, node: &Node) -> TransformOutcome {
        transform_outputs_node(self.key(), node)
    }
}

fn transform_outputs_node(property: &str, node: &Node) -> TransformOutcome {
    match node {
        Node::Null => TransformOutcome::value(TransformedValue::Outputs(Vec::new())),
        Node::Scalar(_) => TransformOutcome::error(StructuralError::ListExpectedFoundString {
            property: property.to_string(),
        }),
        Node::Mapping(_) => TransformOutcome::error(StructuralError::ListExpectedFoundMap {
            property: property.to_string(),
        }),
        Node::Sequence(items) => {
            let mut errors = Vec::new();
            let mut outputs = Vec::new();
            for item in items {
                match transform_single_output(item) {
                    Ok(output) => outputs.push(output),
                    Err(error) => errors.push(error),
                }
            }
            TransformOutcome::new(TransformedValue::Outputs(outputs), errors)
        }
    }
}

fn transform_single_output(item: &Node) -> Result<Output, SectionError> {
    match item {
        Node::Scalar(Scalar::String(name)) => Ok(Output::named(name.clone())),
        Node::Mapping(entries) if entries.len() == 1 => {
            let (name, value) = &entries[0];
            let name = name.to_string();
            match value {
                Node::Null => Err(BindingError::NullValue {
                    kind: BindingKind::Output,
                    raw: item.render(),
                }
                .into()),
                Node::Scalar(scalar) => Ok(Output {
                    name,
                    value: Some(Expression::new(scalar.clone())),
                    sensitive: false,
                }),
                Node::Mapping(properties) => transform_output_properties(&name, properties),
                Node::Sequence(_) => Err(BindingError::Untransformable {
                    kind: BindingKind::Output,
                    raw: item.render(),
                }
                .into()),
            }
        }
        other => Err(BindingError::Untransformable {
            kind: BindingKind::Output,
            raw: other.render(),
        }
        .into()),
    }
}

fn transform_output_properties(
    name: &str,
    properties: &[(Scalar, Node)],
) -> Result<Output, SectionError> {
    let mut output = Output::named(name);
    for (key, value) in properties {
        match (key.as_str(), value) {
            (Some("value"), Node::Scalar(scalar)) => {
                output.value = Some(Expression::new(scalar.clone()));
            }
            (Some("sensitive"), Node::Scalar(Scalar::Bool(b))) => output.sensitive = *b,
            (Some("value" | "sensitive"), _) => {
                return Err(BindingError::Untransformable {
                    kind: BindingKind::Output,
                    raw: format!("{{{}={}}}", key, value.render()),
                }
                .into());
            }
            _ => {
                return Err(BindingError::UnknownProperty {
                    kind: BindingKind::Output,
                    key: key.to_string(),
                    name: name.to_string(),
                }
                .into());
            }
        }
    }
    Ok(output)
}
