//! Transforms `inputs` sections (and step arguments) into typed [`Input`]s.

use crate::error::{BindingError, BindingKind, SectionError, StructuralError};
use crate::model::{Expression, Input};
use crate::node::{Node, Scalar};
use crate::transformer::{Scope, TransformOutcome, TransformedValue, Transformer};

pub struct InputsTransformer;

impl Transformer for InputsTransformer {
    fn key(&self) -> &'static str {
        "inputs"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::BeforeExecutable]
    }

    fn transform(&self, node: &Node) -> TransformOutcome {
        match node {
            Node::Null => TransformOutcome::value(TransformedValue::Inputs(Vec::new())),
            Node::Scalar(_) => TransformOutcome::error(StructuralError::ListExpectedFoundString {
                property: self.key().to_string(),
            }),
            Node::Mapping(_) => TransformOutcome::error(StructuralError::ListExpectedFoundMap {
                property: self.key().to_string(),
            }),
            Node::Sequence(items) => {
                let mut errors = Vec::new();
                let inputs = transform_input_entries(items, &mut errors);
                TransformOutcome::new(TransformedValue::Inputs(inputs), errors)
            }
        }
    }
}

/// Transforms a list of raw input entries, accumulating one error per bad
/// entry and keeping the good ones.
pub(crate) fn transform_input_entries(
    items: &[Node],
    errors: &mut Vec<SectionError>,
) -> Vec<Input> {
    let mut inputs = Vec::new();
    for item in items {
        match transform_single_input(item) {
            Ok(input) => inputs.push(input),
            Err(error) => errors.push(error),
        }
    }
    inputs
}

fn transform_single_input(item: &Node) -> Result<Input, SectionError> {
    match item {
        // Bare name: `- input1`
        Node::Scalar(Scalar::String(name)) => Ok(Input::named(name.clone())),
        // Single pair: `- input1: value` or `- input1: {default: ..., private: true}`
        Node::Mapping(entries) if entries.len() == 1 => {
            let (name, value) = &entries[0];
            let name = name.to_string();
            match value {
                Node::Null => Err(BindingError::NullValue {
                    kind: BindingKind::Input,
                    raw: item.render(),
                }
                .into()),
                Node::Scalar(scalar) => {
                    Ok(Input::with_default(name, Expression::new(scalar.clone())))
                }
                Node::Mapping(properties) => transform_input_properties(&name, properties),
                Node::Sequence(_) => Err(BindingError::Untransformable {
                    kind: BindingKind::Input,
                    raw: item.render(),
                }
                .into()),
            }
        }
        other => Err(BindingError::Untransformable {
            kind: BindingKind::Input,
            raw: other.render(),
        }
        .into()),
    }
}

fn transform_input_properties(
    name: &str,
    properties: &[(Scalar, Node)],
) -> Result<Input, SectionError> {
    let mut input = Input::named(name);
    for (key, value) in properties {
        match (key.as_str(), value) {
            (Some("default"), Node::Scalar(scalar)) => {
                input.default = Some(Expression::new(scalar.clone()));
            }
            (Some("required"), Node::Scalar(Scalar::Bool(b))) => input.required = *b,
            (Some("private"), Node::Scalar(Scalar::Bool(b))) => input.private = *b,
            (Some("sensitive"), Node::Scalar(Scalar::Bool(b))) => input.sensitive = *b,
            (Some("default" | "required" | "private" | "sensitive"), _) => {
                return Err(BindingError::Untransformable {
                    kind: BindingKind::Input,
                    raw: format!("{{{}={}}}", key, value.render()),
                }
                .into());
            }
            _ => {
                return Err(BindingError::UnknownProperty {
                    kind: BindingKind::Input,
                    key: key.to_string(),
                    name: name.to_string(),
                }
                .into());
            }
        }
    }
    if input.private && input.default.is_none() {
        return Err(BindingError::PrivateWithoutDefault {
            name: name.to_string(),
        }
        .into());
    }
    Ok(input)
}
