//! The generic parsed-document value type.
//!
//! The compiler never touches YAML text directly. An external parser (here a
//! thin `serde_yaml` adapter) produces a [`Node`] tree — scalars, ordered
//! sequences and key-ordered mappings — and every later stage works on that.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A generic parsed value with preserved mapping key order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Vec<(Scalar, Node)>),
    Null,
}

/// The shape of a [`Node`], used in structural diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Scalar,
    Sequence,
    Mapping,
    Null,
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeShape::Scalar => "string",
            NodeShape::Sequence => "list",
            NodeShape::Mapping => "map",
            NodeShape::Null => "null",
        };
        write!(f, "{}", name)
    }
}

impl Node {
    pub fn shape(&self) -> NodeShape {
        match self {
            Node::Scalar(_) => NodeShape::Scalar,
            Node::Sequence(_) => NodeShape::Sequence,
            Node::Mapping(_) => NodeShape::Mapping,
            Node::Null => NodeShape::Null,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    pub fn as_mapping(&self) -> Option<&[(Scalar, Node)]> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a key in a mapping node. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Renders the node the way it appears in user-facing diagnostics,
    /// e.g. `{input1=null}` for a single-pair mapping with a null value.
    pub fn render(&self) -> String {
        match self {
            Node::Scalar(s) => s.to_string(),
            Node::Null => "null".to_string(),
            Node::Sequence(items) => {
                let inner: Vec<String> = items.iter().map(Node::render).collect();
                format!("[{}]", inner.join(", "))
            }
            Node::Mapping(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v.render()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }

    /// Converts a `serde_yaml` value into the compiler's node tree.
    ///
    /// Mapping key order is preserved. Fails on mapping keys that are not
    /// scalars, since no construct of the language uses them.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Node, String> {
        match value {
            serde_yaml::Value::Null => Ok(Node::Null),
            serde_yaml::Value::Bool(b) => Ok(Node::Scalar(Scalar::Bool(b))),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Node::Scalar(Scalar::Int(i)))
                } else {
                    Ok(Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))))
                }
            }
            serde_yaml::Value::String(s) => Ok(Node::Scalar(Scalar::String(s))),
            serde_yaml::Value::Sequence(items) => {
                let converted: Result<Vec<Node>, String> =
                    items.into_iter().map(Node::from_yaml).collect();
                Ok(Node::Sequence(converted?))
            }
            serde_yaml::Value::Mapping(mapping) => {
                let mut entries = Vec::with_capacity(mapping.len());
                for (key, val) in mapping {
                    let key = match Node::from_yaml(key)? {
                        Node::Scalar(s) => s,
                        other => {
                            return Err(format!(
                                "mapping keys must be scalars, found a {}",
                                other.shape()
                            ));
                        }
                    };
                    entries.push((key, Node::from_yaml(val)?));
                }
                Ok(Node::Mapping(entries))
            }
            serde_yaml::Value::Tagged(tagged) => Node::from_yaml(tagged.value),
        }
    }
}
