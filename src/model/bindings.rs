//! Typed value bindings: inputs, outputs and results of an executable.

use crate::node::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unevaluated bound value.
///
/// The compiler treats every bound value as opaque: it checks only where an
/// expression may appear, never what it evaluates to. Evaluation happens in
/// the external runtime, against run-time data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression(Scalar);

impl Expression {
    pub fn new(raw: Scalar) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Scalar {
        &self.0
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named value an executable consumes. Also used for step arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    pub default: Option<Expression>,
    pub required: bool,
    pub private: bool,
    pub sensitive: bool,
}

impl Input {
    /// A bare input declaration: required, public, no default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            required: true,
            private: false,
            sensitive: false,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Expression) -> Self {
        Self {
            default: Some(default),
            ..Self::named(name)
        }
    }
}

/// A named value an executable produces. Also used for step publish bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    pub value: Option<Expression>,
    pub sensitive: bool,
}

impl Output {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            sensitive: false,
        }
    }
}

/// A named terminal outcome of an executable, optionally guarded by a
/// condition expression. Flow results must stay bare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSpec {
    pub name: String,
    pub condition: Option<Expression>,
}

impl ResultSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
        }
    }
}
