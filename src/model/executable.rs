//! The two compilable units: operations and flows.

use crate::model::bindings::{Input, Output, ResultSpec};
use crate::model::workflow::Workflow;
use crate::node::Scalar;
use serde::{Deserialize, Serialize};

/// An operation's action section. The body is carried opaquely for the
/// runtime; the compiler only checks its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The action key the operation used: `action`, `python_action` or
    /// `java_action`.
    pub kind: String,
    pub properties: Vec<(String, Scalar)>,
}

/// A single invocable unit with an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    pub namespace: String,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub results: Vec<ResultSpec>,
    pub action: Action,
}

/// A graph of steps that invoke operations or other flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub name: String,
    pub namespace: String,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub results: Vec<ResultSpec>,
    pub workflow: Workflow,
}

/// Polymorphic compilable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Executable {
    Operation(Operation),
    Flow(Flow),
}

impl Executable {
    pub fn name(&self) -> &str {
        match self {
            Executable::Operation(op) => &op.name,
            Executable::Flow(flow) => &flow.name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Executable::Operation(op) => &op.namespace,
            Executable::Flow(flow) => &flow.namespace,
        }
    }

    /// The `namespace.name` identifier steps refer to.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }

    pub fn inputs(&self) -> &[Input] {
        match self {
            Executable::Operation(op) => &op.inputs,
            Executable::Flow(flow) => &flow.inputs,
        }
    }

    pub fn outputs(&self) -> &[Output] {
        match self {
            Executable::Operation(op) => &op.outputs,
            Executable::Flow(flow) => &flow.outputs,
        }
    }

    pub fn results(&self) -> &[ResultSpec] {
        match self {
            Executable::Operation(op) => &op.results,
            Executable::Flow(flow) => &flow.results,
        }
    }

    pub fn as_flow(&self) -> Option<&Flow> {
        match self {
            Executable::Flow(flow) => Some(flow),
            _ => None,
        }
    }
}
