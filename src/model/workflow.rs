//! The step graph of a flow, before plan-local resolution.

use crate::model::bindings::{Input, Output};
use serde::{Deserialize, Serialize};

/// One `result -> target` pair of a step's navigation table. The target is
/// either another step's name or a terminal flow result; which one is only
/// decided at compile time, against the finished step set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub result: String,
    pub target: String,
}

/// Built-in result name steps navigate on when no table is declared.
pub const SUCCESS_RESULT: &str = "SUCCESS";
/// Built-in failure result name.
pub const FAILURE_RESULT: &str = "FAILURE";

/// One workflow node: binds arguments, invokes an executable by reference,
/// publishes outputs and navigates by result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    /// The `do` reference: a qualified `namespace.name` or a bare name
    /// resolved against the dependency set at compile time.
    pub reference: String,
    pub arguments: Vec<Input>,
    pub publish: Vec<Output>,
    /// Ordered navigation table. Never empty: steps without a declared
    /// `navigate` section get the default SUCCESS/FAILURE entries.
    pub navigation: Vec<NavigationEntry>,
    pub on_failure: bool,
}

/// Ordered main steps plus an optional failure chain. The first element of
/// each list is that chain's reachability root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub steps: Vec<Step>,
    pub on_failure_steps: Vec<Step>,
}

impl Workflow {
    /// All steps in declaration order, main workflow first.
    pub fn all_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().chain(self.on_failure_steps.iter())
    }
}
