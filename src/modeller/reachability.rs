//! Proves that every declared step is reachable from one of the two
//! workflow roots.
//!
//! The main workflow and the failure chain share step bodies but have
//! separate entry roots: the first step of each. Navigation targets that
//! name another step are edges; targets naming a terminal result are not.
//! A step is valid iff it is an entry or lies in the union of the two
//! traversals. The on-failure entry itself is never required to be
//! reachable from the main graph.

use crate::error::CompileError;
use crate::model::{Step, Workflow};
use std::collections::{HashSet, VecDeque};

pub(crate) fn validate_reachability(workflow: &Workflow, errors: &mut Vec<CompileError>) {
    let all_steps: Vec<&Step> = workflow.all_steps().collect();
    if all_steps.is_empty() {
        return;
    }
    let declared: HashSet<&str> = all_steps.iter().map(|s| s.name.as_str()).collect();

    let mut reachable: HashSet<&str> = HashSet::new();
    if let Some(entry) = workflow.steps.first() {
        traverse(entry.name.as_str(), &all_steps, &declared, &mut reachable);
    }
    if let Some(failure_entry) = workflow.on_failure_steps.first() {
        traverse(
            failure_entry.name.as_str(),
            &all_steps,
            &declared,
            &mut reachable,
        );
    }

    for step in &all_steps {
        if !reachable.contains(step.name.as_str()) {
            errors.push(CompileError::UnreachableStep {
                step: step.name.clone(),
            });
        }
    }
}

fn traverse<'a>(
    entry: &'a str,
    steps: &[&'a Step],
    declared: &HashSet<&'a str>,
    reachable: &mut HashSet<&'a str>,
) {
    let mut queue = VecDeque::new();
    queue.push_back(entry);
    reachable.insert(entry);

    while let Some(name) = queue.pop_front() {
        let Some(step) = steps.iter().find(|s| s.name == name) else {
            continue;
        };
        for nav in &step.navigation {
            // Targets naming a declared step are edges; terminal result
            // names fall through.
            if let Some(&target) = declared.get(nav.target.as_str()) {
                if reachable.insert(target) {
                    queue.push_back(target);
                }
            }
        }
    }
}
