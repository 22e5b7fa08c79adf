//! The resolved, flattened step graph the execution engine consumes.

use crate::error::ArtifactError;
use crate::model::bindings::{Input, Output, ResultSpec};
use crate::model::executable::Action;
use ahash::AHashMap;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// Plan-local step identifier.
pub type StepId = u64;

/// Where a resolved navigation entry leads: another step of the same plan,
/// or a terminal flow result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigationTarget {
    Step(StepId),
    Result(String),
}

/// The action a resolved step invokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundAction {
    /// An operation's action body, inlined.
    Operation { reference: String, action: Action },
    /// A subflow, referenced by qualified name; the runtime compiles or
    /// looks up its plan separately.
    Flow { reference: String },
}

/// A plan-local, fully resolved step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStep {
    pub id: StepId,
    pub name: String,
    pub action: BoundAction,
    pub arguments: Vec<Input>,
    pub publish: Vec<Output>,
    /// Ordered `result -> target` table. Every `Step` target exists in the
    /// owning plan's step table.
    pub navigation: Vec<(String, NavigationTarget)>,
}

/// A closed, self-contained step graph ready to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub name: String,
    pub entry_id: StepId,
    pub steps: AHashMap<StepId, ExecutionStep>,
}

/// The final compiler output. Immutable once produced and safe to share
/// across concurrent execution-engine instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationArtifact {
    pub execution_plan: ExecutionPlan,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub results: Vec<ResultSpec>,
}

impl CompilationArtifact {
    /// Saves the artifact to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Encode(e.to_string()))?;
        let mut file = fs::File::create(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes an artifact from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact)
            .map_err(|e| ArtifactError::Decode(e.to_string()))
    }
}
