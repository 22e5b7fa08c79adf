//! A single source document handed to the compiler.

use crate::error::{CompileError, VALID_EXTENSIONS};
use crate::node::Node;

/// One workflow-language document: its logical name, the file name it was
/// loaded from (if any), and the raw YAML text. File loading itself is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    file_name: Option<String>,
    content: String,
}

impl Source {
    /// A source that is not bound to any file. File-naming rules are skipped.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content: content.into(),
        }
    }

    /// A source bound to a file name. The logical name is the base name with
    /// the extension stripped, and the modeller will require the declared
    /// executable name to match it.
    pub fn from_file_name(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let name = match matching_extension(&file_name) {
            Some(ext) => file_name[..file_name.len() - ext.len() - 1].to_string(),
            None => file_name
                .rsplit_once('.')
                .map(|(base, _)| base.to_string())
                .unwrap_or_else(|| file_name.clone()),
        };
        Self {
            name,
            file_name: Some(file_name),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Parses the YAML text into the generic node tree.
    pub(crate) fn parse(&self) -> Result<Node, CompileError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(&self.content).map_err(|e| CompileError::YamlParse {
                source_name: self.name.clone(),
                message: e.to_string(),
            })?;
        Node::from_yaml(value).map_err(|message| CompileError::YamlParse {
            source_name: self.name.clone(),
            message,
        })
    }
}

/// Returns the valid extension suffix a file name carries, if any. Longer
/// suffixes win so `x.sl.yaml` reports `sl.yaml` rather than `yaml`.
pub(crate) fn matching_extension(file_name: &str) -> Option<&'static str> {
    let mut candidates: Vec<&'static str> = VALID_EXTENSIONS.to_vec();
    candidates.sort_by_key(|ext| std::cmp::Reverse(ext.len()));
    candidates
        .into_iter()
        .find(|ext| file_name.ends_with(&format!(".{}", ext)))
}
