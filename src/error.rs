//! Compile-time error types.
//!
//! Every diagnostic is a fully formatted, user-facing string naming the
//! offending artifact, property or value. Errors are accumulated per source
//! into an [`ExecutableModellingResult`](crate::modeller::ExecutableModellingResult)
//! rather than aborting at the first problem wherever sub-items are
//! independent of each other.

use std::fmt;
use thiserror::Error;

/// Accepted file-extension suffixes for file-bound executables.
pub const VALID_EXTENSIONS: [&str; 6] = ["sl", "sl.yaml", "sl.yml", "prop.sl", "yaml", "yml"];

/// Which binding family a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Input,
    Output,
    Result,
}

impl BindingKind {
    fn lowercase(&self) -> &'static str {
        match self {
            BindingKind::Input => "input",
            BindingKind::Output => "output",
            BindingKind::Result => "result",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Input => write!(f, "Input"),
            BindingKind::Output => write!(f, "Output"),
            BindingKind::Result => write!(f, "Result"),
        }
    }
}

/// The artifact whose section a syntax error was found in. Controls the
/// `... syntax is illegal.` prefix of wrapped diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxContext {
    Flow(String),
    Operation(String),
    Step(String),
    Action,
}

impl fmt::Display for SyntaxContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxContext::Flow(name) => write!(f, "For flow '{}'", name),
            SyntaxContext::Operation(name) => write!(f, "For operation '{}'", name),
            SyntaxContext::Step(name) => write!(f, "For step '{}'", name),
            SyntaxContext::Action => write!(f, "Action"),
        }
    }
}

/// A parsed node has the wrong shape for its position.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuralError {
    #[error("Under property: '{property}' there should be a list of values, but instead there is a string.")]
    ListExpectedFoundString { property: String },

    #[error("Under property: '{property}' there should be a list of values, but instead there is a map.\nBy the Yaml spec lists properties are marked with a '- ' (dash followed by a space)")]
    ListExpectedFoundMap { property: String },

    #[error("Under property: '{property}' there should be a map of values, but instead there is a list.\nBy the Yaml spec maps properties are NOT marked with a '- ' (dash followed by a space)")]
    MapExpectedFoundList { property: String },

    #[error("Data for property: {property} -> {value} is illegal.\n Transformer is: {transformer}")]
    IllegalPropertyData {
        property: String,
        value: String,
        transformer: String,
    },

    #[error("Step has too many keys under the 'do' keyword,\nMay happen due to wrong indentation")]
    TooManyKeysUnderDo,

    #[error("Each list item in the navigate section should contain exactly one key:value pair.")]
    NavigateEntryNotSinglePair,

    #[error("Each key in the navigate section should be a string.")]
    NavigateKeyNotString,

    #[error("Each value in the navigate section should be a string.")]
    NavigateValueNotString,
}

/// A binding entry (input/output/argument/publish) is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("Could not transform {kind} : {raw}")]
    Untransformable { kind: BindingKind, raw: String },

    #[error("Could not transform {kind} : {raw} since it has a null value.\n\nMake sure a value is specified or that indentation is properly done.")]
    NullValue { kind: BindingKind, raw: String },

    #[error("key: {key} in {}: {name} is not a known property", .kind.lowercase())]
    UnknownProperty {
        kind: BindingKind,
        key: String,
        name: String,
    },

    #[error("input: {name} is private but no default value was specified")]
    PrivateWithoutDefault { name: String },

    #[error("Duplicate {} name found: {name}", .kind.lowercase())]
    DuplicateName { kind: BindingKind, name: String },
}

/// An error local to one section of an artifact, wrapped with its artifact
/// context by [`CompileError::IllegalSyntax`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SectionError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Coarse classification of a compile error, mirroring the documented error
/// taxonomy. Used for reporting only; the message is the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    Naming,
    Binding,
    Graph,
    Dependency,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("There was a problem parsing the YAML source: {source_name}.\n{message}")]
    YamlParse {
        source_name: String,
        message: String,
    },

    #[error("Error transforming source: {source_name} to an executable model. Source {source_name} has no content associated with flow/operation/properties property.")]
    NoExecutableContent { source_name: String },

    #[error("Artifact {{{artifact}}} has unrecognized tag {{{tag}}}. Please take a look at the supported features per versions link")]
    UnrecognizedTag { artifact: String, tag: String },

    #[error("{context} syntax is illegal.\n{source}")]
    IllegalSyntax {
        context: SyntaxContext,
        #[source]
        source: SectionError,
    },

    #[error("Operation/Flow {name} must have a namespace")]
    MissingNamespace { name: String },

    #[error("Executable in source: {source_name} has no name")]
    MissingName { source_name: String },

    #[error("Operation/Flow: '{name}' is declared in a file named \"{file_name}\", it should be declared in a file named \"{name}.{extension}\"")]
    FileNameMismatch {
        name: String,
        file_name: String,
        extension: String,
    },

    #[error("Operation/Flow: '{name}'{}, it should be declared in a file named \"{name}\" plus a valid extension({})", declared_in_clause(.file_name), VALID_EXTENSIONS.join(", "))]
    InvalidFileExtension {
        name: String,
        file_name: Option<String>,
    },

    #[error("Inputs and outputs names should be different for \"{executable_id}\". Please rename input/output \"{name}\"")]
    InputOutputNameCollision { executable_id: String, name: String },

    #[error("Error compiling {source_name}. Operation: {operation} has no action data")]
    MissingActionData {
        source_name: String,
        operation: String,
    },

    #[error("Error compiling {source_name}. Flow: {flow} has no workflow property")]
    MissingWorkflow { source_name: String, flow: String },

    #[error("Flow: '{flow}' syntax is illegal.\nBelow '{section}' property there should be a list of steps and not a map")]
    WorkflowStepsNotSequence { flow: String, section: String },

    #[error("Flow: '{flow}' syntax is illegal.\nEach workflow item should contain exactly one step with its data")]
    MalformedWorkflowItem { flow: String },

    #[error("Step: {step} has no data")]
    StepWithoutData { step: String },

    #[error("Step: {step} syntax is illegal.\nBelow step name, there should be a map of values in the format:\ndo:\n\top_name:")]
    StepBodyNotMapping { step: String },

    #[error("Step: '{step}' has no reference information")]
    StepWithoutReference { step: String },

    #[error("Flow: '{flow}' syntax is illegal. Error compiling result: '{result}'. Explicit values are not allowed for flow results. Correct format is: '- {result}'.")]
    FlowResultWithExpression { flow: String, result: String },

    #[error("Step name: '{step}' appears more than once in the workflow. Each step name in the workflow must be unique")]
    DuplicateStepName { step: String },

    #[error("Step: {step} is unreachable")]
    UnreachableStep { step: String },

    #[error("Reference: '{reference}' in step: '{step}' was not found in the dependencies")]
    UnresolvedReference { reference: String, step: String },

    #[error("Failed to resolve navigation target: '{target}' for step: '{step}'. Target must be a step name or a flow result")]
    UnresolvedNavigationTarget { target: String, step: String },

    #[error("Source: '{source_name}' has compilation errors:\n{}", join_errors(.errors))]
    SourceErrors {
        source_name: String,
        errors: Vec<CompileError>,
    },

    #[error("Dependency: '{dependency}' has compilation errors:\n{}", join_errors(.errors))]
    DependencyErrors {
        dependency: String,
        errors: Vec<CompileError>,
    },
}

impl CompileError {
    /// Wraps a section-local error with its artifact context.
    pub fn illegal_syntax(context: SyntaxContext, source: impl Into<SectionError>) -> Self {
        CompileError::IllegalSyntax {
            context,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::YamlParse { .. }
            | CompileError::NoExecutableContent { .. }
            | CompileError::UnrecognizedTag { .. }
            | CompileError::WorkflowStepsNotSequence { .. }
            | CompileError::StepBodyNotMapping { .. }
            | CompileError::MalformedWorkflowItem { .. } => ErrorKind::Structural,
            CompileError::IllegalSyntax { source, .. } => match source {
                SectionError::Structural(_) => ErrorKind::Structural,
                SectionError::Binding(_) => ErrorKind::Binding,
            },
            CompileError::MissingNamespace { .. }
            | CompileError::MissingName { .. }
            | CompileError::FileNameMismatch { .. }
            | CompileError::InvalidFileExtension { .. } => ErrorKind::Naming,
            CompileError::InputOutputNameCollision { .. } => ErrorKind::Binding,
            CompileError::MissingActionData { .. }
            | CompileError::MissingWorkflow { .. }
            | CompileError::StepWithoutData { .. }
            | CompileError::StepWithoutReference { .. }
            | CompileError::FlowResultWithExpression { .. }
            | CompileError::DuplicateStepName { .. }
            | CompileError::UnreachableStep { .. }
            | CompileError::UnresolvedReference { .. }
            | CompileError::UnresolvedNavigationTarget { .. } => ErrorKind::Graph,
            CompileError::SourceErrors { .. } | CompileError::DependencyErrors { .. } => {
                ErrorKind::Dependency
            }
        }
    }
}

/// Errors around persisting or reloading a finished artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Serialization failed: {0}")]
    Encode(String),

    #[error("Deserialization failed: {0}")]
    Decode(String),

    #[error("Could not access file '{path}': {message}")]
    Io { path: String, message: String },
}

fn declared_in_clause(file_name: &Option<String>) -> String {
    match file_name {
        Some(name) => format!(" is declared in a file named \"{}\"", name),
        None => String::new(),
    }
}

fn join_errors(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
