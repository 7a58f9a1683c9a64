use thiserror::Error;

/// Errors raised while turning stored data into step objects, or while checking them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("Stored step has no 'kind' discriminator")]
    MissingKind,

    #[error("No step variant is registered for kind '{0}'")]
    UnrecognizedKind(String),

    #[error("Dial step '{step}' has a target with an unrecognized dialType: '{dial_type}'")]
    UnrecognizedDialType { step: String, dial_type: String },

    #[error("Stored '{kind}' data is malformed: {message}")]
    Malformed { kind: String, message: String },

    #[error("Malformed value-extraction path: {0}")]
    MalformedExtractorPath(#[from] ExtractorError),

    #[error("No step names left after 'step{0}'")]
    IdentifiersExhausted(u64),

    #[error("Step '{step}' cannot route on the service response: {reason}")]
    IncompleteRouting { step: String, reason: String },
}

impl StepError {
    pub(crate) fn malformed(kind: &str, err: impl std::fmt::Display) -> Self {
        StepError::Malformed {
            kind: kind.to_string(),
            message: err.to_string(),
        }
    }
}

/// Errors raised when committing an access operation to a value-extraction path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorError {
    #[error("a property access needs a non-empty property name")]
    MissingProperty,

    #[error("an index access needs a position")]
    MissingPosition,

    #[error("the path already ends in a terminal value and accepts no further operations")]
    PathClosed,

    #[error("a path can only be finished with a terminal value operation")]
    UnterminatedPath,
}

/// Errors raised while loading or editing a whole flow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Failed to parse flow JSON: {0}")]
    Json(String),

    #[error("Step name '{0}' is used more than once in the flow")]
    DuplicateStepName(String),

    #[error("Flow has no node named '{0}'")]
    UnknownNode(String),

    #[error(transparent)]
    Step(#[from] StepError),
}
