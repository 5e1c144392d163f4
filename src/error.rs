use thiserror::Error;

/// Everything that can end a storyboard analysis.
///
/// Each variant is terminal for the invocation that produced it; nothing is
/// retried and no partial storyboard is ever handed out.
#[derive(Debug, Error)]
pub enum StoryboardError {
    #[error("no Gemini API key is configured for this chat")]
    MissingCredential,

    #[error("reference image could not be decoded: {0}")]
    InvalidImage(String),

    #[error("generation service error: {0}")]
    Service(String),

    #[error("response is not valid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("response does not match the storyboard schema: {0}")]
    Schema(#[from] SchemaViolation),
}

/// A well-formed response that breaks the storyboard contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("field `{path}` must be {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("`{path}` must contain {expected} entries, found {actual}")]
    Cardinality {
        path: String,
        expected: &'static str,
        actual: usize,
    },

    #[error("`{path}` is {id}; keyframe ids must start at 1 and strictly increase (previous was {previous})")]
    KeyframeOrder { path: String, id: u64, previous: u64 },

    #[error("`{path}` must not be empty")]
    EmptyPrompt { path: String },
}

impl SchemaViolation {
    /// Dotted path of the offending field, e.g. `story_arc.theme`.
    pub fn path(&self) -> &str {
        match self {
            SchemaViolation::MissingField { path }
            | SchemaViolation::WrongType { path, .. }
            | SchemaViolation::Cardinality { path, .. }
            | SchemaViolation::KeyframeOrder { path, .. }
            | SchemaViolation::EmptyPrompt { path } => path,
        }
    }
}
