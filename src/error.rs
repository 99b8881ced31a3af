use thiserror::Error;

pub type PreviewResult<T> = Result<T, PreviewError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreviewError {
    #[error("Invalid scope id '{id}': must be a CSS identifier (letters, digits, '-' or '_', not starting with a digit)")]
    InvalidScopeId { id: String },

    #[error("Invalid wrapper tag '{tag}': must be ASCII alphanumeric and start with a letter")]
    InvalidWrapperTag { tag: String },

    #[error("Unresolved placeholders: {}", .names.join(", "))]
    UnresolvedPlaceholders { names: Vec<String> },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        PreviewError::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for PreviewError {
    fn from(err: serde_yaml::Error) -> Self {
        PreviewError::Yaml(err.to_string())
    }
}
