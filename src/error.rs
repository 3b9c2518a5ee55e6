use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreadcrumbError {
    #[error("Decision text cannot be empty.")]
    EmptyDecision,

    #[error("Decision store has not been loaded yet.")]
    NotLoaded,

    #[error("Decision not found: {0}")]
    DecisionNotFound(String),

    #[error("Ambiguous id '{0}' matches more than one decision. Use more characters.")]
    AmbiguousId(String),

    #[error("Invalid export format: {0}. Expected 'json' or 'markdown'.")]
    InvalidExportFormat(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BreadcrumbError>;
