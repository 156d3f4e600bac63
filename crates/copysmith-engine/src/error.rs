use thiserror::Error;

/// Errors raised while preparing engine configuration.
///
/// Parsing and conversion never fail; only marker syntax supplied from
/// outside can be rejected.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("marker template `{template}` has no {{id}} placeholder")]
    MissingIdPlaceholder { template: String },

    #[error("marker `{name}` must not be empty")]
    EmptyMarker { name: &'static str },

    #[error("version id `{0}` must be non-empty and alphanumeric")]
    InvalidVersionId(String),

    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
