use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShorthandError>;

#[derive(Error, Debug)]
pub enum ShorthandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
