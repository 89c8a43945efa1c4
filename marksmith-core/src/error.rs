use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading documents or configuration.
/// Formatting operations themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid document JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("document has no blocks")]
    EmptyDocument,

    #[error("text leaves are not allowed at the top level")]
    TopLevelLeaf,

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid color literal `{0}`, expected #rrggbb")]
    InvalidColor(String),

    #[error("unknown question chord binding `{0}`, expected `block` or `mark`")]
    InvalidChord(String),
}
