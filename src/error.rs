use thiserror::Error;

/// Failures surfaced by the agricultural weather core.
#[derive(Debug, Error)]
pub enum AgriError {
    /// Invalid region selector. Only raised at startup.
    #[error("invalid region configuration: {0}")]
    Configuration(String),

    #[error("Coordinates are outside the configured region: {region}")]
    OutOfRegion { region: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Opaque upstream failure, passed through as-is.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub type AgriResult<T> = Result<T, AgriError>;
