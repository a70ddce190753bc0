use thiserror::Error;

/// Failures outside the tracing core. Rays that miss are not errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scene file: {0}")]
    SceneParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
