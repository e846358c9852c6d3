use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("empty ssh user")]
    EmptyUser,

    #[error("empty ssh command")]
    EmptyCommand,

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
