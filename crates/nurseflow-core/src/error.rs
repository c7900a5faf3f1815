use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown vital sign: {0}")]
    UnknownVital(String),

    #[error("unknown no-data policy: {0}")]
    UnknownPolicy(String),
}
