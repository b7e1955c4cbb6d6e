use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CascadeError {
    /// A flat row lacks an ancestor id its chain requires.
    #[error("malformed catalog row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },
    #[error(transparent)]
    Model(#[from] acad_model::ModelError),
}

pub type Result<T> = std::result::Result<T, CascadeError>;
