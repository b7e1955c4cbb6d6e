use thiserror::Error;

use crate::dimension::Dimension;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),
    #[error("unknown exam type id: {0}")]
    UnknownExamType(u32),
    #[error("invalid value '{value}' for dimension {dimension}")]
    InvalidValue { dimension: Dimension, value: String },
    #[error("dimension {dimension} expects {expected} values")]
    ValueKind {
        dimension: Dimension,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
