//! Error types for the collector and its line protocol.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("index {index} out of bounds (size {size})")]
    OutOfBounds { index: usize, size: usize },

    #[error("item {0} is already removed")]
    AlreadyRemoved(usize),

    #[error("unexpected end of stream inside a record")]
    Truncated,

    #[error("field length {len} exceeds maximum {max}")]
    FieldTooLong { len: usize, max: usize },

    #[error("field is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CollectorError>;

/// A field value that violates a record's invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is {len} bytes long, maximum is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("year {year} is past {max}")]
    YearOutOfRange { year: u16, max: u16 },
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("invalid command '{0}'")]
    Unknown(String),

    #[error("wrong argument number in {0} command")]
    WrongArgCount(&'static str),

    #[error("invalid number '{arg}': {source}")]
    BadNumber {
        arg: String,
        source: std::num::ParseIntError,
    },

    #[error("file load error '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        source: CollectorError,
    },

    #[error("file save error '{}': {source}", path.display())]
    Save {
        path: PathBuf,
        source: CollectorError,
    },

    #[error(transparent)]
    Collector(#[from] CollectorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::Collector(CollectorError::Invalid(err))
    }
}
