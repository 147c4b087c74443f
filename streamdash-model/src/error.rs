use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug)]
pub enum ModelError {
    InvalidServerId(String),
    InvalidServerUrl(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidServerId(raw) => {
                write!(f, "invalid server id: {raw:?}")
            }
            ModelError::InvalidServerUrl(raw) => {
                write!(f, "invalid server url: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
