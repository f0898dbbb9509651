//! Errors surfaced to callers of the check operations and settings loader

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A settings file could not be read or parsed
    #[error("config file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },

    /// A setting carried a value outside its domain
    #[error("invalid value for {option}: {message}")]
    InvalidOption { option: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
