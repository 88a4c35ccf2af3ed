use std::io;

use thiserror::Error;

use crate::exit::ExitCategory;

#[derive(Debug, Error)]
pub enum BumpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("required value '{0}' is empty")]
    MissingInput(String),

    #[error("required file '{0}' does not exist")]
    MissingFile(String),

    #[error("required directory '{0}' does not exist")]
    MissingDirectory(String),

    #[error("'{0}' is not a block device")]
    MissingDevice(String),

    #[error("'{0}' is not a mount point")]
    MissingMountPoint(String),

    #[error("Command '{0}' not found — is it installed?")]
    CommandNotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("corrupt data: {0}")]
    CorruptData(String),

    #[error("Command '{0}' failed with exit code {1}")]
    CommandFailed(String, i32),

    #[error("signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl BumpError {
    /// Maps every error to exactly one entry of the closed exit taxonomy.
    pub fn category(&self) -> ExitCategory {
        match self {
            BumpError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                ExitCategory::PermissionFailure
            }
            BumpError::Io(_) => ExitCategory::FilesystemFailure,
            BumpError::MissingInput(_) => ExitCategory::MissingInput,
            BumpError::MissingFile(_) => ExitCategory::MissingFile,
            BumpError::MissingDirectory(_) => ExitCategory::MissingDirectory,
            BumpError::MissingDevice(_) => ExitCategory::MissingDevice,
            BumpError::MissingMountPoint(_) => ExitCategory::MissingMountPoint,
            BumpError::CommandNotFound(_) => ExitCategory::MissingCommand,
            BumpError::InvalidConfig(_) => ExitCategory::InvalidConfig,
            BumpError::CorruptData(_) => ExitCategory::CorruptData,
            BumpError::CommandFailed(_, _) => ExitCategory::ServiceFailure,
            BumpError::Signal(_) => ExitCategory::ServiceFailure,
        }
    }
}
