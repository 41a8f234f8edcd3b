//! Error types returned by the provisioning operations.
//!
//! Every remote operation either succeeds or reports exactly one of the variants below. There is
//! no local recovery or retry, with the single exception of [`ProvisionError::ProbeAmbiguous`],
//! which host detection turns into an `Other` classification instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a [`RemoteExecutor`](crate::executor::RemoteExecutor).
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// The remote channel broke (connection lost, session closed, timeout).
    #[error("Remote transport failed: {0}")]
    Transport(String),

    /// Local I/O failed while talking to the remote side.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// The command ran but exited unsuccessfully.
    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// Errors reported by the provisioning operations.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The remote channel failed while running a command or test.
    #[error("Failed to execute `{command}`")]
    ExecutionFailed {
        command: String,
        #[source]
        source: ExecutorError,
    },

    /// The unprivileged staging copy did not complete.
    #[error("Failed to stage {local:?} at {staged:?}")]
    TransferFailed {
        local: PathBuf,
        staged: PathBuf,
        #[source]
        source: ExecutorError,
    },

    /// The privileged move (or link) into the destination did not complete.
    #[error("Failed to place file at {destination:?}")]
    PlacementFailed {
        destination: PathBuf,
        #[source]
        source: ExecutorError,
    },

    /// The upload destination has no file name to stage under.
    #[error("Invalid upload destination {0:?}")]
    InvalidDestination(PathBuf),

    /// Release metadata could not be read or was empty.
    #[error("Release metadata unreadable: {0}")]
    ProbeAmbiguous(String),
}

impl ProvisionError {
    pub(crate) fn execution(command: &[String], source: ExecutorError) -> Self {
        ProvisionError::ExecutionFailed {
            command: command.join(" "),
            source,
        }
    }
}
