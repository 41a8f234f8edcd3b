//! The remote-execution capability the provisioning helpers are built on.
//!
//! The deploy pipeline owns the actual transport (SSH session, local shell, ...) and hands an
//! implementation of [`RemoteExecutor`] to a [`Provisioner`](crate::Provisioner). This crate only
//! ships [`local::LocalExecutor`], which targets the current machine.

use crate::errors::ExecutorError;
use std::future::Future;
use std::path::Path;

pub mod local;

/// Captured result of a command run on the target host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run commands, evaluate conditions and copy files on one target host.
///
/// Implementations are responsible for timeouts and cancellation. Errors are only expected for
/// transport-level failures: a command that runs and exits non-zero is reported through
/// [`CommandOutput::exit_code`], a condition that evaluates false through `Ok(false)`.
pub trait RemoteExecutor {
    /// Run `argv` and capture its output.
    fn run(
        &self,
        argv: &[String],
    ) -> impl Future<Output = Result<CommandOutput, ExecutorError>> + Send;

    /// Evaluate a shell test expression such as `[ -e /etc/nginx ]`.
    ///
    /// The expression is opaque to the caller and handed to the host's shell as is.
    fn test(&self, condition: &str) -> impl Future<Output = Result<bool, ExecutorError>> + Send;

    /// Copy `local` from the initiating side to `remote` on the host, unprivileged.
    fn copy_file(
        &self,
        local: &Path,
        remote: &Path,
    ) -> impl Future<Output = Result<(), ExecutorError>> + Send;
}
