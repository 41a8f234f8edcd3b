//! [`RemoteExecutor`] for the machine the deploy runs on.
//!
//! Useful for single-host deployments where the application server lives next to the pipeline,
//! and for exercising the provisioning helpers without an SSH session.

use crate::errors::ExecutorError;
use crate::executor::{CommandOutput, RemoteExecutor};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs everything on the current host with `tokio::process` and `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct LocalExecutor;

impl LocalExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl RemoteExecutor for LocalExecutor {
    async fn run(&self, argv: &[String]) -> Result<CommandOutput, ExecutorError> {
        let (cmd, args) = argv
            .split_first()
            .ok_or_else(|| ExecutorError::Transport("Refusing to run an empty command".into()))?;

        debug!("Executing: {}", argv.join(" "));
        let output = Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            // Killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    async fn test(&self, condition: &str) -> Result<bool, ExecutorError> {
        debug!("Testing: {}", condition);
        let status = Command::new("sh")
            .arg("-c")
            .arg(condition)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        Ok(status.success())
    }

    async fn copy_file(&self, local: &Path, remote: &Path) -> Result<(), ExecutorError> {
        debug!("Copying {} -> {}", local.display(), remote.display());
        tokio::fs::copy(local, remote).await?;
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::Result;
    use tempfile::tempdir;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run_captures_output() -> Result<()> {
        let exec = LocalExecutor::new();

        let output = exec.run(&argv(&["echo", "-n", "success"])).await?;
        assert!(output.success());
        assert_eq!(output.stdout, "success");

        let output = exec.run(&argv(&["sh", "-c", "echo oops >&2; exit 3"])).await?;
        assert!(!output.success());
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr.trim(), "oops");
        Ok(())
    }

    #[tokio::test]
    async fn test_run_rejects_empty_argv() {
        let exec = LocalExecutor::new();
        assert!(matches!(
            exec.run(&[]).await,
            Err(ExecutorError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_run_missing_binary_is_error() {
        let exec = LocalExecutor::new();
        let res = exec
            .run(&argv(&["/nonexistent/definitely-not-a-binary"]))
            .await;
        assert!(matches!(res, Err(ExecutorError::Io(_))));
    }

    #[tokio::test]
    async fn test_condition() -> Result<()> {
        let temp_dir = tempdir()?;
        let exec = LocalExecutor::new();

        let present = format!("[ -e '{}' ]", temp_dir.path().display());
        let missing = format!("[ -e '{}' ]", temp_dir.path().join("missing").display());

        assert!(exec.test(&present).await?);
        assert!(!exec.test(&missing).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_copy_file_overwrites() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("source.conf");
        let target = temp_dir.path().join("target.conf");
        std::fs::write(&source, "new")?;
        std::fs::write(&target, "old")?;

        LocalExecutor::new().copy_file(&source, &target).await?;

        assert_eq!(std::fs::read_to_string(&target)?, "new");
        Ok(())
    }
}
