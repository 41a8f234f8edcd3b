//! Remote provisioning operations for one target host.
//!
//! A [`Provisioner`] wraps the executor of a single deploy session. It places files into
//! privileged locations, checks for existing files and inspects the host for the details the
//! Unicorn/Nginx setup depends on. Every operation is a short, strictly sequential series of
//! remote calls; nothing is retried or cached here.

use crate::config::DeployConfig;
use crate::errors::{ExecutorError, ProvisionError};
use crate::executor::{CommandOutput, RemoteExecutor};
use crate::host::{HostProfile, OsFamily, classify_release};
use crate::nginx::{nginx_config_path, nginx_enabled_link};
use crate::utils::commands::{
    exists_condition, identity_command, link_command, move_command, release_info_command,
    staging_path,
};
use crate::utils::sudo::RootCmd;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Provisioning operations bound to the executor of one target host.
pub struct Provisioner<E> {
    executor: E,
    root_cmd: RootCmd,
}

impl<E: RemoteExecutor> Provisioner<E> {
    /// Provisioner escalating with the root command configured in `config`.
    pub fn new(executor: E, config: &DeployConfig) -> Self {
        Self::with_root_cmd(executor, config.root_cmd())
    }

    /// Provisioner escalating with an explicit root command.
    pub fn with_root_cmd(executor: E, root_cmd: RootCmd) -> Self {
        Self { executor, root_cmd }
    }

    /// The executor all remote calls go through.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Places `local` at `destination` on the host, even if the destination directory is only
    /// writable by root.
    ///
    /// The file is first copied unprivileged to `/tmp/<basename(destination)>`, then moved into
    /// the destination directory with the root command. The move is only issued after the copy
    /// succeeded. A failed move leaves the staged file behind; calling this again with the same
    /// arguments overwrites it.
    ///
    /// The destination directory must already exist.
    ///
    /// # Errors
    ///
    /// * [`ProvisionError::InvalidDestination`] if `destination` has no file name.
    /// * [`ProvisionError::TransferFailed`] if the staging copy fails.
    /// * [`ProvisionError::PlacementFailed`] if the privileged move fails.
    #[instrument(skip(self))]
    pub async fn sudo_upload(
        &self,
        local: &Path,
        destination: &Path,
    ) -> Result<(), ProvisionError> {
        let staged = staging_path(destination)
            .ok_or_else(|| ProvisionError::InvalidDestination(destination.to_path_buf()))?;
        let destination_dir = match destination.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        debug!("Staging {} at {}", local.display(), staged.display());
        self.executor
            .copy_file(local, &staged)
            .await
            .map_err(|source| ProvisionError::TransferFailed {
                local: local.to_path_buf(),
                staged: staged.clone(),
                source,
            })?;

        let argv = move_command(&self.root_cmd, &staged, destination_dir);
        debug!("Executing: {}", argv.join(" "));
        let output = self.executor.run(&argv).await.map_err(|source| {
            ProvisionError::PlacementFailed {
                destination: destination.to_path_buf(),
                source,
            }
        })?;
        if !output.success() {
            return Err(ProvisionError::PlacementFailed {
                destination: destination.to_path_buf(),
                source: non_zero_exit(output),
            });
        }

        info!("Placed {}", destination.display());
        Ok(())
    }

    /// Checks whether `path` exists on the host.
    ///
    /// A missing file is `Ok(false)`. Only a failing executor is reported as an error.
    #[instrument(skip(self))]
    pub async fn file_exists(&self, path: &Path) -> Result<bool, ProvisionError> {
        let condition = exists_condition(path);
        debug!("Testing: {}", condition);
        self.executor
            .test(&condition)
            .await
            .map_err(|source| ProvisionError::ExecutionFailed {
                command: condition,
                source,
            })
    }

    /// Name of the user the executor runs commands as.
    #[instrument(skip(self))]
    pub async fn deploy_user(&self) -> Result<String, ProvisionError> {
        let argv = identity_command();
        let output = self.run_checked(&argv).await?;
        Ok(output.stdout.trim_end().to_string())
    }

    /// Reads the host's release-info files and classifies the distribution.
    ///
    /// Unreadable or empty release metadata is not an error: the host is assumed to be
    /// [`OsFamily::Other`] and a warning is logged, since an Nginx path has to be chosen either
    /// way.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::ExecutionFailed`] if the executor itself fails.
    #[instrument(skip(self))]
    pub async fn probe_host(&self) -> Result<HostProfile, ProvisionError> {
        let argv = release_info_command();
        debug!("Executing: {}", argv.join(" "));
        let output = self
            .executor
            .run(&argv)
            .await
            .map_err(|source| ProvisionError::execution(&argv, source))?;

        let release_text = match release_text(output) {
            Ok(text) => text,
            Err(e) => {
                warn!("{}. Assuming a non-Ubuntu host", e);
                return Ok(HostProfile {
                    family: OsFamily::Other,
                    release_text: String::new(),
                });
            }
        };

        let family = classify_release(&release_text);
        debug!("Host classified as {:?}", family);
        Ok(HostProfile {
            family,
            release_text,
        })
    }

    /// Distribution family of the host. Inspects the host on every call.
    pub async fn os_family(&self) -> Result<OsFamily, ProvisionError> {
        Ok(self.probe_host().await?.family)
    }

    /// Location of the Nginx site config named `config_name` on this host.
    #[instrument(skip(self))]
    pub async fn nginx_config_file(&self, config_name: &str) -> Result<PathBuf, ProvisionError> {
        let family = self.os_family().await?;
        Ok(nginx_config_path(family, config_name))
    }

    /// Activates the Nginx site `config_name` where the distribution requires it.
    ///
    /// On Ubuntu-family hosts the config in `sites-available/` is symlinked into `sites-enabled/`
    /// and the link path is returned. Other hosts load `conf.d/` directly; no command is issued
    /// and `None` is returned.
    ///
    /// # Errors
    ///
    /// * [`ProvisionError::ExecutionFailed`] if the host inspection fails.
    /// * [`ProvisionError::PlacementFailed`] if the link cannot be created.
    #[instrument(skip(self))]
    pub async fn enable_nginx_site(
        &self,
        config_name: &str,
    ) -> Result<Option<PathBuf>, ProvisionError> {
        let family = self.os_family().await?;
        let Some(link) = nginx_enabled_link(family, config_name) else {
            debug!("No site link needed for {:?} hosts", family);
            return Ok(None);
        };

        let argv = link_command(
            &self.root_cmd,
            nginx_config_path(family, config_name),
            &link,
        );
        debug!("Executing: {}", argv.join(" "));
        let output = self.executor.run(&argv).await.map_err(|source| {
            ProvisionError::PlacementFailed {
                destination: link.clone(),
                source,
            }
        })?;
        if !output.success() {
            return Err(ProvisionError::PlacementFailed {
                destination: link,
                source: non_zero_exit(output),
            });
        }

        info!("Enabled site {}", link.display());
        Ok(Some(link))
    }

    /// Runs `argv`, treating a non-zero exit like a broken channel.
    async fn run_checked(&self, argv: &[String]) -> Result<CommandOutput, ProvisionError> {
        debug!("Executing: {}", argv.join(" "));
        let output = self
            .executor
            .run(argv)
            .await
            .map_err(|source| ProvisionError::execution(argv, source))?;
        if output.success() {
            Ok(output)
        } else {
            Err(ProvisionError::execution(argv, non_zero_exit(output)))
        }
    }
}

fn non_zero_exit(output: CommandOutput) -> ExecutorError {
    ExecutorError::NonZeroExit {
        code: output.exit_code,
        stderr: output.stderr.trim().to_string(),
    }
}

/// Usable release text from the output of the release-info read.
///
/// Only the output of a successful read is classified. A non-zero exit (missing or unreadable
/// release files) or an empty result counts as ambiguous, even if something was printed.
fn release_text(output: CommandOutput) -> Result<String, ProvisionError> {
    if !output.success() {
        return Err(ProvisionError::ProbeAmbiguous(format!(
            "reading release files exited with code {}: {}",
            output.exit_code,
            output.stderr.trim()
        )));
    }
    if output.stdout.trim().is_empty() {
        return Err(ProvisionError::ProbeAmbiguous(
            "no release information found".to_string(),
        ));
    }
    Ok(output.stdout)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
