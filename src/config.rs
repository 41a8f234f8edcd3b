//! Deployment configuration for the provisioning helpers.
//!
//! A [`DeployConfig`] is built once per deploy invocation and is read-only afterwards. Values are
//! resolved from defaults, an optional TOML file and explicit builder overrides, in that order.

use crate::paths::RemotePaths;
use crate::utils::file_fs::expand_path;
use crate::utils::sudo::RootCmd;
use color_eyre::Result;
use color_eyre::eyre::{OptionExt, WrapErr, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

// -------------------------------------------------------------------------------------------------
// Deploy Config
// -------------------------------------------------------------------------------------------------

/// Representation of the deployment configuration.
///
/// # Defaults
///
/// - `use_sudo`: true - Elevate the final move of uploaded files
/// - `sudo_cmd`: "sudo" - Command used for privilege elevation
///
/// `shared_root` and `nginx_config_name` have no default and must be provided either in the
/// config file or through the builder.
///
/// # Example Configuration
///
/// The file is looked up under `$XDG_CONFIG_HOME/unicorn-nginx/config.toml` unless another path
/// is given to the builder:
///
/// ```toml
/// shared_root = "/home/deploy/apps/shop/shared"
/// nginx_config_name = "shop_production"
/// use_sudo = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Directory on the target host holding files that persist across releases.
    pub shared_root: PathBuf,
    /// Base name of the Nginx site config, without the `.conf` extension.
    pub nginx_config_name: String,
    /// Use the root command for privileged placement.
    pub use_sudo: bool,
    /// Command used for privilege elevation (sudo/doas/etc).
    pub sudo_cmd: String,
}

impl DeployConfig {
    /// Unicorn artifact locations under [`Self::shared_root`].
    pub fn paths(&self) -> RemotePaths {
        RemotePaths::new(&self.shared_root)
    }

    pub fn root_cmd(&self) -> RootCmd {
        if self.use_sudo {
            RootCmd::Sudo {
                cmd: self.sudo_cmd.clone(),
            }
        } else {
            RootCmd::None
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Config Builder
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfigBuilder {
    #[serde(skip)]
    config_file: Option<PathBuf>,
    shared_root: Option<PathBuf>,
    nginx_config_name: Option<String>,
    use_sudo: Option<bool>,
    sudo_cmd: Option<String>,
}

impl DeployConfigBuilder {
    // --
    // * Builders

    pub fn with_config_file(&mut self, config_file: Option<PathBuf>) -> &mut Self {
        let new = self;
        new.config_file = config_file;
        new
    }

    pub fn with_shared_root(&mut self, shared_root: Option<PathBuf>) -> &mut Self {
        let new = self;
        new.shared_root = shared_root;
        new
    }

    pub fn with_nginx_config_name(&mut self, nginx_config_name: Option<String>) -> &mut Self {
        let new = self;
        new.nginx_config_name = nginx_config_name;
        new
    }

    pub fn with_use_sudo(&mut self, use_sudo: Option<bool>) -> &mut Self {
        let new = self;
        new.use_sudo = use_sudo;
        new
    }

    pub fn with_sudo_cmd(&mut self, sudo_cmd: Option<String>) -> &mut Self {
        let new = self;
        new.sudo_cmd = sudo_cmd;
        new
    }

    /// Reads the config file, if any.
    ///
    /// An unreadable or missing file is not an error, defaults are used instead.
    fn read_config_file(path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(
                    "No config file read from {}: {}. Default config values will be used",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Constructs the final configuration.
    ///
    /// Resolution order (highest priority last):
    /// 1. Default values
    /// 2. Config file values
    /// 3. Explicit builder overrides
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file is not valid TOML or contains unknown keys
    /// - `shared_root` or `nginx_config_name` are missing or empty
    /// - `shared_root` is not an absolute path
    pub fn build(&self) -> Result<DeployConfig> {
        let config_file_path = match self.config_file {
            Some(ref path) => expand_path(path)?,
            None => dirs::config_dir()
                .ok_or_eyre("Could not determine user's config directory")?
                .join("unicorn-nginx")
                .join("config.toml"),
        };

        let parsed: DeployConfigBuilder = match Self::read_config_file(&config_file_path) {
            Some(content) => toml::from_str(&content).wrap_err_with(|| {
                format!("Failed to parse config {}", config_file_path.display())
            })?,
            None => DeployConfigBuilder::default(),
        };

        let shared_root = self
            .shared_root
            .clone()
            .or(parsed.shared_root)
            .ok_or_eyre("`shared_root` is not configured")?;
        // A remote path, never expanded locally
        if !shared_root.is_absolute() {
            bail!(
                "`shared_root` must be an absolute path, got {}",
                shared_root.display()
            );
        }

        let nginx_config_name = self
            .nginx_config_name
            .clone()
            .or(parsed.nginx_config_name)
            .filter(|name| !name.trim().is_empty())
            .ok_or_eyre("`nginx_config_name` is not configured")?;

        Ok(DeployConfig {
            shared_root,
            nginx_config_name,
            use_sudo: self.use_sudo.or(parsed.use_sudo).unwrap_or(true),
            sudo_cmd: self
                .sudo_cmd
                .clone()
                .or(parsed.sudo_cmd)
                .unwrap_or_else(|| "sudo".to_string()),
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
