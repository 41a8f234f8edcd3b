//! Remote provisioning helpers for Unicorn behind Nginx.
//!
//! Given a [`RemoteExecutor`] for a target host, the helpers place files into privileged
//! locations, check for existing files, inspect the host's distribution to pick the Nginx config
//! layout, and derive where Unicorn keeps its socket, config, PID and log files under the shared
//! deployment root.
//!
//! ```no_run
//! # async fn deploy() -> color_eyre::Result<()> {
//! use std::path::Path;
//! use unicorn_nginx_provision::{DeployConfigBuilder, LocalExecutor, Provisioner};
//!
//! let config = DeployConfigBuilder::default()
//!     .with_shared_root(Some("/srv/shop/shared".into()))
//!     .with_nginx_config_name(Some("shop".to_string()))
//!     .build()?;
//! let provisioner = Provisioner::new(LocalExecutor::new(), &config);
//!
//! let target = provisioner.nginx_config_file(&config.nginx_config_name).await?;
//! provisioner.sudo_upload(Path::new("nginx.conf"), &target).await?;
//! provisioner.enable_nginx_site(&config.nginx_config_name).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod executor;
pub mod host;
pub mod logs;
pub mod nginx;
pub mod paths;
pub mod provision;
#[cfg(test)]
mod tests;
pub mod utils;

pub use config::{DeployConfig, DeployConfigBuilder};
pub use errors::{ExecutorError, ProvisionError};
pub use executor::local::LocalExecutor;
pub use executor::{CommandOutput, RemoteExecutor};
pub use host::{HostProfile, OsFamily, classify_release};
pub use paths::RemotePaths;
pub use provision::Provisioner;
pub use utils::sudo::RootCmd;
