//! Local path handling.

use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::path::{Path, PathBuf};

/// Expands a local path, resolving environment variables and tilde expressions.
///
/// Only meant for paths on the initiating side (config file, log directory). Paths on the target
/// host are passed through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set.
pub(crate) fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let expanded = shellexpand::path::full(path.as_ref())
        .map_err(|e| eyre!("Failed to expand path {:?}: {}", path.as_ref(), e))?;

    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path() -> Result<()> {
        temp_env::with_vars(
            [("HOME", Some("/home/deploy")), ("APP_ROOT", Some("/srv/app"))],
            || -> Result<()> {
                assert_eq!(
                    expand_path("~/.config/unicorn-nginx")?,
                    PathBuf::from("/home/deploy/.config/unicorn-nginx")
                );
                assert_eq!(
                    expand_path("$APP_ROOT/config.toml")?,
                    PathBuf::from("/srv/app/config.toml")
                );
                assert_eq!(expand_path("/etc/plain")?, PathBuf::from("/etc/plain"));
                Ok(())
            },
        )
    }

    #[test]
    fn test_expand_path_unset_var() {
        temp_env::with_var_unset("UNICORN_NGINX_UNSET_VAR", || {
            assert!(expand_path("$UNICORN_NGINX_UNSET_VAR/x").is_err());
        });
    }
}
