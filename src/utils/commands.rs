//! Builders for the commands issued on the target host.
//!
//! Nothing in here touches the network. Building a command and running it are kept apart so the
//! exact argv of every remote call can be checked without an executor.

use crate::utils::sudo::RootCmd;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// World-writable directory used to stage uploads before the privileged move.
pub const STAGING_DIR: &str = "/tmp";

/// Quote `s` for a POSIX shell.
pub fn shell_escape(s: &str) -> String {
    // Single quotes, with embedded single quotes closed, escaped and reopened
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Shell test for the existence of `path`.
pub fn exists_condition<P: AsRef<Path>>(path: P) -> String {
    format!(
        "[ -e {} ]",
        shell_escape(&path.as_ref().to_string_lossy())
    )
}

/// Prints the name of the user the executor runs as.
pub fn identity_command() -> Vec<String> {
    vec!["id".to_string(), "-un".to_string()]
}

/// Dumps every release-info file of the host. The glob needs a shell to expand.
pub fn release_info_command() -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        "cat /etc/*-release".to_string(),
    ]
}

/// Deterministic staging location for `destination`: `/tmp/<basename>`.
///
/// Returns `None` if `destination` has no file name (e.g. `/` or a path ending in `..`).
pub fn staging_path<P: AsRef<Path>>(destination: P) -> Option<PathBuf> {
    destination
        .as_ref()
        .file_name()
        .map(|name| Path::new(STAGING_DIR).join(name))
}

/// Privileged move of `staged` into `destination_dir`.
pub fn move_command<P: AsRef<Path>, Q: AsRef<Path>>(
    root_cmd: &RootCmd,
    staged: P,
    destination_dir: Q,
) -> Vec<String> {
    root_cmd.wrap(
        "mv",
        [
            staged.as_ref().to_string_lossy(),
            destination_dir.as_ref().to_string_lossy(),
        ],
    )
}

/// Privileged, forced symlink `link` -> `target`.
pub fn link_command<P: AsRef<Path>, Q: AsRef<Path>>(
    root_cmd: &RootCmd,
    target: P,
    link: Q,
) -> Vec<String> {
    root_cmd.wrap(
        "ln",
        [
            Cow::Borrowed("-fs"),
            target.as_ref().to_string_lossy(),
            link.as_ref().to_string_lossy(),
        ],
    )
}
