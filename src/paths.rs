//! Locations of the Unicorn lifecycle artifacts under the shared deployment root.

use std::path::{Path, PathBuf};

/// Socket, config, PID and log paths of the Unicorn master, all rooted at the shared directory.
///
/// Derived on demand from [`DeployConfig`](crate::DeployConfig), never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePaths {
    pub socket: PathBuf,
    pub config: PathBuf,
    pub pid: PathBuf,
    pub stdout_log: PathBuf,
    pub stderr_log: PathBuf,
}

impl RemotePaths {
    /// All artifact paths under `shared_root`.
    pub fn new<P: AsRef<Path>>(shared_root: P) -> Self {
        let root = shared_root.as_ref();
        Self {
            socket: socket_path(root),
            config: config_path(root),
            pid: pid_path(root),
            stdout_log: stdout_log_path(root),
            stderr_log: stderr_log_path(root),
        }
    }
}

/// Unix socket Nginx proxies to.
pub fn socket_path<P: AsRef<Path>>(shared_root: P) -> PathBuf {
    shared_root.as_ref().join("tmp").join("unicorn.sock")
}

/// Unicorn config file. The file itself is rendered and uploaded by the caller.
pub fn config_path<P: AsRef<Path>>(shared_root: P) -> PathBuf {
    shared_root.as_ref().join("config").join("unicorn.rb")
}

/// PID file of the Unicorn master.
pub fn pid_path<P: AsRef<Path>>(shared_root: P) -> PathBuf {
    shared_root.as_ref().join("tmp").join("pids").join("unicorn.pid")
}

/// Log receiving Unicorn's stdout.
pub fn stdout_log_path<P: AsRef<Path>>(shared_root: P) -> PathBuf {
    shared_root.as_ref().join("log").join("unicorn.stdout.log")
}

/// Log receiving Unicorn's stderr.
pub fn stderr_log_path<P: AsRef<Path>>(shared_root: P) -> PathBuf {
    shared_root.as_ref().join("log").join("unicorn.stderr.log")
}
