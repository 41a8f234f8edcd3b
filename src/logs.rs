//! Logging facilities for deploy pipelines using this crate.
//!
//! Logs are displayed in the terminal and written to a log file per run. By default, only the log
//! files of the last 15 runs are kept. The pipeline owns the process, so nothing here is installed
//! implicitly: call [`Logger::start`] once and keep the returned guard alive until exit.

use chrono::{DateTime, Local};
use color_eyre::Result;
use color_eyre::eyre::{OptionExt, WrapErr};
use derive_builder::Builder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PREFIX: &str = "unicorn-nginx";

#[derive(Debug, Clone, Builder)]
#[builder(setter(prefix = "with"))]
pub struct Logger {
    /// 0 = Info, 1 = Debug, 2+ = Trace
    #[builder(default = "0")]
    verbosity: u8,
    /// Directory of the log files, see [`get_default_log_dir`] if unset.
    #[builder(setter(into, strip_option), default)]
    log_dir: Option<PathBuf>,
    /// Maximum number of log files to retain, including the current one.
    #[builder(default = "15")]
    max_logs: usize,
}

impl Logger {
    /// Installs the global subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured verbosity.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory cannot be prepared or a global subscriber is
    /// already installed.
    pub fn start(&self) -> Result<WorkerGuard> {
        let level = match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("unicorn_nginx_provision={}", level)));

        let log_dir = match self.log_dir {
            Some(ref dir) => crate::utils::file_fs::expand_path(dir)?,
            None => get_default_log_dir()?,
        };
        let log_file = prepare_log_file(&log_dir, self.max_logs, Local::now())?;
        let (file_writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, log_file));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(self.verbosity > 0),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_timer(ChronoLocal::rfc_3339())
                    .with_writer(file_writer),
            )
            .with(ErrorLayer::default())
            .try_init()
            .wrap_err("Failed to initialize logging")?;

        Ok(guard)
    }
}

/// Get the default directory where log files should be stored.
///
/// Uses `$XDG_DATA_HOME/unicorn-nginx/logs`, falling back to `~/.local/share/unicorn-nginx/logs`.
pub fn get_default_log_dir() -> Result<PathBuf> {
    Ok(dirs::data_dir()
        .ok_or_eyre("Could not determine user's data directory")?
        .join(LOG_PREFIX)
        .join("logs"))
}

/// Create `log_dir`, make room for a new log and return the file name of the run started at `now`.
///
/// At most `max_logs` logs remain once the new file is created.
fn prepare_log_file<P: AsRef<Path>>(
    log_dir: P,
    max_logs: usize,
    now: DateTime<Local>,
) -> Result<String> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)
        .wrap_err_with(|| format!("Failed to create log directory at {:?}", log_dir))?;

    rotate_logs(log_dir, max_logs.saturating_sub(1))?;

    Ok(format!(
        "{}_{}.log",
        LOG_PREFIX,
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Rotate log files, keeping only the `keep` most recent ones.
fn rotate_logs<P: AsRef<Path>>(log_dir: P, keep: usize) -> Result<()> {
    let mut log_files: Vec<_> = fs::read_dir(&log_dir)
        .wrap_err_with(|| format!("Failed to read log directory {:?}", log_dir.as_ref()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let path = entry.path();
            path.extension().is_some_and(|ext| ext == "log")
                && entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(LOG_PREFIX)
        })
        .collect();

    // Timestamped names, newest first
    log_files.sort_by_key(|entry| std::cmp::Reverse(entry.file_name()));

    for old_log in log_files.iter().skip(keep) {
        fs::remove_file(old_log.path())
            .wrap_err_with(|| format!("Failed to remove old log file {:?}", old_log.path()))?;
    }

    Ok(())
}
