use crate::errors::ExecutorError;
use crate::executor::{CommandOutput, RemoteExecutor};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One interaction with the fake host, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Run(Vec<String>),
    Test(String),
    Copy { local: PathBuf, remote: PathBuf },
}

#[derive(Debug, Clone)]
enum Reply<T> {
    Ok(T),
    Transport(String),
}

impl<T: Clone> Reply<T> {
    fn into_result(self) -> Result<T, ExecutorError> {
        match self {
            Reply::Ok(v) => Ok(v),
            Reply::Transport(msg) => Err(ExecutorError::Transport(msg)),
        }
    }
}

/// Scripted [`RemoteExecutor`] recording every call.
///
/// Unscripted commands succeed with empty output, unscripted conditions evaluate to `false` and
/// copies succeed.
#[derive(Debug, Default)]
pub(crate) struct FakeExecutor {
    calls: Mutex<Vec<Call>>,
    runs: HashMap<Vec<String>, Reply<CommandOutput>>,
    conditions: HashMap<String, Reply<bool>>,
    copy_error: Option<String>,
}

pub(crate) fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

impl FakeExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_stdout(mut self, cmd: &[&str], stdout: &str) -> Self {
        self.runs.insert(
            argv(cmd),
            Reply::Ok(CommandOutput {
                stdout: stdout.to_string(),
                ..Default::default()
            }),
        );
        self
    }

    pub(crate) fn with_output(mut self, cmd: &[&str], output: CommandOutput) -> Self {
        self.runs.insert(argv(cmd), Reply::Ok(output));
        self
    }

    pub(crate) fn with_exit_code(mut self, cmd: &[&str], exit_code: i32, stderr: &str) -> Self {
        self.runs.insert(
            argv(cmd),
            Reply::Ok(CommandOutput {
                stderr: stderr.to_string(),
                exit_code,
                ..Default::default()
            }),
        );
        self
    }

    pub(crate) fn with_run_error(mut self, cmd: &[&str], msg: &str) -> Self {
        self.runs.insert(argv(cmd), Reply::Transport(msg.to_string()));
        self
    }

    pub(crate) fn with_condition(mut self, condition: &str, value: bool) -> Self {
        self.conditions
            .insert(condition.to_string(), Reply::Ok(value));
        self
    }

    pub(crate) fn with_condition_error(mut self, condition: &str, msg: &str) -> Self {
        self.conditions
            .insert(condition.to_string(), Reply::Transport(msg.to_string()));
        self
    }

    pub(crate) fn with_copy_error(mut self, msg: &str) -> Self {
        self.copy_error = Some(msg.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RemoteExecutor for FakeExecutor {
    async fn run(&self, argv: &[String]) -> Result<CommandOutput, ExecutorError> {
        self.record(Call::Run(argv.to_vec()));
        self.runs
            .get(argv)
            .cloned()
            .unwrap_or(Reply::Ok(CommandOutput::default()))
            .into_result()
    }

    async fn test(&self, condition: &str) -> Result<bool, ExecutorError> {
        self.record(Call::Test(condition.to_string()));
        self.conditions
            .get(condition)
            .cloned()
            .unwrap_or(Reply::Ok(false))
            .into_result()
    }

    async fn copy_file(&self, local: &Path, remote: &Path) -> Result<(), ExecutorError> {
        self.record(Call::Copy {
            local: local.to_path_buf(),
            remote: remote.to_path_buf(),
        });
        match self.copy_error {
            Some(ref msg) => Err(ExecutorError::Transport(msg.clone())),
            None => Ok(()),
        }
    }
}
