//! Privilege escalation on the target host.
//!
//! The helpers never elevate the transport itself. Instead, commands that must write into
//! root-owned locations are prefixed with the configured root command before being handed to the
//! executor.

/// How to gain root privileges on the target host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootCmd {
    /// Prefix privileged commands with `cmd` (`sudo`, or a drop-in such as `doas`).
    Sudo { cmd: String },
    /// The deploy user can already write to the destinations, run commands as is.
    None,
}

impl Default for RootCmd {
    fn default() -> Self {
        RootCmd::use_sudo()
    }
}

impl RootCmd {
    /// Escalate with plain `sudo`.
    pub fn use_sudo() -> Self {
        RootCmd::Sudo {
            cmd: "sudo".to_string(),
        }
    }

    /// Argument vector to put in front of a privileged command.
    pub fn prefix(&self) -> Vec<String> {
        match self {
            RootCmd::Sudo { cmd } => vec![cmd.clone()],
            RootCmd::None => Vec::new(),
        }
    }

    /// Prefix `cmd` and `args` with the root command.
    pub(crate) fn wrap<I, S>(&self, cmd: &str, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut argv = self.prefix();
        argv.push(cmd.to_string());
        argv.extend(args.into_iter().map(|a| a.as_ref().to_string()));
        argv
    }
}
