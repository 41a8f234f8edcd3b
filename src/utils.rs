//! Helpers shared by the provisioning operations.
//!
//! These build the commands issued on the target host, including the privilege escalation
//! prefix, and handle paths on the initiating side.

pub mod commands;
pub(crate) mod file_fs;
pub mod sudo;
