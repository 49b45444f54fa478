//! This module abstracts over running external programs. The wrappers in
//! [`crate::git`] and [`crate::github`] only build command lines; how those
//! command lines get executed is up to the [`ProcessRunner`] they are given.

use std::path::Path;

use crate::error::Error;

mod recording;
mod system;

pub use recording::{Invocation, RecordingRunner};
pub use system::SystemRunner;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code of the process, `-1` if it was killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// [`ProcessRunner`] executes a fully assembled command line. The first element of
/// `command` is the program, the rest are its arguments.
pub trait ProcessRunner: Send + Sync {
    /// Run with inherited stdio so output shows up live. Fails if the program
    /// cannot be started or exits non-zero.
    fn run_streaming(&self, working_dir: Option<&Path>, command: &[String]) -> Result<(), Error>;

    /// Run with captured stdout and stderr, feeding `stdin` if given. Only a
    /// failure to start the program is an error; the exit code is returned as is.
    fn run_captured(&self, command: &[String], stdin: Option<&str>)
        -> Result<ProcessOutput, Error>;
}

/// Render a command line for logs and error messages.
pub(crate) fn display_command(command: &[String]) -> String {
    command.join(" ")
}
