//! Error type shared by the git and gh wrappers.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A precondition failed before any process was spawned.
    #[error("fatal: destination path '{}' already exists", .path.display())]
    DirectoryExists { path: PathBuf },

    #[error("empty command line")]
    EmptyCommand,

    #[error("executable `{program}` not found in PATH")]
    ExecutableNotFound { program: String },

    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command ran but exited unsuccessfully. `code` is `None` when the
    /// process was terminated by a signal.
    #[error("`{command}` exited with {}", display_code(.code))]
    NonZeroExit { command: String, code: Option<i32> },

    /// `gh api` exited non-zero or wrote anything to stderr.
    #[error("gh api call failed with exit code {exit_code}: {}", .stderr.trim())]
    Api {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    /// Both an inline body and an input file were given to `gh api`.
    #[error("gh api request body given both inline and as an input file")]
    ConflictingRequestBody,

    #[error("failed to decode gh api response")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read settings from {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
