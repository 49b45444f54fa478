use std::{
    collections::{HashMap, VecDeque},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, MutexGuard,
    },
};

use super::{display_command, ProcessOutput, ProcessRunner};
use crate::error::Error;

/// One call made against a [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Streaming {
        working_dir: Option<PathBuf>,
        command: Vec<String>,
    },
    Captured {
        command: Vec<String>,
        stdin: Option<String>,
    },
}

impl Invocation {
    pub fn command(&self) -> &[String] {
        match self {
            Invocation::Streaming { command, .. } => command,
            Invocation::Captured { command, .. } => command,
        }
    }
}

/// [`RecordingRunner`] never spawns anything. It records every command line it
/// is asked to run and answers with programmed results, which makes it possible
/// to check argument construction offline.
///
/// By default streaming calls succeed and captured calls return exit code 0
/// with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    /// Index of a streaming call -> exit code it should fail with
    streaming_failures: Mutex<HashMap<usize, i32>>,
    captured_outputs: Mutex<VecDeque<ProcessOutput>>,
    streaming_calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test thread should not hide the log from the others.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `index`-th streaming call (0-based) exit with `exit_code`.
    pub fn fail_streaming_call(&self, index: usize, exit_code: i32) -> &Self {
        lock(&self.streaming_failures).insert(index, exit_code);
        self
    }

    /// Queue the output returned by the next captured call.
    pub fn push_output(&self, output: ProcessOutput) -> &Self {
        lock(&self.captured_outputs).push_back(output);
        self
    }

    /// Shorthand for queueing a successful captured call printing `stdout`.
    pub fn push_stdout(&self, stdout: impl Into<String>) -> &Self {
        self.push_output(ProcessOutput {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        })
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        lock(&self.invocations).clone()
    }

    /// Just the command lines, in call order.
    pub fn commands(&self) -> Vec<Vec<String>> {
        lock(&self.invocations)
            .iter()
            .map(|invocation| invocation.command().to_vec())
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run_streaming(&self, working_dir: Option<&Path>, command: &[String]) -> Result<(), Error> {
        lock(&self.invocations).push(Invocation::Streaming {
            working_dir: working_dir.map(Path::to_path_buf),
            command: command.to_vec(),
        });

        let index = self.streaming_calls.fetch_add(1, Ordering::SeqCst);

        match lock(&self.streaming_failures).get(&index) {
            Some(&code) => Err(Error::NonZeroExit {
                command: display_command(command),
                code: Some(code),
            }),
            None => Ok(()),
        }
    }

    fn run_captured(
        &self,
        command: &[String],
        stdin: Option<&str>,
    ) -> Result<ProcessOutput, Error> {
        lock(&self.invocations).push(Invocation::Captured {
            command: command.to_vec(),
            stdin: stdin.map(str::to_string),
        });
        Ok(lock(&self.captured_outputs)
            .pop_front()
            .unwrap_or_default())
    }
}
