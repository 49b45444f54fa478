use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
};

use super::{display_command, ProcessOutput, ProcessRunner};
use crate::error::Error;

/// [`SystemRunner`] spawns real subprocesses. Programs are resolved on `PATH`
/// before spawning so a missing `git` or `gh` is reported as such.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }

    fn command(command: &[String]) -> Result<(Command, &str), Error> {
        let (program, args) = command.split_first().ok_or(Error::EmptyCommand)?;
        let path = resolve_program(program)?;
        let mut cmd = Command::new(path);
        cmd.args(args);
        Ok((cmd, program))
    }
}

fn resolve_program(program: &str) -> Result<PathBuf, Error> {
    which::which(program).map_err(|_| Error::ExecutableNotFound {
        program: program.to_string(),
    })
}

impl ProcessRunner for SystemRunner {
    fn run_streaming(&self, working_dir: Option<&Path>, command: &[String]) -> Result<(), Error> {
        let (mut cmd, program) = Self::command(command)?;
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        log::debug!("Running {}", display_command(command));

        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::NonZeroExit {
                command: display_command(command),
                code: status.code(),
            })
        }
    }

    fn run_captured(
        &self,
        command: &[String],
        stdin: Option<&str>,
    ) -> Result<ProcessOutput, Error> {
        let (mut cmd, program) = Self::command(command)?;
        log::debug!("Running {} (captured)", display_command(command));

        let stdin_cfg = if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = cmd
            .stdin(stdin_cfg)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Feed stdin from another thread; writing it all before draining stdout
        // can block once the child fills its output pipe.
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => {
                let input = input.to_string();
                Some(thread::spawn(move || pipe.write_all(input.as_bytes())))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The child may exit without reading its input; its exit status
                // and stderr already describe what went wrong.
                Ok(Err(err)) if err.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(err)) => return Err(err.into()),
                Err(_) => {
                    return Err(Error::Io(std::io::Error::other(
                        "stdin writer thread panicked",
                    )))
                }
            }
        }

        Ok(ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
