//! This module wraps the `git` command line. Every operation builds an argument
//! list and hands it to a [`ProcessRunner`] with output streamed live; nothing
//! printed by git is parsed.

use std::path::Path;

use crate::error::Error;
use crate::process::ProcessRunner;

mod options;

pub use options::{build_args, CloneSource, CommitOption, PullOption, PushOption, ToArgs};

pub mod constants {
    pub const GIT_EXECUTABLE: &str = "git";
    pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial Import";
    pub const DEFAULT_SSH_USER: &str = "git";
    pub const DEFAULT_SSH_HOST: &str = "github.com";
    pub const DEFAULT_BRANCH: &str = "main";
    pub const DEFAULT_REMOTE: &str = "origin";
}

/// Parameters of [`Git::init_repository`] that have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub message: String,
    pub ssh_user: String,
    pub ssh_host: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        InitOptions {
            message: constants::DEFAULT_COMMIT_MESSAGE.to_string(),
            ssh_user: constants::DEFAULT_SSH_USER.to_string(),
            ssh_host: constants::DEFAULT_SSH_HOST.to_string(),
        }
    }
}

/// The ssh remote URL `init_repository` points `origin` at.
pub fn remote_url(owner: &str, repo: &str, ssh_user: &str, ssh_host: &str) -> String {
    format!("{}@{}:{}/{}.git", ssh_user, ssh_host, owner, repo)
}

/// [`Git`] turns typed repository operations into `git` invocations.
pub struct Git<'a> {
    runner: &'a dyn ProcessRunner,
    executable: String,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Git {
            runner,
            executable: constants::GIT_EXECUTABLE.to_string(),
        }
    }

    /// Use a different git binary, e.g. an absolute path.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Run `git` with `args` in `working_dir` (the current directory if `None`).
    /// Failures from the runner are returned untouched.
    pub fn raw<I, S>(&self, working_dir: Option<&Path>, args: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = vec![self.executable.clone()];
        command.extend(args.into_iter().map(Into::into));
        self.runner.run_streaming(working_dir, &command)
    }

    /// Turn `working_dir` into a repository and publish it as `owner/repo`.
    ///
    /// The steps run one after another: init, add everything, commit, rename the
    /// branch to `main`, add the `origin` remote, push with upstream tracking. The
    /// first failing step aborts the sequence and nothing is undone, so a failed
    /// push leaves a committed repository with a configured remote behind.
    pub fn init_repository(
        &self,
        working_dir: Option<&Path>,
        owner: &str,
        repo: &str,
        options: &InitOptions,
    ) -> Result<(), Error> {
        let url = remote_url(owner, repo, &options.ssh_user, &options.ssh_host);
        let steps: [Vec<&str>; 6] = [
            vec!["init"],
            vec!["add", "."],
            vec!["commit", "-m", options.message.as_str()],
            vec!["branch", "-M", constants::DEFAULT_BRANCH],
            vec!["remote", "add", constants::DEFAULT_REMOTE, url.as_str()],
            vec![
                "push",
                "-u",
                constants::DEFAULT_REMOTE,
                constants::DEFAULT_BRANCH,
            ],
        ];

        for step in steps {
            log::debug!("init_repository: git {}", step.join(" "));
            self.raw(working_dir, step)?;
        }

        Ok(())
    }

    /// Clone `source` into `destination`, which must not exist yet. A shallow
    /// clone fetches only the latest commit.
    pub fn clone(
        &self,
        source: &CloneSource,
        destination: &Path,
        shallow: bool,
    ) -> Result<(), Error> {
        if destination.exists() {
            return Err(Error::DirectoryExists {
                path: destination.to_path_buf(),
            });
        }

        let mut args = vec!["clone".to_string()];
        if shallow {
            args.push("--depth".to_string());
            args.push("1".to_string());
        }
        // Keep a source like `--upload-pack=...` from being read as an option.
        args.push("--".to_string());
        args.push(source.to_arg());
        args.push(destination.to_string_lossy().into_owned());

        self.raw(None, args)
    }

    pub fn commit(&self, working_dir: Option<&Path>, options: &[CommitOption]) -> Result<(), Error> {
        self.raw(working_dir, build_args("commit", options))
    }

    pub fn push(&self, working_dir: Option<&Path>, options: &[PushOption]) -> Result<(), Error> {
        self.raw(working_dir, build_args("push", options))
    }

    pub fn pull(&self, working_dir: Option<&Path>, options: &[PullOption]) -> Result<(), Error> {
        self.raw(working_dir, build_args("pull", options))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::process::{Invocation, RecordingRunner};

    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_remote_url_with_defaults() {
        let options = InitOptions::default();
        assert_eq!(
            "git@github.com:alice/demo.git",
            remote_url("alice", "demo", &options.ssh_user, &options.ssh_host)
        );
    }

    #[test]
    fn test_init_repository_runs_all_steps_in_order() {
        let runner = RecordingRunner::new();
        let git = Git::new(&runner);
        let dir = Path::new("/work/demo");

        git.init_repository(Some(dir), "alice", "demo", &InitOptions::default())
            .unwrap();

        assert_eq!(
            vec![
                strings(&["git", "init"]),
                strings(&["git", "add", "."]),
                strings(&["git", "commit", "-m", "Initial Import"]),
                strings(&["git", "branch", "-M", "main"]),
                strings(&["git", "remote", "add", "origin", "git@github.com:alice/demo.git"]),
                strings(&["git", "push", "-u", "origin", "main"]),
            ],
            runner.commands()
        );
        for invocation in runner.invocations() {
            match invocation {
                Invocation::Streaming { working_dir, .. } => {
                    assert_eq!(Some(PathBuf::from("/work/demo")), working_dir)
                }
                other => panic!("unexpected captured call {:?}", other),
            }
        }
    }

    #[test]
    fn test_init_repository_custom_options() {
        let runner = RecordingRunner::new();
        let git = Git::new(&runner);
        let options = InitOptions {
            message: "First".to_string(),
            ssh_user: "deploy".to_string(),
            ssh_host: "git.example.com".to_string(),
        };

        git.init_repository(None, "acme", "tools", &options).unwrap();

        let commands = runner.commands();
        assert_eq!(strings(&["git", "commit", "-m", "First"]), commands[2]);
        assert_eq!(
            strings(&["git", "remote", "add", "origin", "deploy@git.example.com:acme/tools.git"]),
            commands[4]
        );
    }

    #[test]
    fn test_init_repository_stops_at_first_failure() {
        let runner = RecordingRunner::new();
        // Third call is the commit.
        runner.fail_streaming_call(2, 1);
        let git = Git::new(&runner);

        let err = git
            .init_repository(None, "alice", "demo", &InitOptions::default())
            .unwrap_err();

        assert!(matches!(err, Error::NonZeroExit { code: Some(1), .. }));
        assert_eq!(
            vec![
                strings(&["git", "init"]),
                strings(&["git", "add", "."]),
                strings(&["git", "commit", "-m", "Initial Import"]),
            ],
            runner.commands()
        );
    }

    #[test]
    fn test_clone_into_existing_directory_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let git = Git::new(&runner);

        let err = git
            .clone(&"https://github.com/alice/demo.git".into(), dir.path(), false)
            .unwrap_err();

        assert!(matches!(err, Error::DirectoryExists { path } if path == dir.path()));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_clone_shallow_and_full() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("demo");
        let dest_arg = destination.to_string_lossy().into_owned();
        let source: CloneSource = "git@github.com:alice/demo.git".into();

        let runner = RecordingRunner::new();
        let git = Git::new(&runner);
        git.clone(&source, &destination, true).unwrap();
        git.clone(&source, &destination, false).unwrap();

        let commands = runner.commands();
        assert_eq!(
            vec![
                "git".to_string(),
                "clone".to_string(),
                "--depth".to_string(),
                "1".to_string(),
                "--".to_string(),
                source.to_arg(),
                dest_arg.clone(),
            ],
            commands[0]
        );
        assert_eq!(
            vec![
                "git".to_string(),
                "clone".to_string(),
                "--".to_string(),
                source.to_arg(),
                dest_arg,
            ],
            commands[1]
        );
        assert!(!commands[1].iter().any(|arg| arg.starts_with("--depth")));
    }

    #[test]
    fn test_clone_source_is_never_an_option() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("demo");
        let runner = RecordingRunner::new();
        let git = Git::new(&runner);

        git.clone(&"--upload-pack=touch /tmp/pwned".into(), &destination, false)
            .unwrap();

        let command = &runner.commands()[0];
        let separator = command.iter().position(|arg| arg == "--").unwrap();
        let source = command
            .iter()
            .position(|arg| arg == "--upload-pack=touch /tmp/pwned")
            .unwrap();
        assert!(separator < source);
        assert_eq!(destination.to_string_lossy(), command[source + 1]);
    }

    #[test]
    fn test_commit_push_pull_prefix_subcommand() {
        let runner = RecordingRunner::new();
        let git = Git::new(&runner).with_executable("/usr/local/bin/git");

        git.commit(None, &[CommitOption::Message("wip".to_string())])
            .unwrap();
        git.push(None, &[PushOption::Force]).unwrap();
        git.pull(None, &[PullOption::Rebase, PullOption::Quiet])
            .unwrap();

        assert_eq!(
            vec![
                strings(&["/usr/local/bin/git", "commit", "--message", "wip"]),
                strings(&["/usr/local/bin/git", "push", "--force"]),
                strings(&["/usr/local/bin/git", "pull", "--rebase", "--quiet"]),
            ],
            runner.commands()
        );
    }

    #[test]
    fn test_raw_propagates_failure() {
        let runner = RecordingRunner::new();
        runner.fail_streaming_call(0, 128);
        let git = Git::new(&runner);

        let err = git.raw(None, ["status"]).unwrap_err();
        assert!(matches!(err, Error::NonZeroExit { code: Some(128), .. }));
    }
}
