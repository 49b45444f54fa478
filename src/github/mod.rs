//! This module wraps the GitHub CLI (`gh`). Repository creation streams its
//! output; everything else goes through [`GitHub::api`], which captures output
//! so JSON responses can be decoded.

use crate::error::Error;
use crate::git::ToArgs;
use crate::process::{ProcessOutput, ProcessRunner};

mod model;
mod options;

pub use model::{Collaborator, Permissions};
pub use options::{ApiOption, HttpMethod, Permission, RepoCreateOption, Visibility};

pub mod constants {
    pub const GH_EXECUTABLE: &str = "gh";
    /// `--input` value telling `gh api` to read the request body from stdin
    pub const STDIN_INPUT: &str = "-";
}

/// [`GitHub`] turns hosted repository operations into `gh` invocations.
pub struct GitHub<'a> {
    runner: &'a dyn ProcessRunner,
    executable: String,
}

impl<'a> GitHub<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        GitHub {
            runner,
            executable: constants::GH_EXECUTABLE.to_string(),
        }
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// `gh repo create`, targeting `organization/name` when an organization is
    /// given and `name` otherwise.
    pub fn create_repository(
        &self,
        organization: Option<&str>,
        name: &str,
        options: &[RepoCreateOption],
    ) -> Result<(), Error> {
        let target = match organization {
            Some(org) => format!("{}/{}", org, name),
            None => name.to_string(),
        };

        let mut command = vec![
            self.executable.clone(),
            "repo".to_string(),
            "create".to_string(),
            target,
        ];
        for option in options {
            option.push_args(&mut command);
        }

        self.runner.run_streaming(None, &command)
    }

    /// Call a REST endpoint through `gh api` and return the captured output.
    ///
    /// The call counts as failed when `gh` exits non-zero *or* writes anything to
    /// stderr, even with exit code 0. Callers rely on warnings surfacing as
    /// errors, so do not relax this to an exit code check.
    ///
    /// An inline [`ApiOption::Body`] and an [`ApiOption::Input`] file both set the
    /// request body, so giving both is rejected before `gh` is started.
    pub fn api(&self, endpoint: &str, options: &[ApiOption]) -> Result<ProcessOutput, Error> {
        let has_input_file = options
            .iter()
            .any(|option| matches!(option, ApiOption::Input(_)));
        let has_body = options
            .iter()
            .any(|option| matches!(option, ApiOption::Body(_)));
        if has_input_file && has_body {
            return Err(Error::ConflictingRequestBody);
        }

        let mut command = vec![self.executable.clone(), "api".to_string(), endpoint.to_string()];
        for option in options {
            option.push_args(&mut command);
        }

        let body = options.iter().rev().find_map(|option| match option {
            ApiOption::Body(body) => Some(body.as_str()),
            _ => None,
        });
        if body.is_some() {
            command.push("--input".to_string());
            command.push(constants::STDIN_INPUT.to_string());
        }

        let output = self.runner.run_captured(&command, body)?;

        if output.exit_code != 0 || !output.stderr.is_empty() {
            log::warn!(
                "gh api {} failed (exit code {}): {}",
                endpoint,
                output.exit_code,
                output.stderr.trim()
            );
            return Err(Error::Api {
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(output)
    }

    pub fn list_collaborators(
        &self,
        owner: &str,
        repo: &str,
        hostname: Option<&str>,
    ) -> Result<Vec<Collaborator>, Error> {
        let options = hostname_option(hostname);
        let output = self.api(&collaborators_endpoint(owner, repo), &options)?;
        let collaborators = serde_json::from_str(&output.stdout)?;
        Ok(collaborators)
    }

    /// Invite `username` with `permission`. Returns the raw response body.
    pub fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
        permission: Permission,
        hostname: Option<&str>,
    ) -> Result<String, Error> {
        let body = serde_json::json!({ "permission": permission }).to_string();
        let mut options = vec![ApiOption::Method(HttpMethod::Put), ApiOption::Body(body)];
        options.extend(hostname_option(hostname));

        let output = self.api(&collaborator_endpoint(owner, repo, username), &options)?;
        Ok(output.stdout)
    }

    pub fn remove_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
        hostname: Option<&str>,
    ) -> Result<(), Error> {
        let mut options = vec![ApiOption::Method(HttpMethod::Delete)];
        options.extend(hostname_option(hostname));

        self.api(&collaborator_endpoint(owner, repo, username), &options)?;
        Ok(())
    }
}

fn hostname_option(hostname: Option<&str>) -> Vec<ApiOption> {
    hostname
        .map(|host| ApiOption::Hostname(host.to_string()))
        .into_iter()
        .collect()
}

fn collaborators_endpoint(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/collaborators", owner, repo)
}

fn collaborator_endpoint(owner: &str, repo: &str, username: &str) -> String {
    format!("{}/{}", collaborators_endpoint(owner, repo), username)
}
