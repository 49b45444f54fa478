//! Typed options for the git subcommands. Each option renders to one flag,
//! followed by its value when it carries one.

use std::{fmt, path::PathBuf};

use chrono::{DateTime, TimeZone};

/// Something that appends its command line tokens to an argument list.
pub trait ToArgs {
    fn push_args(&self, args: &mut Vec<String>);
}

/// Render `options` in caller order after `subcommand`. Nothing is reordered,
/// deduplicated or validated.
pub fn build_args<T: ToArgs>(subcommand: &str, options: &[T]) -> Vec<String> {
    let mut args = Vec::with_capacity(1 + options.len() * 2);
    args.push(subcommand.to_string());
    for option in options {
        option.push_args(&mut args);
    }
    args
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOption {
    Quiet,
    Verbose,
    Message(String),
    Author(String),
    Date(String),
    DryRun,
    /// Stage modified and deleted tracked files before committing
    AllChangedFiles,
}

impl CommitOption {
    /// A `--date` option for the given point in time, in RFC 2822 form.
    pub fn date_at<Tz>(date: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        CommitOption::Date(date.to_rfc2822())
    }
}

impl ToArgs for CommitOption {
    fn push_args(&self, args: &mut Vec<String>) {
        match self {
            CommitOption::Quiet => args.push("--quiet".to_string()),
            CommitOption::Verbose => args.push("--verbose".to_string()),
            CommitOption::Message(message) => {
                args.push("--message".to_string());
                args.push(message.clone());
            }
            CommitOption::Author(author) => {
                args.push("--author".to_string());
                args.push(author.clone());
            }
            CommitOption::Date(date) => {
                args.push("--date".to_string());
                args.push(date.clone());
            }
            CommitOption::DryRun => args.push("--dry-run".to_string()),
            CommitOption::AllChangedFiles => args.push("--all".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOption {
    Quiet,
    Verbose,
    Progress,
    DryRun,
    Force,
}

impl ToArgs for PushOption {
    fn push_args(&self, args: &mut Vec<String>) {
        let flag = match self {
            PushOption::Quiet => "--quiet",
            PushOption::Verbose => "--verbose",
            PushOption::Progress => "--progress",
            PushOption::DryRun => "--dry-run",
            PushOption::Force => "--force",
        };
        args.push(flag.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOption {
    Quiet,
    Verbose,
    Progress,
    Rebase,
    DryRun,
    Force,
}

impl ToArgs for PullOption {
    fn push_args(&self, args: &mut Vec<String>) {
        let flag = match self {
            PullOption::Quiet => "--quiet",
            PullOption::Verbose => "--verbose",
            PullOption::Progress => "--progress",
            PullOption::Rebase => "--rebase",
            PullOption::DryRun => "--dry-run",
            PullOption::Force => "--force",
        };
        args.push(flag.to_string());
    }
}

/// Where `git clone` copies from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneSource {
    Url(String),
    Path(PathBuf),
}

impl CloneSource {
    pub fn to_arg(&self) -> String {
        match self {
            CloneSource::Url(url) => url.clone(),
            CloneSource::Path(path) => path.to_string_lossy().into_owned(),
        }
    }
}

impl From<&str> for CloneSource {
    fn from(value: &str) -> Self {
        CloneSource::Url(value.to_string())
    }
}

impl From<String> for CloneSource {
    fn from(value: String) -> Self {
        CloneSource::Url(value)
    }
}

impl From<PathBuf> for CloneSource {
    fn from(value: PathBuf) -> Self {
        CloneSource::Path(value)
    }
}
