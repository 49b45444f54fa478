use anyhow::Context;

use crate::cli::{CloneArgs, CommitArgs, InitRepoArgs, PullArgs, PushArgs, RawArgs};
use crate::config::Settings;
use crate::git::{CloneSource, CommitOption, Git, PullOption, PushOption};
use crate::process::ProcessRunner;

fn git<'a>(settings: &Settings, runner: &'a dyn ProcessRunner) -> Git<'a> {
    Git::new(runner).with_executable(settings.git_executable.clone())
}

pub fn do_init_repo(
    arg: InitRepoArgs,
    settings: &Settings,
    runner: &dyn ProcessRunner,
) -> crate::Result<()> {
    let InitRepoArgs {
        working_dir,
        owner,
        repo,
        message,
        ssh_user,
        ssh_host,
    } = arg;

    let mut options = settings.init_options();
    if let Some(message) = message {
        options.message = message;
    }
    if let Some(ssh_user) = ssh_user {
        options.ssh_user = ssh_user;
    }
    if let Some(ssh_host) = ssh_host {
        options.ssh_host = ssh_host;
    }

    git(settings, runner)
        .init_repository(working_dir.dir.as_deref(), &owner, &repo, &options)
        .with_context(|| format!("Initialize repository {}/{}", owner, repo))?;

    println!(
        "Published {}/{} to {}",
        owner,
        repo,
        crate::git::remote_url(&owner, &repo, &options.ssh_user, &options.ssh_host)
    );
    Ok(())
}

pub fn do_clone(arg: CloneArgs, settings: &Settings, runner: &dyn ProcessRunner) -> crate::Result<()> {
    let CloneArgs {
        source,
        destination,
        shallow,
    } = arg;

    git(settings, runner)
        .clone(&CloneSource::from(source), &destination, shallow)
        .with_context(|| format!("Clone into {}", destination.display()))?;
    Ok(())
}

pub fn do_commit(arg: CommitArgs, settings: &Settings, runner: &dyn ProcessRunner) -> crate::Result<()> {
    let options = commit_options(&arg);
    git(settings, runner).commit(arg.working_dir.dir.as_deref(), &options)?;
    Ok(())
}

pub fn do_push(arg: PushArgs, settings: &Settings, runner: &dyn ProcessRunner) -> crate::Result<()> {
    let flags = [
        (arg.quiet, PushOption::Quiet),
        (arg.verbose, PushOption::Verbose),
        (arg.progress, PushOption::Progress),
        (arg.dry_run, PushOption::DryRun),
        (arg.force, PushOption::Force),
    ];
    let options = enabled(flags);
    git(settings, runner).push(arg.working_dir.dir.as_deref(), &options)?;
    Ok(())
}

pub fn do_pull(arg: PullArgs, settings: &Settings, runner: &dyn ProcessRunner) -> crate::Result<()> {
    let flags = [
        (arg.quiet, PullOption::Quiet),
        (arg.verbose, PullOption::Verbose),
        (arg.progress, PullOption::Progress),
        (arg.rebase, PullOption::Rebase),
        (arg.dry_run, PullOption::DryRun),
        (arg.force, PullOption::Force),
    ];
    let options = enabled(flags);
    git(settings, runner).pull(arg.working_dir.dir.as_deref(), &options)?;
    Ok(())
}

pub fn do_raw(arg: RawArgs, settings: &Settings, runner: &dyn ProcessRunner) -> crate::Result<()> {
    let RawArgs { working_dir, args } = arg;
    git(settings, runner).raw(working_dir.dir.as_deref(), args)?;
    Ok(())
}

fn commit_options(arg: &CommitArgs) -> Vec<CommitOption> {
    let mut options = Vec::new();
    if arg.quiet {
        options.push(CommitOption::Quiet);
    }
    if arg.verbose {
        options.push(CommitOption::Verbose);
    }
    if arg.all {
        options.push(CommitOption::AllChangedFiles);
    }
    if let Some(message) = &arg.message {
        options.push(CommitOption::Message(message.clone()));
    }
    if let Some(author) = &arg.author {
        options.push(CommitOption::Author(author.clone()));
    }
    if let Some(date) = &arg.date {
        options.push(CommitOption::Date(date.clone()));
    }
    if arg.dry_run {
        options.push(CommitOption::DryRun);
    }
    options
}

fn enabled<T, const N: usize>(flags: [(bool, T); N]) -> Vec<T> {
    flags
        .into_iter()
        .filter_map(|(on, option)| on.then_some(option))
        .collect()
}
