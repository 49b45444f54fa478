//! Command line entry points. Each `do_*` function maps parsed arguments onto
//! the library wrappers, applying [`Settings`] where a flag was not given.

use crate::cli::{CollaboratorsCommand, Command, GhCommand, GitCommand};
use crate::config::Settings;
use crate::process::ProcessRunner;

mod gh;
mod git;

pub use gh::{
    do_add_collaborator, do_api, do_create_repo, do_list_collaborators, do_remove_collaborator,
};
pub use git::{do_clone, do_commit, do_init_repo, do_pull, do_push, do_raw};

pub fn run(command: Command, settings: &Settings, runner: &dyn ProcessRunner) -> crate::Result<()> {
    match command {
        Command::Git(command) => match command {
            GitCommand::InitRepo(arg) => do_init_repo(arg, settings, runner),
            GitCommand::Clone(arg) => do_clone(arg, settings, runner),
            GitCommand::Commit(arg) => do_commit(arg, settings, runner),
            GitCommand::Push(arg) => do_push(arg, settings, runner),
            GitCommand::Pull(arg) => do_pull(arg, settings, runner),
            GitCommand::Raw(arg) => do_raw(arg, settings, runner),
        },
        Command::Gh(command) => match command {
            GhCommand::CreateRepo(arg) => do_create_repo(arg, settings, runner),
            GhCommand::Api(arg) => do_api(arg, settings, runner),
            GhCommand::Collaborators(command) => match command {
                CollaboratorsCommand::List(arg) => do_list_collaborators(arg, settings, runner),
                CollaboratorsCommand::Add(arg) => do_add_collaborator(arg, settings, runner),
                CollaboratorsCommand::Remove(arg) => do_remove_collaborator(arg, settings, runner),
            },
        },
    }
}
