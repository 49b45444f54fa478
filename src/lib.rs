//! Typed wrappers around the `git` and `gh` command line tools.
//!
//! ```no_run
//! use repokit::git::{CommitOption, Git};
//! use repokit::process::SystemRunner;
//!
//! fn main() -> repokit::Result<()> {
//!     let runner = SystemRunner::new();
//!     let git = Git::new(&runner);
//!     git.commit(None, &[CommitOption::AllChangedFiles, CommitOption::Message("wip".into())])?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod cmds;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod process;

pub use error::Error;

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
