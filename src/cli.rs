use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::github::{HttpMethod, Permission, Visibility};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
pub struct RepokitCli {
    /// Read settings from this file instead of ~/.repokitconfig
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Run git operations
    #[command(subcommand)]
    Git(GitCommand),
    /// Run GitHub operations through the gh CLI
    #[command(subcommand)]
    Gh(GhCommand),
}

#[derive(Subcommand, Clone)]
pub enum GitCommand {
    /// Initialize a repository, commit everything and push it to a new remote
    InitRepo(InitRepoArgs),
    /// Clone a repository into a new directory
    Clone(CloneArgs),
    /// Record changes to the repository
    Commit(CommitArgs),
    /// Update the remote with local commits
    Push(PushArgs),
    /// Fetch from the remote and integrate
    Pull(PullArgs),
    /// Pass arguments to git unchanged
    Raw(RawArgs),
}

#[derive(Args, Clone, Default)]
pub struct WorkingDir {
    /// Run as if git was started in this directory
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct InitRepoArgs {
    #[command(flatten)]
    pub working_dir: WorkingDir,
    /// Owner of the remote repository
    pub owner: String,
    /// Name of the remote repository
    pub repo: String,
    /// Message of the initial commit
    #[arg(long, short = 'm')]
    pub message: Option<String>,
    #[arg(long)]
    pub ssh_user: Option<String>,
    #[arg(long)]
    pub ssh_host: Option<String>,
}

#[derive(Args, Clone)]
pub struct CloneArgs {
    /// URL or path of the repository to clone
    pub source: String,
    /// Directory to clone into, must not exist
    pub destination: PathBuf,
    /// Only fetch the latest commit
    #[arg(long)]
    pub shallow: bool,
}

#[derive(Args, Clone, Default)]
pub struct CommitArgs {
    #[command(flatten)]
    pub working_dir: WorkingDir,
    #[arg(long, short = 'm')]
    pub message: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    /// Commit all changed tracked files
    #[arg(long, short = 'a')]
    pub all: bool,
    #[arg(long, short = 'n')]
    pub dry_run: bool,
    #[arg(long, short = 'q')]
    pub quiet: bool,
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Args, Clone, Default)]
pub struct PushArgs {
    #[command(flatten)]
    pub working_dir: WorkingDir,
    #[arg(long, short = 'f')]
    pub force: bool,
    #[arg(long, short = 'n')]
    pub dry_run: bool,
    #[arg(long)]
    pub progress: bool,
    #[arg(long, short = 'q')]
    pub quiet: bool,
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Args, Clone, Default)]
pub struct PullArgs {
    #[command(flatten)]
    pub working_dir: WorkingDir,
    #[arg(long, short = 'r')]
    pub rebase: bool,
    #[arg(long, short = 'f')]
    pub force: bool,
    #[arg(long)]
    pub dry_run: bool,
    #[arg(long)]
    pub progress: bool,
    #[arg(long, short = 'q')]
    pub quiet: bool,
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Args, Clone)]
pub struct RawArgs {
    #[command(flatten)]
    pub working_dir: WorkingDir,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub args: Vec<String>,
}

#[derive(Subcommand, Clone)]
pub enum GhCommand {
    /// Create a repository on GitHub
    CreateRepo(CreateRepoArgs),
    /// Make an authenticated GitHub API request
    Api(ApiArgs),
    /// Manage repository collaborators
    #[command(subcommand)]
    Collaborators(CollaboratorsCommand),
}

#[derive(Args, Clone)]
pub struct CreateRepoArgs {
    pub name: String,
    /// Create the repository under this organization
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long, short = 'd')]
    pub description: Option<String>,
    #[arg(long, short = 'g')]
    pub gitignore: Option<String>,
    #[arg(long, short = 'H')]
    pub homepage: Option<String>,
    #[arg(long, short = 'l')]
    pub license: Option<String>,
    #[arg(long, value_enum)]
    pub visibility: Option<Visibility>,
    #[arg(long, short = 't')]
    pub team: Option<String>,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub confirm: bool,
}

#[derive(Args, Clone)]
pub struct ApiArgs {
    pub endpoint: String,
    #[arg(long, short = 'X', value_enum)]
    pub method: Option<HttpMethod>,
    /// Typed parameter in key=value form
    #[arg(long, short = 'F', value_parser = parse_key_value)]
    pub field: Vec<(String, String)>,
    /// String parameter in key=value form
    #[arg(long, short = 'f', value_parser = parse_key_value)]
    pub raw_field: Vec<(String, String)>,
    #[arg(long)]
    pub hostname: Option<String>,
    #[arg(long, short = 'i')]
    pub include: bool,
    /// File to use as the request body
    #[arg(long, conflicts_with = "body")]
    pub input: Option<PathBuf>,
    /// Request body, sent on standard input
    #[arg(long)]
    pub body: Option<String>,
    #[arg(long, short = 'q')]
    pub jq: Option<String>,
    #[arg(long)]
    pub silent: bool,
}

#[derive(Subcommand, Clone)]
pub enum CollaboratorsCommand {
    /// List the collaborators of a repository
    List(ListCollaboratorsArgs),
    /// Add a collaborator to a repository
    Add(AddCollaboratorArgs),
    /// Remove a collaborator from a repository
    Remove(RemoveCollaboratorArgs),
}

#[derive(Args, Clone)]
pub struct ListCollaboratorsArgs {
    pub owner: String,
    pub repo: String,
    #[arg(long)]
    pub hostname: Option<String>,
    /// Print the decoded collaborators as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct AddCollaboratorArgs {
    pub owner: String,
    pub repo: String,
    pub username: String,
    #[arg(long, value_enum, default_value = "push")]
    pub permission: Permission,
    #[arg(long)]
    pub hostname: Option<String>,
}

#[derive(Args, Clone)]
pub struct RemoveCollaboratorArgs {
    pub owner: String,
    pub repo: String,
    pub username: String,
    #[arg(long)]
    pub hostname: Option<String>,
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{}`", arg))?;
    Ok((key.to_string(), value.to_string()))
}

// Let clap parse the library enums directly.
impl ValueEnum for Visibility {
    fn value_variants<'a>() -> &'a [Self] {
        &[Visibility::Internal, Visibility::Private, Visibility::Public]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let name = match self {
            Visibility::Internal => "internal",
            Visibility::Private => "private",
            Visibility::Public => "public",
        };
        Some(clap::builder::PossibleValue::new(name))
    }
}

impl ValueEnum for HttpMethod {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let (name, alias) = match self {
            HttpMethod::Get => ("GET", "get"),
            HttpMethod::Post => ("POST", "post"),
            HttpMethod::Put => ("PUT", "put"),
            HttpMethod::Patch => ("PATCH", "patch"),
            HttpMethod::Delete => ("DELETE", "delete"),
        };
        Some(clap::builder::PossibleValue::new(name).alias(alias))
    }
}

impl ValueEnum for Permission {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Permission::Pull,
            Permission::Triage,
            Permission::Push,
            Permission::Maintain,
            Permission::Admin,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let name = match self {
            Permission::Pull => "pull",
            Permission::Triage => "triage",
            Permission::Push => "push",
            Permission::Maintain => "maintain",
            Permission::Admin => "admin",
        };
        Some(clap::builder::PossibleValue::new(name))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        RepokitCli::command().debug_assert();
    }

    #[test]
    fn test_parse_api_args() {
        let cli = RepokitCli::parse_from([
            "repokit",
            "gh",
            "api",
            "/repos/alice/demo",
            "-X",
            "patch",
            "-F",
            "private=true",
            "-f",
            "description=a=b",
        ]);

        let Command::Gh(GhCommand::Api(args)) = cli.command else {
            panic!("expected gh api");
        };
        assert_eq!("/repos/alice/demo", args.endpoint);
        assert_eq!(Some(HttpMethod::Patch), args.method);
        assert_eq!(vec![("private".to_string(), "true".to_string())], args.field);
        assert_eq!(
            vec![("description".to_string(), "a=b".to_string())],
            args.raw_field
        );
    }

    #[test]
    fn test_parse_raw_passes_hyphen_args() {
        let cli = RepokitCli::parse_from(["repokit", "git", "raw", "-C", "/tmp", "log", "--oneline"]);

        let Command::Git(GitCommand::Raw(args)) = cli.command else {
            panic!("expected git raw");
        };
        assert_eq!(Some(PathBuf::from("/tmp")), args.working_dir.dir);
        assert_eq!(vec!["log", "--oneline"], args.args);
    }

    #[test]
    fn test_key_value_requires_equals() {
        assert!(parse_key_value("novalue").is_err());
        assert_eq!(
            ("k".to_string(), "".to_string()),
            parse_key_value("k=").unwrap()
        );
    }
}
