//! Typed options for `gh repo create` and `gh api`.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::git::ToArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Internal,
    Private,
    Public,
}

impl Visibility {
    fn flag(&self) -> &'static str {
        match self {
            Visibility::Internal => "--internal",
            Visibility::Private => "--private",
            Visibility::Public => "--public",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCreateOption {
    /// Skip the interactive confirmation prompt
    Confirm,
    Description(String),
    /// Name of a gitignore template, e.g. `Rust`
    Gitignore(String),
    Homepage(String),
    /// License template key, e.g. `mit`
    License(String),
    Visibility(Visibility),
    /// Organization team granted access to the new repository
    Team(String),
}

impl ToArgs for RepoCreateOption {
    fn push_args(&self, args: &mut Vec<String>) {
        let (flag, value) = match self {
            RepoCreateOption::Confirm => ("--confirm", None),
            RepoCreateOption::Description(text) => ("--description", Some(text)),
            RepoCreateOption::Gitignore(template) => ("--gitignore", Some(template)),
            RepoCreateOption::Homepage(url) => ("--homepage", Some(url)),
            RepoCreateOption::License(license) => ("--license", Some(license)),
            RepoCreateOption::Visibility(visibility) => (visibility.flag(), None),
            RepoCreateOption::Team(team) => ("--team", Some(team)),
        };
        args.push(flag.to_string());
        if let Some(value) = value {
            args.push(value.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOption {
    /// Typed parameter, `gh` converts `true`/`false`/numbers/`@file`
    Field(String, String),
    Hostname(String),
    /// Include HTTP status line and headers in the output
    Include,
    /// Read the request body from a file (`-` for stdin)
    Input(PathBuf),
    /// Request body sent to `gh` on standard input; not rendered as an argument.
    /// Cannot be combined with [`ApiOption::Input`]. If given more than once, the
    /// last body is sent.
    Body(String),
    Jq(String),
    Method(HttpMethod),
    /// String parameter passed through untouched
    RawField(String, String),
    Silent,
}

impl ToArgs for ApiOption {
    fn push_args(&self, args: &mut Vec<String>) {
        match self {
            ApiOption::Field(key, value) => {
                args.push("--field".to_string());
                args.push(format!("{}={}", key, value));
            }
            ApiOption::Hostname(host) => {
                args.push("--hostname".to_string());
                args.push(host.clone());
            }
            ApiOption::Include => args.push("--include".to_string()),
            ApiOption::Input(path) => {
                args.push("--input".to_string());
                args.push(path.to_string_lossy().into_owned());
            }
            ApiOption::Body(_) => {}
            ApiOption::Jq(query) => {
                args.push("--jq".to_string());
                args.push(query.clone());
            }
            ApiOption::Method(method) => {
                args.push("--method".to_string());
                args.push(method.to_string());
            }
            ApiOption::RawField(key, value) => {
                args.push("--raw-field".to_string());
                args.push(format!("{}={}", key, value));
            }
            ApiOption::Silent => args.push("--silent".to_string()),
        }
    }
}

/// Repository permission granted to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Pull,
    Triage,
    Push,
    Maintain,
    Admin,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::Pull => "pull",
            Permission::Triage => "triage",
            Permission::Push => "push",
            Permission::Maintain => "maintain",
            Permission::Admin => "admin",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use crate::git::build_args;

    use super::*;

    #[test]
    fn test_repo_create_flags() {
        let options = vec![
            RepoCreateOption::Visibility(Visibility::Private),
            RepoCreateOption::Description("A demo".to_string()),
            RepoCreateOption::Confirm,
            RepoCreateOption::Gitignore("Rust".to_string()),
            RepoCreateOption::License("mit".to_string()),
            RepoCreateOption::Homepage("https://example.com".to_string()),
            RepoCreateOption::Team("core".to_string()),
        ];

        assert_eq!(
            vec![
                "create",
                "--private",
                "--description",
                "A demo",
                "--confirm",
                "--gitignore",
                "Rust",
                "--license",
                "mit",
                "--homepage",
                "https://example.com",
                "--team",
                "core",
            ],
            build_args("create", &options)
        );
    }

    #[test]
    fn test_api_flags() {
        let options = vec![
            ApiOption::Method(HttpMethod::Patch),
            ApiOption::Field("private".to_string(), "true".to_string()),
            ApiOption::RawField("name".to_string(), "demo".to_string()),
            ApiOption::Body("{}".to_string()),
            ApiOption::Hostname("github.example.com".to_string()),
            ApiOption::Input(PathBuf::from("body.json")),
            ApiOption::Jq(".[].login".to_string()),
            ApiOption::Include,
            ApiOption::Silent,
        ];

        assert_eq!(
            vec![
                "api",
                "--method",
                "PATCH",
                "--field",
                "private=true",
                "--raw-field",
                "name=demo",
                "--hostname",
                "github.example.com",
                "--input",
                "body.json",
                "--jq",
                ".[].login",
                "--include",
                "--silent",
            ],
            build_args("api", &options)
        );
    }

    #[test]
    fn test_permission_serializes_lowercase() {
        assert_eq!("\"maintain\"", serde_json::to_string(&Permission::Maintain).unwrap());
        assert_eq!(Permission::Push, serde_json::from_str("\"push\"").unwrap());
        assert_eq!("triage", Permission::Triage.to_string());
    }
}
