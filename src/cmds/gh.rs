use std::io::Write;

use anyhow::Context;

use crate::cli::{
    AddCollaboratorArgs, ApiArgs, CreateRepoArgs, ListCollaboratorsArgs, RemoveCollaboratorArgs,
};
use crate::config::Settings;
use crate::github::{ApiOption, Collaborator, GitHub, RepoCreateOption};
use crate::process::ProcessRunner;

fn github<'a>(settings: &Settings, runner: &'a dyn ProcessRunner) -> GitHub<'a> {
    GitHub::new(runner).with_executable(settings.gh_executable.clone())
}

/// Flag value first, then the configured default.
fn hostname<'a>(flag: &'a Option<String>, settings: &'a Settings) -> Option<&'a str> {
    flag.as_deref().or(settings.gh_hostname.as_deref())
}

pub fn do_create_repo(
    arg: CreateRepoArgs,
    settings: &Settings,
    runner: &dyn ProcessRunner,
) -> crate::Result<()> {
    let CreateRepoArgs {
        name,
        org,
        description,
        gitignore,
        homepage,
        license,
        visibility,
        team,
        confirm,
    } = arg;

    let mut options = Vec::new();
    if confirm {
        options.push(RepoCreateOption::Confirm);
    }
    options.extend(description.map(RepoCreateOption::Description));
    options.extend(gitignore.map(RepoCreateOption::Gitignore));
    options.extend(homepage.map(RepoCreateOption::Homepage));
    options.extend(license.map(RepoCreateOption::License));
    options.extend(visibility.map(RepoCreateOption::Visibility));
    options.extend(team.map(RepoCreateOption::Team));

    github(settings, runner)
        .create_repository(org.as_deref(), &name, &options)
        .with_context(|| format!("Create repository {}", name))?;
    Ok(())
}

pub fn do_api(arg: ApiArgs, settings: &Settings, runner: &dyn ProcessRunner) -> crate::Result<()> {
    let options = api_options(&arg, settings);
    let output = github(settings, runner).api(&arg.endpoint, &options)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn api_options(arg: &ApiArgs, settings: &Settings) -> Vec<ApiOption> {
    let mut options = Vec::new();
    if let Some(method) = arg.method {
        options.push(ApiOption::Method(method));
    }
    if let Some(host) = hostname(&arg.hostname, settings) {
        options.push(ApiOption::Hostname(host.to_string()));
    }
    for (key, value) in &arg.field {
        options.push(ApiOption::Field(key.clone(), value.clone()));
    }
    for (key, value) in &arg.raw_field {
        options.push(ApiOption::RawField(key.clone(), value.clone()));
    }
    if arg.include {
        options.push(ApiOption::Include);
    }
    if let Some(input) = &arg.input {
        options.push(ApiOption::Input(input.clone()));
    }
    if let Some(body) = &arg.body {
        options.push(ApiOption::Body(body.clone()));
    }
    if let Some(jq) = &arg.jq {
        options.push(ApiOption::Jq(jq.clone()));
    }
    if arg.silent {
        options.push(ApiOption::Silent);
    }
    options
}

pub fn do_list_collaborators(
    arg: ListCollaboratorsArgs,
    settings: &Settings,
    runner: &dyn ProcessRunner,
) -> crate::Result<()> {
    let collaborators = github(settings, runner)
        .list_collaborators(&arg.owner, &arg.repo, hostname(&arg.hostname, settings))
        .with_context(|| format!("List collaborators of {}/{}", arg.owner, arg.repo))?;

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&collaborators)?);
    } else {
        for collaborator in &collaborators {
            println!("{}", format_collaborator(collaborator));
        }
    }
    Ok(())
}

fn format_collaborator(collaborator: &Collaborator) -> String {
    let permissions = &collaborator.permissions;
    let granted: Vec<&str> = [
        (permissions.pull, "pull"),
        (permissions.push, "push"),
        (permissions.admin, "admin"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();

    format!(
        "{}\t{}\t{}",
        collaborator.login,
        collaborator.id,
        granted.join(",")
    )
}

pub fn do_add_collaborator(
    arg: AddCollaboratorArgs,
    settings: &Settings,
    runner: &dyn ProcessRunner,
) -> crate::Result<()> {
    let response = github(settings, runner)
        .add_collaborator(
            &arg.owner,
            &arg.repo,
            &arg.username,
            arg.permission,
            hostname(&arg.hostname, settings),
        )
        .with_context(|| format!("Add {} to {}/{}", arg.username, arg.owner, arg.repo))?;

    if !response.trim().is_empty() {
        println!("{}", response.trim_end());
    }
    Ok(())
}

pub fn do_remove_collaborator(
    arg: RemoveCollaboratorArgs,
    settings: &Settings,
    runner: &dyn ProcessRunner,
) -> crate::Result<()> {
    github(settings, runner)
        .remove_collaborator(
            &arg.owner,
            &arg.repo,
            &arg.username,
            hostname(&arg.hostname, settings),
        )
        .with_context(|| format!("Remove {} from {}/{}", arg.username, arg.owner, arg.repo))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::github::{HttpMethod, Permission, Permissions, Visibility};
    use crate::process::{Invocation, ProcessOutput, RecordingRunner};

    use super::*;

    fn api_args(endpoint: &str) -> ApiArgs {
        ApiArgs {
            endpoint: endpoint.to_string(),
            method: None,
            field: Vec::new(),
            raw_field: Vec::new(),
            hostname: None,
            include: false,
            input: None,
            body: None,
            jq: None,
            silent: false,
        }
    }

    #[test]
    fn test_create_repo() {
        let runner = RecordingRunner::new();
        let arg = CreateRepoArgs {
            name: "demo".to_string(),
            org: Some("acme".to_string()),
            description: Some("Demo".to_string()),
            gitignore: None,
            homepage: None,
            license: Some("mit".to_string()),
            visibility: Some(Visibility::Public),
            team: None,
            confirm: true,
        };

        do_create_repo(arg, &Settings::default(), &runner).unwrap();

        assert_eq!(
            vec![vec![
                "gh",
                "repo",
                "create",
                "acme/demo",
                "--confirm",
                "--description",
                "Demo",
                "--license",
                "mit",
                "--public",
            ]],
            runner.commands()
        );
    }

    #[test]
    fn test_api_uses_configured_hostname() {
        let settings = Settings {
            gh_hostname: Some("ghe.example.com".to_string()),
            ..Settings::default()
        };
        let mut arg = api_args("/user");
        arg.method = Some(HttpMethod::Get);

        assert_eq!(
            vec![
                ApiOption::Method(HttpMethod::Get),
                ApiOption::Hostname("ghe.example.com".to_string()),
            ],
            api_options(&arg, &settings)
        );

        arg.hostname = Some("other.example.com".to_string());
        assert_eq!(
            ApiOption::Hostname("other.example.com".to_string()),
            api_options(&arg, &settings)[1]
        );
    }

    #[test]
    fn test_api_error_is_returned() {
        let runner = RecordingRunner::new();
        runner.push_output(ProcessOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: "gh: Not Found (HTTP 404)".to_string(),
        });

        let err = do_api(api_args("/nope"), &Settings::default(), &runner).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::Api { .. })
        ));
    }

    #[test]
    fn test_add_collaborator_sends_permission() {
        let runner = RecordingRunner::new();
        let arg = AddCollaboratorArgs {
            owner: "alice".to_string(),
            repo: "demo".to_string(),
            username: "bob".to_string(),
            permission: Permission::Admin,
            hostname: None,
        };

        do_add_collaborator(arg, &Settings::default(), &runner).unwrap();

        let invocations = runner.invocations();
        let Invocation::Captured { stdin, .. } = &invocations[0] else {
            panic!("expected a captured call");
        };
        assert_eq!(Some(r#"{"permission":"admin"}"#), stdin.as_deref());
    }

    #[test]
    fn test_format_collaborator() {
        let collaborator = Collaborator {
            login: "octocat".to_string(),
            id: 1,
            avatar_url: "https://github.com/images/octocat.gif".parse().unwrap(),
            url: "https://api.github.com/users/octocat".parse().unwrap(),
            permissions: Permissions {
                pull: true,
                push: true,
                admin: false,
            },
        };
        assert_eq!("octocat\t1\tpull,push", format_collaborator(&collaborator));
    }
}
