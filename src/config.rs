//! # Settings
//!
//! Defaults for the wrappers are read from an ini file, located at (in order):
//!
//! 1. the path in the `REPOKIT_CONFIG` environment variable
//! 2. `$HOME/.repokitconfig`
//!
//! A missing file means built-in defaults. The recognized keys are:
//!
//! ```ini
//! [git]
//! executable = git
//!
//! [gh]
//! executable = gh
//! hostname = github.example.com
//!
//! [init]
//! message = Initial Import
//! sshUser = git
//! sshHost = github.com
//! ```

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::Error;
use crate::git::{self, InitOptions};
use crate::github;

pub const CONFIG_ENV_VAR: &str = "REPOKIT_CONFIG";
pub const CONFIG_FILE_NAME: &str = ".repokitconfig";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub git_executable: String,
    pub gh_executable: String,
    /// Default `--hostname` for `gh api` calls
    pub gh_hostname: Option<String>,
    pub init_message: String,
    pub ssh_user: String,
    pub ssh_host: String,
}

impl Default for Settings {
    fn default() -> Self {
        let init = InitOptions::default();
        Settings {
            git_executable: git::constants::GIT_EXECUTABLE.to_string(),
            gh_executable: github::constants::GH_EXECUTABLE.to_string(),
            gh_hostname: None,
            init_message: init.message,
            ssh_user: init.ssh_user,
            ssh_host: init.ssh_host,
        }
    }
}

impl Settings {
    /// Load from the default location, see the module docs.
    pub fn load() -> Result<Self, Error> {
        match default_path() {
            Some(path) => Self::load_from(path),
            None => {
                log::debug!("No home directory, using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut settings = Self::default();
        let get = |section: &str, key: &str| ini.get_from(Some(section), key).map(str::to_string);

        if let Some(value) = get("git", "executable") {
            settings.git_executable = value;
        }
        if let Some(value) = get("gh", "executable") {
            settings.gh_executable = value;
        }
        settings.gh_hostname = get("gh", "hostname");
        if let Some(value) = get("init", "message") {
            settings.init_message = value;
        }
        if let Some(value) = get("init", "sshUser") {
            settings.ssh_user = value;
        }
        if let Some(value) = get("init", "sshHost") {
            settings.ssh_host = value;
        }

        settings
    }

    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            message: self.init_message.clone(),
            ssh_user: self.ssh_user.clone(),
            ssh_host: self.ssh_host.clone(),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(dir.path().join("nope")).unwrap();

        assert_eq!(Settings::default(), settings);
        assert_eq!(InitOptions::default(), settings.init_options());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "[gh]\nhostname = ghe.example.com\n\n[init]\nmessage = Bootstrap\nsshHost = git.example.com\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!("git", settings.git_executable);
        assert_eq!("gh", settings.gh_executable);
        assert_eq!(Some("ghe.example.com".to_string()), settings.gh_hostname);
        assert_eq!(
            InitOptions {
                message: "Bootstrap".to_string(),
                ssh_user: "git".to_string(),
                ssh_host: "git.example.com".to_string(),
            },
            settings.init_options()
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[git\nexecutable = git\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
