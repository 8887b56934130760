//! Configuration handling
use std::{fs::read_to_string, path::PathBuf};

use home::home_dir;
use log::debug;
use serde::Deserialize;

use crate::{
    cli::MirrorKitCli,
    errors::{MirrorKitError, MirrorKitErrorKind},
    gitlab::GITLAB_URL,
    key::default_key_path,
};

/// Configuration data
#[derive(Default, Clone, Debug)]
pub struct MirrorKitConfig {
    /// path to the configuration file
    pub config_path: PathBuf,

    /// actual configuration data
    pub config_data: ConfigData,

    /// CLI arguments
    pub cli_args: MirrorKitCli,
}

/// Content of the configuration file
#[derive(Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigData {
    /// Gitlab host
    pub host: Option<String>,

    /// Deploy key path
    pub key_path: Option<PathBuf>,
}

impl MirrorKitConfig {
    /// Load the configuration for the given CLI arguments
    ///
    /// A missing file at the default path means an empty configuration.
    /// # Errors
    /// Error if the config file can't be read or parsed
    pub fn try_new(cli_args: MirrorKitCli) -> Result<Self, MirrorKitError> {
        let (config_path, explicit) = match cli_args.config.clone() {
            Some(p) => (p, true),
            None => (Self::get_config_path()?, false),
        };
        let config_data = if !explicit && !config_path.exists() {
            debug!("No config file at {}", config_path.display());
            ConfigData::default()
        } else {
            let contents = read_to_string(&config_path).map_err(|e| {
                MirrorKitError::with_source(MirrorKitErrorKind::Config, e)
                    .with_text(format!("Unable to open {}", config_path.display()))
            })?;
            Self::parse(&contents)?
        };
        Ok(MirrorKitConfig {
            config_path,
            config_data,
            cli_args,
        })
    }

    /// Parse the content of a configuration file
    /// # Errors
    /// Error if the content isn't valid
    pub fn parse(contents: &str) -> Result<ConfigData, MirrorKitError> {
        Ok(toml::from_str(contents)?)
    }

    /// Get the path to the config file
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, MirrorKitError> {
        let home_dir = match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                return Err(MirrorKitError::new(MirrorKitErrorKind::Config)
                    .with_text("Unable to get your home dir! home::home_dir() isn't working"))
            }
        };
        Ok(home_dir
            .join(".config")
            .join("mirror-kit")
            .join("config.toml"))
    }

    /// Gitlab host, from the CLI, then the config file
    pub fn host(&self) -> String {
        self.cli_args
            .host
            .clone()
            .or_else(|| self.config_data.host.clone())
            .unwrap_or_else(|| GITLAB_URL.to_string())
    }

    /// Deploy key path, from `cli_path`, then the config file
    /// # Errors
    /// Error if no path is set and the home directory can't be found
    pub fn key_path(&self, cli_path: Option<PathBuf>) -> Result<PathBuf, MirrorKitError> {
        match cli_path.or_else(|| self.config_data.key_path.clone()) {
            Some(path) => Ok(path),
            None => default_key_path(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_config() {
        let data = MirrorKitConfig::parse("host = \"git.example.org\"\nkey_path = \"/tmp/k\"\n")
            .unwrap();
        assert_eq!(data.host.as_deref(), Some("git.example.org"));
        assert_eq!(data.key_path, Some(PathBuf::from("/tmp/k")));
        assert_eq!(MirrorKitConfig::parse("").unwrap(), ConfigData::default());
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = MirrorKitConfig::parse("hots = \"x\"").unwrap_err();
        assert_eq!(err.kind(), &MirrorKitErrorKind::Config);
    }

    #[test]
    fn precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"host = \"git.example.org\"\nkey_path = \"/from/config\"\n")
            .unwrap();
        let cli_args = MirrorKitCli {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = MirrorKitConfig::try_new(cli_args).unwrap();
        assert_eq!(config.host(), "git.example.org");
        assert_eq!(
            config.key_path(Some(PathBuf::from("/from/cli"))).unwrap(),
            PathBuf::from("/from/cli")
        );
        assert_eq!(config.key_path(None).unwrap(), PathBuf::from("/from/config"));

        let mut config = config;
        config.cli_args.host = Some("gitlab.internal".into());
        assert_eq!(config.host(), "gitlab.internal");
    }

    #[test]
    fn defaults() {
        let config = MirrorKitConfig::default();
        assert_eq!(config.host(), GITLAB_URL);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli_args = MirrorKitCli {
            config: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };
        let err = MirrorKitConfig::try_new(cli_args).unwrap_err();
        assert_eq!(err.kind(), &MirrorKitErrorKind::Config);
    }
}
