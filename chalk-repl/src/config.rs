use serde::Deserialize;
use std::{fs, path::Path};

/// The file the configuration is read from, relative to the working directory.
pub const CONFIG_FILE: &str = "chalk.toml";

/// Settings of the REPL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Seed for picking the starter equation. Picked at random if absent.
    pub seed: Option<u64>,

    /// Print the table of node ids after every change.
    pub show_ids: bool,

    /// Log filter, used when `CHALK_LOG` is not set.
    pub log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self { seed: None, show_ids: true, log: None }
    }
}

impl Config {
    /// Parses a configuration from TOML.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads [`CONFIG_FILE`] from the working directory.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads the configuration from the given file. A missing file gives the defaults; a file that
    /// cannot be read or parsed is reported, and gives the defaults too.
    ///
    /// Logging is not set up yet when this runs, so problems go straight to stderr.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("error parsing {}: {}; using defaults", path.display(), err);
                    Self::default()
                },
            },
            Err(err) => {
                eprintln!("error reading {}: {}; using defaults", path.display(), err);
                Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert!(Config::default().show_ids);
    }

    #[test]
    fn every_field() {
        let config = Config::parse("seed = 42\nshow_ids = false\nlog = \"chalk_engine=debug\"\n").unwrap();
        assert_eq!(config, Config {
            seed: Some(42),
            show_ids: false,
            log: Some("chalk_engine=debug".to_string()),
        });
    }

    #[test]
    fn bad_files() {
        assert!(Config::parse("seed = \"forty-two\"").is_err());
        assert!(Config::parse("colour = true").is_err());
        assert_eq!(Config::load_from(Path::new("does/not/exist.toml")), Config::default());
    }
}
