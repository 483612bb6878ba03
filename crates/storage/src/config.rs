//! Suite configuration with precedence and validation
//!
//! Values are resolved in order: built-in defaults, then environment
//! variables, then whatever was set explicitly on the builder.

use crate::errors::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Overrides the directory suites are stored in
pub const PREFERENCES_DIR_ENV: &str = "PREFKIT_PREFERENCES_DIR";

/// Overrides the persistence mode (`immediate` or `manual`)
pub const PERSISTENCE_ENV: &str = "PREFKIT_PERSISTENCE";

/// When a file-backed suite writes its contents to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persistence {
    /// After every mutation
    #[default]
    Immediate,
    /// Only on `synchronize()`
    Manual,
}

impl FromStr for Persistence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "immediate" => Ok(Persistence::Immediate),
            "manual" => Ok(Persistence::Manual),
            other => Err(Error::config(format!(
                "unknown persistence mode '{other}', expected 'immediate' or 'manual'"
            ))),
        }
    }
}

/// Where and how a persistent suite is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Reverse-DNS suite name, also the file stem
    pub domain: String,
    /// Directory holding `<domain>.plist`
    pub directory: PathBuf,
    pub persistence: Persistence,
}

impl SuiteConfig {
    pub fn builder(domain: impl Into<String>) -> SuiteConfigBuilder {
        SuiteConfigBuilder {
            domain: domain.into(),
            directory: None,
            persistence: None,
        }
    }

    /// Path of the property list backing this suite
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(format!("{}.plist", self.domain))
    }
}

/// Builder for [`SuiteConfig`]
#[derive(Debug, Clone)]
pub struct SuiteConfigBuilder {
    domain: String,
    directory: Option<PathBuf>,
    persistence: Option<Persistence>,
}

impl SuiteConfigBuilder {
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Validate the domain and resolve every setting
    pub fn build(self) -> Result<SuiteConfig> {
        validate_domain(&self.domain)?;

        let mut config = SuiteConfig {
            domain: self.domain,
            directory: default_directory(),
            persistence: Persistence::default(),
        };

        if let Ok(directory) = std::env::var(PREFERENCES_DIR_ENV) {
            if !directory.is_empty() {
                config.directory = PathBuf::from(directory);
            }
        }
        if self.persistence.is_none() {
            if let Ok(mode) = std::env::var(PERSISTENCE_ENV) {
                config.persistence = mode.parse()?;
            }
        }

        if let Some(directory) = self.directory {
            config.directory = directory;
        }
        if let Some(persistence) = self.persistence {
            config.persistence = persistence;
        }

        tracing::debug!(
            "Resolved suite '{}' at {} ({:?})",
            config.domain,
            config.directory.display(),
            config.persistence
        );
        Ok(config)
    }
}

fn validate_domain(domain: &str) -> Result<()> {
    if domain.trim().is_empty() {
        return Err(Error::config("suite domain must not be empty"));
    }
    if domain == "." || domain == ".." {
        return Err(Error::config(format!("'{domain}' is not a valid suite domain")));
    }
    if domain.contains(['/', '\\']) {
        return Err(Error::config(format!(
            "suite domain '{domain}' must not contain path separators"
        )));
    }
    Ok(())
}

fn default_directory() -> PathBuf {
    dirs::preference_dir()
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
