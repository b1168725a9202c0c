//! Synchronization configuration structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum DirectoryBackendConfig {
    /// System name service through `getent`.
    Nss {
        /// `getent` binary.
        #[serde(default = "default_getent")]
        getent: PathBuf,
    },
    /// OpenLDAP `ldapsearch` with anonymous bind.
    Ldapsearch {
        /// `ldapsearch` binary.
        #[serde(default = "default_ldapsearch")]
        program: PathBuf,
        /// Server URI.
        uri: String,
        /// Search base for groups.
        group_base: String,
        /// Search base for accounts.
        people_base: String,
    },
}

impl Default for DirectoryBackendConfig {
    fn default() -> Self {
        Self::Nss {
            getent: default_getent(),
        }
    }
}

/// Root configuration of a synchronization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directory group whose members are added to the scheduler.
    #[serde(default = "default_group")]
    pub group: String,
    /// Association new users are attached to.
    #[serde(default = "default_account")]
    pub default_account: String,
    /// `sacctmgr` binary.
    #[serde(default = "default_sacctmgr")]
    pub sacctmgr: PathBuf,
    /// Directory backend.
    #[serde(default)]
    pub directory: DirectoryBackendConfig,
}

/// Group synchronized when nothing else is configured.
pub const DEFAULT_GROUP: &str = "ocfhpc";
/// Association used when nothing else is configured.
pub const DEFAULT_ACCOUNT: &str = "users";

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

fn default_account() -> String {
    DEFAULT_ACCOUNT.to_string()
}

fn default_sacctmgr() -> PathBuf {
    PathBuf::from("sacctmgr")
}

fn default_getent() -> PathBuf {
    PathBuf::from("getent")
}

fn default_ldapsearch() -> PathBuf {
    PathBuf::from("ldapsearch")
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            default_account: default_account(),
            sacctmgr: default_sacctmgr(),
            directory: DirectoryBackendConfig::default(),
        }
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(format!("{field} `{value}` must not contain whitespace or `=`"));
    }
    Ok(())
}

fn validate_program(field: &str, value: &Path) -> Result<(), String> {
    if value.as_os_str().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

impl DirectoryBackendConfig {
    /// Validate backend settings.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Nss { getent } => validate_program("getent", getent),
            Self::Ldapsearch {
                program,
                uri,
                group_base,
                people_base,
            } => {
                validate_program("ldapsearch program", program)?;
                for (field, value) in [
                    ("uri", uri),
                    ("group_base", group_base),
                    ("people_base", people_base),
                ] {
                    if value.trim().is_empty() {
                        return Err(format!("ldapsearch {field} must not be empty"));
                    }
                }
                Ok(())
            }
        }
    }
}

impl SyncConfig {
    /// Validate names and backend settings.
    pub fn validate(&self) -> Result<(), String> {
        validate_name("group", &self.group)?;
        validate_name("default_account", &self.default_account)?;
        validate_program("sacctmgr", &self.sacctmgr)?;
        self.directory
            .validate()
            .map_err(|e| format!("directory invalid: {e}"))
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Self::from_json_str(&input)
    }

    /// Apply command-line or environment overrides on top of this configuration.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(group) = overrides.group {
            self.group = group;
        }
        if let Some(account) = overrides.default_account {
            self.default_account = account;
        }
        if let Some(sacctmgr) = overrides.sacctmgr {
            self.sacctmgr = sacctmgr;
        }
        self
    }
}

/// Values that take precedence over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Group override.
    pub group: Option<String>,
    /// Default account override.
    pub default_account: Option<String>,
    /// `sacctmgr` path override.
    pub sacctmgr: Option<PathBuf>,
}
