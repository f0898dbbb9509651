//! Default check options, loaded in layers.
//!
//! Later layers win, field by field:
//! 1. `CheckOptions::default()`
//! 2. `$XDG_CONFIG_HOME/treecheck/treecheck.toml`
//! 3. the file passed to [`Settings::load`]
//! 4. `TREECHECK_*` variables, sections joined by `__`
//!    (`TREECHECK_CHECK__LEAF_ONLY=true`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CheckOptions, CheckStrategy};

const ENV_PREFIX: &str = "TREECHECK";

/// Check options as one layer states them; unset fields fall through.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PartialCheckOptions {
    pub cascade: Option<bool>,
    pub leaf_only: Option<bool>,
    pub check_strategy: Option<CheckStrategy>,
    pub allow_not_loaded: Option<bool>,
}

impl PartialCheckOptions {
    fn apply_to(self, base: CheckOptions) -> CheckOptions {
        CheckOptions {
            cascade: self.cascade.unwrap_or(base.cascade),
            leaf_only: self.leaf_only.unwrap_or(base.leaf_only),
            check_strategy: self.check_strategy.unwrap_or(base.check_strategy),
            allow_not_loaded: self.allow_not_loaded.unwrap_or(base.allow_not_loaded),
        }
    }
}

/// One configuration source before merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsLayer {
    pub check: PartialCheckOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub check: CheckOptions,
}

pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treecheck").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treecheck.toml"))
}

fn read_layer(path: &Path) -> ApplicationResult<SettingsLayer> {
    let file_error = |message: String| ApplicationError::ConfigFile {
        path: path.to_path_buf(),
        message,
    };
    let text = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    toml::from_str(&text).map_err(|e| file_error(e.to_string()))
}

/// Reads `TREECHECK_*` overrides; variables that are not set stay `None`.
fn env_layer() -> ApplicationResult<SettingsLayer> {
    let env = Config::builder()
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .map_err(config_err)?;

    let check_strategy = match env.get_string("check.check_strategy") {
        Ok(value) => Some(
            value
                .parse::<CheckStrategy>()
                .map_err(|message| invalid_env("CHECK_STRATEGY", message))?,
        ),
        Err(ConfigError::NotFound(_)) => None,
        Err(e) => return Err(config_err(e)),
    };

    Ok(SettingsLayer {
        check: PartialCheckOptions {
            cascade: env_bool(&env, "cascade")?,
            leaf_only: env_bool(&env, "leaf_only")?,
            check_strategy,
            allow_not_loaded: env_bool(&env, "allow_not_loaded")?,
        },
    })
}

/// `check.<field>` as a bool; unset is `None`, unparsable is an error.
fn env_bool(env: &Config, field: &str) -> ApplicationResult<Option<bool>> {
    match env.get_bool(&format!("check.{field}")) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(invalid_env(&field.to_ascii_uppercase(), e.to_string())),
    }
}

fn invalid_env(field: &str, message: String) -> ApplicationError {
    ApplicationError::InvalidOption {
        option: format!("{ENV_PREFIX}_CHECK__{field}"),
        message,
    }
}

impl Settings {
    pub fn options(&self) -> CheckOptions {
        self.check
    }

    fn overlay(self, layer: SettingsLayer) -> Self {
        Self {
            check: layer.check.apply_to(self.check),
        }
    }

    /// Resolves settings from every layer. `config_file`, when given, must exist.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> ApplicationResult<Self> {
        let mut settings = Self::default();

        if let Some(global) = global_config_path().filter(|path| path.exists()) {
            debug!(path = %global.display(), "global config");
            settings = settings.overlay(read_layer(&global)?);
        }
        if let Some(path) = config_file {
            debug!(path = %path.display(), "explicit config");
            settings = settings.overlay(read_layer(path)?);
        }
        settings = settings.overlay(env_layer()?);

        trace!(?settings, "settings resolved");
        Ok(settings)
    }

    /// Defaults plus `path`, nothing else.
    pub fn load_file_only(path: &Path) -> ApplicationResult<Self> {
        let defaults = CheckOptions::default();
        Config::builder()
            .set_default("check.cascade", defaults.cascade)
            .and_then(|b| b.set_default("check.leaf_only", defaults.leaf_only))
            .and_then(|b| b.set_default("check.check_strategy", defaults.check_strategy.to_string()))
            .and_then(|b| b.set_default("check.allow_not_loaded", defaults.allow_not_loaded))
            .map_err(config_err)?
            .add_source(File::from(path).required(true))
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .map_err(|e| ApplicationError::ConfigFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }

    /// Commented starting point for `treecheck.toml`.
    pub fn template() -> String {
        r#"# treecheck configuration
# Location: ~/.config/treecheck/treecheck.toml

[check]
# Propagate checked state between parents and children
cascade = true

# Only report leaf keys as checked
leaf_only = false

# Which nodes are reported as checked: "all", "parent" or "child"
check_strategy = "all"

# Skip subtrees whose children are not loaded instead of failing
allow_not_loaded = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
