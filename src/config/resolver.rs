//! Precedence resolution for configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. `COLLAB_USER` environment variable (session user only)
//! 3. config.kdl (`$COLLAB_CONFIG` or `~/.config/collabcut/config.kdl`)
//! 4. Built-in defaults

use crate::config::schema::DEFAULT_CHAT_GROUP_WINDOW;
use crate::config::{CollabConfig, OutputFormat, ToggleBehavior};
use crate::session::DEFAULT_USER_ID;
use crate::{Error, Result};
use kdl::KdlDocument;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const COLLAB_CONFIG_ENV: &str = "COLLAB_CONFIG";

/// Environment variable overriding the session user.
pub const COLLAB_USER_ENV: &str = "COLLAB_USER";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    ConfigFile,
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Output format preference
    pub output_format: Resolved<OutputFormat>,
    /// Session user id
    pub current_user: Resolved<String>,
    /// Whether to load the mock seed
    pub seed: Resolved<bool>,
    /// Task toggle behaviour
    pub toggle_behavior: Resolved<ToggleBehavior>,
    /// Chat grouping window in seconds
    pub chat_group_window: Resolved<u64>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
            current_user: Resolved::new(DEFAULT_USER_ID.to_string(), ValueSource::Default),
            seed: Resolved::new(true, ValueSource::Default),
            toggle_behavior: Resolved::new(ToggleBehavior::Reset, ValueSource::Default),
            chat_group_window: Resolved::new(DEFAULT_CHAT_GROUP_WINDOW, ValueSource::Default),
        }
    }
}

impl ResolvedConfig {
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    pub fn current_user(&self) -> &str {
        &self.current_user.value
    }

    pub fn seed(&self) -> bool {
        self.seed.value
    }

    pub fn toggle_behavior(&self) -> ToggleBehavior {
        self.toggle_behavior.value
    }

    pub fn chat_group_window(&self) -> u64 {
        self.chat_group_window.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_format: Option<OutputFormat>,
    pub current_user: Option<String>,
    pub seed: Option<bool>,
    pub toggle_behavior: Option<ToggleBehavior>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn with_current_user(mut self, user: impl Into<String>) -> Self {
        self.current_user = Some(user.into());
        self
    }

    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_toggle_behavior(mut self, behavior: ToggleBehavior) -> Self {
        self.toggle_behavior = Some(behavior);
        self
    }
}

/// Default config file location (`~/.config/collabcut/config.kdl`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("collabcut").join("config.kdl"))
}

/// Load config.kdl from `path`.
///
/// Returns an empty config if the file doesn't exist.
pub fn load_config_file(path: &Path) -> Result<CollabConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file");
        return Ok(CollabConfig::new());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

    let doc: KdlDocument = content
        .parse()
        .map_err(|e| Error::Config(format!("Failed to parse KDL in {}: {}", path.display(), e)))?;

    let config = CollabConfig::from_kdl(&doc);
    config
        .validate()
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}

/// Resolve configuration from already-loaded sources.
pub fn resolve_with(
    file: &CollabConfig,
    env_user: Option<String>,
    overrides: &ConfigOverrides,
) -> ResolvedConfig {
    let mut result = ResolvedConfig::default();

    if let Some(format) = overrides.output_format {
        result.output_format = Resolved::new(format, ValueSource::CliFlag);
    } else if let Some(format) = file.output_format {
        result.output_format = Resolved::new(format, ValueSource::ConfigFile);
    }

    let cli_user = overrides
        .current_user
        .as_ref()
        .filter(|u| !u.trim().is_empty());
    if let Some(user) = cli_user {
        result.current_user = Resolved::new(user.clone(), ValueSource::CliFlag);
    } else if let Some(user) = env_user.filter(|u| !u.trim().is_empty()) {
        result.current_user =
            Resolved::new(user, ValueSource::EnvVar(COLLAB_USER_ENV.to_string()));
    } else if let Some(ref user) = file.current_user {
        result.current_user = Resolved::new(user.clone(), ValueSource::ConfigFile);
    }

    if let Some(seed) = overrides.seed {
        result.seed = Resolved::new(seed, ValueSource::CliFlag);
    } else if let Some(seed) = file.seed {
        result.seed = Resolved::new(seed, ValueSource::ConfigFile);
    }

    if let Some(behavior) = overrides.toggle_behavior {
        result.toggle_behavior = Resolved::new(behavior, ValueSource::CliFlag);
    } else if let Some(behavior) = file.toggle_behavior {
        result.toggle_behavior = Resolved::new(behavior, ValueSource::ConfigFile);
    }

    if let Some(window) = file.chat_group_window {
        result.chat_group_window = Resolved::new(window, ValueSource::ConfigFile);
    }

    result
}

/// Resolve configuration with the full precedence chain.
///
/// `config_path` is the explicit file location (`--config` or
/// `$COLLAB_CONFIG`); the default location is used when it is `None`.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig> {
    let path = config_path.map(Path::to_path_buf).or_else(default_config_path);
    let file = match path {
        Some(ref p) => load_config_file(p)?,
        None => CollabConfig::new(),
    };
    let env_user = std::env::var(COLLAB_USER_ENV).ok();
    let resolved = resolve_with(&file, env_user, overrides);
    tracing::debug!(
        user = %resolved.current_user.value,
        user_source = %resolved.current_user.source,
        format = %resolved.output_format.value,
        "configuration resolved"
    );
    Ok(resolved)
}
