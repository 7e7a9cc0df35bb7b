//! Configuration for Collabcut.
//!
//! ## config.kdl - User preferences
//!
//! Located at `$COLLAB_CONFIG`, or `~/.config/collabcut/config.kdl` by default.
//!
//! Contains:
//! - `output-format` - "json" or "human"
//! - `current-user` - Id of the session user
//! - `seed` - Start sessions from the mock seed (default `#true`)
//! - `toggle-behavior` - "reset" or "restore"
//! - `chat-group-window` - Chat grouping window in seconds (default 300)
//!
//! Nothing else is ever written to disk.
//!
//! ## Precedence
//!
//! CLI flag > environment (`COLLAB_USER`) > config.kdl > defaults
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    COLLAB_CONFIG_ENV, COLLAB_USER_ENV, ConfigOverrides, Resolved, ResolvedConfig, ValueSource,
    default_config_path, load_config_file, resolve_config, resolve_with,
};
pub use schema::{CollabConfig, OutputFormat, ToggleBehavior};
