//! KDL schema for config.kdl.
//!
//! This module provides:
//! - Rust structs representing the KDL schema
//! - Parsing from KDL format
//! - Validation

use kdl::KdlDocument;
use serde::{Deserialize, Serialize};

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What toggling a done task does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleBehavior {
    /// Done goes back to todo
    #[default]
    Reset,
    /// Done goes back to the status held before it was marked done
    Restore,
}

impl ToggleBehavior {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reset" => Some(ToggleBehavior::Reset),
            "restore" => Some(ToggleBehavior::Restore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleBehavior::Reset => "reset",
            ToggleBehavior::Restore => "restore",
        }
    }
}

impl std::fmt::Display for ToggleBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Default gap, in seconds, under which chat messages from one sender are grouped.
pub const DEFAULT_CHAT_GROUP_WINDOW: u64 = 300;

/// Longest accepted grouping window (one day).
pub const MAX_CHAT_GROUP_WINDOW: u64 = 86_400;

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// output-format "human"      // or "json"
/// current-user "user2"
/// seed #false
/// toggle-behavior "restore"  // or "reset"
/// chat-group-window 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollabConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Id of the session user
    pub current_user: Option<String>,

    /// Whether new sessions start from the mock seed
    pub seed: Option<bool>,

    /// Behaviour of the task status toggle
    pub toggle_behavior: Option<ToggleBehavior>,

    /// Chat grouping window in seconds
    pub chat_group_window: Option<u64>,
}

impl CollabConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref user) = self.current_user {
            if user.trim().is_empty() {
                return Err("current-user must not be empty".to_string());
            }
        }
        if let Some(window) = self.chat_group_window {
            if window > MAX_CHAT_GROUP_WINDOW {
                return Err(format!(
                    "chat-group-window must be 0-{}, got {}",
                    MAX_CHAT_GROUP_WINDOW, window
                ));
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    ///
    /// Unknown nodes and values of the wrong type are ignored.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        if let Some(s) = first_string(doc, "output-format") {
            config.output_format = OutputFormat::parse(s);
        }

        if let Some(s) = first_string(doc, "current-user") {
            config.current_user = Some(s.to_string());
        }

        if let Some(node) = doc.get("seed") {
            config.seed = node.entries().first().and_then(|e| e.value().as_bool());
        }

        if let Some(s) = first_string(doc, "toggle-behavior") {
            config.toggle_behavior = ToggleBehavior::parse(s);
        }

        if let Some(node) = doc.get("chat-group-window") {
            if let Some(i) = node.entries().first().and_then(|e| e.value().as_integer()) {
                if i >= 0 {
                    config.chat_group_window = u64::try_from(i).ok();
                }
            }
        }

        config
    }
}

fn first_string<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a str> {
    doc.get(name)
        .and_then(|node| node.entries().first())
        .and_then(|entry| entry.value().as_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Enum Tests ====================

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("HUMAN"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }

    #[test]
    fn test_toggle_behavior_parse() {
        assert_eq!(ToggleBehavior::parse("reset"), Some(ToggleBehavior::Reset));
        assert_eq!(ToggleBehavior::parse("Restore"), Some(ToggleBehavior::Restore));
        assert_eq!(ToggleBehavior::parse("flip"), None);
        assert_eq!(ToggleBehavior::default(), ToggleBehavior::Reset);
    }

    // ==================== CollabConfig Tests ====================

    #[test]
    fn test_config_from_kdl_empty() {
        let doc = KdlDocument::new();
        assert_eq!(CollabConfig::from_kdl(&doc), CollabConfig::default());
    }

    #[test]
    fn test_config_from_kdl_full() {
        let kdl = r#"
            output-format "human"
            current-user "user2"
            seed #false
            toggle-behavior "restore"
            chat-group-window 120
        "#;
        let doc: KdlDocument = kdl.parse().unwrap();
        let config = CollabConfig::from_kdl(&doc);

        assert_eq!(config.output_format, Some(OutputFormat::Human));
        assert_eq!(config.current_user.as_deref(), Some("user2"));
        assert_eq!(config.seed, Some(false));
        assert_eq!(config.toggle_behavior, Some(ToggleBehavior::Restore));
        assert_eq!(config.chat_group_window, Some(120));
    }

    #[test]
    fn test_config_ignores_bad_values() {
        let kdl = r#"
            output-format "xml"
            seed "yes"
            chat-group-window -5
        "#;
        let doc: KdlDocument = kdl.parse().unwrap();
        let config = CollabConfig::from_kdl(&doc);
        assert_eq!(config, CollabConfig::default());
    }

    #[test]
    fn test_config_validate() {
        assert!(CollabConfig::default().validate().is_ok());

        let too_long = CollabConfig {
            chat_group_window: Some(MAX_CHAT_GROUP_WINDOW + 1),
            ..Default::default()
        };
        assert!(too_long.validate().unwrap_err().contains("chat-group-window"));

        let blank_user = CollabConfig {
            current_user: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank_user.validate().is_err());
    }
}
