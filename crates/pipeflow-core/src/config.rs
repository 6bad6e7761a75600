//! Pipeline configuration that producers can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Skip a file whose first line is empty, treating it like a file that
    /// failed to open. On by default for compatibility with existing
    /// pipelines; turn off to keep files that start with a blank line.
    pub skip_blank_leading_line: bool,

    /// Descend into symlinked directories during recursive walks.
    pub follow_links: bool,

    /// Strip a trailing `\r` from every line read from a file.
    pub strip_carriage_return: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            skip_blank_leading_line: true,
            follow_links: false,
            strip_carriage_return: true,
        }
    }
}

impl FlowConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `PIPEFLOW_SKIP_BLANK_LEADING_LINE`: `true`/`false`
    /// - `PIPEFLOW_FOLLOW_LINKS`: `true`/`false`
    /// - `PIPEFLOW_STRIP_CR`: `true`/`false`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_bool("PIPEFLOW_SKIP_BLANK_LEADING_LINE") {
            cfg.skip_blank_leading_line = v;
        }

        if let Some(v) = env_bool("PIPEFLOW_FOLLOW_LINKS") {
            cfg.follow_links = v;
        }

        if let Some(v) = env_bool("PIPEFLOW_STRIP_CR") {
            cfg.strip_carriage_return = v;
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

fn env_bool(key: &str) -> Option<bool> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_keep_legacy_skip_policy() {
        let cfg = FlowConfig::default();
        assert!(cfg.skip_blank_leading_line);
        assert!(!cfg.follow_links);
        assert!(cfg.strip_carriage_return);
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let cfg = FlowConfig::from_json(r#"{"skip_blank_leading_line": false}"#).unwrap();
        assert!(!cfg.skip_blank_leading_line);
        assert!(cfg.strip_carriage_return);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = FlowConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn env_overrides_defaults() {
        std::env::set_var("PIPEFLOW_FOLLOW_LINKS", "yes");
        let cfg = FlowConfig::from_env();
        std::env::remove_var("PIPEFLOW_FOLLOW_LINKS");
        assert!(cfg.follow_links);
    }
}
