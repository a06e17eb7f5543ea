//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the config file
//! - Conversion to and from KDL documents
//! - Validation

use crate::plugin::{DEFAULT_PIN_KEYS, DEFAULT_UNPIN_KEYS};
use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use serde::{Deserialize, Serialize};

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
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

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// pin-file "~/.config/pinmark/pinned"
/// output-format "human"  // or "json"
/// tag "pin"
/// bindings {
///     pin "++"
///     unpin "--"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinmarkConfig {
    /// Location of the backing file (`~` is expanded)
    pub pin_file: Option<String>,

    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Style tag added to pinned entries
    pub tag: Option<String>,

    /// Key sequence bound to the pin command
    pub pin_keys: Option<String>,

    /// Key sequence bound to the unpin command
    pub unpin_keys: Option<String>,
}

impl PinmarkConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.pin_file {
            if path.trim().is_empty() {
                return Err("pin-file must not be empty".to_string());
            }
        }
        if let Some(ref tag) = self.tag {
            if tag.trim().is_empty() {
                return Err("tag must not be empty".to_string());
            }
        }
        for (name, keys) in [("pin", &self.pin_keys), ("unpin", &self.unpin_keys)] {
            if let Some(keys) = keys {
                if keys.is_empty() {
                    return Err(format!("bindings.{} must not be empty", name));
                }
            }
        }

        // Unset bindings fall back to the plugin defaults, so check the pair
        // that will actually be bound.
        let pin = self.pin_keys.as_deref().unwrap_or(DEFAULT_PIN_KEYS);
        let unpin = self.unpin_keys.as_deref().unwrap_or(DEFAULT_UNPIN_KEYS);
        if pin == unpin {
            return Err(format!("bindings.pin and bindings.unpin are both {:?}", pin));
        }
        if pin.starts_with(unpin) || unpin.starts_with(pin) {
            return Err(format!(
                "bindings.pin {:?} and bindings.unpin {:?} overlap; one would shadow the other",
                pin, unpin
            ));
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    ///
    /// Unknown nodes are ignored for forward compatibility. Values of the
    /// wrong type are ignored too; `output-format` must be "json" or "human".
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        if let Some(node) = doc.get("pin-file") {
            config.pin_file = get_string_arg(node);
        }

        if let Some(node) = doc.get("output-format") {
            config.output_format = get_string_arg(node).and_then(|s| OutputFormat::parse(&s));
        }

        if let Some(node) = doc.get("tag") {
            config.tag = get_string_arg(node);
        }

        if let Some(children) = doc.get("bindings").and_then(|node| node.children()) {
            for child in children.nodes() {
                match child.name().value() {
                    "pin" => config.pin_keys = get_string_arg(child),
                    "unpin" => config.unpin_keys = get_string_arg(child),
                    _ => {}
                }
            }
        }

        config
    }

    /// Convert config to a KDL document.
    pub fn to_kdl(&self) -> KdlDocument {
        let mut doc = KdlDocument::new();

        if let Some(ref path) = self.pin_file {
            doc.nodes_mut().push(string_node("pin-file", path));
        }

        if let Some(ref format) = self.output_format {
            doc.nodes_mut().push(string_node("output-format", format.as_str()));
        }

        if let Some(ref tag) = self.tag {
            doc.nodes_mut().push(string_node("tag", tag));
        }

        if self.pin_keys.is_some() || self.unpin_keys.is_some() {
            let mut bindings = KdlNode::new("bindings");
            let mut children = KdlDocument::new();
            if let Some(ref keys) = self.pin_keys {
                children.nodes_mut().push(string_node("pin", keys));
            }
            if let Some(ref keys) = self.unpin_keys {
                children.nodes_mut().push(string_node("unpin", keys));
            }
            bindings.set_children(children);
            doc.nodes_mut().push(bindings);
        }

        doc
    }
}

fn string_node(name: &str, value: &str) -> KdlNode {
    let mut node = KdlNode::new(name);
    node.push(KdlEntry::new(KdlValue::String(value.to_string())));
    node
}

/// Get a string argument from a node's first entry.
fn get_string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_kdl_empty() {
        let doc = KdlDocument::new();
        let config = PinmarkConfig::from_kdl(&doc);
        assert_eq!(config, PinmarkConfig::default());
    }

    #[test]
    fn test_config_from_kdl_full() {
        let kdl = r#"
            pin-file "/srv/pins"
            output-format "human"
            tag "starred"
            bindings {
                pin "ps"
                unpin "pu"
            }
        "#;
        let doc: KdlDocument = kdl.parse().unwrap();
        let config = PinmarkConfig::from_kdl(&doc);

        assert_eq!(config.pin_file, Some("/srv/pins".to_string()));
        assert_eq!(config.output_format, Some(OutputFormat::Human));
        assert_eq!(config.tag, Some("starred".to_string()));
        assert_eq!(config.pin_keys, Some("ps".to_string()));
        assert_eq!(config.unpin_keys, Some("pu".to_string()));
    }

    #[test]
    fn test_config_from_kdl_ignores_unknown_and_mistyped() {
        let kdl = r#"
            editor "nvim"
            tag 42
            output-format "yaml"
        "#;
        let doc: KdlDocument = kdl.parse().unwrap();
        let config = PinmarkConfig::from_kdl(&doc);

        assert_eq!(config, PinmarkConfig::default());
    }

    #[test]
    fn test_config_to_kdl_roundtrip() {
        let config = PinmarkConfig {
            pin_file: Some("~/.pins".to_string()),
            output_format: Some(OutputFormat::Json),
            tag: Some("pin".to_string()),
            pin_keys: Some("++".to_string()),
            unpin_keys: Some("--".to_string()),
        };

        let text = config.to_kdl().to_string();
        let doc: KdlDocument = text.parse().unwrap();

        assert_eq!(PinmarkConfig::from_kdl(&doc), config);
    }

    #[test]
    fn test_validate_rejects_same_bindings() {
        let config = PinmarkConfig {
            pin_keys: Some("xx".to_string()),
            unpin_keys: Some("xx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_clash_with_default_binding() {
        let config = PinmarkConfig {
            pin_keys: Some("--".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("both \"--\""), "unexpected error: {}", err);

        let config = PinmarkConfig {
            unpin_keys: Some("++".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_prefix_bindings() {
        let config = PinmarkConfig {
            pin_keys: Some("g".to_string()),
            unpin_keys: Some("gu".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_distinct_bindings() {
        let config = PinmarkConfig {
            pin_keys: Some("gp".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_tag() {
        let config = PinmarkConfig {
            tag: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(PinmarkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("HUMAN"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("xml"), None);
    }
}
