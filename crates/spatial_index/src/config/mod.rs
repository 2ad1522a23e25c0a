//! Configuration system
//!
//! [`IndexConfig`] carries the two tuning values every index is built with,
//! plus the runtime statistics switch. Any configuration type can be read
//! from or written to TOML/RON files through the [`Config`] trait.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

use crate::spatial::IndexError;

/// Supported configuration file formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        parse(&contents, format)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn parse<T: for<'de> Deserialize<'de>>(contents: &str, format: Format) -> Result<T, ConfigError> {
    match format {
        Format::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        Format::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning values for a quadtree or octree
///
/// Both size values are fixed for the lifetime of the index; re-preparing the
/// tree keeps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Soft cap on items held by one leaf. Reaching it triggers a split
    /// attempt; leaves at the size floor keep absorbing items past it.
    pub preferred_max_items_per_node: usize,

    /// Smallest extent a child node may have on any axis. A node splits only
    /// when every axis is at least twice this value.
    pub minimum_node_size: f32,

    /// Record node counts, depth and per-query timings
    pub track_stats: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            preferred_max_items_per_node: 50,
            minimum_node_size: 2.0,
            track_stats: true,
        }
    }
}

impl Config for IndexConfig {}

impl IndexConfig {
    /// Defaults tuned for 3D worlds, which favour coarser leaves
    pub fn octree_default() -> Self {
        Self {
            minimum_node_size: 5.0,
            ..Self::default()
        }
    }

    /// Reject values that would make the split policy meaningless
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.preferred_max_items_per_node == 0 {
            return Err(IndexError::InvalidConfiguration(
                "preferred_max_items_per_node must be greater than zero".to_string(),
            ));
        }

        if !self.minimum_node_size.is_finite() || self.minimum_node_size <= 0.0 {
            return Err(IndexError::InvalidConfiguration(format!(
                "minimum_node_size must be a positive finite number, got {}",
                self.minimum_node_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(IndexConfig::default().validate().is_ok());
        assert!(IndexConfig::octree_default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_items_per_node() {
        let config = IndexConfig {
            preferred_max_items_per_node: 0,
            ..IndexConfig::default()
        };
        assert!(matches!(config.validate(), Err(IndexError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_non_positive_node_size() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = IndexConfig {
                minimum_node_size: size,
                ..IndexConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(IndexError::InvalidConfiguration(_))),
                "size {size} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_toml_fills_missing_fields() {
        let config: IndexConfig = parse("preferred_max_items_per_node = 4\n", Format::Toml).unwrap();
        assert_eq!(config.preferred_max_items_per_node, 4);
        assert_eq!(config.minimum_node_size, IndexConfig::default().minimum_node_size);
        assert!(config.track_stats);
    }

    #[test]
    fn test_parse_ron() {
        let config: IndexConfig = parse(
            "(preferred_max_items_per_node: 8, minimum_node_size: 1.5, track_stats: false)",
            Format::Ron,
        )
        .unwrap();
        assert_eq!(config.preferred_max_items_per_node, 8);
        assert_eq!(config.minimum_node_size, 1.5);
        assert!(!config.track_stats);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = IndexConfig::load_from_file("index.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let path = std::env::temp_dir().join(format!("spatial_index_config_{}.toml", std::process::id()));
        let config = IndexConfig {
            preferred_max_items_per_node: 12,
            minimum_node_size: 3.0,
            track_stats: false,
        };

        config.save_to_file(&path).unwrap();
        let loaded = IndexConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
