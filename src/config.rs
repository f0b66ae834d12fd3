//! Run configuration
//!
//! A `ChunkConfig` can come from a TOML file and is then overridden by
//! command-line flags. Keys: `source`, `output`, `chunk_width`,
//! `chunk_height`, `prefix`. Unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};
use log::debug;

use crate::errors::{ChunkError, ChunkResult};

/// Default chunk width in pixels
pub const DEFAULT_CHUNK_WIDTH: u32 = 5120;

/// Default chunk height in pixels
pub const DEFAULT_CHUNK_HEIGHT: u32 = 5120;

/// Parameters of a chunking run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Raster file or directory to split
    pub source: Option<PathBuf>,
    /// Directory receiving the chunks
    pub output: Option<PathBuf>,
    pub chunk_width: u32,
    pub chunk_height: u32,
    /// File name prefix, empty for none
    pub prefix: String,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        ChunkConfig {
            source: None,
            output: None,
            chunk_width: DEFAULT_CHUNK_WIDTH,
            chunk_height: DEFAULT_CHUNK_HEIGHT,
            prefix: String::new(),
        }
    }
}

impl ChunkConfig {
    /// Parses a configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> ChunkResult<Self> {
        let toml_value: toml::Value = content.parse()?;
        let mut config = ChunkConfig::default();

        if let Some(source) = string_field(&toml_value, "source")? {
            config.source = Some(PathBuf::from(source));
        }
        if let Some(output) = string_field(&toml_value, "output")? {
            config.output = Some(PathBuf::from(output));
        }
        if let Some(width) = size_field(&toml_value, "chunk_width")? {
            config.chunk_width = width;
        }
        if let Some(height) = size_field(&toml_value, "chunk_height")? {
            config.chunk_height = height;
        }
        if let Some(prefix) = string_field(&toml_value, "prefix")? {
            config.prefix = prefix.to_string();
        }

        debug!("Parsed configuration: {:?}", config);
        Ok(config)
    }

    /// Loads a configuration from a TOML file
    pub fn from_file(path: &Path) -> ChunkResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ChunkError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Applies values given on the command line over the current ones
    pub fn apply_overrides(
        &mut self,
        source: Option<PathBuf>,
        output: Option<PathBuf>,
        chunk_width: Option<u32>,
        chunk_height: Option<u32>,
        prefix: Option<String>
    ) {
        if source.is_some() {
            self.source = source;
        }
        if output.is_some() {
            self.output = output;
        }
        if let Some(width) = chunk_width {
            self.chunk_width = width;
        }
        if let Some(height) = chunk_height {
            self.chunk_height = height;
        }
        if let Some(prefix) = prefix {
            self.prefix = prefix;
        }
    }

    /// Checks that the run is fully specified
    pub fn validate(&self) -> ChunkResult<()> {
        if self.chunk_width == 0 || self.chunk_height == 0 {
            return Err(ChunkError::InvalidChunkSize(self.chunk_width, self.chunk_height));
        }
        self.source_path()?;
        self.output_path()?;
        Ok(())
    }

    pub fn source_path(&self) -> ChunkResult<&Path> {
        self.source.as_deref()
            .ok_or_else(|| ChunkError::Config("No input path given".to_string()))
    }

    pub fn output_path(&self) -> ChunkResult<&Path> {
        self.output.as_deref()
            .ok_or_else(|| ChunkError::Config("No output directory given".to_string()))
    }
}

fn string_field<'a>(table: &'a toml::Value, key: &str) -> ChunkResult<Option<&'a str>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_str()
            .map(Some)
            .ok_or_else(|| ChunkError::Config(format!("'{}' must be a string", key))),
    }
}

fn size_field(table: &toml::Value, key: &str) -> ChunkResult<Option<u32>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_integer()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| ChunkError::Config(format!("'{}' must be a non-negative integer", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_5120_without_prefix() {
        let config = ChunkConfig::default();
        assert_eq!((config.chunk_width, config.chunk_height), (5120, 5120));
        assert!(config.prefix.is_empty());
    }

    #[test]
    fn reads_all_keys() {
        let config = ChunkConfig::from_toml_str(r#"
            source = "/data/in"
            output = "/data/out"
            chunk_width = 1024
            chunk_height = 512
            prefix = "survey"
            comment = "ignored"
        "#).unwrap();

        assert_eq!(config.source, Some(PathBuf::from("/data/in")));
        assert_eq!(config.output, Some(PathBuf::from("/data/out")));
        assert_eq!((config.chunk_width, config.chunk_height), (1024, 512));
        assert_eq!(config.prefix, "survey");
    }

    #[test]
    fn wrong_types_are_config_errors() {
        assert!(matches!(ChunkConfig::from_toml_str("chunk_width = \"big\""), Err(ChunkError::Config(_))));
        assert!(matches!(ChunkConfig::from_toml_str("chunk_height = -4"), Err(ChunkError::Config(_))));
        assert!(matches!(ChunkConfig::from_toml_str("prefix = 3"), Err(ChunkError::Config(_))));
        assert!(matches!(ChunkConfig::from_toml_str("not toml ["), Err(ChunkError::Config(_))));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = ChunkConfig::from_toml_str("chunk_width = 256\nprefix = \"a\"").unwrap();
        config.apply_overrides(Some(PathBuf::from("in.tif")), Some(PathBuf::from("out")), None, Some(128), None);

        assert_eq!((config.chunk_width, config.chunk_height), (256, 128));
        assert_eq!(config.prefix, "a");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_and_missing_paths() {
        let mut config = ChunkConfig::default();
        assert!(matches!(config.validate(), Err(ChunkError::Config(_))));

        config.apply_overrides(Some(PathBuf::from("a")), Some(PathBuf::from("b")), Some(0), None, None);
        assert!(matches!(config.validate(), Err(ChunkError::InvalidChunkSize(0, 5120))));
    }
}
