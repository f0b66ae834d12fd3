//! CLI command implementations
//!
//! This module contains the commands supported by the CLI application
//! using the Command pattern.

pub mod command_traits;
pub mod split_command;
pub mod split_directory_command;

pub use command_traits::{Command, CommandFactory};
pub use split_command::SplitCommand;
pub use split_directory_command::SplitDirectoryCommand;

use std::path::PathBuf;
use clap::ArgMatches;
use log::{debug, info};

use crate::config::ChunkConfig;
use crate::errors::ChunkResult;

/// Factory for creating command instances based on CLI arguments
///
/// A directory input selects `SplitDirectoryCommand`, anything else
/// `SplitCommand`.
pub struct ChunkerCommandFactory;

impl ChunkerCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ChunkerCommandFactory
    }
}

impl Default for ChunkerCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for ChunkerCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> ChunkResult<Box<dyn Command>> {
        let config = config_from_args(args)?;
        let show_progress = !args.get_flag("no-progress");

        if config.source_path()?.is_dir() {
            info!("Input is a directory, splitting all GeoTIFF files below it");
            Ok(Box::new(SplitDirectoryCommand::new(config, show_progress)?))
        } else {
            Ok(Box::new(SplitCommand::new(config, show_progress)?))
        }
    }
}

/// Builds the run configuration: the `--config` file first, then flags on top
pub fn config_from_args(args: &ArgMatches) -> ChunkResult<ChunkConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => {
            info!("Reading configuration from {}", path);
            ChunkConfig::from_file(&PathBuf::from(path))?
        },
        None => ChunkConfig::default(),
    };

    config.apply_overrides(
        args.get_one::<String>("input").map(PathBuf::from),
        args.get_one::<String>("output").map(PathBuf::from),
        args.get_one::<u32>("width").copied(),
        args.get_one::<u32>("height").copied(),
        args.get_one::<String>("prefix").cloned(),
    );

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}
