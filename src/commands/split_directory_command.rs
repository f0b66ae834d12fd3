//! Directory split command

use log::info;

use crate::chunker::Chunker;
use crate::commands::command_traits::Command;
use crate::config::ChunkConfig;
use crate::errors::ChunkResult;
use crate::walker::{DirectoryWalker, WalkOutcome};

/// Splits every raster in a directory tree into mirrored output folders
pub struct SplitDirectoryCommand {
    config: ChunkConfig,
    show_progress: bool,
}

impl SplitDirectoryCommand {
    /// Create a new directory split command from a validated configuration
    pub fn new(config: ChunkConfig, show_progress: bool) -> ChunkResult<Self> {
        config.validate()?;
        Ok(SplitDirectoryCommand { config, show_progress })
    }
}

impl Command for SplitDirectoryCommand {
    fn execute(&self) -> ChunkResult<()> {
        let input_root = self.config.source_path()?;
        let output_root = self.config.output_path()?;

        let mut walker = DirectoryWalker::new(Chunker::new().show_progress(self.show_progress));
        let outcome = walker.process_all(input_root, output_root, self.config.chunk_width,
                                         self.config.chunk_height, &self.config.prefix)?;

        if let WalkOutcome::Completed(summary) = outcome {
            info!("{} file(s), {} chunk(s) written, {} blank chunk(s) skipped",
                  summary.files, summary.chunks.written, summary.chunks.skipped_blank);
        }
        Ok(())
    }
}
