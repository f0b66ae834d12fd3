//! Single-file split command

use log::info;

use crate::chunker::Chunker;
use crate::commands::command_traits::Command;
use crate::config::ChunkConfig;
use crate::errors::ChunkResult;

/// Splits one raster file into chunks in the output directory
pub struct SplitCommand {
    config: ChunkConfig,
    show_progress: bool,
}

impl SplitCommand {
    /// Create a new split command from a validated configuration
    pub fn new(config: ChunkConfig, show_progress: bool) -> ChunkResult<Self> {
        config.validate()?;
        Ok(SplitCommand { config, show_progress })
    }
}

impl Command for SplitCommand {
    fn execute(&self) -> ChunkResult<()> {
        let source = self.config.source_path()?;
        let output = self.config.output_path()?;
        info!("Splitting {} into {}", source.display(), output.display());

        let mut chunker = Chunker::new().show_progress(self.show_progress);
        let summary = chunker.split(source, output, self.config.chunk_width,
                                    self.config.chunk_height, &self.config.prefix)?;

        info!("Done: {} of {} chunk(s) written to {}", summary.written, summary.cells, output.display());
        Ok(())
    }
}
