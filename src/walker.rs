//! Recursive splitting of a directory of rasters
//!
//! Every `.tif` and `.tiff` file below the input root is split into its own
//! directory under the output root, mirroring the input layout:
//! `input/a/b/img.tif` produces chunks in `output/a/b/img/`.

use std::path::{Path, PathBuf};
use glob::{glob_with, MatchOptions, Pattern};
use log::info;

use crate::chunker::{Chunker, ChunkWriter, JpegChunkWriter, SplitSummary};
use crate::errors::ChunkResult;
use crate::utils::path_utils;

/// Extensions searched for, in search order
const RASTER_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// Totals of a completed walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Raster files processed
    pub files: usize,
    /// Chunk counts over all files
    pub chunks: SplitSummary,
}

/// Result of a directory walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// No raster files were found; nothing was created
    NoInputFound,
    /// Every discovered file was split
    Completed(WalkSummary),
}

/// Finds raster files below `root`
///
/// All `**/*.tif` matches come first, then all `**/*.tiff` matches. Matching
/// is case-sensitive and only regular files are returned. Hidden files and
/// anything below a hidden directory are skipped.
pub fn discover_rasters(root: &Path) -> ChunkResult<Vec<PathBuf>> {
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let mut files = Vec::new();

    for extension in RASTER_EXTENSIONS {
        let pattern = format!("{}/**/*.{}", escaped_root.trim_end_matches('/'), extension);
        for entry in glob_with(&pattern, options)? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Splits every raster below an input root
pub struct DirectoryWalker<W: ChunkWriter = JpegChunkWriter> {
    chunker: Chunker<W>,
}

impl<W: ChunkWriter> DirectoryWalker<W> {
    pub fn new(chunker: Chunker<W>) -> Self {
        DirectoryWalker { chunker }
    }

    /// Gives access to the chunker, mainly for inspecting test writers
    pub fn chunker(&self) -> &Chunker<W> {
        &self.chunker
    }

    /// Splits every raster below `input_root` into mirrored directories
    ///
    /// The first failing file aborts the walk.
    ///
    /// # Arguments
    /// * `input_root` - Directory searched recursively
    /// * `output_root` - Directory receiving one subdirectory per raster
    /// * `chunk_width` - Chunk width in pixels
    /// * `chunk_height` - Chunk height in pixels
    /// * `prefix` - Optional file name prefix, empty for none
    pub fn process_all(
        &mut self,
        input_root: &Path,
        output_root: &Path,
        chunk_width: u32,
        chunk_height: u32,
        prefix: &str
    ) -> ChunkResult<WalkOutcome> {
        let files = discover_rasters(input_root)?;
        if files.is_empty() {
            info!("No GeoTIFF files found in directory: {}", input_root.display());
            return Ok(WalkOutcome::NoInputFound);
        }
        info!("Found {} GeoTIFF file(s) under {}", files.len(), input_root.display());

        let mut summary = WalkSummary::default();
        for file in &files {
            let output_dir = path_utils::mirrored_output_dir(input_root, output_root, file);
            path_utils::ensure_dir(&output_dir)?;

            info!("Processing file: {}", file.display());
            let split = self.chunker.split(file, &output_dir, chunk_width, chunk_height, prefix)?;

            summary.files += 1;
            summary.chunks.accumulate(&split);
        }

        info!("All GeoTIFF files processed. Output saved to: {}", output_root.display());
        Ok(WalkOutcome::Completed(summary))
    }
}
