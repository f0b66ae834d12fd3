//! The chunking loop

use std::path::Path;
use log::{debug, info, warn};

use crate::errors::{ChunkError, ChunkResult};
use crate::extractor::{RasterSource, TiffRasterSource};
use crate::utils::path_utils;
use crate::utils::progress::ProgressTracker;

use super::chunk_image::ChunkImage;
use super::grid::ChunkGrid;
use super::naming::chunk_file_name;
use super::writer::{ChunkWriter, JpegChunkWriter};

/// Counts for one split source
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    /// Grid cells processed
    pub cells: u64,
    /// Chunks written
    pub written: u64,
    /// Chunks skipped because they were uniformly white or black
    pub skipped_blank: u64,
}

impl SplitSummary {
    /// Adds another summary's counts to this one
    pub fn accumulate(&mut self, other: &SplitSummary) {
        self.cells += other.cells;
        self.written += other.written;
        self.skipped_blank += other.skipped_blank;
    }
}

/// Splits rasters into chunks and hands non-blank ones to a `ChunkWriter`
pub struct Chunker<W: ChunkWriter = JpegChunkWriter> {
    writer: W,
    show_progress: bool,
}

impl Chunker<JpegChunkWriter> {
    /// Chunker writing quality-100 JPEGs with a visible progress bar
    pub fn new() -> Self {
        Chunker::with_writer(JpegChunkWriter::new())
    }
}

impl Default for Chunker<JpegChunkWriter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ChunkWriter> Chunker<W> {
    pub fn with_writer(writer: W) -> Self {
        Chunker {
            writer,
            show_progress: true,
        }
    }

    /// Enables or disables the per-file progress bar
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Gives access to the writer, mainly for inspecting test writers
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Splits the raster at `source_path` into chunks inside `output_dir`
    ///
    /// `output_dir` is created before the source is opened. The source is
    /// closed when this returns.
    ///
    /// # Arguments
    /// * `source_path` - Raster file to split
    /// * `output_dir` - Directory receiving the chunk files
    /// * `chunk_width` - Chunk width in pixels
    /// * `chunk_height` - Chunk height in pixels
    /// * `prefix` - Optional file name prefix, empty for none
    ///
    /// # Returns
    /// Counts of processed cells, written chunks and skipped blank chunks
    pub fn split(
        &mut self,
        source_path: &Path,
        output_dir: &Path,
        chunk_width: u32,
        chunk_height: u32,
        prefix: &str
    ) -> ChunkResult<SplitSummary> {
        check_chunk_size(chunk_width, chunk_height)?;
        path_utils::ensure_dir(output_dir)?;

        let mut source = TiffRasterSource::open(source_path)
            .map_err(|e| ChunkError::SourceOpen(source_path.to_path_buf(), e))?;
        let stem = path_utils::file_stem(source_path);

        self.split_source(&mut source, &stem, output_dir, chunk_width, chunk_height, prefix)
    }

    /// Runs the chunking loop over an already opened source
    ///
    /// Any read or write failure aborts the run; chunks written before the
    /// failure are left in place.
    pub fn split_source<S: RasterSource + ?Sized>(
        &mut self,
        source: &mut S,
        source_stem: &str,
        output_dir: &Path,
        chunk_width: u32,
        chunk_height: u32,
        prefix: &str
    ) -> ChunkResult<SplitSummary> {
        check_chunk_size(chunk_width, chunk_height)?;

        let grid = ChunkGrid::new(source.width(), source.height(), chunk_width, chunk_height);
        info!("Splitting {} ({}x{}, {} band(s)) into {} chunk(s) of {}x{}",
              source_stem, source.width(), source.height(), source.band_count(),
              grid.total_cells(), chunk_width, chunk_height);
        if grid.has_remainder() {
            warn!("{}: rightmost {} column(s) and bottom {} row(s) do not fill a chunk and are not written",
                  source_stem, grid.remainder_x, grid.remainder_y);
        }

        let progress = if self.show_progress {
            ProgressTracker::new(grid.total_cells(), &format!("Processing {}", source_stem))
        } else {
            ProgressTracker::hidden(grid.total_cells())
        };

        let mut summary = SplitSummary {
            cells: grid.total_cells(),
            ..SplitSummary::default()
        };

        for cell in grid.iter() {
            let pixels = source.read_window(&cell.window)
                .map_err(|e| ChunkError::WindowRead(cell.window, e))?;
            let chunk = ChunkImage::from_band_array(&pixels);

            if let Some(value) = chunk.blank_value() {
                debug!("Skipping blank chunk ({}, {}): all samples {}", cell.i, cell.j, value);
                summary.skipped_blank += 1;
            } else {
                let path = output_dir.join(chunk_file_name(prefix, source_stem, cell.i, cell.j));
                self.writer.write_chunk(&chunk, &path)?;
                summary.written += 1;
            }

            progress.increment(1);
        }
        progress.finish();

        info!("{}: {} chunk(s) written, {} blank chunk(s) skipped",
              source_stem, summary.written, summary.skipped_blank);
        Ok(summary)
    }
}

fn check_chunk_size(chunk_width: u32, chunk_height: u32) -> ChunkResult<()> {
    if chunk_width == 0 || chunk_height == 0 {
        return Err(ChunkError::InvalidChunkSize(chunk_width, chunk_height));
    }
    Ok(())
}
