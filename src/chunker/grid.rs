//! Chunk grid over a raster
//!
//! Chunk counts use floor division, so a trailing partial column or row is
//! left out of the grid.

use log::debug;

use crate::extractor::Window;

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Row index
    pub i: u32,
    /// Column index
    pub j: u32,
    /// Pixel window covered by the cell
    pub window: Window,
}

/// Non-overlapping grid of full-size chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkGrid {
    pub chunk_width: u32,
    pub chunk_height: u32,
    pub num_x_chunks: u32,
    pub num_y_chunks: u32,
    /// Columns on the right not covered by any chunk
    pub remainder_x: u32,
    /// Rows at the bottom not covered by any chunk
    pub remainder_y: u32,
}

impl ChunkGrid {
    /// Lays a grid of `chunk_width` × `chunk_height` chunks over the raster
    ///
    /// Both chunk dimensions must be positive.
    pub fn new(raster_width: u32, raster_height: u32, chunk_width: u32, chunk_height: u32) -> Self {
        debug_assert!(chunk_width > 0 && chunk_height > 0);

        let num_x_chunks = raster_width / chunk_width;
        let num_y_chunks = raster_height / chunk_height;

        debug!("ChunkGrid: {}x{} raster, chunk {}x{} → {}x{} chunks ({} total)",
               raster_width, raster_height, chunk_width, chunk_height,
               num_x_chunks, num_y_chunks, num_x_chunks as u64 * num_y_chunks as u64);

        ChunkGrid {
            chunk_width,
            chunk_height,
            num_x_chunks,
            num_y_chunks,
            remainder_x: raster_width % chunk_width,
            remainder_y: raster_height % chunk_height,
        }
    }

    pub fn total_cells(&self) -> u64 {
        self.num_x_chunks as u64 * self.num_y_chunks as u64
    }

    /// Whether any pixels fall outside the grid
    pub fn has_remainder(&self) -> bool {
        self.remainder_x > 0 || self.remainder_y > 0
    }

    /// Window of the cell at row `i`, column `j`
    pub fn window(&self, i: u32, j: u32) -> Window {
        Window::new(j * self.chunk_width, i * self.chunk_height, self.chunk_width, self.chunk_height)
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.num_y_chunks).flat_map(move |i| {
            (0..self.num_x_chunks).map(move |j| GridCell { i, j, window: self.window(i, j) })
        })
    }
}
