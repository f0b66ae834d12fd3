//! Tile-based window reads
//!
//! Tiled TIFFs store the image in equally sized rectangles. Tiles on the
//! right and bottom edges are padded to the full tile size.

use log::debug;

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::TiffResult;

use super::band_array::BandArray;
use super::layout::BlockLayout;
use super::window::Window;

/// Reads windows from tiled TIFF images
pub(crate) struct TileReader<'a> {
    /// Reader for accessing the TIFF file
    reader: &'a mut dyn SeekableReader,
    /// Tile geometry and decoding parameters
    layout: &'a BlockLayout,
}

impl<'a> TileReader<'a> {
    pub fn new(reader: &'a mut dyn SeekableReader, layout: &'a BlockLayout) -> Self {
        TileReader { reader, layout }
    }

    /// Decodes every tile that intersects `window` into `out`
    pub fn read_window(&mut self, window: &Window, out: &mut BandArray) -> TiffResult<()> {
        let tile_width = self.layout.block_width;
        let tile_height = self.layout.block_height;

        let first_tile_x = window.col_off / tile_width;
        let first_tile_y = window.row_off / tile_height;
        let last_tile_x = (window.end_col() - 1) / tile_width;
        let last_tile_y = (window.end_row() - 1) / tile_height;

        debug!("Reading tiles ({},{}) to ({},{}) for window {}",
               first_tile_x, first_tile_y, last_tile_x, last_tile_y, window);

        for plane in 0..self.layout.planes() {
            for tile_y in first_tile_y..=last_tile_y {
                for tile_x in first_tile_x..=last_tile_x {
                    let index = self.layout.block_index(plane, tile_y, tile_x);
                    let data = self.layout.decode_block(self.reader, index, tile_height as usize)?;

                    self.layout.copy_block(&data, tile_x * tile_width, tile_y * tile_height,
                                           tile_height, plane, window, out);
                }
            }
        }

        Ok(())
    }
}
