//! Strip-based window reads
//!
//! Stripped TIFFs store the image as horizontal bands of `RowsPerStrip`
//! rows spanning the full width. The last strip may hold fewer rows.

use std::cmp::min;
use log::{debug, trace};

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::TiffResult;

use super::band_array::BandArray;
use super::layout::BlockLayout;
use super::window::Window;

/// Decoded strips of the most recent window's strip range
///
/// Chunks of one grid row cover the same strips, so every chunk after the
/// first in a row is served from here.
#[derive(Default)]
pub(crate) struct StripCache {
    /// First and last strip index held, inclusive
    range: Option<(u32, u32)>,
    /// Decoded strips, plane-major then top to bottom
    strips: Vec<Vec<u8>>,
    /// Strips decoded since the source was opened
    decoded: u64,
}

impl StripCache {
    pub fn decoded(&self) -> u64 {
        self.decoded
    }
}

/// Reads windows from stripped TIFF images
pub(crate) struct StripReader<'a> {
    /// Reader for accessing the TIFF file
    reader: &'a mut dyn SeekableReader,
    /// Strip geometry and decoding parameters
    layout: &'a BlockLayout,
    /// Strips kept between windows
    cache: &'a mut StripCache,
}

impl<'a> StripReader<'a> {
    pub fn new(reader: &'a mut dyn SeekableReader, layout: &'a BlockLayout, cache: &'a mut StripCache) -> Self {
        StripReader { reader, layout, cache }
    }

    /// Copies every strip that intersects `window` into `out`
    pub fn read_window(&mut self, window: &Window, out: &mut BandArray) -> TiffResult<()> {
        let rows_per_strip = self.layout.block_height;
        let first_strip = window.row_off / rows_per_strip;
        let last_strip = (window.end_row() - 1) / rows_per_strip;

        if self.cache.range == Some((first_strip, last_strip)) {
            trace!("Reusing strips {} to {} for window {}", first_strip, last_strip, window);
        } else {
            debug!("Reading strips {} to {} for window {}", first_strip, last_strip, window);
            self.fill_cache(first_strip, last_strip)?;
        }

        let strips_per_plane = (last_strip - first_strip + 1) as usize;
        for plane in 0..self.layout.planes() {
            for strip in first_strip..=last_strip {
                let strip_top = strip * rows_per_strip;
                let rows = self.strip_rows(strip);
                let data = &self.cache.strips[plane * strips_per_plane + (strip - first_strip) as usize];
                self.layout.copy_block(data, 0, strip_top, rows, plane, window, out);
            }
        }

        Ok(())
    }

    fn strip_rows(&self, strip: u32) -> u32 {
        let rows_per_strip = self.layout.block_height;
        min(rows_per_strip, self.layout.image_height - strip * rows_per_strip)
    }

    /// Replaces the cached strips with the decoded range `first..=last`
    fn fill_cache(&mut self, first_strip: u32, last_strip: u32) -> TiffResult<()> {
        self.cache.range = None;
        self.cache.strips.clear();

        for plane in 0..self.layout.planes() {
            for strip in first_strip..=last_strip {
                let index = self.layout.block_index(plane, strip, 0);
                let rows = self.strip_rows(strip) as usize;
                let data = self.layout.decode_block(self.reader, index, rows)?;
                self.cache.strips.push(data);
                self.cache.decoded += 1;
            }
        }

        self.cache.range = Some((first_strip, last_strip));
        Ok(())
    }
}
