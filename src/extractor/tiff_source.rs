//! TIFF-backed raster source

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use log::{debug, info, trace};

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::TiffReader;

use super::band_array::BandArray;
use super::layout::BlockLayout;
use super::raster_source::RasterSource;
use super::strip_reader::{StripCache, StripReader};
use super::tile_reader::TileReader;
use super::window::Window;

/// Raster source reading the full-resolution image of a TIFF or BigTIFF
///
/// Only the first IFD is used; overviews are ignored. The reader is owned,
/// so the file handle is released when the source is dropped.
pub struct TiffRasterSource<R: SeekableReader = BufReader<File>> {
    reader: R,
    layout: BlockLayout,
    strip_cache: StripCache,
}

impl TiffRasterSource<BufReader<File>> {
    /// Opens the TIFF file at `path`
    pub fn open(path: &Path) -> TiffResult<Self> {
        info!("Opening raster: {}", path.display());

        let file = File::open(path)?;
        Self::from_reader(BufReader::with_capacity(1024 * 1024, file))
    }
}

impl<R: SeekableReader> TiffRasterSource<R> {
    /// Parses the TIFF structure from any seekable reader
    pub fn from_reader(mut reader: R) -> TiffResult<Self> {
        let mut tiff_reader = TiffReader::new();
        let tiff = tiff_reader.read(&mut reader)?;

        let ifd = tiff.main_ifd()
            .ok_or_else(|| TiffError::GenericError("No IFDs found in TIFF file".to_string()))?;
        debug!("{} IFD(s), {} overview(s)", tiff.ifd_count(), tiff.overviews().len());
        trace!("{}", ifd);

        if ifd.has_georeferencing() {
            debug!("GeoTIFF georeferencing present; chunks are written without it");
        }

        let layout = BlockLayout::from_ifd(&mut reader, &tiff_reader, ifd)?;
        Ok(TiffRasterSource { reader, layout, strip_cache: StripCache::default() })
    }

    /// Whether the image is stored in tiles rather than strips
    pub fn is_tiled(&self) -> bool {
        self.layout.tiled
    }

    /// Block size in pixels (tile size, or image width × rows per strip)
    pub fn block_size(&self) -> (u32, u32) {
        (self.layout.block_width, self.layout.block_height)
    }

    /// Number of strips decoded so far
    pub(crate) fn strips_decoded(&self) -> u64 {
        self.strip_cache.decoded()
    }
}

impl<R: SeekableReader> RasterSource for TiffRasterSource<R> {
    fn width(&self) -> u32 {
        self.layout.image_width
    }

    fn height(&self) -> u32 {
        self.layout.image_height
    }

    fn band_count(&self) -> usize {
        self.layout.samples_per_pixel
    }

    fn read_window(&mut self, window: &Window) -> TiffResult<BandArray> {
        if !window.fits_within(self.layout.image_width, self.layout.image_height) {
            return Err(TiffError::WindowOutOfBounds(window.col_off, window.row_off, window.width, window.height));
        }

        let mut out = BandArray::new(self.layout.samples_per_pixel, window.height as usize, window.width as usize);
        if window.is_empty() {
            return Ok(out);
        }

        if self.layout.tiled {
            TileReader::new(&mut self.reader, &self.layout).read_window(window, &mut out)?;
        } else {
            StripReader::new(&mut self.reader, &self.layout, &mut self.strip_cache).read_window(window, &mut out)?;
        }

        Ok(out)
    }
}
