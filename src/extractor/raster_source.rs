//! Raster source trait

use crate::tiff::errors::TiffResult;
use super::band_array::BandArray;
use super::window::Window;

/// An opened raster image that can be read window by window
///
/// Implementations include:
/// - `TiffRasterSource` for stripped and tiled TIFF/BigTIFF files
/// - in-memory rasters in tests
pub trait RasterSource {
    /// Image width in pixels
    fn width(&self) -> u32;

    /// Image height in pixels
    fn height(&self) -> u32;

    /// Number of bands (samples per pixel)
    fn band_count(&self) -> usize;

    /// Read the pixels of `window` as bands × rows × cols
    ///
    /// # Arguments
    /// * `window` - Region to read, which must lie inside the image
    ///
    /// # Returns
    /// The window's samples, or an error if the window is out of bounds or
    /// the underlying data cannot be decoded
    fn read_window(&mut self, window: &Window) -> TiffResult<BandArray>;
}
