//! Windowed pixel reads from raster sources
//!
//! A `RasterSource` hands out rectangular windows of an image as band-major
//! `BandArray`s. `TiffRasterSource` implements it on top of the TIFF reader,
//! decoding only the strips or tiles a window touches.

mod window;
mod band_array;
mod raster_source;
mod layout;
mod strip_reader;
mod tile_reader;
mod tiff_source;

pub use window::Window;
pub use band_array::BandArray;
pub use raster_source::RasterSource;
pub use tiff_source::TiffRasterSource;
