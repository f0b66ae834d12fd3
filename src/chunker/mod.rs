//! Splitting a raster into fixed-size JPEG chunks
//!
//! The grid covers only whole chunks; pixels past the last full chunk in
//! either direction are not written. Chunks whose samples are all 0 or all
//! 255 are skipped.

mod grid;
mod chunk_image;
mod naming;
mod writer;
mod splitter;

pub use grid::{ChunkGrid, GridCell};
pub use chunk_image::ChunkImage;
pub use naming::chunk_file_name;
pub use writer::{ChunkWriter, JpegChunkWriter, JPEG_QUALITY};
pub use splitter::{Chunker, SplitSummary};
