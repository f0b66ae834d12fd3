pub mod io;
pub mod tiff;
pub mod utils;
pub mod compression;
pub mod extractor;
pub mod chunker;
pub mod walker;
pub mod config;
pub mod errors;
pub mod commands;

pub use tiff::TiffReader;
pub use extractor::{BandArray, RasterSource, TiffRasterSource, Window};
pub use chunker::{Chunker, ChunkGrid, ChunkImage, ChunkWriter, JpegChunkWriter, SplitSummary};
pub use walker::{discover_rasters, DirectoryWalker, WalkOutcome, WalkSummary};
pub use config::ChunkConfig;
pub use errors::{ChunkError, ChunkResult};
