//! Error types for chunking runs

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::extractor::Window;
use crate::tiff::errors::TiffError;

/// Errors that abort a chunking run
#[derive(Debug)]
pub enum ChunkError {
    /// The source raster could not be opened or its structure decoded
    SourceOpen(PathBuf, TiffError),
    /// Creating an output directory or writing a file failed
    Io(PathBuf, io::Error),
    /// Reading the pixels of a window failed
    WindowRead(Window, TiffError),
    /// Encoding a chunk as JPEG failed
    Encode(PathBuf, image::ImageError),
    /// JPEG output needs 1 or 3 bands
    UnsupportedBandCount(usize),
    /// Chunk width or height is zero
    InvalidChunkSize(u32, u32),
    /// Invalid or unreadable configuration
    Config(String),
    /// Searching the input directory failed
    Discovery(String),
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::SourceOpen(path, e) => write!(f, "Cannot open raster {}: {}", path.display(), e),
            ChunkError::Io(path, e) => write!(f, "I/O error on {}: {}", path.display(), e),
            ChunkError::WindowRead(window, e) => write!(f, "Failed to read window {}: {}", window, e),
            ChunkError::Encode(path, e) => write!(f, "Failed to encode {}: {}", path.display(), e),
            ChunkError::UnsupportedBandCount(n) => {
                write!(f, "Cannot write {} band(s) as JPEG (expected 1 or 3)", n)
            },
            ChunkError::InvalidChunkSize(w, h) => {
                write!(f, "Invalid chunk size {}x{}: width and height must be positive", w, h)
            },
            ChunkError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ChunkError::Discovery(msg) => write!(f, "Input discovery failed: {}", msg),
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::SourceOpen(_, e) | ChunkError::WindowRead(_, e) => Some(e),
            ChunkError::Io(_, e) => Some(e),
            ChunkError::Encode(_, e) => Some(e),
            _ => None,
        }
    }
}

impl From<glob::PatternError> for ChunkError {
    fn from(error: glob::PatternError) -> Self {
        ChunkError::Discovery(error.to_string())
    }
}

impl From<glob::GlobError> for ChunkError {
    fn from(error: glob::GlobError) -> Self {
        ChunkError::Discovery(error.to_string())
    }
}

impl From<toml::de::Error> for ChunkError {
    fn from(error: toml::de::Error) -> Self {
        ChunkError::Config(error.to_string())
    }
}

/// Result type for chunking operations
pub type ChunkResult<T> = Result<T, ChunkError>;
