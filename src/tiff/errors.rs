//! Custom error types for TIFF decoding

use std::fmt;
use std::io;

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTIFFHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Tag not found
    TagNotFound(u16),
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Unsupported compression method
    UnsupportedCompression(u64),
    /// Image dimensions not found
    MissingDimensions,
    /// Only 8-bit samples can be chunked into JPEG tiles
    UnsupportedBitsPerSample(u64),
    /// Signed, floating point or complex samples
    UnsupportedSampleFormat(u64),
    /// Planar configuration other than chunky (1) or planar (2)
    UnsupportedPlanarConfiguration(u64),
    /// Requested window (col_off, row_off, width, height) does not fit the image
    WindowOutOfBounds(u32, u32, u32, u32),
    /// Pixel block data is shorter than its layout requires
    CorruptData(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            TiffError::InvalidBigTIFFHeader => write!(f, "Invalid BigTIFF header"),
            TiffError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            TiffError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            TiffError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            TiffError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            TiffError::MissingDimensions => write!(f, "Image dimensions not found"),
            TiffError::UnsupportedBitsPerSample(b) => {
                write!(f, "Unsupported bits per sample: {} (only 8-bit samples are supported)", b)
            },
            TiffError::UnsupportedSampleFormat(s) => {
                write!(f, "Unsupported sample format: {} (only unsigned integers are supported)", s)
            },
            TiffError::UnsupportedPlanarConfiguration(p) => write!(f, "Unsupported planar configuration: {}", p),
            TiffError::WindowOutOfBounds(x, y, w, h) => {
                write!(f, "Window at ({}, {}) with size {}x{} exceeds image bounds", x, y, w, h)
            },
            TiffError::CorruptData(msg) => write!(f, "Corrupt image data: {}", msg),
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiffError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;

impl From<String> for TiffError {
    fn from(msg: String) -> Self {
        TiffError::GenericError(msg)
    }
}
