//! Seekable reader trait
//!
//! Raster sources are read by jumping between IFDs, tag arrays and pixel
//! blocks, so every reader in the decoder must support both reading and
//! seeking.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
///
/// Implemented for files wrapped in a `BufReader` as well as `Cursor`s over
/// byte buffers, which is what the decoder tests use.
pub trait SeekableReader: Read + Seek + Send + Sync {}

impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
