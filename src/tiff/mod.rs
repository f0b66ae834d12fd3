//! TIFF file format parsing module
//!
//! Structures and functions for reading the header and IFD chain of TIFF
//! and BigTIFF files.

pub mod errors;
pub mod ifd;
pub mod types;
pub mod reader;
pub mod constants;
pub(crate) mod validation;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{TiffError, TiffResult};
pub use ifd::{IFD, IFDEntry};
pub use reader::TiffReader;
pub use types::TIFF;
