//! I/O primitives shared by the TIFF decoder
//!
//! Byte-order strategies and the seekable reader abstraction used to read
//! headers, IFDs and pixel blocks from files or in-memory buffers.

pub mod seekable;
pub mod byte_order;
