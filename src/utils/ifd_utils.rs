//! IFD utilities
//!
//! Offset bookkeeping for walking the IFD chain.

use crate::io::seekable::SeekableReader;
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::errors::TiffResult;
use crate::tiff::ifd::IFD;

/// Reads an IFD offset (the header's first offset or an IFD's next pointer)
///
/// Offsets are 4 bytes in standard TIFF and 8 bytes in BigTIFF. An offset
/// of 0 terminates the chain.
pub fn read_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &dyn ByteOrderHandler
) -> TiffResult<u64> {
    let offset = if is_big_tiff {
        byte_order_handler.read_u64(reader)?
    } else {
        byte_order_handler.read_u32(reader)? as u64
    };

    Ok(offset)
}

/// Calculates the size of an IFD in bytes
///
/// Used to find the next-IFD pointer that follows the entry table.
pub fn calculate_ifd_size(ifd: &IFD, is_big_tiff: bool) -> u64 {
    if is_big_tiff {
        // 8 (entry count) + 20 (each entry) + 8 (next IFD offset)
        8 + (20 * ifd.entries.len() as u64) + 8
    } else {
        // 2 (entry count) + 12 (each entry) + 4 (next IFD offset)
        2 + (12 * ifd.entries.len() as u64) + 4
    }
}

/// Position of the next-IFD pointer of an IFD starting at `ifd_offset`
pub fn next_offset_position(ifd: &IFD, ifd_offset: u64, is_big_tiff: bool) -> u64 {
    let pointer_size = if is_big_tiff { 8 } else { 4 };
    ifd_offset + calculate_ifd_size(ifd, is_big_tiff) - pointer_size
}
