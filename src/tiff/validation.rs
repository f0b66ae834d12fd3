//! TIFF validation utilities
//!
//! Sanity checks that keep a malformed file from sending the reader to
//! arbitrary offsets.

use log::{debug, error, warn};
use std::io::SeekFrom;

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::constants::header;

/// Validates an IFD offset against the file size
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> TiffResult<()> {
    if offset >= file_size || offset < 8 {
        return Err(TiffError::GenericError(format!(
            "Invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Gets the stream size, restoring the current position
///
/// Returns `u64::MAX` if the end cannot be determined.
pub fn get_file_size(reader: &mut dyn SeekableReader) -> TiffResult<u64> {
    let current_position = reader.stream_position()?;
    let file_size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => size,
        Err(e) => {
            warn!("Could not determine file size: {}", e);
            u64::MAX
        }
    };
    reader.seek(SeekFrom::Start(current_position))?;

    Ok(file_size)
}

/// Validates the BigTIFF header
///
/// After the version number (43) BigTIFF stores the offset size, which must
/// be 8, followed by a reserved zero.
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler
) -> TiffResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let zeros = byte_order_handler.read_u16(reader)?;

    debug!("BigTIFF offset size: {}, reserved: {}", offset_size, zeros);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || zeros != 0 {
        error!("Invalid BigTIFF header: offset_size={}, zeros={}", offset_size, zeros);
        return Err(TiffError::InvalidBigTIFFHeader);
    }

    Ok(())
}

/// Checks that a byte range (pixel block or tag array) lies inside the file
pub fn validate_block_range(offset: u64, byte_count: u64, file_size: u64) -> TiffResult<()> {
    let end = offset.checked_add(byte_count)
        .ok_or_else(|| TiffError::CorruptData(format!("Block range overflows at offset {}", offset)))?;

    if end > file_size {
        return Err(TiffError::CorruptData(format!(
            "Block at offset {} with {} bytes extends past end of file ({} bytes)",
            offset, byte_count, file_size
        )));
    }

    Ok(())
}

/// Checks that an IFD's entry table lies inside the file
///
/// The table is the entry count field followed by `entry_count` entries of
/// 12 (TIFF) or 20 (BigTIFF) bytes.
pub fn validate_entry_table(offset: u64, entry_count: u64, is_big_tiff: bool, file_size: u64) -> TiffResult<()> {
    let (count_size, entry_size) = if is_big_tiff { (8, 20) } else { (2, 12) };
    let table_size = entry_count.checked_mul(entry_size)
        .and_then(|size| size.checked_add(count_size))
        .ok_or_else(|| TiffError::CorruptData(format!("IFD entry count {} overflows", entry_count)))?;

    validate_block_range(offset, table_size, file_size)
}
