//! Helpers for decoding strip and tile blocks

use std::io::SeekFrom;
use log::trace;

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::TiffResult;
use crate::tiff::validation;

/// Reads the raw (still compressed) bytes of one block
///
/// # Arguments
/// * `reader` - Seekable reader for the TIFF file
/// * `offset` - File offset of the block
/// * `byte_count` - Size of the block in bytes
/// * `file_size` - Total file size, used to reject out-of-range blocks
pub fn read_block_bytes(
    reader: &mut dyn SeekableReader,
    offset: u64,
    byte_count: u64,
    file_size: u64
) -> TiffResult<Vec<u8>> {
    validation::validate_block_range(offset, byte_count, file_size)?;
    trace!("Reading {} block bytes at offset {}", byte_count, offset);

    reader.seek(SeekFrom::Start(offset))?;
    let mut data = vec![0u8; byte_count as usize];
    reader.read_exact(&mut data)?;

    Ok(data)
}

/// Undoes horizontal differencing (predictor 2) on 8-bit samples
///
/// Each sample was stored as the difference to the sample `stride` positions
/// earlier in the same row, so `stride` is the number of interleaved samples
/// per pixel.
///
/// # Arguments
/// * `data` - Decompressed block, modified in place
/// * `row_len` - Number of samples in one block row
/// * `stride` - Distance between samples of the same band
pub fn undo_horizontal_differencing(data: &mut [u8], row_len: usize, stride: usize) {
    if row_len == 0 || stride == 0 {
        return;
    }

    for row in data.chunks_mut(row_len) {
        for i in stride..row.len() {
            row[i] = row[i].wrapping_add(row[i - stride]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn predictor_respects_pixel_stride() {
        // Two RGB pixels per row: (10,20,30) then (11,22,33)
        let mut data = vec![10, 20, 30, 1, 2, 3, 5, 5, 5, 1, 1, 1];
        undo_horizontal_differencing(&mut data, 6, 3);
        assert_eq!(data, vec![10, 20, 30, 11, 22, 33, 5, 5, 5, 6, 6, 6]);
    }

    #[test]
    fn predictor_wraps_around() {
        let mut data = vec![250, 10];
        undo_horizontal_differencing(&mut data, 2, 1);
        assert_eq!(data, vec![250, 4]);
    }

    #[test]
    fn block_past_end_of_file_is_rejected() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        assert!(read_block_bytes(&mut cursor, 8, 8, 16).is_ok());
        assert!(read_block_bytes(&mut cursor, 12, 8, 16).is_err());
    }
}
