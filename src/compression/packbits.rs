//! Handler for PackBits run-length encoded data

use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// PackBits compression handler (compression code 32773)
pub struct PackBitsHandler;

impl CompressionHandler for PackBitsHandler {
    fn decompress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() * 2);
        let mut pos = 0;

        while pos < data.len() {
            let header = data[pos] as i8;
            pos += 1;

            match header {
                0..=127 => {
                    let count = header as usize + 1;
                    let literal = data.get(pos..pos + count)
                        .ok_or_else(|| TiffError::CorruptData("PackBits literal run past end of data".to_string()))?;
                    output.extend_from_slice(literal);
                    pos += count;
                },
                -127..=-1 => {
                    let count = (1 - header as isize) as usize;
                    let value = *data.get(pos)
                        .ok_or_else(|| TiffError::CorruptData("PackBits repeat run past end of data".to_string()))?;
                    output.resize(output.len() + count, value);
                    pos += 1;
                },
                // -128 is a no-op
                _ => {}
            }
        }

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "PackBits"
    }

    fn code(&self) -> u64 {
        32773
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_apple_sample() {
        let packed = [0xFE, 0xAA, 0x02, 0x80, 0x00, 0x2A, 0xFD, 0xAA, 0x03, 0x80, 0x00, 0x2A, 0x22,
                      0xF7, 0xAA];
        let expected = [0xAA, 0xAA, 0xAA, 0x80, 0x00, 0x2A, 0xAA, 0xAA, 0xAA, 0xAA, 0x80, 0x00, 0x2A,
                        0x22, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA];
        assert_eq!(PackBitsHandler.decompress(&packed).unwrap(), expected.to_vec());
    }

    #[test]
    fn noop_header_is_skipped() {
        assert_eq!(PackBitsHandler.decompress(&[0x80, 0x00, 0x07]).unwrap(), vec![0x07]);
    }

    #[test]
    fn truncated_literal_is_corrupt() {
        assert!(PackBitsHandler.decompress(&[0x05, 0x01]).is_err());
    }
}
