//! Factory for creating compression handlers

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::AdobeDeflateHandler;
use super::lzw::LzwHandler;
use super::packbits::PackBitsHandler;
use super::zstd::ZstdHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given TIFF compression code
    pub fn create_handler(code: u64) -> TiffResult<Box<dyn CompressionHandler>> {
        let code16 = u16::try_from(code).map_err(|_| TiffError::UnsupportedCompression(code))?;

        match code16 {
            compression::NONE => Ok(Box::new(UncompressedHandler)),
            compression::LZW => Ok(Box::new(LzwHandler)),
            compression::DEFLATE | compression::DEFLATE_OLD => Ok(Box::new(AdobeDeflateHandler)),
            compression::PACKBITS => Ok(Box::new(PackBitsHandler)),
            compression::ZSTD | compression::ZSTD_GDAL => Ok(Box::new(ZstdHandler::new())),
            _ => Err(TiffError::UnsupportedCompression(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        for code in [1u64, 5, 8, 14, 32773, 32946, 50000] {
            assert!(CompressionFactory::create_handler(code).is_ok(), "code {}", code);
        }
    }

    #[test]
    fn jpeg_in_tiff_is_rejected() {
        match CompressionFactory::create_handler(7) {
            Err(TiffError::UnsupportedCompression(7)) => {},
            other => panic!("unexpected result: {:?}", other.map(|h| h.name())),
        }
    }
}
