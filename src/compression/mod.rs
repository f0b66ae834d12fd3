//! Decompression strategies for TIFF pixel blocks
//!
//! Each TIFF compression code maps to a `CompressionHandler` that turns the
//! bytes of one strip or tile back into raw samples.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod zstd;
mod lzw;
mod packbits;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::AdobeDeflateHandler;
pub use factory::CompressionFactory;
pub use zstd::ZstdHandler;
pub use lzw::LzwHandler;
pub use packbits::PackBitsHandler;
