//! Chunk encoding

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use log::debug;

use crate::errors::{ChunkError, ChunkResult};
use super::chunk_image::ChunkImage;

/// JPEG quality used for every chunk
pub const JPEG_QUALITY: u8 = 100;

/// Strategy for persisting a chunk
pub trait ChunkWriter {
    /// Writes `chunk` to `path`
    fn write_chunk(&mut self, chunk: &ChunkImage, path: &Path) -> ChunkResult<()>;
}

/// Writes chunks as baseline JPEG files
///
/// One band is written as grayscale, three bands as RGB.
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegChunkWriter;

impl JpegChunkWriter {
    pub fn new() -> Self {
        JpegChunkWriter
    }
}

impl ChunkWriter for JpegChunkWriter {
    fn write_chunk(&mut self, chunk: &ChunkImage, path: &Path) -> ChunkResult<()> {
        let color_type = match chunk.bands() {
            1 => ExtendedColorType::L8,
            3 => ExtendedColorType::Rgb8,
            n => return Err(ChunkError::UnsupportedBandCount(n)),
        };

        let file = File::create(path).map_err(|e| ChunkError::Io(path.to_path_buf(), e))?;
        let mut out = BufWriter::new(file);

        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder.encode(chunk.as_bytes(), chunk.width(), chunk.height(), color_type)
            .map_err(|e| ChunkError::Encode(path.to_path_buf(), e))?;
        drop(encoder);
        out.flush().map_err(|e| ChunkError::Io(path.to_path_buf(), e))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::BandArray;

    #[test]
    fn writes_decodable_rgb_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.jpg");
        let data: Vec<u8> = (0..3 * 16 * 8).map(|v| (v % 200) as u8).collect();
        let chunk = ChunkImage::from_band_array(&BandArray::from_vec(3, 8, 16, data).unwrap());

        JpegChunkWriter::new().write_chunk(&chunk, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn grayscale_chunk_is_l8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.jpg");
        let chunk = ChunkImage::from_band_array(&BandArray::from_vec(1, 4, 4, vec![90; 16]).unwrap());

        JpegChunkWriter::new().write_chunk(&chunk, &path).unwrap();
        assert_eq!(image::open(&path).unwrap().color(), image::ColorType::L8);
    }

    #[test]
    fn two_band_chunk_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.jpg");
        let chunk = ChunkImage::from_band_array(&BandArray::from_vec(2, 1, 1, vec![1, 2]).unwrap());

        assert!(matches!(JpegChunkWriter::new().write_chunk(&chunk, &path),
                         Err(ChunkError::UnsupportedBandCount(2))));
        assert!(!path.exists());
    }
}
