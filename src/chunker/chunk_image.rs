//! Pixel-interleaved chunk ready for encoding

use crate::extractor::BandArray;

/// Pixels of one window as rows × cols × bands
///
/// At most three bands are kept: a four-band window is treated as RGBA and
/// loses its alpha band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkImage {
    width: u32,
    height: u32,
    bands: usize,
    data: Vec<u8>,
}

impl ChunkImage {
    /// Reorders a band-major window into interleaved pixels
    pub fn from_band_array(array: &BandArray) -> Self {
        let bands = if array.bands() == 4 { 3 } else { array.bands() };
        let pixels = array.rows() * array.cols();

        let mut data = Vec::with_capacity(pixels * bands);
        let planes: Vec<&[u8]> = (0..bands).map(|b| array.band(b)).collect();
        for pixel in 0..pixels {
            for plane in &planes {
                data.push(plane[pixel]);
            }
        }

        ChunkImage {
            width: array.cols() as u32,
            height: array.rows() as u32,
            bands,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Interleaved samples
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The uniform blank value, if every sample is 255 or every sample is 0
    pub fn blank_value(&self) -> Option<u8> {
        let first = *self.data.first()?;
        if (first == 0 || first == 255) && self.data.iter().all(|&v| v == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Whether the chunk is uniformly white or uniformly black
    pub fn is_blank(&self) -> bool {
        self.blank_value().is_some()
    }
}
