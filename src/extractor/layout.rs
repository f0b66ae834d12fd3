//! Block layout of a TIFF image
//!
//! Strips are treated as blocks spanning the full image width. Everything
//! the strip and tile readers need to locate, decode and place a block is
//! resolved once here when the source is opened.

use std::cmp::{max, min};
use log::{debug, info};

use crate::compression::{CompressionFactory, CompressionHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{planar_config, predictor, sample_format, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::validation;
use crate::tiff::TiffReader;
use crate::utils::block_utils;

use super::band_array::BandArray;
use super::window::Window;

/// Geometry and decoding parameters for the blocks of one image
pub(crate) struct BlockLayout {
    pub image_width: u32,
    pub image_height: u32,
    pub block_width: u32,
    pub block_height: u32,
    pub samples_per_pixel: usize,
    pub tiled: bool,
    planar: bool,
    predictor: u16,
    offsets: Vec<u64>,
    byte_counts: Vec<u64>,
    file_size: u64,
    compression: Box<dyn CompressionHandler>,
}

impl BlockLayout {
    /// Resolves the block layout of `ifd`
    ///
    /// Fails for anything other than 8-bit unsigned samples, for unknown
    /// planar configurations and for unsupported compression or predictor.
    pub fn from_ifd(reader: &mut dyn SeekableReader, tiff_reader: &TiffReader, ifd: &IFD) -> TiffResult<Self> {
        let (width, height) = ifd.get_dimensions().ok_or(TiffError::MissingDimensions)?;
        let image_width = u32::try_from(width)
            .map_err(|_| TiffError::CorruptData(format!("Image width {} out of range", width)))?;
        let image_height = u32::try_from(height)
            .map_err(|_| TiffError::CorruptData(format!("Image height {} out of range", height)))?;
        let samples_per_pixel = ifd.get_samples_per_pixel() as usize;
        if samples_per_pixel == 0 {
            return Err(TiffError::CorruptData("SamplesPerPixel is zero".to_string()));
        }

        let bits = if ifd.has_tag(tags::BITS_PER_SAMPLE) {
            tiff_reader.read_tag_values(reader, ifd, tags::BITS_PER_SAMPLE)?
        } else {
            vec![1]
        };
        if let Some(&unsupported) = bits.iter().find(|&&b| b != 8) {
            return Err(TiffError::UnsupportedBitsPerSample(unsupported));
        }
        if bits.len() != samples_per_pixel {
            return Err(TiffError::CorruptData(format!(
                "SamplesPerPixel is {} but BitsPerSample has {} value(s)", samples_per_pixel, bits.len())));
        }

        if ifd.has_tag(tags::SAMPLE_FORMAT) {
            let formats = tiff_reader.read_tag_values(reader, ifd, tags::SAMPLE_FORMAT)?;
            if let Some(&unsupported) = formats.iter().find(|&&f| f != sample_format::UNSIGNED as u64) {
                return Err(TiffError::UnsupportedSampleFormat(unsupported));
            }
        }

        let planar_code = ifd.get_tag_value(tags::PLANAR_CONFIGURATION)
            .unwrap_or(planar_config::CHUNKY as u64);
        let planar = match planar_code as u16 {
            planar_config::CHUNKY => false,
            planar_config::PLANAR => samples_per_pixel > 1,
            _ => return Err(TiffError::UnsupportedPlanarConfiguration(planar_code)),
        };

        let compression_code = ifd.get_tag_value(tags::COMPRESSION).unwrap_or(1);
        let compression = CompressionFactory::create_handler(compression_code)?;

        let predictor = ifd.get_tag_value(tags::PREDICTOR).unwrap_or(predictor::NONE as u64) as u16;
        if predictor != predictor::NONE && predictor != predictor::HORIZONTAL_DIFFERENCING {
            return Err(TiffError::GenericError(format!("Unsupported predictor: {}", predictor)));
        }

        let tiled = ifd.is_tiled();
        let (block_width, block_height, offsets_tag, counts_tag) = if tiled {
            let tile_width = ifd.get_tag_value(tags::TILE_WIDTH).unwrap_or(0) as u32;
            let tile_height = ifd.get_tag_value(tags::TILE_LENGTH).unwrap_or(0) as u32;
            (tile_width, tile_height, tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS)
        } else {
            let rows_per_strip = ifd.get_tag_value(tags::ROWS_PER_STRIP)
                .unwrap_or(image_height as u64)
                .min(image_height as u64) as u32;
            (image_width, max(rows_per_strip, 1), tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS)
        };
        if block_width == 0 || block_height == 0 {
            return Err(TiffError::CorruptData(format!("Invalid block size {}x{}", block_width, block_height)));
        }

        let offsets = tiff_reader.read_tag_values(reader, ifd, offsets_tag)?;
        let byte_counts = tiff_reader.read_tag_values(reader, ifd, counts_tag)?;
        let file_size = validation::get_file_size(reader)?;

        let layout = BlockLayout {
            image_width,
            image_height,
            block_width,
            block_height,
            samples_per_pixel,
            tiled,
            planar,
            predictor,
            offsets,
            byte_counts,
            file_size,
            compression,
        };

        let expected_blocks = layout.planes() * layout.blocks_per_plane();
        if layout.offsets.len() < expected_blocks || layout.byte_counts.len() < expected_blocks {
            return Err(TiffError::CorruptData(format!(
                "Expected {} blocks, found {} offsets and {} byte counts",
                expected_blocks, layout.offsets.len(), layout.byte_counts.len())));
        }

        info!("Image {}x{}, {} band(s), {} {}x{}, {}, compression: {}",
              image_width, image_height, samples_per_pixel,
              if tiled { "tiles" } else { "strips" }, block_width, block_height,
              if planar { "planar" } else { "chunky" }, layout.compression.name());
        debug!("{} blocks per plane, predictor {}", layout.blocks_per_plane(), predictor);

        Ok(layout)
    }

    /// Number of separately stored sample planes
    pub fn planes(&self) -> usize {
        if self.planar { self.samples_per_pixel } else { 1 }
    }

    /// Samples stored per pixel inside one block
    fn samples_per_block_pixel(&self) -> usize {
        if self.planar { 1 } else { self.samples_per_pixel }
    }

    pub fn blocks_across(&self) -> u32 {
        self.image_width.div_ceil(self.block_width)
    }

    pub fn blocks_down(&self) -> u32 {
        self.image_height.div_ceil(self.block_height)
    }

    pub fn blocks_per_plane(&self) -> usize {
        self.blocks_across() as usize * self.blocks_down() as usize
    }

    /// Index into the offset arrays; planar data stores all blocks of plane 0 first
    pub fn block_index(&self, plane: usize, block_row: u32, block_col: u32) -> usize {
        plane * self.blocks_per_plane()
            + block_row as usize * self.blocks_across() as usize
            + block_col as usize
    }

    /// Reads, decompresses and un-predicts one block
    ///
    /// # Arguments
    /// * `reader` - Seekable reader for the TIFF file
    /// * `index` - Block index into the offset arrays
    /// * `rows` - Number of rows the block holds
    ///
    /// # Returns
    /// The block's samples, exactly `rows * block_width * samples` bytes
    pub fn decode_block(&self, reader: &mut dyn SeekableReader, index: usize, rows: usize) -> TiffResult<Vec<u8>> {
        let offset = self.offsets[index];
        let byte_count = self.byte_counts[index];
        let compressed = block_utils::read_block_bytes(reader, offset, byte_count, self.file_size)?;
        let mut data = self.compression.decompress(&compressed)?;

        let row_len = self.block_width as usize * self.samples_per_block_pixel();
        let expected = rows * row_len;
        if data.len() < expected {
            return Err(TiffError::CorruptData(format!(
                "Block {} decoded to {} bytes, expected {}", index, data.len(), expected)));
        }
        data.truncate(expected);

        if self.predictor == predictor::HORIZONTAL_DIFFERENCING {
            block_utils::undo_horizontal_differencing(&mut data, row_len, self.samples_per_block_pixel());
        }

        Ok(data)
    }

    /// Copies the part of a decoded block that overlaps `window` into `out`
    ///
    /// # Arguments
    /// * `block` - Decoded block samples
    /// * `block_col` - Image column of the block's left edge
    /// * `block_row` - Image row of the block's top edge
    /// * `rows` - Number of rows in the block
    /// * `plane` - Band stored in the block (planar data only)
    /// * `window` - Window being read
    /// * `out` - Destination array shaped like the window
    pub fn copy_block(
        &self,
        block: &[u8],
        block_col: u32,
        block_row: u32,
        rows: u32,
        plane: usize,
        window: &Window,
        out: &mut BandArray
    ) {
        let x0 = max(block_col, window.col_off);
        let x1 = min(block_col.saturating_add(self.block_width), window.end_col());
        let y0 = max(block_row, window.row_off);
        let y1 = min(block_row.saturating_add(rows), window.end_row());
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let spb = self.samples_per_block_pixel();
        let row_len = self.block_width as usize * spb;
        let src_x0 = (x0 - block_col) as usize;
        let src_x1 = (x1 - block_col) as usize;
        let dst_x0 = (x0 - window.col_off) as usize;
        let dst_x1 = (x1 - window.col_off) as usize;

        for y in y0..y1 {
            let src_row = (y - block_row) as usize * row_len;
            let dst_row = (y - window.row_off) as usize;

            if self.planar {
                out.row_mut(plane, dst_row)[dst_x0..dst_x1]
                    .copy_from_slice(&block[src_row + src_x0..src_row + src_x1]);
            } else {
                for (dst_x, src_x) in (dst_x0..dst_x1).zip(src_x0..src_x1) {
                    let pixel = src_row + src_x * spb;
                    for band in 0..spb {
                        out.set(band, dst_row, dst_x, block[pixel + band]);
                    }
                }
            }
        }
    }
}
