//! Synthetic GeoTIFF files for integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

const SHORT: u16 = 3;
const LONG: u16 = 4;
const DOUBLE: u16 = 12;
const LONG8: u16 = 16;

/// How pixel blocks are laid out
#[derive(Debug, Clone, Copy)]
pub enum Layout {
    /// Strips of the given number of rows
    Strips(u32),
    /// Tiles of the given width and height
    Tiles(u32, u32),
}

/// Little-endian 8-bit chunky GeoTIFF built in memory
pub struct SyntheticTiff {
    width: u32,
    height: u32,
    bands: usize,
    pixels: Vec<u8>,
    layout: Layout,
    deflate: bool,
    big_tiff: bool,
}

struct Entry {
    tag: u16,
    field_type: u16,
    values: Vec<u64>,
}

impl SyntheticTiff {
    /// Image whose sample (row, col, band) is `fill(row, col, band)`
    pub fn new(width: u32, height: u32, bands: usize, fill: impl Fn(u32, u32, usize) -> u8) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * bands);
        for row in 0..height {
            for col in 0..width {
                for band in 0..bands {
                    pixels.push(fill(row, col, band));
                }
            }
        }

        SyntheticTiff {
            width,
            height,
            bands,
            pixels,
            layout: Layout::Strips(height.max(1)),
            deflate: false,
            big_tiff: false,
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn deflate(mut self) -> Self {
        self.deflate = true;
        self
    }

    pub fn big_tiff(mut self) -> Self {
        self.big_tiff = true;
        self
    }

    fn sample(&self, row: u32, col: u32, band: usize) -> u8 {
        let index = (row as usize * self.width as usize + col as usize) * self.bands + band;
        self.pixels[index]
    }

    fn blocks(&self) -> Vec<Vec<u8>> {
        let mut blocks = Vec::new();
        match self.layout {
            Layout::Strips(rows_per_strip) => {
                let mut top = 0;
                while top < self.height {
                    let bottom = (top + rows_per_strip).min(self.height);
                    let start = top as usize * self.width as usize * self.bands;
                    let end = bottom as usize * self.width as usize * self.bands;
                    blocks.push(self.pixels[start..end].to_vec());
                    top = bottom;
                }
            },
            Layout::Tiles(tile_width, tile_height) => {
                for tile_y in 0..self.height.div_ceil(tile_height) {
                    for tile_x in 0..self.width.div_ceil(tile_width) {
                        let mut block = Vec::new();
                        for r in 0..tile_height {
                            for c in 0..tile_width {
                                let (row, col) = (tile_y * tile_height + r, tile_x * tile_width + c);
                                for band in 0..self.bands {
                                    block.push(if row < self.height && col < self.width {
                                        self.sample(row, col, band)
                                    } else {
                                        0
                                    });
                                }
                            }
                        }
                        blocks.push(block);
                    }
                }
            },
        }

        if self.deflate {
            blocks.into_iter().map(|raw| {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(&raw).unwrap();
                encoder.finish().unwrap()
            }).collect()
        } else {
            blocks
        }
    }

    /// Serializes the image as a TIFF (or BigTIFF) file
    pub fn encode(&self) -> Vec<u8> {
        let header_len = if self.big_tiff { 16 } else { 8 };
        let blocks = self.blocks();

        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"II");
        if self.big_tiff {
            buffer.write_u16::<LittleEndian>(43).unwrap();
            buffer.write_u16::<LittleEndian>(8).unwrap();
            buffer.write_u16::<LittleEndian>(0).unwrap();
            buffer.write_u64::<LittleEndian>(0).unwrap();
        } else {
            buffer.write_u16::<LittleEndian>(42).unwrap();
            buffer.write_u32::<LittleEndian>(0).unwrap();
        }
        assert_eq!(buffer.len(), header_len);

        let mut offsets = Vec::new();
        let mut byte_counts = Vec::new();
        for block in &blocks {
            offsets.push(buffer.len() as u64);
            byte_counts.push(block.len() as u64);
            buffer.extend_from_slice(block);
        }

        let offset_type = if self.big_tiff { LONG8 } else { LONG };
        let bands = self.bands as u64;
        let mut entries = vec![
            Entry { tag: 256, field_type: LONG, values: vec![self.width as u64] },
            Entry { tag: 257, field_type: LONG, values: vec![self.height as u64] },
            Entry { tag: 258, field_type: SHORT, values: vec![8; self.bands] },
            Entry { tag: 259, field_type: SHORT, values: vec![if self.deflate { 8 } else { 1 }] },
            Entry { tag: 262, field_type: SHORT, values: vec![if self.bands >= 3 { 2 } else { 1 }] },
            Entry { tag: 277, field_type: SHORT, values: vec![bands] },
            Entry { tag: 284, field_type: SHORT, values: vec![1] },
            Entry { tag: 339, field_type: SHORT, values: vec![1; self.bands] },
            Entry { tag: 33550, field_type: DOUBLE, values: vec![0.5f64.to_bits(), 0.5f64.to_bits(), 0] },
            Entry { tag: 33922, field_type: DOUBLE,
                    values: vec![0, 0, 0, 500000f64.to_bits(), 4200000f64.to_bits(), 0] },
        ];
        match self.layout {
            Layout::Strips(rows_per_strip) => {
                entries.push(Entry { tag: 273, field_type: offset_type, values: offsets });
                entries.push(Entry { tag: 278, field_type: LONG, values: vec![rows_per_strip as u64] });
                entries.push(Entry { tag: 279, field_type: offset_type, values: byte_counts });
            },
            Layout::Tiles(tile_width, tile_height) => {
                entries.push(Entry { tag: 322, field_type: SHORT, values: vec![tile_width as u64] });
                entries.push(Entry { tag: 323, field_type: SHORT, values: vec![tile_height as u64] });
                entries.push(Entry { tag: 324, field_type: offset_type, values: offsets });
                entries.push(Entry { tag: 325, field_type: offset_type, values: byte_counts });
            },
        }
        if self.bands == 4 {
            entries.push(Entry { tag: 338, field_type: SHORT, values: vec![2] });
        }
        entries.sort_by_key(|e| e.tag);

        let field_size = if self.big_tiff { 8 } else { 4 };
        let mut fields = Vec::new();
        for entry in &entries {
            let value_size = match entry.field_type {
                SHORT => 2,
                LONG => 4,
                _ => 8,
            };
            let mut field = Vec::new();
            if value_size * entry.values.len() <= field_size {
                for &value in &entry.values {
                    write_value(&mut field, value_size, value);
                }
                field.resize(field_size, 0);
            } else {
                if buffer.len() % 2 == 1 {
                    buffer.push(0);
                }
                let offset = buffer.len() as u64;
                for &value in &entry.values {
                    write_value(&mut buffer, value_size, value);
                }
                write_value(&mut field, field_size, offset);
            }
            fields.push(field);
        }

        if buffer.len() % 2 == 1 {
            buffer.push(0);
        }
        let ifd_offset = buffer.len() as u64;
        if self.big_tiff {
            buffer[8..16].copy_from_slice(&ifd_offset.to_le_bytes());
            buffer.write_u64::<LittleEndian>(entries.len() as u64).unwrap();
        } else {
            buffer[4..8].copy_from_slice(&(ifd_offset as u32).to_le_bytes());
            buffer.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
        }

        for (entry, field) in entries.iter().zip(&fields) {
            buffer.write_u16::<LittleEndian>(entry.tag).unwrap();
            buffer.write_u16::<LittleEndian>(entry.field_type).unwrap();
            if self.big_tiff {
                buffer.write_u64::<LittleEndian>(entry.values.len() as u64).unwrap();
            } else {
                buffer.write_u32::<LittleEndian>(entry.values.len() as u32).unwrap();
            }
            buffer.extend_from_slice(field);
        }
        write_value(&mut buffer, field_size, 0);

        buffer
    }

    /// Writes the encoded file to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, self.encode()).unwrap();
    }
}

fn write_value(out: &mut Vec<u8>, size: usize, value: u64) {
    match size {
        2 => out.write_u16::<LittleEndian>(value as u16).unwrap(),
        4 => out.write_u32::<LittleEndian>(value as u32).unwrap(),
        _ => out.write_u64::<LittleEndian>(value).unwrap(),
    }
}

/// Non-uniform test pattern that is never all 0 or all 255 over a chunk
pub fn pattern(row: u32, col: u32, band: usize) -> u8 {
    (((row * 7 + col * 3) as usize + band * 40) % 200) as u8 + 20
}

/// Sorted file names in a directory
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir).unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
