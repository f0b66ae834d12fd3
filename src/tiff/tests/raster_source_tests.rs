//! Windowed reads through `TiffRasterSource` on in-memory files

use std::io::{Cursor, Write};
use byteorder::{BigEndian, LittleEndian};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::extractor::{RasterSource, TiffRasterSource, Window};
use crate::tiff::constants::tags;
use crate::tiff::errors::TiffError;
use super::test_utils::{block_offsets, build_tiff, long, short, TestEntry};

/// Gray 4x3 image, value = 10 * row + col
fn gray_pixels() -> Vec<u8> {
    (0..3u8).flat_map(|r| (0..4u8).map(move |c| 10 * r + c)).collect()
}

fn open(buffer: Vec<u8>) -> TiffRasterSource<Cursor<Vec<u8>>> {
    TiffRasterSource::from_reader(Cursor::new(buffer)).unwrap()
}

fn stripped_gray(rows_per_strip: u32, extra: Vec<TestEntry>) -> Vec<u8> {
    let pixels = gray_pixels();
    let sizes: Vec<u32> = (0..3u32).step_by(rows_per_strip as usize)
        .map(|top| (3 - top).min(rows_per_strip) * 4)
        .collect();

    let mut entries = vec![
        long(tags::IMAGE_WIDTH, &[4]),
        long(tags::IMAGE_LENGTH, &[3]),
        short(tags::BITS_PER_SAMPLE, &[8]),
        short(tags::COMPRESSION, &[1]),
        short(tags::PHOTOMETRIC_INTERPRETATION, &[1]),
        long(tags::STRIP_OFFSETS, &block_offsets(&sizes)),
        short(tags::SAMPLES_PER_PIXEL, &[1]),
        long(tags::ROWS_PER_STRIP, &[rows_per_strip]),
        long(tags::STRIP_BYTE_COUNTS, &sizes),
    ];
    entries.extend(extra);
    build_tiff::<LittleEndian>(&entries, &pixels)
}

#[test]
fn test_window_spanning_two_strips() {
    let mut source = open(stripped_gray(2, vec![]));
    assert_eq!((source.width(), source.height(), source.band_count()), (4, 3, 1));
    assert!(!source.is_tiled());

    let window = source.read_window(&Window::new(1, 1, 2, 2)).unwrap();
    assert_eq!(window.band(0), &[11, 12, 21, 22]);
}

#[test]
fn test_single_strip_without_rows_per_strip_tag() {
    let pixels = gray_pixels();
    let buffer = build_tiff::<LittleEndian>(&[
        long(tags::IMAGE_WIDTH, &[4]),
        long(tags::IMAGE_LENGTH, &[3]),
        short(tags::BITS_PER_SAMPLE, &[8]),
        long(tags::STRIP_OFFSETS, &[8]),
        long(tags::STRIP_BYTE_COUNTS, &[12]),
    ], &pixels);
    let mut source = open(buffer);

    assert_eq!(source.read_window(&Window::new(0, 0, 4, 3)).unwrap().band(0), &pixels[..]);
}

#[test]
fn test_big_endian_rgb_chunky() {
    // 2x2 RGB, pixel (r, c) = (r*2+c, 100 + r*2+c, 200 + r*2+c)
    let pixels: Vec<u8> = (0..4u8).flat_map(|p| [p, 100 + p, 200 + p]).collect();
    let buffer = build_tiff::<BigEndian>(&[
        short(tags::IMAGE_WIDTH, &[2]),
        short(tags::IMAGE_LENGTH, &[2]),
        short(tags::BITS_PER_SAMPLE, &[8, 8, 8]),
        short(tags::PHOTOMETRIC_INTERPRETATION, &[2]),
        long(tags::STRIP_OFFSETS, &[8]),
        short(tags::SAMPLES_PER_PIXEL, &[3]),
        short(tags::ROWS_PER_STRIP, &[2]),
        long(tags::STRIP_BYTE_COUNTS, &[12]),
        short(tags::SAMPLE_FORMAT, &[1, 1, 1]),
    ], &pixels);
    let mut source = open(buffer);

    let window = source.read_window(&Window::new(1, 0, 1, 2)).unwrap();
    assert_eq!(window.bands(), 3);
    assert_eq!(window.band(0), &[1, 3]);
    assert_eq!(window.band(1), &[101, 103]);
    assert_eq!(window.band(2), &[201, 203]);
}

#[test]
fn test_planar_strips() {
    // 2x2 image, three planes of four samples each, one strip per plane
    let pixels: Vec<u8> = vec![1, 2, 3, 4, 11, 12, 13, 14, 21, 22, 23, 24];
    let buffer = build_tiff::<LittleEndian>(&[
        long(tags::IMAGE_WIDTH, &[2]),
        long(tags::IMAGE_LENGTH, &[2]),
        short(tags::BITS_PER_SAMPLE, &[8, 8, 8]),
        long(tags::STRIP_OFFSETS, &block_offsets(&[4, 4, 4])),
        short(tags::SAMPLES_PER_PIXEL, &[3]),
        long(tags::ROWS_PER_STRIP, &[2]),
        long(tags::STRIP_BYTE_COUNTS, &[4, 4, 4]),
        short(tags::PLANAR_CONFIGURATION, &[2]),
    ], &pixels);
    let mut source = open(buffer);

    let window = source.read_window(&Window::new(0, 1, 2, 1)).unwrap();
    assert_eq!(window.band(0), &[3, 4]);
    assert_eq!(window.band(1), &[13, 14]);
    assert_eq!(window.band(2), &[23, 24]);
}

#[test]
fn test_padded_tiles() {
    // 5x3 gray image in 4x2 tiles: 2 tiles across, 2 down, each 8 bytes
    let value = |r: u32, c: u32| (10 * r + c) as u8;
    let mut data = Vec::new();
    for tile_y in 0..2u32 {
        for tile_x in 0..2u32 {
            for r in 0..2u32 {
                for c in 0..4u32 {
                    let (row, col) = (tile_y * 2 + r, tile_x * 4 + c);
                    data.push(if row < 3 && col < 5 { value(row, col) } else { 0xEE });
                }
            }
        }
    }
    let buffer = build_tiff::<LittleEndian>(&[
        long(tags::IMAGE_WIDTH, &[5]),
        long(tags::IMAGE_LENGTH, &[3]),
        short(tags::BITS_PER_SAMPLE, &[8]),
        short(tags::TILE_WIDTH, &[4]),
        short(tags::TILE_LENGTH, &[2]),
        long(tags::TILE_OFFSETS, &block_offsets(&[8, 8, 8, 8])),
        long(tags::TILE_BYTE_COUNTS, &[8, 8, 8, 8]),
    ], &data);
    let mut source = open(buffer);
    assert!(source.is_tiled());
    assert_eq!(source.block_size(), (4, 2));

    let window = source.read_window(&Window::new(3, 1, 2, 2)).unwrap();
    assert_eq!(window.band(0), &[13, 14, 23, 24]);
}

#[test]
fn test_deflate_with_horizontal_predictor() {
    // 3x1 RGB row (10,20,30) (12,23,34) (15,27,39) stored as differences
    let differenced = [10u8, 20, 30, 2, 3, 4, 3, 4, 5];
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&differenced).unwrap();
    let compressed = encoder.finish().unwrap();

    let buffer = build_tiff::<LittleEndian>(&[
        long(tags::IMAGE_WIDTH, &[3]),
        long(tags::IMAGE_LENGTH, &[1]),
        short(tags::BITS_PER_SAMPLE, &[8, 8, 8]),
        short(tags::COMPRESSION, &[8]),
        long(tags::STRIP_OFFSETS, &[8]),
        short(tags::SAMPLES_PER_PIXEL, &[3]),
        long(tags::ROWS_PER_STRIP, &[1]),
        long(tags::STRIP_BYTE_COUNTS, &[compressed.len() as u32]),
        short(tags::PREDICTOR, &[2]),
    ], &compressed);
    let mut source = open(buffer);

    let window = source.read_window(&Window::new(0, 0, 3, 1)).unwrap();
    assert_eq!(window.band(0), &[10, 12, 15]);
    assert_eq!(window.band(1), &[20, 23, 27]);
    assert_eq!(window.band(2), &[30, 34, 39]);
}

#[test]
fn test_packbits_strip() {
    // 4x1 gray row: three 9s then a 7
    let packed = [0xFE, 9, 0x00, 7];
    let buffer = build_tiff::<LittleEndian>(&[
        long(tags::IMAGE_WIDTH, &[4]),
        long(tags::IMAGE_LENGTH, &[1]),
        short(tags::BITS_PER_SAMPLE, &[8]),
        short(tags::COMPRESSION, &[32773]),
        long(tags::STRIP_OFFSETS, &[8]),
        long(tags::STRIP_BYTE_COUNTS, &[4]),
    ], &packed);
    let mut source = open(buffer);

    assert_eq!(source.read_window(&Window::new(0, 0, 4, 1)).unwrap().band(0), &[9, 9, 9, 7]);
}

#[test]
fn test_sixteen_bit_samples_are_rejected() {
    let buffer = build_tiff::<LittleEndian>(&[
        long(tags::IMAGE_WIDTH, &[2]),
        long(tags::IMAGE_LENGTH, &[1]),
        short(tags::BITS_PER_SAMPLE, &[16]),
        long(tags::STRIP_OFFSETS, &[8]),
        long(tags::STRIP_BYTE_COUNTS, &[4]),
    ], &[0; 4]);

    match TiffRasterSource::from_reader(Cursor::new(buffer)) {
        Err(TiffError::UnsupportedBitsPerSample(16)) => {},
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("16-bit source accepted"),
    }
}

#[test]
fn test_float_samples_are_rejected() {
    let buffer = stripped_gray(3, vec![short(tags::SAMPLE_FORMAT, &[3])]);
    assert!(matches!(TiffRasterSource::from_reader(Cursor::new(buffer)),
                     Err(TiffError::UnsupportedSampleFormat(3))));
}

#[test]
fn test_jpeg_compression_is_rejected() {
    let mut buffer = stripped_gray(3, vec![]);
    // Rewrite the inline Compression value (tag 259) from 1 to 7
    let ifd_offset = u32::from_le_bytes([buffer[4], buffer[5], buffer[6], buffer[7]]) as usize;
    let count = u16::from_le_bytes([buffer[ifd_offset], buffer[ifd_offset + 1]]) as usize;
    for i in 0..count {
        let entry = ifd_offset + 2 + i * 12;
        if u16::from_le_bytes([buffer[entry], buffer[entry + 1]]) == tags::COMPRESSION {
            buffer[entry + 8] = 7;
        }
    }

    assert!(matches!(TiffRasterSource::from_reader(Cursor::new(buffer)),
                     Err(TiffError::UnsupportedCompression(7))));
}

#[test]
fn test_window_outside_image_is_rejected() {
    let mut source = open(stripped_gray(1, vec![]));
    match source.read_window(&Window::new(3, 0, 2, 1)) {
        Err(TiffError::WindowOutOfBounds(3, 0, 2, 1)) => {},
        other => panic!("unexpected result: {:?}", other.map(|a| a.bands())),
    }
}

#[test]
fn test_short_strip_is_corrupt() {
    let pixels = gray_pixels();
    let buffer = build_tiff::<LittleEndian>(&[
        long(tags::IMAGE_WIDTH, &[4]),
        long(tags::IMAGE_LENGTH, &[3]),
        short(tags::BITS_PER_SAMPLE, &[8]),
        long(tags::STRIP_OFFSETS, &[8]),
        long(tags::ROWS_PER_STRIP, &[3]),
        long(tags::STRIP_BYTE_COUNTS, &[10]),
    ], &pixels);
    let mut source = open(buffer);

    assert!(matches!(source.read_window(&Window::new(0, 0, 1, 1)), Err(TiffError::CorruptData(_))));
}

#[test]
fn test_empty_window_reads_nothing() {
    let mut source = open(stripped_gray(2, vec![]));
    let window = source.read_window(&Window::new(4, 3, 0, 0)).unwrap();
    assert!(window.as_slice().is_empty());
}

#[test]
fn test_side_by_side_windows_decode_each_strip_once() {
    let mut source = open(stripped_gray(1, vec![]));

    let left = source.read_window(&Window::new(0, 0, 2, 3)).unwrap();
    let right = source.read_window(&Window::new(2, 0, 2, 3)).unwrap();
    assert_eq!(left.band(0), &[0, 1, 10, 11, 20, 21]);
    assert_eq!(right.band(0), &[2, 3, 12, 13, 22, 23]);
    assert_eq!(source.strips_decoded(), 3);

    let top = source.read_window(&Window::new(1, 0, 3, 1)).unwrap();
    assert_eq!(top.band(0), &[1, 2, 3]);
    assert_eq!(source.strips_decoded(), 4);
}
