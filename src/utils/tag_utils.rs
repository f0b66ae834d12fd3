//! TIFF tag utilities
//!
//! Utilities for decoding tag values and naming tags for log output.

use std::io::Cursor;
use byteorder::ReadBytesExt;

use crate::io::seekable::SeekableReader;
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFDEntry;
use crate::tiff::constants::{field_types, tags, compression, photometric};

/// Size in bytes of one value of the given field type
pub fn field_type_size(field_type: u16) -> u64 {
    match field_type {
        field_types::BYTE | field_types::ASCII | field_types::SBYTE | field_types::UNDEFINED => 1,
        field_types::SHORT | field_types::SSHORT => 2,
        field_types::LONG | field_types::SLONG | field_types::FLOAT => 4,
        field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE |
        field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => 8,
        _ => 1, // Unknown types are treated as bytes
    }
}

/// Reads `entry.count` values of the entry's field type as u64
///
/// Rationals are packed as `numerator << 32 | denominator`.
///
/// # Arguments
/// * `reader` - Reader positioned at the first value
/// * `entry` - The IFD entry with tag information
/// * `handler` - The byte order handler
/// * `values` - The vector to store values in
pub fn read_tag_value_array(
    reader: &mut dyn SeekableReader,
    entry: &IFDEntry,
    handler: &dyn ByteOrderHandler,
    values: &mut Vec<u64>
) -> TiffResult<()> {
    for _ in 0..entry.count {
        let value = match entry.field_type {
            field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED => reader.read_u8()? as u64,
            field_types::SHORT | field_types::SSHORT => handler.read_u16(reader)? as u64,
            field_types::LONG | field_types::SLONG | field_types::FLOAT => handler.read_u32(reader)? as u64,
            field_types::RATIONAL | field_types::SRATIONAL => {
                let (num, den) = handler.read_rational(reader)?;
                ((num as u64) << 32) | (den as u64)
            },
            field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => handler.read_u64(reader)?,
            _ => return Err(TiffError::UnsupportedFieldType(entry.field_type)),
        };

        values.push(value);
    }

    Ok(())
}

/// Unpacks values stored inline in the entry's raw value field
pub fn read_inline_values(
    entry: &IFDEntry,
    handler: &dyn ByteOrderHandler,
    values: &mut Vec<u64>
) -> TiffResult<()> {
    let mut cursor = Cursor::new(&entry.raw_value[..]);
    read_tag_value_array(&mut cursor, entry, handler, values)
}

/// Decodes the first value of an inline field from its raw bytes
///
/// A SHORT stored inline occupies the first two bytes of the field, so
/// reading the whole field as one LONG only works for little-endian files.
pub fn decode_inline_first_value(
    field_type: u16,
    raw_value: &[u8; 8],
    handler: &dyn ByteOrderHandler
) -> TiffResult<u64> {
    let value = match field_type {
        field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED | field_types::ASCII => raw_value[0] as u64,
        field_types::SHORT | field_types::SSHORT => handler.u16_from_bytes(raw_value)? as u64,
        field_types::LONG | field_types::SLONG | field_types::FLOAT => handler.u32_from_bytes(raw_value)? as u64,
        _ => handler.u64_from_bytes(raw_value)?,
    };

    Ok(value)
}

/// Determines if a tag's value is stored inline or at an offset
///
/// # Arguments
/// * `entry` - The IFD entry to check
/// * `is_big_tiff` - Whether the file is BigTIFF format
pub fn is_value_inline(entry: &IFDEntry, is_big_tiff: bool) -> bool {
    let capacity = if is_big_tiff { 8 } else { 4 };

    field_type_size(entry.field_type).checked_mul(entry.count)
        .is_some_and(|total_size| total_size <= capacity)
}

/// Get the name of a TIFF tag
pub fn get_tag_name(tag: u16) -> &'static str {
    match tag {
        tags::NEW_SUBFILE_TYPE => "NewSubfileType",
        tags::IMAGE_WIDTH => "ImageWidth",
        tags::IMAGE_LENGTH => "ImageLength",
        tags::BITS_PER_SAMPLE => "BitsPerSample",
        tags::COMPRESSION => "Compression",
        tags::PHOTOMETRIC_INTERPRETATION => "PhotometricInterpretation",
        tags::STRIP_OFFSETS => "StripOffsets",
        tags::SAMPLES_PER_PIXEL => "SamplesPerPixel",
        tags::ROWS_PER_STRIP => "RowsPerStrip",
        tags::STRIP_BYTE_COUNTS => "StripByteCounts",
        tags::PLANAR_CONFIGURATION => "PlanarConfiguration",
        tags::PREDICTOR => "Predictor",
        tags::TILE_WIDTH => "TileWidth",
        tags::TILE_LENGTH => "TileLength",
        tags::TILE_OFFSETS => "TileOffsets",
        tags::TILE_BYTE_COUNTS => "TileByteCounts",
        tags::EXTRA_SAMPLES => "ExtraSamples",
        tags::SAMPLE_FORMAT => "SampleFormat",
        tags::MODEL_PIXEL_SCALE_TAG => "ModelPixelScale",
        tags::MODEL_TIEPOINT_TAG => "ModelTiepoint",
        tags::GEO_KEY_DIRECTORY_TAG => "GeoKeyDirectory",
        tags::GDAL_NODATA => "GDALNoData",
        _ => "Unknown",
    }
}

/// Get the name of a TIFF field type
pub fn get_field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::BYTE => "BYTE",
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::SBYTE => "SBYTE",
        field_types::UNDEFINED => "UNDEFINED",
        field_types::SSHORT => "SSHORT",
        field_types::SLONG => "SLONG",
        field_types::SRATIONAL => "SRATIONAL",
        field_types::FLOAT => "FLOAT",
        field_types::DOUBLE => "DOUBLE",
        field_types::LONG8 => "LONG8",
        field_types::SLONG8 => "SLONG8",
        field_types::IFD8 => "IFD8",
        _ => "Unknown",
    }
}

/// Get the name of a compression method
pub fn get_compression_name(compression_code: u64) -> &'static str {
    match compression_code as u16 {
        compression::NONE => "None",
        compression::LZW => "LZW",
        compression::JPEG => "JPEG",
        compression::DEFLATE | compression::DEFLATE_OLD => "Adobe Deflate",
        compression::ZSTD | compression::ZSTD_GDAL => "Zstandard",
        compression::PACKBITS => "PackBits",
        _ => "Unknown",
    }
}

/// Get the name of a photometric interpretation method
pub fn get_photometric_name(photometric_code: u64) -> &'static str {
    match photometric_code as u16 {
        photometric::WHITE_IS_ZERO => "WhiteIsZero",
        photometric::BLACK_IS_ZERO => "BlackIsZero",
        photometric::RGB => "RGB",
        photometric::PALETTE => "Palette",
        photometric::CMYK => "CMYK",
        photometric::YCBCR => "YCbCr",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::byte_order::{BigEndianHandler, LittleEndianHandler};

    #[test]
    fn inline_short_pair_unpacks_in_file_order() {
        let entry = IFDEntry::with_raw_value(tags::BITS_PER_SAMPLE, field_types::SHORT, 2, 0,
                                             [8, 0, 16, 0, 0, 0, 0, 0]);
        let mut values = Vec::new();
        read_inline_values(&entry, &LittleEndianHandler, &mut values).unwrap();
        assert_eq!(values, vec![8, 16]);
    }

    #[test]
    fn big_endian_inline_short_uses_leading_bytes() {
        let raw = [0x01, 0x40, 0, 0, 0, 0, 0, 0];
        let value = decode_inline_first_value(field_types::SHORT, &raw, &BigEndianHandler).unwrap();
        assert_eq!(value, 320);
    }

    #[test]
    fn inline_capacity_depends_on_format() {
        let entry = IFDEntry::new(tags::STRIP_OFFSETS, field_types::LONG, 2, 0);
        assert!(!is_value_inline(&entry, false));
        assert!(is_value_inline(&entry, true));
    }

    #[test]
    fn overflowing_count_is_not_inline() {
        let entry = IFDEntry::new(tags::STRIP_OFFSETS, field_types::LONG8, 1 << 62, 0);
        assert!(!is_value_inline(&entry, true));
        assert!(!is_value_inline(&entry, false));
    }
}
