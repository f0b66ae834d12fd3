//! Handler for TIFF LZW compressed data
//!
//! TIFF LZW packs codes most significant bit first, starts at 9 bits and
//! widens one code early, when the next free code reaches `2^width - 1`.

use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

const CLEAR_CODE: u16 = 256;
const EOI_CODE: u16 = 257;
const FIRST_FREE_CODE: u16 = 258;
const MIN_CODE_WIDTH: u32 = 9;
const MAX_CODE_WIDTH: u32 = 12;
const TABLE_SIZE: usize = 1 << MAX_CODE_WIDTH;

/// LZW compression handler (compression code 5)
pub struct LzwHandler;

impl CompressionHandler for LzwHandler {
    fn decompress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        let mut table = CodeTable::new();
        let mut bits = BitReader::new(data);
        let mut output = Vec::with_capacity(data.len() * 2);

        let mut width = MIN_CODE_WIDTH;
        let mut previous: Option<u16> = None;

        while let Some(code) = bits.read(width) {
            if code == CLEAR_CODE {
                table.reset();
                width = MIN_CODE_WIDTH;
                previous = None;
                continue;
            }
            if code == EOI_CODE {
                break;
            }

            match previous {
                None => {
                    if code >= CLEAR_CODE {
                        return Err(TiffError::CorruptData(format!("LZW stream starts with code {}", code)));
                    }
                    table.emit(code, &mut output);
                },
                Some(prev) => {
                    if code < table.next_code {
                        table.emit(code, &mut output);
                        table.add(prev, table.first[code as usize]);
                    } else if code == table.next_code {
                        // The code being defined refers to itself
                        table.add(prev, table.first[prev as usize]);
                        table.emit(code, &mut output);
                    } else {
                        return Err(TiffError::CorruptData(format!(
                            "LZW code {} ahead of table size {}", code, table.next_code)));
                    }

                    if u32::from(table.next_code) >= (1 << width) - 1 && width < MAX_CODE_WIDTH {
                        width += 1;
                    }
                }
            }

            previous = Some(code);
        }

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn code(&self) -> u64 {
        5
    }
}

/// String table stored as prefix chains
struct CodeTable {
    prefix: Vec<u16>,
    suffix: Vec<u8>,
    first: Vec<u8>,
    length: Vec<u16>,
    next_code: u16,
}

impl CodeTable {
    fn new() -> Self {
        let mut table = CodeTable {
            prefix: vec![0; TABLE_SIZE],
            suffix: vec![0; TABLE_SIZE],
            first: vec![0; TABLE_SIZE],
            length: vec![0; TABLE_SIZE],
            next_code: FIRST_FREE_CODE,
        };
        for byte in 0..256usize {
            table.suffix[byte] = byte as u8;
            table.first[byte] = byte as u8;
            table.length[byte] = 1;
        }
        table
    }

    fn reset(&mut self) {
        self.next_code = FIRST_FREE_CODE;
    }

    fn add(&mut self, prefix: u16, byte: u8) {
        let index = self.next_code as usize;
        if index >= TABLE_SIZE {
            return;
        }
        self.prefix[index] = prefix;
        self.suffix[index] = byte;
        self.first[index] = self.first[prefix as usize];
        self.length[index] = self.length[prefix as usize] + 1;
        self.next_code += 1;
    }

    /// Appends the string for `code`, walking the prefix chain backwards
    fn emit(&self, code: u16, output: &mut Vec<u8>) {
        let len = self.length[code as usize] as usize;
        let start = output.len();
        output.resize(start + len, 0);

        let mut current = code as usize;
        for position in (start..start + len).rev() {
            output[position] = self.suffix[current];
            current = self.prefix[current] as usize;
        }
    }
}

/// MSB-first bit reader over a byte slice
struct BitReader<'a> {
    data: &'a [u8],
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        BitReader { data, bit_position: 0 }
    }

    fn read(&mut self, width: u32) -> Option<u16> {
        let width = width as usize;
        if self.bit_position + width > self.data.len() * 8 {
            return None;
        }

        let mut value: u32 = 0;
        for _ in 0..width {
            let byte = self.data[self.bit_position / 8];
            let bit = (byte >> (7 - (self.bit_position % 8))) & 1;
            value = (value << 1) | u32::from(bit);
            self.bit_position += 1;
        }
        Some(value as u16)
    }
}
