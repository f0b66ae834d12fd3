//! Band-major pixel array returned by windowed reads

/// Pixel samples of a window laid out as bands × rows × cols
///
/// Sample `(band, row, col)` lives at `(band * rows + row) * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandArray {
    bands: usize,
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl BandArray {
    /// Zero-filled array of the given shape
    pub fn new(bands: usize, rows: usize, cols: usize) -> Self {
        BandArray {
            bands,
            rows,
            cols,
            data: vec![0; bands * rows * cols],
        }
    }

    /// Wraps existing band-major samples
    ///
    /// Returns `None` if the buffer length does not match the shape.
    pub fn from_vec(bands: usize, rows: usize, cols: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != bands * rows * cols {
            return None;
        }
        Some(BandArray { bands, rows, cols, data })
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, band: usize, row: usize, col: usize) -> usize {
        (band * self.rows + row) * self.cols + col
    }

    /// Sample at (band, row, col)
    pub fn get(&self, band: usize, row: usize, col: usize) -> u8 {
        self.data[self.index(band, row, col)]
    }

    /// Sets the sample at (band, row, col)
    pub fn set(&mut self, band: usize, row: usize, col: usize, value: u8) {
        let index = self.index(band, row, col);
        self.data[index] = value;
    }

    /// All samples of one band, row-major
    pub fn band(&self, band: usize) -> &[u8] {
        let plane = self.rows * self.cols;
        &self.data[band * plane..(band + 1) * plane]
    }

    /// Mutable view of one row of one band
    pub fn row_mut(&mut self, band: usize, row: usize) -> &mut [u8] {
        let start = self.index(band, row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    /// Raw band-major samples
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
