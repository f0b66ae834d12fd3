//! Rectangular pixel window
//!
//! Coordinates follow the image convention: (0,0) is the top-left pixel,
//! columns grow to the right and rows grow downwards.

use std::fmt;

/// Window of an image in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Column of the left edge
    pub col_off: u32,

    /// Row of the top edge
    pub row_off: u32,

    /// Width of the window in pixels
    pub width: u32,

    /// Height of the window in pixels
    pub height: u32,
}

impl Window {
    /// Create a new window
    ///
    /// # Arguments
    /// * `col_off` - Column of the left edge
    /// * `row_off` - Row of the top edge
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    pub fn new(col_off: u32, row_off: u32, width: u32, height: u32) -> Self {
        Window { col_off, row_off, width, height }
    }

    /// Column immediately right of the window (exclusive)
    pub fn end_col(&self) -> u32 {
        self.col_off.saturating_add(self.width)
    }

    /// Row immediately below the window (exclusive)
    pub fn end_row(&self) -> u32 {
        self.row_off.saturating_add(self.height)
    }

    /// Whether the window covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the window lies inside an image of the given size
    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        u64::from(self.col_off) + u64::from(self.width) <= u64::from(image_width)
            && u64::from(self.row_off) + u64::from(self.height) <= u64::from(image_height)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at (col {}, row {})", self.width, self.height, self.col_off, self.row_off)
    }
}
