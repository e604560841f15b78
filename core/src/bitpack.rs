//! 1 bit per pixel packing, most significant bit first.
//!
//! A set bit is a dark source pixel, a cleared bit a bright one.

use alloc::vec::Vec;

use crate::{Error, Result};

/// How rows are laid out in the packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One contiguous stream of `width * height` bits, zero padded only at
    /// the very end of the image. This is what playback code expects.
    #[default]
    Contiguous,
    /// Every row is zero padded to a byte boundary.
    RowAligned,
}

impl Layout {
    pub const fn packed_len(self, width: u32, height: u32) -> usize {
        match self {
            Layout::Contiguous => (width as usize * height as usize).div_ceil(8),
            Layout::RowAligned => (width as usize).div_ceil(8) * height as usize,
        }
    }

    const fn bit_index(self, width: u32, x: u32, y: u32) -> usize {
        let stride = match self {
            Layout::Contiguous => width as usize,
            Layout::RowAligned => (width as usize).div_ceil(8) * 8,
        };
        y as usize * stride + x as usize
    }
}

struct BitWriter {
    out: Vec<u8>,
    byte: u8,
    bits: u8,
}

impl BitWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            byte: 0,
            bits: 0,
        }
    }

    fn push(&mut self, bit: bool) {
        self.byte = (self.byte << 1) | bit as u8;
        self.bits += 1;
        if self.bits == 8 {
            self.out.push(self.byte);
            self.byte = 0;
            self.bits = 0;
        }
    }

    fn pad(&mut self) {
        if self.bits > 0 {
            self.out.push(self.byte << (8 - self.bits));
            self.byte = 0;
            self.bits = 0;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        self.pad();
        self.out
    }
}

/// Packs a `width` x `height` image, visiting pixels row by row.
/// `is_dark(x, y)` decides each bit.
pub fn pack<F>(width: u32, height: u32, layout: Layout, mut is_dark: F) -> Vec<u8>
where
    F: FnMut(u32, u32) -> bool,
{
    let mut writer = BitWriter::with_capacity(layout.packed_len(width, height));
    for y in 0..height {
        for x in 0..width {
            writer.push(is_dark(x, y));
        }
        if layout == Layout::RowAligned {
            writer.pad();
        }
    }
    writer.finish()
}

/// Read-only view of a packed image.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    layout: Layout,
}

impl<'a> Bitmap<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, layout: Layout) -> Result<Self> {
        let expected = layout.packed_len(width, height);
        if data.len() < expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: &data[..expected],
            width,
            height,
            layout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns `false` for coordinates outside the image.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = self.layout.bit_index(self.width, x, y);
        (self.data[index / 8] >> (7 - index % 8)) & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_all_bright_8x8() {
        assert_eq!(pack(8, 8, Layout::Contiguous, |_, _| false), vec![0u8; 8]);
    }

    #[test]
    fn test_msb_first() {
        // dark, bright, dark, bright...
        let packed = pack(8, 1, Layout::Contiguous, |x, _| x % 2 == 0);
        assert_eq!(packed, [0xAA]);
    }

    #[test]
    fn test_contiguous_across_rows() {
        // 3x3, only the last pixel of each row is dark:
        // 001 001 001 -> 00100100 1(0000000)
        let packed = pack(3, 3, Layout::Contiguous, |x, _| x == 2);
        assert_eq!(packed, [0b0010_0100, 0b1000_0000]);
    }

    #[test]
    fn test_row_aligned_pads_each_row() {
        let packed = pack(3, 3, Layout::RowAligned, |x, _| x == 2);
        assert_eq!(packed, [0b0010_0000; 3]);
    }

    #[test]
    fn test_packed_len() {
        for (w, h) in [(1, 1), (3, 3), (8, 8), (96, 48), (10, 7), (13, 1)] {
            let packed = pack(w, h, Layout::Contiguous, |x, y| (x ^ y) & 1 == 0);
            assert_eq!(packed.len(), (w as usize * h as usize).div_ceil(8));
            assert_eq!(packed.len(), Layout::Contiguous.packed_len(w, h));
            let packed = pack(w, h, Layout::RowAligned, |x, y| (x ^ y) & 1 == 0);
            assert_eq!(packed.len(), Layout::RowAligned.packed_len(w, h));
        }
    }

    #[test]
    fn test_layouts_agree_on_byte_wide_rows() {
        let dark = |x: u32, y: u32| (x * 7 + y * 3) % 5 == 0;
        assert_eq!(
            pack(16, 5, Layout::Contiguous, dark),
            pack(16, 5, Layout::RowAligned, dark)
        );
    }

    #[test]
    fn test_bitmap_reads_back() {
        let dark = |x: u32, y: u32| (x + 2 * y) % 3 == 0;
        for layout in [Layout::Contiguous, Layout::RowAligned] {
            let packed = pack(11, 5, layout, dark);
            let bitmap = Bitmap::new(&packed, 11, 5, layout).unwrap();
            for y in 0..5 {
                for x in 0..11 {
                    assert_eq!(bitmap.is_dark(x, y), dark(x, y), "{layout:?} ({x}, {y})");
                }
            }
            assert!(!bitmap.is_dark(11, 0));
        }
    }

    #[test]
    fn test_bitmap_short_buffer() {
        assert_eq!(
            Bitmap::new(&[0u8; 3], 8, 4, Layout::Contiguous).unwrap_err(),
            Error::BufferSize { expected: 4, actual: 3 }
        );
    }
}
