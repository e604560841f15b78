//! Playback side: decodes frames out of the tables the source emitter
//! generates and draws them with embedded-graphics.

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    image::ImageDrawable,
    pixelcolor::BinaryColor,
    primitives::{PointsIter, Rectangle},
};
use embedded_rle::{LENGTH_PREFIX_SIZE, RleError};

use crate::{Bitmap, Error, Layout, Result};

/// An animation compiled into the program as an offset table plus the flat
/// container bytes.
#[derive(Debug, Clone, Copy)]
pub struct Animation<'a> {
    width: u32,
    height: u32,
    fps: u32,
    layout: Layout,
    offsets: &'a [u32],
    data: &'a [u8],
}

impl<'a> Animation<'a> {
    pub const fn new(width: u32, height: u32, fps: u32, offsets: &'a [u32], data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            fps,
            layout: Layout::Contiguous,
            offsets,
            data,
        }
    }

    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frame_count(&self) -> usize {
        self.offsets.len()
    }

    /// Bytes needed to hold one decoded frame.
    pub fn packed_len(&self) -> usize {
        self.layout.packed_len(self.width, self.height)
    }

    pub fn frame_duration_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }

    /// The RLE payload of frame `index`, without its length prefix.
    pub fn frame_payload(&self, index: usize) -> Result<&'a [u8]> {
        let offset = *self.offsets.get(index).ok_or(Error::FrameOutOfRange(index))? as usize;
        let start = offset
            .checked_add(LENGTH_PREFIX_SIZE)
            .ok_or(RleError::Truncated)?;
        let prefix = self.data.get(offset..start).ok_or(RleError::Truncated)?;
        let len = u16::from_le_bytes([prefix[0], prefix[1]]) as usize;
        let end = start.checked_add(len).ok_or(RleError::Truncated)?;
        Ok(self.data.get(start..end).ok_or(RleError::Truncated)?)
    }

    /// Decodes frame `index` into `buffer`, which must hold at least
    /// [`Self::packed_len`] bytes.
    pub fn decode_frame<'b>(&self, index: usize, buffer: &'b mut [u8]) -> Result<Bitmap<'b>> {
        let expected = self.packed_len();
        if buffer.len() < expected {
            return Err(Error::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }
        let payload = self.frame_payload(index)?;
        let written = embedded_rle::decode_into(payload, &mut buffer[..expected])?;
        if written != expected {
            return Err(RleError::SizeMismatch {
                expected,
                actual: written,
            }
            .into());
        }
        Bitmap::new(&buffer[..expected], self.width, self.height, self.layout)
    }
}

impl Bitmap<'_> {
    /// Set bits (dark source pixels) map to `BinaryColor::On`.
    pub fn color_at(&self, x: u32, y: u32) -> BinaryColor {
        BinaryColor::from(self.is_dark(x, y))
    }
}

impl OriginDimensions for Bitmap<'_> {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl ImageDrawable for Bitmap<'_> {
    type Color = BinaryColor;

    fn draw<D>(&self, target: &mut D) -> core::result::Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        self.draw_sub_image(target, &self.bounding_box())
    }

    fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> core::result::Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let origin = area.top_left;
        let visible = area.intersection(&self.bounding_box());
        target.draw_iter(
            visible
                .points()
                .map(|p| Pixel(p - origin, self.color_at(p.x as u32, p.y as u32))),
        )
    }
}
