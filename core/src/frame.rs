use alloc::vec::Vec;
use embedded_io::Write;
use embedded_rle::{MAX_PAYLOAD_SIZE, RleError, record_size};
use log::{debug, warn};

use crate::{Error, PackConfig, Result, bitpack};

/// One packed and compressed animation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    packed: Vec<u8>,
    compressed: Vec<u8>,
}

impl Frame {
    /// Compresses an already packed buffer.
    pub fn from_packed(packed: Vec<u8>) -> Result<Self> {
        let compressed = embedded_rle::encode(&packed);
        if compressed.len() > MAX_PAYLOAD_SIZE {
            return Err(RleError::FrameTooLarge(compressed.len()).into());
        }
        Ok(Self { packed, compressed })
    }

    pub fn packed(&self) -> &[u8] {
        &self.packed
    }

    pub fn compressed(&self) -> &[u8] {
        &self.compressed
    }

    /// Bytes this frame occupies in the container, length prefix included.
    pub fn record_size(&self) -> usize {
        record_size(self.compressed.len())
    }
}

/// Frames in playback order, all sharing the dimensions of the config.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    config: PackConfig,
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn new(config: PackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            frames: Vec::new(),
        })
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Packs and compresses a `width` x `height` image and appends it.
    pub fn push_image<F>(&mut self, width: u32, height: u32, is_dark: F) -> Result<&Frame>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let expected = (self.config.width, self.config.height);
        if (width, height) != expected {
            return Err(Error::DimensionMismatch {
                index: self.frames.len(),
                expected,
                actual: (width, height),
            });
        }
        let packed = bitpack::pack(width, height, self.config.layout, is_dark);
        self.push_packed(packed)
    }

    /// Appends a buffer produced by [`bitpack::pack`] with this config.
    pub fn push_packed(&mut self, packed: Vec<u8>) -> Result<&Frame> {
        let expected = self.config.packed_len();
        if packed.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: packed.len(),
            });
        }
        let index = self.frames.len();
        let frame = Frame::from_packed(packed)?;
        debug!(
            "Frame {}: {} packed -> {} RLE bytes",
            index,
            frame.packed.len(),
            frame.compressed.len()
        );
        if frame.compressed.len() > frame.packed.len() {
            warn!(
                "Frame {} grew under RLE ({} -> {} bytes)",
                index,
                frame.packed.len(),
                frame.compressed.len()
            );
        }
        self.frames.push(frame);
        Ok(&self.frames[index])
    }

    /// Start of every frame record in the container, `offsets[0] == 0`.
    pub fn offsets(&self) -> Vec<usize> {
        self.frames
            .iter()
            .scan(0usize, |offset, frame| {
                let start = *offset;
                *offset += frame.record_size();
                Some(start)
            })
            .collect()
    }

    /// Size of the whole container in bytes.
    pub fn total_bytes(&self) -> usize {
        self.frames.iter().map(Frame::record_size).sum()
    }

    pub fn write_container<W: Write>(&self, writer: &mut W) -> Result<usize> {
        if self.frames.is_empty() {
            return Err(Error::EmptySequence);
        }
        let payloads: Vec<&[u8]> = self.frames.iter().map(Frame::compressed).collect();
        Ok(embedded_rle::write_container(writer, &payloads)?)
    }

    /// Renders the container in memory.
    pub fn to_container(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.total_bytes());
        self.write_container(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Layout;
    use alloc::vec;

    fn sequence(width: u32, height: u32) -> FrameSequence {
        FrameSequence::new(PackConfig::new(width, height, 12)).unwrap()
    }

    #[test]
    fn test_all_bright_frame_record() {
        let mut seq = sequence(8, 8);
        let frame = seq.push_image(8, 8, |_, _| false).unwrap();
        assert_eq!(frame.packed(), &[0u8; 8]);
        assert_eq!(frame.compressed(), &[0x08, 0x00]);
        assert_eq!(seq.to_container().unwrap(), [0x02, 0x00, 0x08, 0x00]);
    }

    #[test]
    fn test_dimension_mismatch_names_frame() {
        let mut seq = sequence(8, 8);
        seq.push_image(8, 8, |_, _| true).unwrap();
        assert_eq!(
            seq.push_image(8, 4, |_, _| true).unwrap_err(),
            Error::DimensionMismatch { index: 1, expected: (8, 8), actual: (8, 4) }
        );
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_push_packed_checks_length() {
        let mut seq = sequence(10, 3);
        assert_eq!(
            seq.push_packed(vec![0; 5]).unwrap_err(),
            Error::BufferSize { expected: 4, actual: 5 }
        );
        assert!(seq.push_packed(vec![0; 4]).is_ok());
    }

    #[test]
    fn test_offsets() {
        let mut seq = sequence(16, 16);
        seq.push_image(16, 16, |_, _| false).unwrap();
        seq.push_image(16, 16, |x, y| (x + y) % 2 == 0).unwrap();
        seq.push_image(16, 16, |x, _| x < 4).unwrap();

        let offsets = seq.offsets();
        assert_eq!(offsets[0], 0);
        for (i, frame) in seq.frames().iter().enumerate().skip(1) {
            let prev = &seq.frames()[i - 1];
            assert_eq!(offsets[i] - offsets[i - 1], 2 + prev.compressed().len());
            assert!(frame.record_size() >= 2);
        }
        let last = seq.frames().last().unwrap();
        assert_eq!(seq.total_bytes(), offsets[2] + last.record_size());
        assert_eq!(seq.to_container().unwrap().len(), seq.total_bytes());
    }

    #[test]
    fn test_container_records_match_frames() {
        let mut seq = FrameSequence::new(
            PackConfig::new(12, 5, 24).with_layout(Layout::RowAligned),
        )
        .unwrap();
        seq.push_image(12, 5, |x, y| x == y).unwrap();
        seq.push_image(12, 5, |x, _| x > 6).unwrap();

        let container = seq.to_container().unwrap();
        for (frame, offset) in seq.frames().iter().zip(seq.offsets()) {
            let len = u16::from_le_bytes([container[offset], container[offset + 1]]) as usize;
            let payload = &container[offset + 2..offset + 2 + len];
            assert_eq!(payload, frame.compressed());
            assert_eq!(embedded_rle::decode(payload).unwrap(), frame.packed());
        }
    }

    #[test]
    fn test_empty_sequence_has_no_container() {
        assert_eq!(sequence(8, 8).to_container().unwrap_err(), Error::EmptySequence);
    }

    #[test]
    fn test_incompressible_frame_too_large() {
        // Alternating bytes double in size under RLE
        let packed: Vec<u8> = (0..40_000u32).map(|i| (i % 2) as u8).collect();
        assert_eq!(
            Frame::from_packed(packed).unwrap_err(),
            Error::Rle(RleError::FrameTooLarge(80_000))
        );
    }
}
