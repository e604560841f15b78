use alloc::vec::Vec;
use embedded_io::{Read, Write};

use crate::{Result, RleError};

/// Size of the little-endian length in front of every record.
pub const LENGTH_PREFIX_SIZE: usize = 2;
/// Largest payload a record can carry.
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

/// Size of the record holding `payload_len` bytes, prefix included.
pub const fn record_size(payload_len: usize) -> usize {
    LENGTH_PREFIX_SIZE + payload_len
}

fn length_prefix(payload: &[u8]) -> Result<[u8; LENGTH_PREFIX_SIZE]> {
    let len = u16::try_from(payload.len()).map_err(|_| RleError::FrameTooLarge(payload.len()))?;
    Ok(len.to_le_bytes())
}

/// Writes one `(length, payload)` record.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let prefix = length_prefix(payload)?;
    writer.write_all(&prefix).map_err(RleError::from_io_error)?;
    writer.write_all(payload).map_err(RleError::from_io_error)?;
    Ok(())
}

/// Writes all frames in order and returns the number of bytes written.
///
/// Every frame is checked against the prefix limit before anything is
/// written, so an oversized frame never leaves a partial container behind.
pub fn write_container<W, F>(writer: &mut W, frames: &[F]) -> Result<usize>
where
    W: Write,
    F: AsRef<[u8]>,
{
    if let Some(frame) = frames.iter().find(|f| f.as_ref().len() > MAX_PAYLOAD_SIZE) {
        return Err(RleError::FrameTooLarge(frame.as_ref().len()));
    }
    let mut total = 0;
    for frame in frames {
        write_frame(writer, frame.as_ref())?;
        total += record_size(frame.as_ref().len());
    }
    writer.flush().map_err(RleError::from_io_error)?;
    #[cfg(feature = "log")]
    log::debug!("Wrote {} frames, {} bytes", frames.len(), total);
    Ok(total)
}

/// Streams records out of a container.
pub struct FrameReader<R> {
    reader: R,
    frames_read: usize,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            frames_read: 0,
        }
    }

    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    /// Reads the next payload into `payload`, replacing its contents.
    /// Returns `false` once the container is exhausted at a record boundary.
    pub fn next_frame(&mut self, payload: &mut Vec<u8>) -> Result<bool> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        let first = self
            .reader
            .read(&mut prefix[..1])
            .map_err(RleError::from_io_error)?;
        if first == 0 {
            return Ok(false);
        }
        self.reader
            .read_exact(&mut prefix[1..])
            .map_err(RleError::from_read_exact_error)?;

        let len = u16::from_le_bytes(prefix) as usize;
        payload.clear();
        payload.resize(len, 0);
        self.reader
            .read_exact(payload)
            .map_err(RleError::from_read_exact_error)?;
        self.frames_read += 1;
        Ok(true)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
