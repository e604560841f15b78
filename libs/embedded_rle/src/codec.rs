use alloc::vec::Vec;

use crate::{Result, RleError};

#[cfg(test)]
extern crate std;

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
        #[cfg(test)]
        std::eprintln!($($arg)*);
    };
}

/// Longest run a single count byte can describe.
pub const MAX_RUN: usize = u8::MAX as usize;

/// A single `(count, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub count: u8,
    pub value: u8,
}

impl Run {
    pub fn to_bytes(self) -> [u8; 2] {
        [self.count, self.value]
    }
}

/// Iterator over the greedy maximal runs of a byte buffer.
pub struct Runs<'a> {
    data: &'a [u8],
    pos: usize,
}

/// Splits `data` into runs, capping every run at 255 bytes.
pub fn runs(data: &[u8]) -> Runs<'_> {
    Runs { data, pos: 0 }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let value = *self.data.get(self.pos)?;
        let rest = &self.data[self.pos..];
        let limit = rest.len().min(MAX_RUN);
        let count = rest[..limit]
            .iter()
            .position(|&b| b != value)
            .unwrap_or(limit);
        self.pos += count;
        Some(Run {
            count: count as u8,
            value,
        })
    }
}

/// Compresses `data` into `(count, value)` byte pairs.
/// Empty input yields empty output.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(data, &mut out);
    trace!("rle: {} bytes -> {} bytes", data.len(), out.len());
    out
}

/// Appends the compressed form of `data` to `out`.
pub fn encode_into(data: &[u8], out: &mut Vec<u8>) {
    for run in runs(data) {
        out.extend_from_slice(&run.to_bytes());
    }
}

fn pairs(payload: &[u8]) -> Result<core::slice::ChunksExact<'_, u8>> {
    if payload.len() % 2 != 0 {
        return Err(RleError::InvalidRun);
    }
    Ok(payload.chunks_exact(2))
}

/// Number of bytes `payload` expands to.
pub fn decoded_len(payload: &[u8]) -> Result<usize> {
    pairs(payload)?.try_fold(0usize, |total, pair| match pair[0] {
        0 => Err(RleError::InvalidRun),
        count => Ok(total + count as usize),
    })
}

/// Expands `payload` into a new buffer.
pub fn decode(payload: &[u8]) -> Result<Vec<u8>> {
    let mut out = alloc::vec![0u8; decoded_len(payload)?];
    decode_into(payload, &mut out)?;
    Ok(out)
}

/// Expands `payload` into `out` and returns the number of bytes written.
/// Fails with `SizeMismatch` if `out` is too small to hold the expansion.
pub fn decode_into(payload: &[u8], out: &mut [u8]) -> Result<usize> {
    let mut pos = 0;
    for pair in pairs(payload)? {
        let (count, value) = (pair[0] as usize, pair[1]);
        if count == 0 {
            return Err(RleError::InvalidRun);
        }
        let Some(dst) = out.get_mut(pos..pos + count) else {
            return Err(RleError::SizeMismatch {
                expected: out.len(),
                actual: decoded_len(payload)?,
            });
        };
        dst.fill(value);
        pos += count;
    }
    Ok(pos)
}
