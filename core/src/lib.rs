#![no_std]

pub mod bitpack;
pub mod config;
pub mod emit;
pub mod frame;
pub mod player;

extern crate alloc;

pub use bitpack::{Bitmap, Layout};
pub use config::PackConfig;
pub use emit::{SourceEmitter, SourceLanguage};
pub use frame::{Frame, FrameSequence};
pub use player::Animation;

use embedded_rle::RleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Rle(RleError),
    InvalidConfig(&'static str),
    DimensionMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },
    BufferSize {
        expected: usize,
        actual: usize,
    },
    FrameOutOfRange(usize),
    EmptySequence,
}

pub type Result<T> = core::result::Result<T, Error>;

impl From<RleError> for Error {
    fn from(err: RleError) -> Self {
        Error::Rle(err)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Rle(err) => write!(f, "{err}"),
            Error::InvalidConfig(what) => write!(f, "invalid configuration: {what}"),
            Error::DimensionMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "frame {index} is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Error::BufferSize { expected, actual } => {
                write!(f, "buffer holds {actual} bytes, expected {expected}")
            }
            Error::FrameOutOfRange(index) => write!(f, "frame {index} out of range"),
            Error::EmptySequence => f.write_str("frame sequence is empty"),
        }
    }
}

impl core::error::Error for Error {}
