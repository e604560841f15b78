use std::{io, path::PathBuf};

use embedded_rle::RleError;

/// Everything that aborts a pack or unpack run. Each variant names the
/// stage and, where there is one, the frame that failed.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("configuration: {0}")]
    Config(framepack_core::Error),

    #[error("input: cannot list {}: {source}", .dir.display())]
    ListFrames {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input: no *.{extension} frames in {}", .dir.display())]
    NoFrames { dir: PathBuf, extension: String },

    #[error("input: frame {index} ({}) failed to load: {source}", .path.display())]
    Decode {
        index: usize,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "input: frame {index} ({}) is {}x{}, expected {}x{}",
        .path.display(), .actual.0, .actual.1, .expected.0, .expected.1
    )]
    Dimensions {
        index: usize,
        path: PathBuf,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error(
        "capacity: frame {index} ({}) compresses to {size} bytes, a record holds at most {}",
        .path.display(), u16::MAX
    )]
    Capacity {
        index: usize,
        path: PathBuf,
        size: usize,
    },

    #[error("frame {index} ({}): {source}", .path.display())]
    Frame {
        index: usize,
        path: PathBuf,
        #[source]
        source: framepack_core::Error,
    },

    #[error("container: {} frame {index}: {source}", .path.display())]
    Container {
        index: usize,
        path: PathBuf,
        #[source]
        source: RleError,
    },

    #[error("output: {0}")]
    Emit(framepack_core::Error),

    #[error("i/o: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output: cannot save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, PackError>;
