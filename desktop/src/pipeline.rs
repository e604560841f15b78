use std::path::{Path, PathBuf};

use embedded_rle::{FrameReader, RleError};
use framepack_core::{Bitmap, Error, FrameSequence, PackConfig, SourceEmitter};
use image::{GrayImage, Luma};
use log::{debug, info};

use crate::{
    error::{PackError, Result},
    std_fs::{self, StdFileReader},
};

/// A zero luma sample is a dark pixel, anything brighter packs to 0.
pub fn is_dark(image: &GrayImage, x: u32, y: u32) -> bool {
    image.get_pixel(x, y)[0] == 0
}

fn frame_error(index: usize, path: &Path, err: Error) -> PackError {
    let path = path.to_path_buf();
    match err {
        Error::DimensionMismatch {
            expected, actual, ..
        } => PackError::Dimensions {
            index,
            path,
            expected,
            actual,
        },
        Error::Rle(RleError::FrameTooLarge(size)) => PackError::Capacity { index, path, size },
        source => PackError::Frame {
            index,
            path,
            source,
        },
    }
}

/// Appends one decoded image to the sequence.
pub fn push_frame(
    sequence: &mut FrameSequence,
    path: &Path,
    image: &GrayImage,
) -> Result<()> {
    let index = sequence.len();
    sequence
        .push_image(image.width(), image.height(), |x, y| is_dark(image, x, y))
        .map_err(|err| frame_error(index, path, err))?;
    Ok(())
}

/// Loads, packs and compresses every frame in order. Stops at the first
/// frame that fails.
pub fn pack_frames(config: PackConfig, frames: &[PathBuf]) -> Result<FrameSequence> {
    let mut sequence = FrameSequence::new(config).map_err(PackError::Config)?;
    for (index, path) in frames.iter().enumerate() {
        let image = image::open(path)
            .map_err(|source| PackError::Decode {
                index,
                path: path.clone(),
                source,
            })?
            .into_luma8();
        push_frame(&mut sequence, path, &image)?;
    }
    Ok(sequence)
}

fn kib(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}

/// Renders both artifacts in memory, then writes each one atomically.
pub fn write_outputs(
    sequence: &FrameSequence,
    emitter: &SourceEmitter,
    container_path: &Path,
    source_path: &Path,
) -> Result<()> {
    let container = sequence.to_container().map_err(PackError::Emit)?;
    let source = emitter.emit(sequence).map_err(PackError::Emit)?;

    std_fs::write_atomic(container_path, &container)?;
    info!("Saved: {} ({:.1} KB)", container_path.display(), kib(container.len()));

    std_fs::write_atomic(source_path, source.as_bytes())?;
    info!(
        "Generated: {} (~{:.1} KB of frame data)",
        source_path.display(),
        kib(sequence.total_bytes())
    );
    Ok(())
}

/// Expands one container payload back into a grayscale image, dark pixels
/// black and bright pixels white.
pub fn unpack_frame(config: &PackConfig, payload: &[u8]) -> std::result::Result<GrayImage, Error> {
    let expected = config.packed_len();
    let mut packed = vec![0u8; expected];
    let written = embedded_rle::decode_into(payload, &mut packed)?;
    if written != expected {
        return Err(RleError::SizeMismatch {
            expected,
            actual: written,
        }
        .into());
    }
    let bitmap = Bitmap::new(&packed, config.width, config.height, config.layout)?;
    Ok(GrayImage::from_fn(config.width, config.height, |x, y| {
        Luma([if bitmap.is_dark(x, y) { 0 } else { 255 }])
    }))
}

/// Decodes every frame of a container into `frame_NNNN.png` files.
/// Returns the number of frames written.
pub fn unpack_container(config: &PackConfig, container: &Path, out_dir: &Path) -> Result<usize> {
    config.validate().map_err(PackError::Config)?;
    std::fs::create_dir_all(out_dir).map_err(|source| PackError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let file = StdFileReader::open(container)?;
    info!("Reading {} ({} bytes)", container.display(), file.size());
    let mut reader = FrameReader::new(file);
    let mut payload = Vec::new();
    loop {
        let index = reader.frames_read();
        let container_error = |source| PackError::Container {
            index,
            path: container.to_path_buf(),
            source,
        };
        if !reader.next_frame(&mut payload).map_err(container_error)? {
            break;
        }
        let image = unpack_frame(config, &payload).map_err(|err| match err {
            Error::Rle(source) => container_error(source),
            source => PackError::Frame {
                index,
                path: container.to_path_buf(),
                source,
            },
        })?;
        let path = out_dir.join(format!("frame_{:04}.png", index + 1));
        debug!("Frame {}: {} RLE bytes -> {}", index, payload.len(), path.display());
        image
            .save(&path)
            .map_err(|source| PackError::Save { path, source })?;
    }
    Ok(reader.frames_read())
}
