use std::{path::PathBuf, process::ExitCode};

use argh::FromArgs;
use framepack_core::{Layout, PackConfig, SourceEmitter, SourceLanguage};
use framepack_desktop::{PackError, pipeline, std_fs};
use log::{error, info};

#[derive(FromArgs)]
/// Pack a directory of 1-bit frames into an RLE container and an
/// embeddable source file
struct Args {
    /// frame width in pixels
    #[argh(positional)]
    width: u32,

    /// frame height in pixels
    #[argh(positional)]
    height: u32,

    /// playback frames per second
    #[argh(positional)]
    fps: u32,

    /// dither mode the frames were made with, recorded in the source
    #[argh(positional)]
    dither: Option<String>,

    /// directory holding the frames
    #[argh(option, default = "PathBuf::from(\"frames\")")]
    frames: PathBuf,

    /// frame file extension
    #[argh(option, default = "String::from(\"pbm\")")]
    extension: String,

    /// binary container path
    #[argh(option, short = 'o', default = "PathBuf::from(\"bad_apple.rle\")")]
    output: PathBuf,

    /// embeddable source path
    #[argh(option, short = 's', default = "PathBuf::from(\"bad_apple_data.h\")")]
    source: PathBuf,

    /// source language, c or rust
    #[argh(option, short = 'l', default = "SourceLanguage::C")]
    language: SourceLanguage,

    /// prefix for the generated constants and arrays
    #[argh(option, default = "String::from(\"bad_apple\")")]
    name: String,

    /// pad every row to a whole byte instead of packing one continuous bitstream
    #[argh(switch)]
    row_aligned: bool,
}

fn run(args: Args) -> Result<(), PackError> {
    let layout = if args.row_aligned {
        Layout::RowAligned
    } else {
        Layout::Contiguous
    };
    let mut config = PackConfig::new(args.width, args.height, args.fps).with_layout(layout);
    if let Some(dither) = args.dither {
        config = config.with_dither(dither);
    }
    config.validate().map_err(PackError::Config)?;
    let emitter = SourceEmitter::new(&args.name, args.language).map_err(PackError::Config)?;

    let frames = std_fs::list_frames(&args.frames, &args.extension)?;
    info!(
        "Packing {} frames ({}x{}) with RLE...",
        frames.len(),
        args.width,
        args.height
    );
    let sequence = pipeline::pack_frames(config, &frames)?;
    pipeline::write_outputs(&sequence, &emitter, &args.output, &args.source)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
