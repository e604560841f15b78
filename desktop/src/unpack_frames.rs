use std::{path::PathBuf, process::ExitCode};

use argh::FromArgs;
use framepack_core::{Layout, PackConfig};
use framepack_desktop::pipeline;
use log::{error, info};

#[derive(FromArgs)]
/// Decode an RLE frame container back into PNG images
struct Args {
    /// container written by pack_frames
    #[argh(positional)]
    input: PathBuf,

    /// frame width in pixels
    #[argh(positional)]
    width: u32,

    /// frame height in pixels
    #[argh(positional)]
    height: u32,

    /// directory for the decoded frames
    #[argh(option, short = 'o', default = "PathBuf::from(\"decoded\")")]
    output_dir: PathBuf,

    /// frames were packed with row padding
    #[argh(switch)]
    row_aligned: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let layout = if args.row_aligned {
        Layout::RowAligned
    } else {
        Layout::Contiguous
    };
    // fps only matters for playback
    let config = PackConfig::new(args.width, args.height, 1).with_layout(layout);

    match pipeline::unpack_container(&config, &args.input, &args.output_dir) {
        Ok(count) => {
            info!("Decoded {} frames into {}", count, args.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
