// Unfurl a GIF into numbered PNG frames named `<character>_<animation>_<index>.png`

use anyhow::{Context, Result};
use clap::Parser;
use image::codecs::gif::GifDecoder;
use image::{imageops, AnimationDecoder, ImageFormat};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Unfurl a GIF into separate PNG frames following the naming convention
/// <character>_<animation>_<frame index>.png
#[derive(Parser, Debug)]
#[command(name = "unfurl-gif", version, about, long_about = None)]
struct Args {
    /// Path to the source GIF file
    #[arg(long)]
    gif: PathBuf,

    /// The character name to use as the image prefix
    #[arg(long)]
    character: String,

    /// The animation name to use in the filename
    #[arg(long)]
    animation: String,

    /// The target directory to save the extracted PNG frames
    #[arg(long)]
    target: PathBuf,

    /// Flip every frame horizontally before saving
    #[arg(long)]
    flip: bool,
}

/// File name for one extracted frame
fn frame_file_name(character: &str, animation: &str, index: usize) -> String {
    format!("{}_{}_{}.png", character, animation, index)
}

/// Write every frame of `gif` as RGBA PNG into `target`, returning the count
fn unfurl_gif(
    gif: &Path,
    character: &str,
    animation: &str,
    target: &Path,
    flip: bool,
) -> Result<usize> {
    std::fs::create_dir_all(target)
        .with_context(|| format!("Failed to create {}", target.display()))?;

    let file = File::open(gif).with_context(|| format!("Failed to open {}", gif.display()))?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("Failed to read {} as GIF", gif.display()))?;

    let mut count = 0;
    for (index, frame) in decoder.into_frames().enumerate() {
        let frame = frame.with_context(|| format!("Failed to decode frame {}", index))?;
        let mut buffer = frame.into_buffer();
        if flip {
            buffer = imageops::flip_horizontal(&buffer);
        }

        let path = target.join(frame_file_name(character, animation, index));
        buffer
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved frame {} to {}", index, path.display());
        count += 1;
    }

    Ok(count)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let count = unfurl_gif(
        &args.gif,
        &args.character,
        &args.animation,
        &args.target,
        args.flip,
    )
    .with_context(|| format!("Error processing {}", args.gif.display()))?;

    if count == 0 {
        info!("No frames found in the GIF.");
    } else {
        info!("Extracted {} frames successfully.", count);
    }

    Ok(())
}
