use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use pocketboy_gb::{GameBoy, Rgb24Buffer, RgbaBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Rgba,
    Rgb24,
}

/// Run a ROM headlessly and dump the last completed frame as raw pixels.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the cartridge ROM image
    #[arg(short, long)]
    file: PathBuf,

    /// Output file for the raw frame
    #[arg(short, long)]
    out: PathBuf,

    /// Number of LCD frames to run before dumping
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Pixel layout of the output file
    #[arg(long, value_enum, default_value_t = Format::Rgba)]
    format: Format,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = std::fs::read(&args.file)
        .with_context(|| format!("failed to read ROM '{}'", args.file.display()))?;
    let mut gb = GameBoy::from_rom(&rom)
        .with_context(|| format!("failed to load ROM '{}'", args.file.display()))?;

    for _ in 0..args.frames {
        gb.step_frame();
    }

    let bytes = match args.format {
        Format::Rgba => {
            let mut sink = RgbaBuffer::default();
            gb.present(&mut sink);
            sink.pixels
        }
        Format::Rgb24 => {
            let mut sink = Rgb24Buffer::default();
            gb.present(&mut sink);
            sink.pixels
        }
    };

    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("failed to write '{}'", args.out.display()))?;

    println!(
        "Wrote {} bytes ({}x{} {:?}) after {} frames to '{}'",
        bytes.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        args.format,
        gb.frames(),
        args.out.display()
    );
    Ok(())
}
