use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pocketboy::LaunchOptions;

/// DMG Game Boy emulator.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the cartridge ROM image
    #[arg(short, long)]
    file: PathBuf,

    /// Optional 256-byte DMG boot ROM
    #[arg(long)]
    boot_rom: Option<PathBuf>,

    /// Integer window scale
    #[arg(long, default_value_t = pocketboy_gb::SCREEN_SCALE)]
    scale: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    log::info!("Playing ROM path: '{}'", args.file.display());
    let rom = std::fs::read(&args.file)
        .with_context(|| format!("failed to read ROM '{}'", args.file.display()))?;
    let boot_rom = args
        .boot_rom
        .as_ref()
        .map(|path| {
            std::fs::read(path)
                .with_context(|| format!("failed to read boot ROM '{}'", path.display()))
        })
        .transpose()?;

    pocketboy::run(LaunchOptions {
        rom,
        boot_rom,
        scale: args.scale,
    })
}
