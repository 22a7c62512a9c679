use anyhow::{Context, Result};
use pocketboy_gb::{GameBoy, GameBoyApp, GameBoyConfig};
use pocketboy_sdl2::App;
use pocketboy_sdl2::{SdlContext, SdlInitInfo};

/// What the launcher needs to start a Game Boy session.
pub struct LaunchOptions {
    pub rom: Vec<u8>,
    pub boot_rom: Option<Vec<u8>>,
    pub scale: u32,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let config = match options.boot_rom {
        Some(boot_rom) => GameBoyConfig::builder().boot_rom(boot_rom).build(),
        None => GameBoyConfig::default(),
    };
    let gb = GameBoy::with_config(&options.rom, config).context("failed to load cartridge")?;
    let app = GameBoyApp::new(gb);

    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(options.scale)
        .title(app.title())
        .build();
    SdlContext::run(init_info, app)
}
