pub mod app;
pub mod bits;
pub mod cpu;
mod error;
pub mod machine;

pub use app::GameBoyApp;
pub use error::{Error, Result};
pub use machine::{
    Button, CartridgeHeader, CartridgeKind, DisplaySink, GameBoy, GameBoyConfig, Palette,
    Rgb24Buffer, RgbaBuffer,
};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Default integer scaling factor for the SDL frontend.
pub const SCREEN_SCALE: u32 = 4;

/// Clocks in one full LCD frame (154 lines of 456 dots).
pub const CLOCKS_PER_FRAME: u32 = 70_224;
/// Clock budget handed to the core per 60 Hz host frame.
pub const CLOCKS_PER_HOST_FRAME: u32 = 69_905;
