mod bus;
mod cartridge;
mod gameboy;
mod joypad;
mod ppu;
mod serial;
mod timer;
mod video;

pub use cartridge::{CartridgeHeader, CartridgeKind};
pub use gameboy::{GameBoy, GameBoyConfig};
pub use joypad::Button;
pub use video::{DisplaySink, Palette, Rgb24Buffer, RgbaBuffer};
