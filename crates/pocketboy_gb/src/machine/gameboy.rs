use typed_builder::TypedBuilder;

use crate::cpu::{Bus, Cpu};
use crate::{Error, Result, CLOCKS_PER_FRAME};

use super::bus::{GameBoyBus, BOOT_ROM_SIZE};
use super::cartridge::{Cartridge, CartridgeHeader};
use super::joypad::Button;
use super::video::{self, DisplaySink, Palette};

/// Machine options beyond the cartridge image.
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct GameBoyConfig {
    /// 256-byte DMG boot ROM. Without one the machine starts in the
    /// post-boot state at 0x0100.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    #[builder(default)]
    pub palette: Palette,
}

/// High-level Game Boy machine.
///
/// Owns the CPU and the bus. Hosts drive it with [`GameBoy::run_for`] and
/// exchange input and video between calls.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    /// Clocks owed to the next `run_for`; negative after an overshoot.
    budget: i64,
}

impl GameBoy {
    pub fn from_rom(rom: &[u8]) -> Result<Self> {
        Self::with_config(rom, GameBoyConfig::default())
    }

    pub fn with_config(rom: &[u8], config: GameBoyConfig) -> Result<Self> {
        let cartridge = Cartridge::from_rom(rom)?;

        let cpu = match &config.boot_rom {
            Some(boot) if boot.len() != BOOT_ROM_SIZE => {
                return Err(Error::InvalidBootRom { len: boot.len() });
            }
            Some(_) => {
                log::info!("GB: boot ROM mapped at 0x0000");
                Cpu::power_on()
            }
            None => Cpu::new(),
        };

        Ok(Self {
            cpu,
            bus: GameBoyBus::new(cartridge, config.boot_rom, config.palette),
            budget: 0,
        })
    }

    /// Execute one CPU step and return the machine cycles that elapsed,
    /// including any OAM DMA it triggered. Returns 0 while stopped.
    pub fn step(&mut self) -> u32 {
        let start = self.bus.elapsed();
        self.cpu.step(&mut self.bus);
        if self.bus.boot_rom_mapped() && self.cpu.regs.pc == 0x0100 {
            self.bus.unmap_boot_rom();
        }
        (self.bus.elapsed() - start) as u32
    }

    /// Run for `clocks` clocks (4 per machine cycle) and return how many
    /// were executed.
    ///
    /// Instructions are atomic, so a call may overshoot; the excess is
    /// taken from the next call. While the CPU is in STOP, time is
    /// dropped and nothing runs.
    pub fn run_for(&mut self, clocks: u32) -> u64 {
        self.budget += clocks as i64;
        let mut executed = 0u64;
        while self.budget > 0 {
            let mcycles = self.step();
            if mcycles == 0 {
                self.budget = 0;
                break;
            }
            let spent = mcycles as u64 * 4;
            executed += spent;
            self.budget -= spent as i64;
        }
        executed
    }

    /// Run one full 70,224-clock frame.
    pub fn step_frame(&mut self) -> u64 {
        self.run_for(CLOCKS_PER_FRAME)
    }

    pub fn press(&mut self, button: Button) {
        log::debug!("GB: press {:?}", button);
        self.bus.press(button);
        self.cpu.resume();
    }

    pub fn release(&mut self, button: Button) {
        log::debug!("GB: release {:?}", button);
        self.bus.release(button);
    }

    /// The last completed frame as 160x144 RGBA8888.
    pub fn frame(&self) -> &[u8] {
        self.bus.ppu.frame()
    }

    /// Push the last completed frame through `sink`.
    pub fn present(&self, sink: &mut impl DisplaySink) {
        video::present(self.bus.ppu.frame(), sink);
    }

    /// Frames completed since power-on.
    pub fn frames(&self) -> u64 {
        self.bus.ppu.frames()
    }

    pub fn header(&self) -> &CartridgeHeader {
        self.bus.cartridge().header()
    }

    /// Bytes sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }

    /// CPU-visible read without advancing time.
    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.bus.read8(addr)
    }

    /// Machine cycles elapsed since power-on.
    pub fn elapsed_mcycles(&self) -> u64 {
        self.bus.elapsed()
    }
}
