use crate::cpu::Bus;

use super::cartridge::Cartridge;
use super::joypad::{Button, Joypad};
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;
use super::video::Palette;

mod dma;
mod init;
mod mmio;

pub(super) const BOOT_ROM_SIZE: usize = 0x100;
const WRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;
const IO_SIZE: usize = 0x80;

/// The DMG address space and the peripherals hanging off it.
///
/// Every machine cycle the CPU charges arrives through [`Bus::tick`], which
/// advances the timer and the PPU in lockstep and counts elapsed cycles.
pub(crate) struct GameBoyBus {
    cartridge: Cartridge,
    /// Mapped over 0x0000-0x00FF until unmapped.
    boot_rom: Option<Vec<u8>>,
    wram: [u8; WRAM_SIZE],
    hram: [u8; HRAM_SIZE],
    /// Backing store for I/O registers without a model (sound, 0xFF50...).
    io: [u8; IO_SIZE],
    pub(crate) ppu: Ppu,
    timer: Timer,
    joypad: Joypad,
    pub(crate) serial: Serial,
    pub(crate) if_reg: u8,
    pub(crate) ie_reg: u8,
    /// Last value written to DMA (FF46).
    dma_source: u8,
    /// Machine cycles elapsed since power-on, DMA included.
    elapsed: u64,
}

impl GameBoyBus {
    /// With a boot ROM the bus starts in the power-on state; without one,
    /// in the state the boot ROM leaves at 0x0100.
    pub(super) fn new(cartridge: Cartridge, boot_rom: Option<Vec<u8>>, palette: Palette) -> Self {
        let booting = boot_rom.is_some();
        let mut bus = Self {
            cartridge,
            boot_rom,
            wram: [0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            io: [0; IO_SIZE],
            ppu: if booting {
                Ppu::new(palette)
            } else {
                Ppu::post_boot(palette)
            },
            timer: if booting {
                Timer::new()
            } else {
                Timer::post_boot()
            },
            joypad: Joypad::new(),
            serial: Serial::default(),
            if_reg: 0,
            ie_reg: 0,
            dma_source: 0xFF,
            elapsed: 0,
        };
        if !booting {
            bus.apply_post_boot_io();
        }
        bus
    }

    #[inline]
    pub(super) fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub(super) fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    #[inline]
    pub(super) fn boot_rom_mapped(&self) -> bool {
        self.boot_rom.is_some()
    }

    pub(super) fn unmap_boot_rom(&mut self) {
        if self.boot_rom.take().is_some() {
            log::info!("GB: boot ROM unmapped");
        }
    }

    pub(super) fn press(&mut self, button: Button) {
        self.joypad.press(button, &mut self.if_reg);
    }

    pub(super) fn release(&mut self, button: Button) {
        self.joypad.release(button);
    }
}

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    fn tick(&mut self, mcycles: u32) {
        self.elapsed += mcycles as u64;
        self.timer.tick(mcycles, &mut self.if_reg);
        self.ppu.tick(mcycles, &mut self.if_reg);
    }
}
