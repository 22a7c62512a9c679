use super::{Mapper, ROM_BANK_SIZE};

/// Built-in 512 x 4-bit RAM.
pub(super) const RAM_SIZE: usize = 512;

/// MBC2: up to 256 KiB ROM, RAM inside the controller.
///
/// Address bit 8 picks the register for writes below 0x4000: clear for the
/// RAM enable latch, set for the 4-bit ROM bank.
pub(super) struct Mbc2 {
    rom_bank: u8,
    ram_enable: bool,
    rom_banks: usize,
}

impl Mbc2 {
    pub(super) fn new(rom_banks: usize) -> Self {
        Self {
            rom_bank: 1,
            ram_enable: false,
            rom_banks: rom_banks.max(1),
        }
    }
}

impl Mapper for Mbc2 {
    fn handle_write(&mut self, addr: u16, value: u8) {
        if addr >= 0x4000 {
            return;
        }
        if addr & 0x0100 == 0 {
            self.ram_enable = value & 0x0F == 0x0A;
            return;
        }
        let bank = value & 0x0F;
        if bank == 0 {
            log::warn!("GB MBC2: ROM bank 0 selected at 0x{:04X}; using bank 1", addr);
        }
        self.rom_bank = bank.max(1);
    }

    fn translate_rom(&self, addr: u16) -> usize {
        let offset = addr as usize & (ROM_BANK_SIZE - 1);
        if addr < 0x4000 {
            return offset;
        }
        (self.rom_bank as usize % self.rom_banks) * ROM_BANK_SIZE + offset
    }

    /// The 512 cells repeat across 0xA000-0xBFFF.
    fn translate_ram(&self, addr: u16) -> Option<usize> {
        self.ram_enable
            .then_some((addr - 0xA000) as usize & (RAM_SIZE - 1))
    }

    fn ram_mask(&self) -> u8 {
        0x0F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_bit_8_selects_register() {
        let mut mbc = Mbc2::new(16);
        mbc.handle_write(0x0100, 0x0A);
        assert_eq!(mbc.translate_ram(0xA000), None);
        assert_eq!(mbc.translate_rom(0x4000), 0x0A * ROM_BANK_SIZE);

        mbc.handle_write(0x0000, 0x0A);
        assert_eq!(mbc.translate_ram(0xA000), Some(0));
        assert_eq!(mbc.translate_rom(0x4000), 0x0A * ROM_BANK_SIZE);
    }

    #[test]
    fn bank_zero_selects_bank_one() {
        let mut mbc = Mbc2::new(16);
        mbc.handle_write(0x2100, 0x00);
        assert_eq!(mbc.translate_rom(0x4000), ROM_BANK_SIZE);
    }

    #[test]
    fn ram_is_mirrored_every_512_bytes() {
        let mut mbc = Mbc2::new(2);
        mbc.handle_write(0x0000, 0x0A);
        assert_eq!(mbc.translate_ram(0xA205), Some(0x005));
        assert_eq!(mbc.translate_ram(0xBFFF), Some(0x1FF));
    }
}
