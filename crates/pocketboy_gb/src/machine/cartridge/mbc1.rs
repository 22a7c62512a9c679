use super::{Mapper, RAM_BANK_SIZE, ROM_BANK_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BankingMode {
    /// 0x4000-0x5FFF selects ROM bank bits 5-6.
    Rom,
    /// 0x4000-0x5FFF selects the RAM bank.
    Ram,
}

/// MBC1: up to 2 MiB ROM and 32 KiB RAM.
pub(super) struct Mbc1 {
    /// 7-bit bank mapped at 0x4000-0x7FFF; the low five bits are never 0.
    rom_bank: u8,
    ram_bank: u8,
    mode: BankingMode,
    ram_enable: bool,
    rom_banks: usize,
    ram_banks: usize,
}

impl Mbc1 {
    pub(super) fn new(rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_bank: 1,
            ram_bank: 0,
            mode: BankingMode::Rom,
            ram_enable: false,
            rom_banks: rom_banks.max(1),
            ram_banks,
        }
    }

    fn set_mode(&mut self, mode: BankingMode) {
        if mode == self.mode {
            return;
        }
        // The two-bit register moves between the selectors.
        match mode {
            BankingMode::Ram => {
                self.ram_bank = self.rom_bank >> 5;
                self.rom_bank &= 0x1F;
            }
            BankingMode::Rom => {
                self.rom_bank = (self.rom_bank & 0x1F) | (self.ram_bank << 5);
                self.ram_bank = 0;
            }
        }
        self.mode = mode;
    }
}

impl Mapper for Mbc1 {
    fn handle_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                let low = match value & 0x1F {
                    0 => 1,
                    low => low,
                };
                self.rom_bank = (self.rom_bank & 0x60) | low;
            }
            0x4000..=0x5FFF => match self.mode {
                BankingMode::Rom => self.rom_bank = (self.rom_bank & 0x1F) | ((value & 0x03) << 5),
                BankingMode::Ram => self.ram_bank = value & 0x03,
            },
            0x6000..=0x7FFF => self.set_mode(if value & 0x01 == 0 {
                BankingMode::Rom
            } else {
                BankingMode::Ram
            }),
            _ => {}
        }
    }

    fn translate_rom(&self, addr: u16) -> usize {
        let offset = addr as usize & (ROM_BANK_SIZE - 1);
        if addr < 0x4000 {
            return offset;
        }
        let bank = self.rom_bank as usize % self.rom_banks;
        bank * ROM_BANK_SIZE + offset
    }

    fn translate_ram(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram_banks == 0 {
            return None;
        }
        let bank = self.ram_bank as usize % self.ram_banks;
        Some(bank * RAM_BANK_SIZE + (addr - 0xA000) as usize)
    }
}
