use super::super::GameBoyBus;

impl GameBoyBus {
    pub(in super::super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            // ROM is read-only; the mapper interprets the write.
            0x0000..=0x7FFF => self.cartridge.write_rom(addr, value),

            0x8000..=0x9FFF => self.ppu.vram[(addr - 0x8000) as usize] = value,

            0xA000..=0xBFFF => self.cartridge.write_ram(addr, value),

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,

            0xFE00..=0xFE9F => self.ppu.oam[(addr - 0xFE00) as usize] = value,

            // Writes to the unusable area are ignored.
            0xFEA0..=0xFEFF => {}

            0xFF00 => self.joypad.write(value),
            0xFF01 => self.serial.sb = value,
            0xFF02 => self.serial.write_sc(value, &mut self.if_reg),

            0xFF04 => self.timer.div_write(),
            0xFF05 => self.timer.tima_write(value),
            0xFF06 => self.timer.tma_write(value),
            0xFF07 => self.timer.tac_write(value),

            // Unused register; writes clear it.
            0xFF0A => self.io[0x0A] = 0,

            0xFF0F => self.if_reg = value & 0x1F,

            0xFF46 => self.oam_dma(value),
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value, &mut self.if_reg),

            0xFF50 => {
                self.io[0x50] |= value;
                if value != 0 {
                    self.unmap_boot_rom();
                }
            }

            0xFF03..=0xFF7F => self.io[(addr - 0xFF00) as usize] = value,

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,

            0xFFFF => self.ie_reg = value,
        }
    }
}
