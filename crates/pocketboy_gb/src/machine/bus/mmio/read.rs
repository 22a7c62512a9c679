use super::super::GameBoyBus;

impl GameBoyBus {
    pub(in super::super) fn read8_mmio(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_rom.is_some() => {
                self.boot_rom.as_ref().map_or(0xFF, |boot| boot[addr as usize])
            }

            // Cartridge ROM, banked by the mapper.
            0x0000..=0x7FFF => self.cartridge.read_rom(addr),

            0x8000..=0x9FFF => self.ppu.vram[(addr - 0x8000) as usize],

            0xA000..=0xBFFF => self.cartridge.read_ram(addr),

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],

            // Echo RAM: 0xE000..0xFDFF mirrors 0xC000..0xDDFF.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],

            0xFE00..=0xFE9F => self.ppu.oam[(addr - 0xFE00) as usize],

            // Unusable area.
            0xFEA0..=0xFEFF => 0xFF,

            0xFF00 => self.joypad.read(),
            0xFF01 => self.serial.sb,
            0xFF02 => self.serial.read_sc(),

            0xFF04 => self.timer.div_read(),
            0xFF05 => self.timer.tima_read(),
            0xFF06 => self.timer.tma_read(),
            0xFF07 => self.timer.tac_read(),

            0xFF0F => self.if_reg | 0b1110_0000,

            0xFF46 => self.dma_source,
            0xFF40..=0xFF4B => self.ppu.read_register(addr),

            0xFF03..=0xFF7F => self.io[(addr - 0xFF00) as usize],

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],

            0xFFFF => self.ie_reg,
        }
    }
}
