use crate::cpu::Bus;

use super::super::ppu::OAM_SIZE;
use super::GameBoyBus;

impl GameBoyBus {
    /// OAM DMA: copy 160 bytes from `value << 8` into OAM.
    ///
    /// Sources go through the normal read path, so 0xE000 and above hit the
    /// echo RAM and I/O mappings. The transfer completes at once and then
    /// charges 160 machine cycles to the timer and the PPU.
    pub(super) fn oam_dma(&mut self, value: u8) {
        self.dma_source = value;
        let base = (value as u16) << 8;
        for i in 0..OAM_SIZE as u16 {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.ppu.oam[i as usize] = byte;
        }
        log::trace!("GB DMA: 0x{:04X} -> OAM", base);
        self.tick(OAM_SIZE as u32);
    }
}
