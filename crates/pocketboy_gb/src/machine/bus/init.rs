use super::GameBoyBus;

impl GameBoyBus {
    /// I/O registers as the DMG boot ROM leaves them at PC=0x0100.
    ///
    /// LCDC, BGP, OBP and DIV come from the PPU and timer post-boot
    /// constructors; this covers the registers stored on the bus.
    pub(super) fn apply_post_boot_io(&mut self) {
        // VBlank is already requested when the boot ROM hands over.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;

        // Sound registers are stored but not emulated.
        const SOUND: [(u16, u8); 21] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ];
        for (addr, value) in SOUND {
            self.io[(addr - 0xFF00) as usize] = value;
        }
        // Boot ROM disable latch.
        self.io[0x50] = 0x01;
    }
}
