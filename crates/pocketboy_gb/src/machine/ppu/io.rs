use super::{stat, Lcdc, Mode, Ppu};

impl Ppu {
    pub(in super::super) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => {
                let coincidence = if self.ly == self.lyc { 0x04 } else { 0 };
                0x80 | self.stat_select | coincidence | self.mode as u8
            }
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    pub(in super::super) fn write_register(&mut self, addr: u16, value: u8, if_reg: &mut u8) {
        match addr {
            0xFF40 => self.write_lcdc(value, if_reg),
            // Mode and coincidence bits are read-only.
            0xFF41 => self.stat_select = value & stat::SELECT_MASK,
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            0xFF44 => self.write_ly(if_reg),
            0xFF45 => {
                self.lyc = value;
                self.compare_lyc(if_reg);
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    fn write_lcdc(&mut self, value: u8, if_reg: &mut u8) {
        let was_enabled = self.lcd_enabled();
        self.lcdc = Lcdc::from_bits_retain(value);
        let enabled = self.lcd_enabled();

        if was_enabled && !enabled {
            // The state machine freezes at LY=0 in mode 0 and the panel
            // shows a blank frame.
            self.ly = 0;
            self.line_dots = 0;
            self.window_line = 0;
            self.mode = Mode::HBlank;
            self.blank_frame();
            log::debug!("GB PPU: LCD off");
        } else if !was_enabled && enabled {
            self.ly = 0;
            self.line_dots = 0;
            self.window_line = 0;
            self.set_mode(Mode::OamScan, if_reg);
            self.compare_lyc(if_reg);
            log::debug!("GB PPU: LCD on (LCDC=0x{:02X})", value);
        }
    }

    /// Any write restarts the frame at line 0.
    fn write_ly(&mut self, if_reg: &mut u8) {
        self.ly = 0;
        self.line_dots = 0;
        self.window_line = 0;
        if self.lcd_enabled() {
            self.set_mode(Mode::OamScan, if_reg);
        }
        self.compare_lyc(if_reg);
    }

    fn blank_frame(&mut self) {
        let white = self.palette.colors[0];
        for pixel in self.front.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[white.r, white.g, white.b, white.a]);
        }
    }
}
