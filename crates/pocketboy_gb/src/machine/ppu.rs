use bitflags::bitflags;

use crate::cpu::Interrupt;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::video::Palette;

mod io;
mod oam;
mod render;

use oam::Sprite;

const DOTS_PER_LINE: u32 = 456;
const OAM_SCAN_DOTS: u32 = 80;
const DRAW_DOTS: u32 = 72;
const VISIBLE_LINES: u8 = 144;
const LINES_PER_FRAME: u8 = 154;

pub(super) const VRAM_SIZE: usize = 0x2000;
pub(super) const OAM_SIZE: usize = 0xA0;
const FRAME_BYTES: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

bitflags! {
    /// LCDC (FF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(super) struct Lcdc: u8 {
        const LCD_ENABLE = 0b1000_0000;
        const WINDOW_MAP = 0b0100_0000;
        const WINDOW_ENABLE = 0b0010_0000;
        const TILE_DATA = 0b0001_0000;
        const BG_MAP = 0b0000_1000;
        const OBJ_SIZE = 0b0000_0100;
        const OBJ_ENABLE = 0b0000_0010;
        const BG_ENABLE = 0b0000_0001;
    }
}

/// STAT interrupt select bits (FF41 bits 3-6).
mod stat {
    pub(super) const HBLANK: u8 = 0x08;
    pub(super) const VBLANK: u8 = 0x10;
    pub(super) const OAM_SCAN: u8 = 0x20;
    pub(super) const LYC: u8 = 0x40;
    pub(super) const SELECT_MASK: u8 = 0x78;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Draw = 3,
}

/// DMG pixel processing unit.
///
/// Driven in dots (4 per machine cycle). Each visible line is
/// OAM_SCAN (80 dots), DRAW (72) and HBLANK (the rest of 456); lines
/// 144-153 are VBLANK. The whole scanline is rendered when DRAW ends, and
/// the finished frame is published at the start of VBLANK.
pub(crate) struct Ppu {
    pub(super) vram: [u8; VRAM_SIZE],
    pub(super) oam: [u8; OAM_SIZE],

    lcdc: Lcdc,
    stat_select: u8,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    mode: Mode,
    /// Dots into the current line, `0..DOTS_PER_LINE`.
    line_dots: u32,
    /// Window row to sample next; only advances on lines showing the window.
    window_line: u8,
    /// Last LY==LYC result, for edge detection.
    lyc_match: bool,
    /// Sprites selected by the last OAM scan, in priority order.
    sprites: Vec<Sprite>,

    palette: Palette,
    back: Vec<u8>,
    front: Vec<u8>,
    frames: u64,
}

impl Ppu {
    pub(crate) fn new(palette: Palette) -> Self {
        let white = palette.colors[0];
        let blank: Vec<u8> = std::iter::repeat([white.r, white.g, white.b, white.a])
            .take(SCREEN_WIDTH * SCREEN_HEIGHT)
            .flatten()
            .collect();
        debug_assert_eq!(blank.len(), FRAME_BYTES);

        Self {
            vram: [0; VRAM_SIZE],
            oam: [0; OAM_SIZE],
            lcdc: Lcdc::empty(),
            stat_select: 0,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            mode: Mode::HBlank,
            line_dots: 0,
            window_line: 0,
            lyc_match: true,
            sprites: Vec::with_capacity(oam::MAX_SPRITES_PER_LINE),
            palette,
            back: blank.clone(),
            front: blank,
            frames: 0,
        }
    }

    /// LCD on with the register values the boot ROM leaves behind.
    pub(crate) fn post_boot(palette: Palette) -> Self {
        let mut ppu = Self::new(palette);
        ppu.bgp = 0xFC;
        ppu.obp0 = 0xFF;
        ppu.obp1 = 0xFF;
        ppu.lcdc = Lcdc::from_bits_retain(0x91);
        ppu.set_mode(Mode::OamScan, &mut 0);
        ppu
    }

    /// Completed frames since power-on.
    #[inline]
    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    /// The last completed frame, RGBA8888 row-major.
    pub(crate) fn frame(&self) -> &[u8] {
        &self.front
    }

    #[inline]
    fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::LCD_ENABLE)
    }

    /// Advance by `mcycles` machine cycles.
    pub(crate) fn tick(&mut self, mcycles: u32, if_reg: &mut u8) {
        if !self.lcd_enabled() {
            return;
        }
        for _ in 0..mcycles {
            self.advance(4, if_reg);
        }
    }

    fn advance(&mut self, dots: u32, if_reg: &mut u8) {
        self.line_dots += dots;
        match self.mode {
            Mode::OamScan if self.line_dots >= OAM_SCAN_DOTS => {
                self.set_mode(Mode::Draw, if_reg);
            }
            Mode::Draw if self.line_dots >= OAM_SCAN_DOTS + DRAW_DOTS => {
                self.render_scanline();
                self.set_mode(Mode::HBlank, if_reg);
            }
            Mode::HBlank | Mode::VBlank if self.line_dots >= DOTS_PER_LINE => {
                self.line_dots -= DOTS_PER_LINE;
                self.next_line(if_reg);
            }
            _ => {}
        }
    }

    fn next_line(&mut self, if_reg: &mut u8) {
        self.ly += 1;
        if self.ly == VISIBLE_LINES {
            *if_reg |= Interrupt::VBlank.bit();
            self.set_mode(Mode::VBlank, if_reg);
            std::mem::swap(&mut self.front, &mut self.back);
            self.frames += 1;
            log::debug!("GB PPU: VBlank, frame={}", self.frames);
        } else if self.ly == LINES_PER_FRAME {
            self.ly = 0;
            self.window_line = 0;
            self.set_mode(Mode::OamScan, if_reg);
        } else if self.ly < VISIBLE_LINES {
            self.set_mode(Mode::OamScan, if_reg);
        }
        self.compare_lyc(if_reg);
    }

    fn set_mode(&mut self, mode: Mode, if_reg: &mut u8) {
        self.mode = mode;
        if mode == Mode::OamScan {
            self.scan_oam();
        }
        let select = match mode {
            Mode::HBlank => stat::HBLANK,
            Mode::VBlank => stat::VBLANK,
            Mode::OamScan => stat::OAM_SCAN,
            Mode::Draw => 0,
        };
        if self.stat_select & select != 0 {
            *if_reg |= Interrupt::LcdStat.bit();
        }
    }

    /// Request LCD-STAT on a rising LY==LYC match when selected.
    fn compare_lyc(&mut self, if_reg: &mut u8) {
        let matched = self.ly == self.lyc;
        if matched && !self.lyc_match && self.stat_select & stat::LYC != 0 {
            *if_reg |= Interrupt::LcdStat.bit();
        }
        self.lyc_match = matched;
    }
}
