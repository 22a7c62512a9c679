use super::oam::SpriteFlags;
use super::{Lcdc, Ppu};
use crate::SCREEN_WIDTH;

/// Color index (0-3) of pixel `x` in a tile row's two bitplanes.
#[inline]
fn tile_pixel(lo: u8, hi: u8, x: u8) -> u8 {
    let bit = 7 - (x & 7);
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}

/// Shade (0-3) selected by a palette register for a color index.
#[inline]
fn shade(palette: u8, index: u8) -> u8 {
    (palette >> (index * 2)) & 0x03
}

impl Lcdc {
    /// VRAM offset of the tile map selected by `flag`.
    fn map_base(self, flag: Lcdc) -> usize {
        if self.contains(flag) {
            0x1C00
        } else {
            0x1800
        }
    }
}

impl Ppu {
    /// VRAM offset of a background/window tile in the LCDC-selected
    /// addressing mode: unsigned from 0x8000 or signed around 0x9000.
    fn bg_tile_addr(&self, tile: u8) -> usize {
        if self.lcdc.contains(Lcdc::TILE_DATA) {
            tile as usize * 16
        } else {
            (0x1000 + (tile as i8 as isize) * 16) as usize
        }
    }

    /// Color index at (`x`, `y`) of the 256x256 plane drawn from a tile map.
    fn map_pixel(&self, map: usize, x: u8, y: u8) -> u8 {
        let tile = self.vram[map + (y as usize / 8) * 32 + x as usize / 8];
        let row = self.bg_tile_addr(tile) + (y as usize & 7) * 2;
        tile_pixel(self.vram[row], self.vram[row + 1], x)
    }

    /// Composite the current line into the back buffer.
    pub(super) fn render_scanline(&mut self) {
        let ly = self.ly;
        let mut bg_index = [0u8; SCREEN_WIDTH];
        let mut shades = [0u8; SCREEN_WIDTH];

        if self.lcdc.contains(Lcdc::BG_ENABLE) {
            let map = self.lcdc.map_base(Lcdc::BG_MAP);
            let y = ly.wrapping_add(self.scy);
            for (x, index) in bg_index.iter_mut().enumerate() {
                *index = self.map_pixel(map, (x as u8).wrapping_add(self.scx), y);
            }

            if self.lcdc.contains(Lcdc::WINDOW_ENABLE) && self.wy <= ly && self.wx <= 166 {
                let map = self.lcdc.map_base(Lcdc::WINDOW_MAP);
                let start = self.wx as isize - 7;
                for x in start.max(0) as usize..SCREEN_WIDTH {
                    let window_x = (x as isize - start) as u8;
                    bg_index[x] = self.map_pixel(map, window_x, self.window_line);
                }
                self.window_line = self.window_line.wrapping_add(1);
            }

            for (shade_out, &index) in shades.iter_mut().zip(&bg_index) {
                *shade_out = shade(self.bgp, index);
            }
        }

        if self.lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.render_sprites(&bg_index, &mut shades);
        }

        let row = ly as usize * SCREEN_WIDTH * 4;
        let line = &mut self.back[row..row + SCREEN_WIDTH * 4];
        for (pixel, &s) in line.chunks_exact_mut(4).zip(&shades) {
            let color = self.palette.colors[s as usize];
            pixel.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Sprites are visited in priority order; the first opaque pixel at a
    /// column owns it, even when it then hides behind the background.
    fn render_sprites(&self, bg_index: &[u8; SCREEN_WIDTH], shades: &mut [u8; SCREEN_WIDTH]) {
        let height = self.sprite_height();
        let mut owned = [false; SCREEN_WIDTH];

        for sprite in &self.sprites {
            let mut row = self.ly.wrapping_add(16).wrapping_sub(sprite.y);
            // LCDC.2 may have shrunk the sprite since the OAM scan.
            if row >= height {
                continue;
            }
            if sprite.flags.contains(SpriteFlags::Y_FLIP) {
                row = height - 1 - row;
            }
            let tile = if height == 16 {
                sprite.tile & 0xFE
            } else {
                sprite.tile
            };
            let addr = tile as usize * 16 + row as usize * 2;
            let (lo, hi) = (self.vram[addr], self.vram[addr + 1]);
            let palette = if sprite.flags.contains(SpriteFlags::PALETTE) {
                self.obp1
            } else {
                self.obp0
            };

            for col in 0..8u8 {
                let x = sprite.x as isize - 8 + col as isize;
                if !(0..SCREEN_WIDTH as isize).contains(&x) {
                    continue;
                }
                let x = x as usize;
                if owned[x] {
                    continue;
                }
                let sample = if sprite.flags.contains(SpriteFlags::X_FLIP) {
                    7 - col
                } else {
                    col
                };
                let index = tile_pixel(lo, hi, sample);
                if index == 0 {
                    continue;
                }
                owned[x] = true;
                if sprite.flags.contains(SpriteFlags::BEHIND_BG) && bg_index[x] != 0 {
                    continue;
                }
                shades[x] = shade(palette, index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::video::Palette;
    use pocketboy_common::Color;

    fn ppu() -> Ppu {
        let mut ppu = Ppu::new(Palette::default());
        ppu.lcdc = Lcdc::LCD_ENABLE | Lcdc::BG_ENABLE | Lcdc::TILE_DATA | Lcdc::OBJ_ENABLE;
        ppu.bgp = 0xE4;
        ppu.obp0 = 0xE4;
        ppu.obp1 = 0x1B;
        ppu
    }

    /// Fill tile `tile` (unsigned addressing) with a solid color index.
    fn solid_tile(ppu: &mut Ppu, tile: usize, index: u8) {
        let lo = if index & 1 != 0 { 0xFF } else { 0 };
        let hi = if index & 2 != 0 { 0xFF } else { 0 };
        for row in 0..8 {
            ppu.vram[tile * 16 + row * 2] = lo;
            ppu.vram[tile * 16 + row * 2 + 1] = hi;
        }
    }

    fn pixel(ppu: &Ppu, x: usize, y: usize) -> Color {
        let i = (y * SCREEN_WIDTH + x) * 4;
        Color::new_rgba(ppu.back[i], ppu.back[i + 1], ppu.back[i + 2], ppu.back[i + 3])
    }

    #[test]
    fn bitplanes_combine_into_color_index() {
        assert_eq!(tile_pixel(0b1000_0000, 0b1000_0000, 0), 3);
        assert_eq!(tile_pixel(0b0100_0000, 0, 1), 1);
        assert_eq!(tile_pixel(0, 0b0000_0001, 7), 2);
        assert_eq!(shade(0xE4, 2), 2);
        assert_eq!(shade(0x1B, 0), 3);
    }

    #[test]
    fn background_uses_scroll_and_palette() {
        let mut ppu = ppu();
        solid_tile(&mut ppu, 1, 3);
        // Map entry (row 0, column 1) points at the black tile.
        ppu.vram[0x1801] = 1;
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 7, 0), Color::WHITE);
        assert_eq!(pixel(&ppu, 8, 0), Color::BLACK);

        ppu.scx = 4;
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 4, 0), Color::BLACK);
        assert_eq!(pixel(&ppu, 12, 0), Color::WHITE);
    }

    #[test]
    fn signed_tile_addressing() {
        let mut ppu = ppu();
        ppu.lcdc.remove(Lcdc::TILE_DATA);
        // Tile 0xFF sits just below 0x9000.
        solid_tile(&mut ppu, 0xFF, 2);
        ppu.vram[0x1800] = 0xFF;
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 0, 0), Color::DARK_GRAY);
    }

    #[test]
    fn disabled_background_is_white() {
        let mut ppu = ppu();
        solid_tile(&mut ppu, 0, 3);
        ppu.lcdc.remove(Lcdc::BG_ENABLE);
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 0, 0), Color::WHITE);
    }

    #[test]
    fn window_starts_at_wx_minus_seven() {
        let mut ppu = ppu();
        ppu.lcdc.insert(Lcdc::WINDOW_ENABLE | Lcdc::WINDOW_MAP);
        solid_tile(&mut ppu, 2, 3);
        ppu.vram[0x1C00..0x1C20].fill(2);
        ppu.wx = 27;
        ppu.wy = 0;
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 19, 0), Color::WHITE);
        assert_eq!(pixel(&ppu, 20, 0), Color::BLACK);
        assert_eq!(ppu.window_line, 1);
    }

    #[test]
    fn window_needs_background_enable() {
        let mut ppu = ppu();
        ppu.lcdc.insert(Lcdc::WINDOW_ENABLE | Lcdc::WINDOW_MAP);
        ppu.lcdc.remove(Lcdc::BG_ENABLE);
        solid_tile(&mut ppu, 2, 3);
        ppu.vram[0x1C00..0x1C20].fill(2);
        ppu.wx = 7;
        ppu.wy = 0;
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 0, 0), Color::WHITE);
        assert_eq!(pixel(&ppu, 100, 0), Color::WHITE);
        assert_eq!(ppu.window_line, 0);
    }

    #[test]
    fn window_below_wy_is_skipped() {
        let mut ppu = ppu();
        ppu.lcdc.insert(Lcdc::WINDOW_ENABLE);
        ppu.wy = 10;
        ppu.wx = 7;
        ppu.render_scanline();
        assert_eq!(ppu.window_line, 0);
    }

    #[test]
    fn sprites_are_transparent_on_index_zero_and_clip_left() {
        let mut ppu = ppu();
        // Left half of tile 4 is color 1, right half transparent.
        for row in 0..8 {
            ppu.vram[4 * 16 + row * 2] = 0xF0;
        }
        ppu.oam[0..4].copy_from_slice(&[16, 4, 4, 0]);
        ppu.scan_oam();
        ppu.render_scanline();
        // Columns -4..-1 are clipped; 0..3 are transparent.
        for x in 0..4 {
            assert_eq!(pixel(&ppu, x, 0), Color::WHITE, "x={x}");
        }
    }

    #[test]
    fn sprite_flips_and_second_palette() {
        let mut ppu = ppu();
        for row in 0..8 {
            ppu.vram[4 * 16 + row * 2] = 0x80;
        }
        ppu.oam[0..4].copy_from_slice(&[16, 8, 4, 0x30]);
        ppu.scan_oam();
        ppu.render_scanline();
        // X-flipped: the single opaque column lands on the right edge.
        assert_eq!(pixel(&ppu, 0, 0), Color::WHITE);
        assert_eq!(pixel(&ppu, 7, 0), Color::DARK_GRAY);
    }

    #[test]
    fn behind_bg_sprite_shows_only_over_color_zero() {
        let mut ppu = ppu();
        solid_tile(&mut ppu, 4, 3);
        solid_tile(&mut ppu, 1, 1);
        ppu.vram[0x1801] = 1;
        ppu.oam[0..4].copy_from_slice(&[16, 12, 4, 0x80]);
        ppu.scan_oam();
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 4, 0), Color::BLACK);
        assert_eq!(pixel(&ppu, 8, 0), Color::LIGHT_GRAY);
    }

    #[test]
    fn lower_x_sprite_wins_overlap() {
        let mut ppu = ppu();
        solid_tile(&mut ppu, 4, 1);
        solid_tile(&mut ppu, 5, 3);
        ppu.oam[0..4].copy_from_slice(&[16, 12, 4, 0]);
        ppu.oam[4..8].copy_from_slice(&[16, 10, 5, 0]);
        ppu.scan_oam();
        ppu.render_scanline();
        assert_eq!(pixel(&ppu, 4, 0), Color::BLACK);
        assert_eq!(pixel(&ppu, 10, 0), Color::LIGHT_GRAY);
    }
}
