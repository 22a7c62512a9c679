use bitflags::bitflags;

use super::{Lcdc, Ppu};

pub(super) const MAX_SPRITES_PER_LINE: usize = 10;
const OAM_ENTRIES: usize = 40;

bitflags! {
    /// OAM attribute byte.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(super) struct SpriteFlags: u8 {
        const BEHIND_BG = 0b1000_0000;
        const Y_FLIP = 0b0100_0000;
        const X_FLIP = 0b0010_0000;
        const PALETTE = 0b0001_0000;
    }
}

/// One OAM entry; `y` and `x` are stored with their +16/+8 bias.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Sprite {
    pub(super) y: u8,
    pub(super) x: u8,
    pub(super) tile: u8,
    pub(super) flags: SpriteFlags,
}

impl Sprite {
    fn from_oam(entry: &[u8]) -> Self {
        Self {
            y: entry[0],
            x: entry[1],
            tile: entry[2],
            flags: SpriteFlags::from_bits_truncate(entry[3]),
        }
    }
}

impl Ppu {
    #[inline]
    pub(super) fn sprite_height(&self) -> u8 {
        if self.lcdc.contains(Lcdc::OBJ_SIZE) {
            16
        } else {
            8
        }
    }

    /// Select up to ten sprites covering LY, in OAM order, then stable-sort
    /// by X so that the first entry wins overlapping pixels.
    pub(super) fn scan_oam(&mut self) {
        let height = self.sprite_height() as i16;
        let ly = self.ly as i16;

        self.sprites.clear();
        for entry in self.oam.chunks_exact(4).take(OAM_ENTRIES) {
            let top = entry[0] as i16 - 16;
            if (top..top + height).contains(&ly) {
                self.sprites.push(Sprite::from_oam(entry));
                if self.sprites.len() == MAX_SPRITES_PER_LINE {
                    break;
                }
            }
        }
        self.sprites.sort_by_key(|sprite| sprite.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::video::Palette;

    fn sprite(ppu: &mut Ppu, index: usize, y: u8, x: u8) {
        ppu.oam[index * 4..index * 4 + 4].copy_from_slice(&[y, x, index as u8, 0]);
    }

    #[test]
    fn scan_keeps_ten_sprites_sorted_by_x() {
        let mut ppu = Ppu::new(Palette::default());
        for i in 0..12 {
            sprite(&mut ppu, i, 16, 100 - i as u8);
        }
        ppu.scan_oam();
        assert_eq!(ppu.sprites.len(), MAX_SPRITES_PER_LINE);
        assert_eq!(ppu.sprites[0].x, 91);
        assert_eq!(ppu.sprites[9].x, 100);
    }

    #[test]
    fn equal_x_keeps_oam_order() {
        let mut ppu = Ppu::new(Palette::default());
        sprite(&mut ppu, 0, 16, 50);
        sprite(&mut ppu, 1, 16, 20);
        sprite(&mut ppu, 2, 16, 50);
        ppu.scan_oam();
        let tiles: Vec<u8> = ppu.sprites.iter().map(|s| s.tile).collect();
        assert_eq!(tiles, vec![1, 0, 2]);
    }

    #[test]
    fn tall_sprites_cover_sixteen_lines() {
        let mut ppu = Ppu::new(Palette::default());
        sprite(&mut ppu, 0, 16, 8);
        ppu.ly = 12;
        ppu.scan_oam();
        assert!(ppu.sprites.is_empty());

        ppu.lcdc.insert(Lcdc::OBJ_SIZE);
        ppu.scan_oam();
        assert_eq!(ppu.sprites.len(), 1);
    }
}
