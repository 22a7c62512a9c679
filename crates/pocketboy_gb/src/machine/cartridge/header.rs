use crate::{Error, Result};

const TITLE: std::ops::Range<usize> = 0x134..0x144;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;
const HEADER_CHECKSUM: usize = 0x14D;
const HEADER_END: usize = 0x150;

/// Banking controller family named by header byte 0x147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartridgeKind {
    RomOnly,
    Mbc1,
    Mbc2,
}

impl CartridgeKind {
    fn from_code(code: u8) -> Result<Self> {
        match code {
            0x00 | 0x08 | 0x09 => Ok(CartridgeKind::RomOnly),
            0x01..=0x03 => Ok(CartridgeKind::Mbc1),
            0x05 | 0x06 => Ok(CartridgeKind::Mbc2),
            code => Err(Error::UnsupportedCartridge { code }),
        }
    }
}

/// Parsed cartridge header (0x0100-0x014F).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub kind: CartridgeKind,
    /// Declared ROM size in bytes.
    pub rom_size: usize,
    /// Declared external RAM size in bytes.
    pub ram_size: usize,
    pub header_checksum: u8,
    pub checksum_valid: bool,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(Error::RomTooSmall { len: rom.len() });
        }

        let cartridge_type = rom[CARTRIDGE_TYPE];
        let kind = CartridgeKind::from_code(cartridge_type)?;

        let rom_code = rom[ROM_SIZE];
        if rom_code > 8 {
            return Err(Error::InvalidRomSize { code: rom_code });
        }
        let rom_size = (32 * 1024) << rom_code;

        let ram_code = rom[RAM_SIZE];
        let ram_size = match ram_code {
            0 => 0,
            1 => 2 * 1024,
            2 => 8 * 1024,
            3 => 32 * 1024,
            4 => 128 * 1024,
            5 => 64 * 1024,
            code => return Err(Error::InvalidRamSize { code }),
        };

        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string();

        let header_checksum = rom[HEADER_CHECKSUM];
        Ok(Self {
            title,
            cartridge_type,
            kind,
            rom_size,
            ram_size,
            header_checksum,
            checksum_valid: checksum(rom) == header_checksum,
        })
    }
}

/// Header checksum over 0x134..=0x14C as computed by the boot ROM.
pub(super) fn checksum(rom: &[u8]) -> u8 {
    rom[0x134..HEADER_CHECKSUM]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(cartridge_type: u8, rom_code: u8, ram_code: u8) -> Vec<u8> {
        let mut rom = vec![0; 0x8000];
        rom[0x134..0x139].copy_from_slice(b"TETRA");
        rom[CARTRIDGE_TYPE] = cartridge_type;
        rom[ROM_SIZE] = rom_code;
        rom[RAM_SIZE] = ram_code;
        rom[HEADER_CHECKSUM] = checksum(&rom);
        rom
    }

    #[test]
    fn parses_mbc1_with_ram() {
        let header = CartridgeHeader::parse(&image(0x03, 5, 3)).unwrap();
        assert_eq!(header.title, "TETRA");
        assert_eq!(header.kind, CartridgeKind::Mbc1);
        assert_eq!(header.rom_size, 1024 * 1024);
        assert_eq!(header.ram_size, 32 * 1024);
        assert!(header.checksum_valid);
    }

    #[test]
    fn rom_only_variants() {
        for code in [0x00, 0x08, 0x09] {
            let header = CartridgeHeader::parse(&image(code, 0, 0)).unwrap();
            assert_eq!(header.kind, CartridgeKind::RomOnly);
        }
        assert_eq!(
            CartridgeHeader::parse(&image(0x06, 1, 0)).unwrap().kind,
            CartridgeKind::Mbc2
        );
    }

    #[test]
    fn mbc3_and_unknown_types_are_rejected() {
        for code in [0x0F, 0x10, 0x13, 0x19, 0xFF] {
            assert!(matches!(
                CartridgeHeader::parse(&image(code, 0, 0)),
                Err(Error::UnsupportedCartridge { code: c }) if c == code
            ));
        }
    }

    #[test]
    fn rejects_bad_sizes_and_short_images() {
        assert!(matches!(
            CartridgeHeader::parse(&image(0x01, 9, 0)),
            Err(Error::InvalidRomSize { code: 9 })
        ));
        assert!(matches!(
            CartridgeHeader::parse(&image(0x01, 0, 6)),
            Err(Error::InvalidRamSize { code: 6 })
        ));
        assert!(matches!(
            CartridgeHeader::parse(&[0; 0x100]),
            Err(Error::RomTooSmall { len: 0x100 })
        ));
    }

    #[test]
    fn detects_checksum_mismatch() {
        let mut rom = image(0x00, 0, 0);
        rom[HEADER_CHECKSUM] ^= 0xFF;
        assert!(!CartridgeHeader::parse(&rom).unwrap().checksum_valid);
    }
}
