use crate::Result;

mod header;
mod mbc1;
mod mbc2;
mod rom_only;

pub use header::{CartridgeHeader, CartridgeKind};
use mbc1::Mbc1;
use mbc2::Mbc2;
use rom_only::RomOnly;

pub(super) const ROM_BANK_SIZE: usize = 0x4000;
pub(super) const RAM_BANK_SIZE: usize = 0x2000;

/// Banking controller on the cartridge.
///
/// The MMU forwards every write to 0x0000-0x7FFF here and asks the mapper
/// to translate CPU addresses into offsets of the ROM image and the
/// external RAM. Offsets may exceed the backing storage; the cartridge
/// wraps them modulo its size.
pub(super) trait Mapper {
    fn handle_write(&mut self, addr: u16, value: u8);
    fn translate_rom(&self, addr: u16) -> usize;
    /// `None` while external RAM is disabled.
    fn translate_ram(&self, addr: u16) -> Option<usize>;
    /// Bits actually stored per RAM cell; the rest read back as 1.
    fn ram_mask(&self) -> u8 {
        0xFF
    }
}

/// ROM image, external RAM and the mapper that banks them.
pub(crate) struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    pub(crate) fn from_rom(image: &[u8]) -> Result<Self> {
        let header = CartridgeHeader::parse(image)?;

        let mut rom = image.to_vec();
        if rom.len() < header.rom_size {
            rom.resize(header.rom_size, 0xFF);
        }
        let rom_banks = rom.len().div_ceil(ROM_BANK_SIZE);

        let (mapper, ram_size): (Box<dyn Mapper>, usize) = match header.kind {
            CartridgeKind::RomOnly => (Box::new(RomOnly), header.ram_size),
            CartridgeKind::Mbc1 => (
                Box::new(Mbc1::new(rom_banks, header.ram_size.div_ceil(RAM_BANK_SIZE))),
                header.ram_size,
            ),
            CartridgeKind::Mbc2 => (Box::new(Mbc2::new(rom_banks)), mbc2::RAM_SIZE),
        };

        log::info!(
            "GB cartridge: title={:?} type=0x{:02X} ({:?}) rom={}KiB ram={}B",
            header.title,
            header.cartridge_type,
            header.kind,
            rom.len() / 1024,
            ram_size,
        );
        if !header.checksum_valid {
            log::warn!(
                "GB cartridge: header checksum mismatch (stored 0x{:02X})",
                header.header_checksum
            );
        }

        Ok(Self {
            header,
            rom,
            ram: vec![0; ram_size],
            mapper,
        })
    }

    pub(crate) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub(crate) fn read_rom(&self, addr: u16) -> u8 {
        let offset = self.mapper.translate_rom(addr);
        self.rom[offset % self.rom.len()]
    }

    /// ROM is read-only; writes program the mapper.
    pub(crate) fn write_rom(&mut self, addr: u16, value: u8) {
        self.mapper.handle_write(addr, value);
    }

    pub(crate) fn read_ram(&self, addr: u16) -> u8 {
        match self.mapper.translate_ram(addr) {
            Some(offset) if !self.ram.is_empty() => {
                self.ram[offset % self.ram.len()] | !self.mapper.ram_mask()
            }
            _ => 0xFF,
        }
    }

    pub(crate) fn write_ram(&mut self, addr: u16, value: u8) {
        if let Some(offset) = self.mapper.translate_ram(addr) {
            if !self.ram.is_empty() {
                let len = self.ram.len();
                self.ram[offset % len] = value & self.mapper.ram_mask();
            }
        }
    }
}
