use super::Mapper;

/// 32 KiB ROM with optional unbanked RAM (types 0x00, 0x08, 0x09).
pub(super) struct RomOnly;

impl Mapper for RomOnly {
    fn handle_write(&mut self, _addr: u16, _value: u8) {}

    fn translate_rom(&self, addr: u16) -> usize {
        addr as usize
    }

    fn translate_ram(&self, addr: u16) -> Option<usize> {
        Some((addr - 0xA000) as usize)
    }
}
