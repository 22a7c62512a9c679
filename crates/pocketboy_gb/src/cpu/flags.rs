//! Carry detection shared by the 8- and 16-bit arithmetic paths.
//!
//! `c` is the incoming carry (0 or 1).

#[inline]
pub fn add_half_carry(a: u8, b: u8, c: u8) -> bool {
    (a & 0x0F) + (b & 0x0F) + (c & 0x0F) > 0x0F
}

#[inline]
pub fn add_full_carry(a: u8, b: u8, c: u8) -> bool {
    a as u16 + b as u16 + c as u16 > 0xFF
}

#[inline]
pub fn sub_half_carry(a: u8, b: u8, c: u8) -> bool {
    ((a & 0x0F) as i16) - ((b & 0x0F) as i16) - (c as i16) < 0
}

#[inline]
pub fn sub_full_carry(a: u8, b: u8, c: u8) -> bool {
    (a as i16) - (b as i16) - (c as i16) < 0
}

/// Carry out of bit 11.
#[inline]
pub fn add16_half_carry(a: u16, b: u16) -> bool {
    (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF
}

/// Carry out of bit 15.
#[inline]
pub fn add16_full_carry(a: u16, b: u16) -> bool {
    a as u32 + b as u32 > 0xFFFF
}
