//! Small helpers for splitting and assembling bytes and words.

/// Compose a 16-bit word from its high and low bytes.
#[inline]
pub const fn merge(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

/// Split a 16-bit word into `(high, low)`.
#[inline]
pub const fn split(value: u16) -> (u8, u8) {
    ((value >> 8) as u8, value as u8)
}

/// Return `x` with bit `pos` forced to `bit`.
#[inline]
pub const fn set_bit(x: u8, pos: u8, bit: bool) -> u8 {
    let b = bit as u8;
    x ^ ((b.wrapping_neg() ^ x) & (1 << pos))
}

#[inline]
pub const fn test_bit(x: u8, pos: u8) -> bool {
    (x >> pos) & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_and_split_are_inverse() {
        assert_eq!(merge(0x12, 0x34), 0x1234);
        assert_eq!(split(0xBEEF), (0xBE, 0xEF));
        let (h, l) = split(0xA55A);
        assert_eq!(merge(h, l), 0xA55A);
    }

    #[test]
    fn set_bit_forces_value() {
        assert_eq!(set_bit(0b0000_0000, 3, true), 0b0000_1000);
        assert_eq!(set_bit(0b1111_1111, 7, false), 0b0111_1111);
        assert_eq!(set_bit(0b0000_1000, 3, true), 0b0000_1000);
        assert!(test_bit(0x80, 7));
        assert!(!test_bit(0x7F, 7));
    }
}
