//! Pure arithmetic/logic operations.
//!
//! Every function returns the result together with the complete new flag
//! byte, so the executor only has to store both. Inputs are the operands and
//! (where the operation preserves or consumes flags) the current flags.

use super::flags::{
    add16_full_carry, add16_half_carry, add_full_carry, add_half_carry, sub_full_carry,
    sub_half_carry,
};
use super::regs::Flags;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// How the vacated bit is filled by a rotate or shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotateKind {
    /// The old carry enters; the evicted bit becomes the carry (RL/RR).
    ThroughCarry,
    /// The evicted bit enters and also becomes the carry (RLC/RRC).
    Circular,
    /// Left: zero enters. Right: the sign bit is kept (SLA/SRA).
    Arithmetic,
    /// Zero enters (SLA/SRL).
    Logical,
}

pub fn add(a: u8, b: u8, carry_in: bool) -> (u8, Flags) {
    let c = carry_in as u8;
    let result = a.wrapping_add(b).wrapping_add(c);
    let mut flags = Flags::zero(result);
    flags.set(Flags::H, add_half_carry(a, b, c));
    flags.set(Flags::C, add_full_carry(a, b, c));
    (result, flags)
}

pub fn sub(a: u8, b: u8, carry_in: bool) -> (u8, Flags) {
    let c = carry_in as u8;
    let result = a.wrapping_sub(b).wrapping_sub(c);
    let mut flags = Flags::zero(result) | Flags::N;
    flags.set(Flags::H, sub_half_carry(a, b, c));
    flags.set(Flags::C, sub_full_carry(a, b, c));
    (result, flags)
}

/// Compare: flags of `a - b`, the result is only informative.
#[inline]
pub fn cp(a: u8, b: u8) -> (u8, Flags) {
    sub(a, b, false)
}

#[inline]
pub fn and(a: u8, b: u8) -> (u8, Flags) {
    let result = a & b;
    (result, Flags::zero(result) | Flags::H)
}

#[inline]
pub fn or(a: u8, b: u8) -> (u8, Flags) {
    let result = a | b;
    (result, Flags::zero(result))
}

#[inline]
pub fn xor(a: u8, b: u8) -> (u8, Flags) {
    let result = a ^ b;
    (result, Flags::zero(result))
}

/// INC r8. C is carried over from `flags`.
pub fn inc(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_add(1);
    let mut out = Flags::zero(result) | (flags & Flags::C);
    out.set(Flags::H, add_half_carry(value, 1, 0));
    (result, out)
}

/// DEC r8. C is carried over from `flags`.
pub fn dec(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_sub(1);
    let mut out = Flags::zero(result) | Flags::N | (flags & Flags::C);
    out.set(Flags::H, sub_half_carry(value, 1, 0));
    (result, out)
}

/// ADD HL,rr. Z is carried over from `flags`.
pub fn add16(a: u16, b: u16, flags: Flags) -> (u16, Flags) {
    let mut out = flags & Flags::Z;
    out.set(Flags::H, add16_half_carry(a, b));
    out.set(Flags::C, add16_full_carry(a, b));
    (a.wrapping_add(b), out)
}

/// SP plus a signed displacement (ADD SP,e and LD HL,SP+e).
///
/// H and C come from the unsigned addition of the low byte of SP and the
/// raw displacement byte; Z and N are always clear.
pub fn add_sp(sp: u16, offset: i8) -> (u16, Flags) {
    let low = sp as u8;
    let raw = offset as u8;
    let mut flags = Flags::empty();
    flags.set(Flags::H, add_half_carry(low, raw, 0));
    flags.set(Flags::C, add_full_carry(low, raw, 0));
    (sp.wrapping_add(offset as i16 as u16), flags)
}

/// Shared rotate/shift helper. Z reflects the result; the accumulator
/// forms (RLCA and friends) clear it afterwards.
pub fn rotate(value: u8, direction: Direction, kind: RotateKind, carry_in: bool) -> (u8, Flags) {
    let (evicted, result) = match direction {
        Direction::Left => {
            let evicted = value & 0x80 != 0;
            let fill = match kind {
                RotateKind::ThroughCarry => carry_in as u8,
                RotateKind::Circular => evicted as u8,
                RotateKind::Arithmetic | RotateKind::Logical => 0,
            };
            (evicted, (value << 1) | fill)
        }
        Direction::Right => {
            let evicted = value & 0x01 != 0;
            let fill = match kind {
                RotateKind::ThroughCarry => (carry_in as u8) << 7,
                RotateKind::Circular => (evicted as u8) << 7,
                RotateKind::Arithmetic => value & 0x80,
                RotateKind::Logical => 0,
            };
            (evicted, (value >> 1) | fill)
        }
    };
    let mut flags = Flags::zero(result);
    flags.set(Flags::C, evicted);
    (result, flags)
}

#[inline]
pub fn swap(value: u8) -> (u8, Flags) {
    let result = value.rotate_left(4);
    (result, Flags::zero(result))
}

/// BIT n,r: only flags change. C is carried over.
#[inline]
pub fn bit(value: u8, n: u8, flags: Flags) -> Flags {
    let mut out = Flags::H | (flags & Flags::C);
    out.set(Flags::Z, value & (1 << n) == 0);
    out
}

/// Decimal adjust accumulator after BCD addition/subtraction.
///
/// Uses C, H, N and A to compute a correction value. N is kept, H is
/// cleared and C may become set.
pub fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let mut adjust: u8 = if flags.contains(Flags::C) { 0x60 } else { 0x00 };
    if flags.contains(Flags::H) {
        adjust |= 0x06;
    }

    let result = if !flags.contains(Flags::N) {
        // After an addition.
        if a & 0x0F > 0x09 {
            adjust |= 0x06;
        }
        if a > 0x99 {
            adjust |= 0x60;
        }
        a.wrapping_add(adjust)
    } else {
        a.wrapping_sub(adjust)
    };

    let mut out = Flags::zero(result) | (flags & Flags::N);
    out.set(Flags::C, adjust >= 0x60);
    (result, out)
}

#[inline]
pub fn cpl(a: u8, flags: Flags) -> (u8, Flags) {
    (!a, (flags & (Flags::Z | Flags::C)) | Flags::N | Flags::H)
}

#[inline]
pub fn scf(flags: Flags) -> Flags {
    (flags & Flags::Z) | Flags::C
}

#[inline]
pub fn ccf(flags: Flags) -> Flags {
    (flags & Flags::Z) | ((flags & Flags::C) ^ Flags::C)
}
