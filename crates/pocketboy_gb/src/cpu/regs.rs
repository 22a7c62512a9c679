use bitflags::bitflags;

use crate::bits::{merge, split};

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        const Z = 0x80;
        const N = 0x40;
        const H = 0x20;
        const C = 0x10;
    }
}

impl Flags {
    /// Flags with only `Z` decided by `result`.
    #[inline]
    pub fn zero(result: u8) -> Self {
        let mut flags = Flags::empty();
        flags.set(Flags::Z, result == 0);
        flags
    }

    #[inline]
    pub fn carry_bit(self) -> u8 {
        self.contains(Flags::C) as u8
    }
}

/// 8-bit operand tag, in opcode field order.
///
/// `M` is not a register: it names the byte at address HL, so every access
/// through it is a bus cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg8 {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    M = 6,
    A = 7,
}

impl Reg8 {
    pub const ALL: [Reg8; 8] = [
        Reg8::B,
        Reg8::C,
        Reg8::D,
        Reg8::E,
        Reg8::H,
        Reg8::L,
        Reg8::M,
        Reg8::A,
    ];

    /// Decode a 3-bit register field.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// 16-bit operand tag.
///
/// Opcodes reuse the same 2-bit slot for SP (`dd` encodings such as
/// `LD rr,nn`) and AF (`qq` encodings used by PUSH/POP).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
    AF,
}

impl Reg16 {
    /// Decode a `dd` field: BC, DE, HL, SP.
    #[inline]
    pub fn from_dd(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::SP,
        }
    }

    /// Decode a `qq` field: BC, DE, HL, AF.
    #[inline]
    pub fn from_qq(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::AF,
        }
    }

    /// 2-bit field for either encoding; AF and SP share slot 3.
    #[inline]
    pub fn bits(self) -> u8 {
        match self {
            Reg16::BC => 0,
            Reg16::DE => 1,
            Reg16::HL => 2,
            Reg16::SP | Reg16::AF => 3,
        }
    }
}

/// Registers for the Game Boy CPU (LR35902).
///
/// The core is Z80-like with an 8-bit ALU and a 16-bit address space.
/// SP and PC are stored as words, everything else as bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: Flags,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// DMG register state right after the boot ROM hands over at 0x0100.
    pub fn post_boot() -> Self {
        Self {
            a: 0x01,
            f: Flags::from_bits_truncate(0xB0),
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        }
    }

    #[inline]
    pub fn af(&self) -> u16 {
        merge(self.a, self.f.bits())
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let (a, f) = split(value);
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = Flags::from_bits_truncate(f);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        merge(self.b, self.c)
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        (self.b, self.c) = split(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        merge(self.d, self.e)
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        (self.d, self.e) = split(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        merge(self.h, self.l)
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        (self.h, self.l) = split(value);
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
            Reg16::AF => self.af(),
        }
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
            Reg16::AF => self.set_af(value),
        }
    }

    /// Read a plain 8-bit register. `M` has no backing storage and needs
    /// the bus, so callers route it through the CPU instead.
    pub(crate) fn get8(&self, reg: Reg8) -> Option<u8> {
        Some(match reg {
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
            Reg8::A => self.a,
            Reg8::M => return None,
        })
    }

    /// Write a plain 8-bit register; returns `false` for `M`.
    pub(crate) fn set8(&mut self, reg: Reg8, value: u8) -> bool {
        match reg {
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.h = value,
            Reg8::L => self.l = value,
            Reg8::A => self.a = value,
            Reg8::M => return false,
        }
        true
    }
}
