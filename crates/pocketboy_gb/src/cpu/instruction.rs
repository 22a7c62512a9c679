use std::fmt;

use super::regs::{Reg16, Reg8};

/// Branch condition, in opcode field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    NZ = 0,
    Z = 1,
    NC = 2,
    C = 3,
}

impl Condition {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Condition::NZ,
            1 => Condition::Z,
            2 => Condition::NC,
            _ => Condition::C,
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Address operand of the accumulator load/store forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relative {
    /// `(0xFF00 + C)`
    C,
    /// `(0xFF00 + n)`
    Immediate8(u8),
    /// `(nn)`
    Immediate16(u16),
}

/// One decoded LR35902 instruction.
///
/// Each variant carries exactly the operands its semantics need. Register
/// operands that may name memory use [`Reg8::M`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    // 8-bit loads
    Move { dst: Reg8, src: Reg8 },
    MoveImmediate { dst: Reg8, value: u8 },
    /// `LD A,(BC)` / `LD A,(DE)`
    LoadIndirect(Reg16),
    /// `LD (BC),A` / `LD (DE),A`
    StoreIndirect(Reg16),
    LoadRelative(Relative),
    StoreRelative(Relative),
    /// `LD A,(HL+)`
    LoadIncrement,
    /// `LD A,(HL-)`
    LoadDecrement,
    /// `LD (HL+),A`
    StoreIncrement,
    /// `LD (HL-),A`
    StoreDecrement,

    // 16-bit loads
    LoadRegisterPairImmediate { dst: Reg16, value: u16 },
    HlToSp,
    Push(Reg16),
    Pop(Reg16),
    LoadHlSp(i8),
    StoreSp(u16),

    // 8-bit arithmetic and logic
    Add { src: Reg8, carry: bool },
    AddImmediate { value: u8, carry: bool },
    Subtract { src: Reg8, carry: bool },
    SubtractImmediate { value: u8, carry: bool },
    And(Reg8),
    AndImmediate(u8),
    Or(Reg8),
    OrImmediate(u8),
    Xor(Reg8),
    XorImmediate(u8),
    Cmp(Reg8),
    CmpImmediate(u8),
    Increment(Reg8),
    Decrement(Reg8),

    // 16-bit arithmetic
    AddPair(Reg16),
    AddSp(i8),
    IncrementPair(Reg16),
    DecrementPair(Reg16),

    // Rotates, shifts and bit operations
    Rlca,
    Rrca,
    Rla,
    Rra,
    Rlc(Reg8),
    Rrc(Reg8),
    Rl(Reg8),
    Rr(Reg8),
    ShiftLeft(Reg8),
    ShiftRight(Reg8),
    ShiftRightArith(Reg8),
    Swap(Reg8),
    Bit { bit: u8, reg: Reg8 },
    Set { bit: u8, reg: Reg8 },
    Reset { bit: u8, reg: Reg8 },

    // Control flow
    JumpImmediate(u16),
    JumpImmediateCond(Condition, u16),
    /// Displacement relative to the address after the instruction.
    JumpRelative(i8),
    JumpRelativeCond(Condition, i8),
    /// `JP (HL)`
    JumpMemory,
    Call(u16),
    CallCond(Condition, u16),
    Return,
    ReturnCond(Condition),
    ReturnFromInterrupt,
    /// Restart; carries the target address (`t << 3`).
    Rst(u8),

    // Miscellaneous
    Daa,
    Complement,
    Ccf,
    Scf,
    EnableInterrupt,
    DisableInterrupt,
    Nop,
    Stop,
    Halt,
    InvalidOpcode(u8),
}

impl Instruction {
    /// Canonical byte encoding.
    pub fn encode(&self) -> Vec<u8> {
        use Instruction::*;

        let r = |reg: Reg8| reg.bits();
        let word = |op: u8, value: u16| {
            let [lo, hi] = value.to_le_bytes();
            vec![op, lo, hi]
        };
        let alu = |group: u8, src: Reg8| vec![0x80 | (group << 3) | r(src)];
        let alu_imm = |group: u8, value: u8| vec![0xC6 | (group << 3), value];
        let cb = |op: u8| vec![0xCB, op];

        match *self {
            Move { dst, src } => vec![0x40 | (r(dst) << 3) | r(src)],
            MoveImmediate { dst, value } => vec![0x06 | (r(dst) << 3), value],
            LoadIndirect(pair) => vec![0x0A | (pair.bits() << 4)],
            StoreIndirect(pair) => vec![0x02 | (pair.bits() << 4)],
            LoadRelative(Relative::C) => vec![0xF2],
            LoadRelative(Relative::Immediate8(n)) => vec![0xF0, n],
            LoadRelative(Relative::Immediate16(nn)) => word(0xFA, nn),
            StoreRelative(Relative::C) => vec![0xE2],
            StoreRelative(Relative::Immediate8(n)) => vec![0xE0, n],
            StoreRelative(Relative::Immediate16(nn)) => word(0xEA, nn),
            LoadIncrement => vec![0x2A],
            LoadDecrement => vec![0x3A],
            StoreIncrement => vec![0x22],
            StoreDecrement => vec![0x32],

            LoadRegisterPairImmediate { dst, value } => word(0x01 | (dst.bits() << 4), value),
            HlToSp => vec![0xF9],
            Push(pair) => vec![0xC5 | (pair.bits() << 4)],
            Pop(pair) => vec![0xC1 | (pair.bits() << 4)],
            LoadHlSp(e) => vec![0xF8, e as u8],
            StoreSp(nn) => word(0x08, nn),

            Add { src, carry } => alu(carry as u8, src),
            AddImmediate { value, carry } => alu_imm(carry as u8, value),
            Subtract { src, carry } => alu(2 | carry as u8, src),
            SubtractImmediate { value, carry } => alu_imm(2 | carry as u8, value),
            And(src) => alu(4, src),
            AndImmediate(n) => alu_imm(4, n),
            Xor(src) => alu(5, src),
            XorImmediate(n) => alu_imm(5, n),
            Or(src) => alu(6, src),
            OrImmediate(n) => alu_imm(6, n),
            Cmp(src) => alu(7, src),
            CmpImmediate(n) => alu_imm(7, n),
            Increment(reg) => vec![0x04 | (r(reg) << 3)],
            Decrement(reg) => vec![0x05 | (r(reg) << 3)],

            AddPair(pair) => vec![0x09 | (pair.bits() << 4)],
            AddSp(e) => vec![0xE8, e as u8],
            IncrementPair(pair) => vec![0x03 | (pair.bits() << 4)],
            DecrementPair(pair) => vec![0x0B | (pair.bits() << 4)],

            Rlca => vec![0x07],
            Rrca => vec![0x0F],
            Rla => vec![0x17],
            Rra => vec![0x1F],
            Rlc(reg) => cb(r(reg)),
            Rrc(reg) => cb(0x08 | r(reg)),
            Rl(reg) => cb(0x10 | r(reg)),
            Rr(reg) => cb(0x18 | r(reg)),
            ShiftLeft(reg) => cb(0x20 | r(reg)),
            ShiftRightArith(reg) => cb(0x28 | r(reg)),
            Swap(reg) => cb(0x30 | r(reg)),
            ShiftRight(reg) => cb(0x38 | r(reg)),
            Bit { bit, reg } => cb(0x40 | ((bit & 7) << 3) | r(reg)),
            Reset { bit, reg } => cb(0x80 | ((bit & 7) << 3) | r(reg)),
            Set { bit, reg } => cb(0xC0 | ((bit & 7) << 3) | r(reg)),

            JumpImmediate(nn) => word(0xC3, nn),
            JumpImmediateCond(cc, nn) => word(0xC2 | (cc.bits() << 3), nn),
            JumpRelative(e) => vec![0x18, e as u8],
            JumpRelativeCond(cc, e) => vec![0x20 | (cc.bits() << 3), e as u8],
            JumpMemory => vec![0xE9],
            Call(nn) => word(0xCD, nn),
            CallCond(cc, nn) => word(0xC4 | (cc.bits() << 3), nn),
            Return => vec![0xC9],
            ReturnCond(cc) => vec![0xC0 | (cc.bits() << 3)],
            ReturnFromInterrupt => vec![0xD9],
            Rst(target) => vec![0xC7 | (target & 0x38)],

            Daa => vec![0x27],
            Complement => vec![0x2F],
            Ccf => vec![0x3F],
            Scf => vec![0x37],
            EnableInterrupt => vec![0xFB],
            DisableInterrupt => vec![0xF3],
            Nop => vec![0x00],
            Stop => vec![0x10, 0x00],
            Halt => vec![0x76],
            InvalidOpcode(op) => vec![op],
        }
    }
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
            Reg8::M => "(HL)",
            Reg8::A => "A",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => "HL",
            Reg16::SP => "SP",
            Reg16::AF => "AF",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::NZ => "NZ",
            Condition::Z => "Z",
            Condition::NC => "NC",
            Condition::C => "C",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Relative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relative::C => f.write_str("(C)"),
            Relative::Immediate8(n) => write!(f, "($FF00+${n:02X})"),
            Relative::Immediate16(nn) => write!(f, "(${nn:04X})"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Move { dst, src } => write!(f, "LD {dst},{src}"),
            MoveImmediate { dst, value } => write!(f, "LD {dst},${value:02X}"),
            LoadIndirect(pair) => write!(f, "LD A,({pair})"),
            StoreIndirect(pair) => write!(f, "LD ({pair}),A"),
            LoadRelative(rel) => write!(f, "LD A,{rel}"),
            StoreRelative(rel) => write!(f, "LD {rel},A"),
            LoadIncrement => f.write_str("LD A,(HL+)"),
            LoadDecrement => f.write_str("LD A,(HL-)"),
            StoreIncrement => f.write_str("LD (HL+),A"),
            StoreDecrement => f.write_str("LD (HL-),A"),
            LoadRegisterPairImmediate { dst, value } => write!(f, "LD {dst},${value:04X}"),
            HlToSp => f.write_str("LD SP,HL"),
            Push(pair) => write!(f, "PUSH {pair}"),
            Pop(pair) => write!(f, "POP {pair}"),
            LoadHlSp(e) => write!(f, "LD HL,SP{e:+}"),
            StoreSp(nn) => write!(f, "LD (${nn:04X}),SP"),
            Add { src, carry } => write!(f, "{} A,{src}", if carry { "ADC" } else { "ADD" }),
            AddImmediate { value, carry } => {
                write!(f, "{} A,${value:02X}", if carry { "ADC" } else { "ADD" })
            }
            Subtract { src, carry } => write!(f, "{} A,{src}", if carry { "SBC" } else { "SUB" }),
            SubtractImmediate { value, carry } => {
                write!(f, "{} A,${value:02X}", if carry { "SBC" } else { "SUB" })
            }
            And(src) => write!(f, "AND {src}"),
            AndImmediate(n) => write!(f, "AND ${n:02X}"),
            Or(src) => write!(f, "OR {src}"),
            OrImmediate(n) => write!(f, "OR ${n:02X}"),
            Xor(src) => write!(f, "XOR {src}"),
            XorImmediate(n) => write!(f, "XOR ${n:02X}"),
            Cmp(src) => write!(f, "CP {src}"),
            CmpImmediate(n) => write!(f, "CP ${n:02X}"),
            Increment(reg) => write!(f, "INC {reg}"),
            Decrement(reg) => write!(f, "DEC {reg}"),
            AddPair(pair) => write!(f, "ADD HL,{pair}"),
            AddSp(e) => write!(f, "ADD SP,{e}"),
            IncrementPair(pair) => write!(f, "INC {pair}"),
            DecrementPair(pair) => write!(f, "DEC {pair}"),
            Rlca => f.write_str("RLCA"),
            Rrca => f.write_str("RRCA"),
            Rla => f.write_str("RLA"),
            Rra => f.write_str("RRA"),
            Rlc(reg) => write!(f, "RLC {reg}"),
            Rrc(reg) => write!(f, "RRC {reg}"),
            Rl(reg) => write!(f, "RL {reg}"),
            Rr(reg) => write!(f, "RR {reg}"),
            ShiftLeft(reg) => write!(f, "SLA {reg}"),
            ShiftRight(reg) => write!(f, "SRL {reg}"),
            ShiftRightArith(reg) => write!(f, "SRA {reg}"),
            Swap(reg) => write!(f, "SWAP {reg}"),
            Bit { bit, reg } => write!(f, "BIT {bit},{reg}"),
            Set { bit, reg } => write!(f, "SET {bit},{reg}"),
            Reset { bit, reg } => write!(f, "RES {bit},{reg}"),
            JumpImmediate(nn) => write!(f, "JP ${nn:04X}"),
            JumpImmediateCond(cc, nn) => write!(f, "JP {cc},${nn:04X}"),
            JumpRelative(e) => write!(f, "JR {e}"),
            JumpRelativeCond(cc, e) => write!(f, "JR {cc},{e}"),
            JumpMemory => f.write_str("JP (HL)"),
            Call(nn) => write!(f, "CALL ${nn:04X}"),
            CallCond(cc, nn) => write!(f, "CALL {cc},${nn:04X}"),
            Return => f.write_str("RET"),
            ReturnCond(cc) => write!(f, "RET {cc}"),
            ReturnFromInterrupt => f.write_str("RETI"),
            Rst(target) => write!(f, "RST ${target:02X}"),
            Daa => f.write_str("DAA"),
            Complement => f.write_str("CPL"),
            Ccf => f.write_str("CCF"),
            Scf => f.write_str("SCF"),
            EnableInterrupt => f.write_str("EI"),
            DisableInterrupt => f.write_str("DI"),
            Nop => f.write_str("NOP"),
            Stop => f.write_str("STOP"),
            Halt => f.write_str("HALT"),
            InvalidOpcode(op) => write!(f, "DB ${op:02X}"),
        }
    }
}
