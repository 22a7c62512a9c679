//! Opcode stream to [`Instruction`] decoding.
//!
//! Decoding walks a prioritised list of `(mask, pattern)` entries and fires
//! the first one where `opcode & mask == pattern`. Exact opcodes come before
//! the wide register patterns so that e.g. HALT (0x76) is not taken for
//! `LD (HL),(HL)`. The 0xCB prefix switches to a second table.

use super::instruction::{Condition, Instruction, Relative};
use super::regs::{Reg16, Reg8};

type Handler = fn(u8, &mut dyn Iterator<Item = u8>) -> Option<Instruction>;

struct Pattern {
    mask: u8,
    value: u8,
    decode: Handler,
}

const fn exact(value: u8, decode: Handler) -> Pattern {
    Pattern {
        mask: 0xFF,
        value,
        decode,
    }
}

const fn group(mask: u8, value: u8, decode: Handler) -> Pattern {
    Pattern {
        mask,
        value,
        decode,
    }
}

static PRIMARY: &[Pattern] = &[
    exact(0xCB, prefixed),
    exact(0x00, fixed),
    exact(0x08, fixed),
    exact(0x10, fixed),
    exact(0x18, fixed),
    exact(0x76, fixed),
    exact(0x07, fixed),
    exact(0x0F, fixed),
    exact(0x17, fixed),
    exact(0x1F, fixed),
    exact(0x27, fixed),
    exact(0x2F, fixed),
    exact(0x37, fixed),
    exact(0x3F, fixed),
    exact(0x22, fixed),
    exact(0x2A, fixed),
    exact(0x32, fixed),
    exact(0x3A, fixed),
    exact(0xC3, fixed),
    exact(0xC9, fixed),
    exact(0xCD, fixed),
    exact(0xD9, fixed),
    exact(0xE0, fixed),
    exact(0xE2, fixed),
    exact(0xE8, fixed),
    exact(0xE9, fixed),
    exact(0xEA, fixed),
    exact(0xF0, fixed),
    exact(0xF2, fixed),
    exact(0xF3, fixed),
    exact(0xF8, fixed),
    exact(0xF9, fixed),
    exact(0xFA, fixed),
    exact(0xFB, fixed),
    // Holes in the opcode map.
    exact(0xD3, fixed),
    exact(0xDB, fixed),
    exact(0xDD, fixed),
    exact(0xE3, fixed),
    exact(0xE4, fixed),
    exact(0xEB, fixed),
    exact(0xEC, fixed),
    exact(0xED, fixed),
    exact(0xF4, fixed),
    exact(0xFC, fixed),
    exact(0xFD, fixed),
    // 01 ddd sss
    group(0xC0, 0x40, mov),
    // 00 ddd 110
    group(0xC7, 0x06, mov_immediate),
    group(0xCF, 0x0A, load_indirect),
    group(0xCF, 0x02, store_indirect),
    group(0xCF, 0x01, load_pair_immediate),
    group(0xCF, 0xC5, push),
    group(0xCF, 0xC1, pop),
    // 10 ooo sss
    group(0xC0, 0x80, alu_register),
    // 11 ooo 110
    group(0xC7, 0xC6, alu_immediate),
    group(0xC7, 0x04, increment),
    group(0xC7, 0x05, decrement),
    group(0xCF, 0x09, add_pair),
    group(0xCF, 0x03, increment_pair),
    group(0xCF, 0x0B, decrement_pair),
    // 001 cc 000
    group(0xE7, 0x20, jump_relative_cond),
    // 110 cc 010 / 110 cc 100 / 110 cc 000
    group(0xE7, 0xC2, jump_cond),
    group(0xE7, 0xC4, call_cond),
    group(0xE7, 0xC0, return_cond),
    // 11 ttt 111
    group(0xC7, 0xC7, rst),
];

static PREFIXED: &[Pattern] = &[
    // 00 ooo rrr: rotates, shifts and SWAP
    group(0xC0, 0x00, cb_rotate),
    group(0xC0, 0x40, cb_bit),
    group(0xC0, 0x80, cb_reset),
    group(0xC0, 0xC0, cb_set),
];

/// Decode one instruction, pulling as many bytes as it needs.
///
/// Returns `None` only when the stream ends before the instruction is
/// complete. Unassigned opcodes decode to [`Instruction::InvalidOpcode`].
pub fn decode<I: Iterator<Item = u8>>(bytes: &mut I) -> Option<Instruction> {
    let opcode = bytes.next()?;
    dispatch(PRIMARY, opcode, bytes)
}

/// Iterator adaptor turning a byte stream into a stream of instructions.
pub struct Decoder<I> {
    bytes: I,
}

impl<I: Iterator<Item = u8>> Decoder<I> {
    pub fn new(bytes: I) -> Self {
        Self { bytes }
    }
}

impl<I: Iterator<Item = u8>> Iterator for Decoder<I> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        decode(&mut self.bytes)
    }
}

fn dispatch(
    table: &[Pattern],
    opcode: u8,
    bytes: &mut dyn Iterator<Item = u8>,
) -> Option<Instruction> {
    match table
        .iter()
        .find(|pattern| opcode & pattern.mask == pattern.value)
    {
        Some(pattern) => (pattern.decode)(opcode, bytes),
        None => Some(Instruction::InvalidOpcode(opcode)),
    }
}

fn imm16(bytes: &mut dyn Iterator<Item = u8>) -> Option<u16> {
    let lo = bytes.next()?;
    let hi = bytes.next()?;
    Some(u16::from_le_bytes([lo, hi]))
}

fn prefixed(_: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    let opcode = bytes.next()?;
    dispatch(PREFIXED, opcode, bytes)
}

fn fixed(opcode: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    use Instruction::*;

    Some(match opcode {
        0x00 => Nop,
        0x08 => StoreSp(imm16(bytes)?),
        0x10 => {
            // STOP is followed by a padding byte.
            bytes.next()?;
            Stop
        }
        0x18 => JumpRelative(bytes.next()? as i8),
        0x76 => Halt,
        0x07 => Rlca,
        0x0F => Rrca,
        0x17 => Rla,
        0x1F => Rra,
        0x27 => Daa,
        0x2F => Complement,
        0x37 => Scf,
        0x3F => Ccf,
        0x22 => StoreIncrement,
        0x2A => LoadIncrement,
        0x32 => StoreDecrement,
        0x3A => LoadDecrement,
        0xC3 => JumpImmediate(imm16(bytes)?),
        0xC9 => Return,
        0xCD => Call(imm16(bytes)?),
        0xD9 => ReturnFromInterrupt,
        0xE0 => StoreRelative(Relative::Immediate8(bytes.next()?)),
        0xE2 => StoreRelative(Relative::C),
        0xE8 => AddSp(bytes.next()? as i8),
        0xE9 => JumpMemory,
        0xEA => StoreRelative(Relative::Immediate16(imm16(bytes)?)),
        0xF0 => LoadRelative(Relative::Immediate8(bytes.next()?)),
        0xF2 => LoadRelative(Relative::C),
        0xF3 => DisableInterrupt,
        0xF8 => LoadHlSp(bytes.next()? as i8),
        0xF9 => HlToSp,
        0xFA => LoadRelative(Relative::Immediate16(imm16(bytes)?)),
        0xFB => EnableInterrupt,
        other => InvalidOpcode(other),
    })
}

fn mov(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Move {
        dst: Reg8::from_bits(opcode >> 3),
        src: Reg8::from_bits(opcode),
    })
}

fn mov_immediate(opcode: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::MoveImmediate {
        dst: Reg8::from_bits(opcode >> 3),
        value: bytes.next()?,
    })
}

fn load_indirect(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::LoadIndirect(Reg16::from_dd(opcode >> 4)))
}

fn store_indirect(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::StoreIndirect(Reg16::from_dd(opcode >> 4)))
}

fn load_pair_immediate(opcode: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::LoadRegisterPairImmediate {
        dst: Reg16::from_dd(opcode >> 4),
        value: imm16(bytes)?,
    })
}

fn push(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Push(Reg16::from_qq(opcode >> 4)))
}

fn pop(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Pop(Reg16::from_qq(opcode >> 4)))
}

fn alu_register(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    use Instruction::*;

    let src = Reg8::from_bits(opcode);
    Some(match (opcode >> 3) & 0x07 {
        0 => Add { src, carry: false },
        1 => Add { src, carry: true },
        2 => Subtract { src, carry: false },
        3 => Subtract { src, carry: true },
        4 => And(src),
        5 => Xor(src),
        6 => Or(src),
        _ => Cmp(src),
    })
}

fn alu_immediate(opcode: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    use Instruction::*;

    let value = bytes.next()?;
    Some(match (opcode >> 3) & 0x07 {
        0 => AddImmediate { value, carry: false },
        1 => AddImmediate { value, carry: true },
        2 => SubtractImmediate { value, carry: false },
        3 => SubtractImmediate { value, carry: true },
        4 => AndImmediate(value),
        5 => XorImmediate(value),
        6 => OrImmediate(value),
        _ => CmpImmediate(value),
    })
}

fn increment(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Increment(Reg8::from_bits(opcode >> 3)))
}

fn decrement(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Decrement(Reg8::from_bits(opcode >> 3)))
}

fn add_pair(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::AddPair(Reg16::from_dd(opcode >> 4)))
}

fn increment_pair(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::IncrementPair(Reg16::from_dd(opcode >> 4)))
}

fn decrement_pair(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::DecrementPair(Reg16::from_dd(opcode >> 4)))
}

fn jump_relative_cond(opcode: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::JumpRelativeCond(
        Condition::from_bits(opcode >> 3),
        bytes.next()? as i8,
    ))
}

fn jump_cond(opcode: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::JumpImmediateCond(
        Condition::from_bits(opcode >> 3),
        imm16(bytes)?,
    ))
}

fn call_cond(opcode: u8, bytes: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::CallCond(
        Condition::from_bits(opcode >> 3),
        imm16(bytes)?,
    ))
}

fn return_cond(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::ReturnCond(Condition::from_bits(opcode >> 3)))
}

fn rst(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Rst(opcode & 0x38))
}

fn cb_rotate(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    use Instruction::*;

    let reg = Reg8::from_bits(opcode);
    Some(match (opcode >> 3) & 0x07 {
        0 => Rlc(reg),
        1 => Rrc(reg),
        2 => Rl(reg),
        3 => Rr(reg),
        4 => ShiftLeft(reg),
        5 => ShiftRightArith(reg),
        6 => Swap(reg),
        _ => ShiftRight(reg),
    })
}

fn cb_bit(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Bit {
        bit: (opcode >> 3) & 0x07,
        reg: Reg8::from_bits(opcode),
    })
}

fn cb_reset(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Reset {
        bit: (opcode >> 3) & 0x07,
        reg: Reg8::from_bits(opcode),
    })
}

fn cb_set(opcode: u8, _: &mut dyn Iterator<Item = u8>) -> Option<Instruction> {
    Some(Instruction::Set {
        bit: (opcode >> 3) & 0x07,
        reg: Reg8::from_bits(opcode),
    })
}
