mod alu;
mod bits;
mod control;
mod ld;
mod system;

use super::instruction::Instruction;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one decoded instruction, charging every cycle past the
    /// opcode/operand fetch (already paid for during decode).
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instruction: Instruction) {
        use Instruction::*;

        match instruction {
            Move { dst, src } => self.exec_move(bus, dst, src),
            MoveImmediate { dst, value } => self.set8(bus, dst, value),
            LoadIndirect(pair) => self.exec_load_indirect(bus, pair),
            StoreIndirect(pair) => self.exec_store_indirect(bus, pair),
            LoadRelative(rel) => self.exec_load_relative(bus, rel),
            StoreRelative(rel) => self.exec_store_relative(bus, rel),
            LoadIncrement => self.exec_load_hl_step(bus, 1),
            LoadDecrement => self.exec_load_hl_step(bus, -1),
            StoreIncrement => self.exec_store_hl_step(bus, 1),
            StoreDecrement => self.exec_store_hl_step(bus, -1),

            LoadRegisterPairImmediate { dst, value } => self.regs.set16(dst, value),
            HlToSp => self.exec_hl_to_sp(bus),
            Push(pair) => self.exec_push(bus, pair),
            Pop(pair) => self.exec_pop(bus, pair),
            LoadHlSp(offset) => self.exec_load_hl_sp(bus, offset),
            StoreSp(addr) => self.exec_store_sp(bus, addr),

            Add { src, carry } => {
                let value = self.get8(bus, src);
                self.exec_add(value, carry);
            }
            AddImmediate { value, carry } => self.exec_add(value, carry),
            Subtract { src, carry } => {
                let value = self.get8(bus, src);
                self.exec_sub(value, carry);
            }
            SubtractImmediate { value, carry } => self.exec_sub(value, carry),
            And(src) => {
                let value = self.get8(bus, src);
                self.exec_logic(super::alu::and, value);
            }
            AndImmediate(value) => self.exec_logic(super::alu::and, value),
            Or(src) => {
                let value = self.get8(bus, src);
                self.exec_logic(super::alu::or, value);
            }
            OrImmediate(value) => self.exec_logic(super::alu::or, value),
            Xor(src) => {
                let value = self.get8(bus, src);
                self.exec_logic(super::alu::xor, value);
            }
            XorImmediate(value) => self.exec_logic(super::alu::xor, value),
            Cmp(src) => {
                let value = self.get8(bus, src);
                self.exec_cmp(value);
            }
            CmpImmediate(value) => self.exec_cmp(value),
            Increment(reg) => self.exec_increment(bus, reg),
            Decrement(reg) => self.exec_decrement(bus, reg),

            AddPair(pair) => self.exec_add_pair(bus, pair),
            AddSp(offset) => self.exec_add_sp(bus, offset),
            IncrementPair(pair) => self.exec_step_pair(bus, pair, 1),
            DecrementPair(pair) => self.exec_step_pair(bus, pair, -1),

            Rlca => self.exec_rotate_a(bits::LEFT_CIRCULAR),
            Rrca => self.exec_rotate_a(bits::RIGHT_CIRCULAR),
            Rla => self.exec_rotate_a(bits::LEFT_THROUGH),
            Rra => self.exec_rotate_a(bits::RIGHT_THROUGH),
            Rlc(reg) => self.exec_rotate(bus, reg, bits::LEFT_CIRCULAR),
            Rrc(reg) => self.exec_rotate(bus, reg, bits::RIGHT_CIRCULAR),
            Rl(reg) => self.exec_rotate(bus, reg, bits::LEFT_THROUGH),
            Rr(reg) => self.exec_rotate(bus, reg, bits::RIGHT_THROUGH),
            ShiftLeft(reg) => self.exec_rotate(bus, reg, bits::SHIFT_LEFT),
            ShiftRight(reg) => self.exec_rotate(bus, reg, bits::SHIFT_RIGHT),
            ShiftRightArith(reg) => self.exec_rotate(bus, reg, bits::SHIFT_RIGHT_ARITH),
            Swap(reg) => self.exec_swap(bus, reg),
            Bit { bit, reg } => self.exec_bit(bus, bit, reg),
            Set { bit, reg } => self.exec_write_bit(bus, bit, reg, true),
            Reset { bit, reg } => self.exec_write_bit(bus, bit, reg, false),

            JumpImmediate(addr) => self.exec_jump(bus, addr),
            JumpImmediateCond(cc, addr) => {
                if self.condition(cc) {
                    self.exec_jump(bus, addr);
                }
            }
            JumpRelative(offset) => self.exec_jump_relative(bus, offset),
            JumpRelativeCond(cc, offset) => {
                if self.condition(cc) {
                    self.exec_jump_relative(bus, offset);
                }
            }
            JumpMemory => self.regs.pc = self.regs.hl(),
            Call(addr) => self.exec_call(bus, addr),
            CallCond(cc, addr) => {
                if self.condition(cc) {
                    self.exec_call(bus, addr);
                }
            }
            Return => self.exec_return(bus),
            ReturnCond(cc) => self.exec_return_cond(bus, cc),
            ReturnFromInterrupt => {
                self.exec_return(bus);
                self.ime_pending = true;
            }
            Rst(target) => self.exec_call(bus, target as u16),

            Daa => self.exec_daa(),
            Complement => self.exec_cpl(),
            Ccf => self.regs.f = super::alu::ccf(self.regs.f),
            Scf => self.regs.f = super::alu::scf(self.regs.f),
            EnableInterrupt => self.ime_pending = true,
            DisableInterrupt => {
                self.ime = false;
                self.ime_pending = false;
            }
            Nop => {}
            Stop => self.exec_stop(),
            Halt => self.exec_halt(),
            InvalidOpcode(opcode) => self.exec_invalid(opcode),
        }
    }
}
