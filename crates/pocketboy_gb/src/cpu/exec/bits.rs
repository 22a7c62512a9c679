use crate::cpu::alu::{self, Direction, RotateKind};
use crate::cpu::regs::{Flags, Reg8};
use crate::cpu::{Bus, Cpu};
use crate::bits::set_bit;

pub(super) type Shift = (Direction, RotateKind);

pub(super) const LEFT_CIRCULAR: Shift = (Direction::Left, RotateKind::Circular);
pub(super) const RIGHT_CIRCULAR: Shift = (Direction::Right, RotateKind::Circular);
pub(super) const LEFT_THROUGH: Shift = (Direction::Left, RotateKind::ThroughCarry);
pub(super) const RIGHT_THROUGH: Shift = (Direction::Right, RotateKind::ThroughCarry);
pub(super) const SHIFT_LEFT: Shift = (Direction::Left, RotateKind::Arithmetic);
pub(super) const SHIFT_RIGHT: Shift = (Direction::Right, RotateKind::Logical);
pub(super) const SHIFT_RIGHT_ARITH: Shift = (Direction::Right, RotateKind::Arithmetic);

impl Cpu {
    /// RLCA/RRCA/RLA/RRA: like the CB forms on A, but Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, (direction, kind): Shift) {
        let (result, flags) = alu::rotate(self.regs.a, direction, kind, self.carry());
        self.regs.a = result;
        self.regs.f = flags - Flags::Z;
    }

    pub(super) fn exec_rotate<B: Bus>(&mut self, bus: &mut B, reg: Reg8, (direction, kind): Shift) {
        let value = self.get8(bus, reg);
        let (result, flags) = alu::rotate(value, direction, kind, self.carry());
        self.regs.f = flags;
        self.set8(bus, reg, result);
    }

    pub(super) fn exec_swap<B: Bus>(&mut self, bus: &mut B, reg: Reg8) {
        let value = self.get8(bus, reg);
        let (result, flags) = alu::swap(value);
        self.regs.f = flags;
        self.set8(bus, reg, result);
    }

    pub(super) fn exec_bit<B: Bus>(&mut self, bus: &mut B, bit: u8, reg: Reg8) {
        let value = self.get8(bus, reg);
        self.regs.f = alu::bit(value, bit, self.regs.f);
    }

    /// SET/RES.
    pub(super) fn exec_write_bit<B: Bus>(&mut self, bus: &mut B, bit: u8, reg: Reg8, on: bool) {
        let value = self.get8(bus, reg);
        self.set8(bus, reg, set_bit(value, bit, on));
    }
}
