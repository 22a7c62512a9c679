use crate::cpu::instruction::Condition;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_jump<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        self.regs.pc = addr;
        self.idle_cycle(bus);
    }

    /// The displacement is relative to the address following the operand.
    pub(super) fn exec_jump_relative<B: Bus>(&mut self, bus: &mut B, offset: i8) {
        self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
        self.idle_cycle(bus);
    }

    /// CALL and RST: push the return address, then jump.
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = addr;
    }

    pub(super) fn exec_return<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
        self.idle_cycle(bus);
    }

    /// `RET cc` spends one internal cycle on the condition either way.
    pub(super) fn exec_return_cond<B: Bus>(&mut self, bus: &mut B, cc: Condition) {
        self.idle_cycle(bus);
        if self.condition(cc) {
            self.exec_return(bus);
        }
    }
}
