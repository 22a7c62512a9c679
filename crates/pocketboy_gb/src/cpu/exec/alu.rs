use crate::cpu::regs::{Flags, Reg16, Reg8};
use crate::cpu::{alu, Bus, Cpu};

impl Cpu {
    /// ADD/ADC on A. `with_carry` selects ADC.
    pub(super) fn exec_add(&mut self, value: u8, with_carry: bool) {
        let carry = with_carry && self.carry();
        (self.regs.a, self.regs.f) = alu::add(self.regs.a, value, carry);
    }

    /// SUB/SBC on A. `with_carry` selects SBC.
    pub(super) fn exec_sub(&mut self, value: u8, with_carry: bool) {
        let carry = with_carry && self.carry();
        (self.regs.a, self.regs.f) = alu::sub(self.regs.a, value, carry);
    }

    pub(super) fn exec_logic(&mut self, op: fn(u8, u8) -> (u8, Flags), value: u8) {
        (self.regs.a, self.regs.f) = op(self.regs.a, value);
    }

    /// CP only updates flags.
    pub(super) fn exec_cmp(&mut self, value: u8) {
        self.regs.f = alu::cp(self.regs.a, value).1;
    }

    pub(super) fn exec_increment<B: Bus>(&mut self, bus: &mut B, reg: Reg8) {
        let value = self.get8(bus, reg);
        let (result, flags) = alu::inc(value, self.regs.f);
        self.regs.f = flags;
        self.set8(bus, reg, result);
    }

    pub(super) fn exec_decrement<B: Bus>(&mut self, bus: &mut B, reg: Reg8) {
        let value = self.get8(bus, reg);
        let (result, flags) = alu::dec(value, self.regs.f);
        self.regs.f = flags;
        self.set8(bus, reg, result);
    }

    /// `ADD HL,rr`
    pub(super) fn exec_add_pair<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let (result, flags) = alu::add16(self.regs.hl(), self.regs.get16(pair), self.regs.f);
        self.regs.set_hl(result);
        self.regs.f = flags;
        self.idle_cycle(bus);
    }

    /// `ADD SP,e`
    pub(super) fn exec_add_sp<B: Bus>(&mut self, bus: &mut B, offset: i8) {
        let (result, flags) = alu::add_sp(self.regs.sp, offset);
        self.regs.sp = result;
        self.regs.f = flags;
        self.idle_cycle(bus);
        self.idle_cycle(bus);
    }

    /// `INC rr` / `DEC rr`; no flags change.
    pub(super) fn exec_step_pair<B: Bus>(&mut self, bus: &mut B, pair: Reg16, delta: i16) {
        let value = self.regs.get16(pair).wrapping_add_signed(delta);
        self.regs.set16(pair, value);
        self.idle_cycle(bus);
    }

    pub(super) fn exec_daa(&mut self) {
        (self.regs.a, self.regs.f) = alu::daa(self.regs.a, self.regs.f);
    }

    pub(super) fn exec_cpl(&mut self) {
        (self.regs.a, self.regs.f) = alu::cpl(self.regs.a, self.regs.f);
    }
}
