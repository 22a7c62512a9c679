use crate::cpu::instruction::Relative;
use crate::cpu::regs::{Reg16, Reg8};
use crate::cpu::{alu, Bus, Cpu};

impl Cpu {
    pub(super) fn exec_move<B: Bus>(&mut self, bus: &mut B, dst: Reg8, src: Reg8) {
        let value = self.get8(bus, src);
        self.set8(bus, dst, value);
    }

    /// `LD A,(BC)` / `LD A,(DE)`
    pub(super) fn exec_load_indirect<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let addr = self.regs.get16(pair);
        self.regs.a = self.read_cycle(bus, addr);
    }

    /// `LD (BC),A` / `LD (DE),A`
    pub(super) fn exec_store_indirect<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let addr = self.regs.get16(pair);
        self.write_cycle(bus, addr, self.regs.a);
    }

    fn relative_addr(&self, rel: Relative) -> u16 {
        match rel {
            Relative::C => 0xFF00 | self.regs.c as u16,
            Relative::Immediate8(offset) => 0xFF00 | offset as u16,
            Relative::Immediate16(addr) => addr,
        }
    }

    pub(super) fn exec_load_relative<B: Bus>(&mut self, bus: &mut B, rel: Relative) {
        let addr = self.relative_addr(rel);
        self.regs.a = self.read_cycle(bus, addr);
    }

    pub(super) fn exec_store_relative<B: Bus>(&mut self, bus: &mut B, rel: Relative) {
        let addr = self.relative_addr(rel);
        self.write_cycle(bus, addr, self.regs.a);
    }

    /// `LD A,(HL±)`
    pub(super) fn exec_load_hl_step<B: Bus>(&mut self, bus: &mut B, delta: i16) {
        let hl = self.regs.hl();
        self.regs.a = self.read_cycle(bus, hl);
        self.regs.set_hl(hl.wrapping_add_signed(delta));
    }

    /// `LD (HL±),A`
    pub(super) fn exec_store_hl_step<B: Bus>(&mut self, bus: &mut B, delta: i16) {
        let hl = self.regs.hl();
        self.write_cycle(bus, hl, self.regs.a);
        self.regs.set_hl(hl.wrapping_add_signed(delta));
    }

    pub(super) fn exec_hl_to_sp<B: Bus>(&mut self, bus: &mut B) {
        self.regs.sp = self.regs.hl();
        self.idle_cycle(bus);
    }

    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.regs.get16(pair);
        self.push_u16(bus, value);
    }

    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.pop_u16(bus);
        self.regs.set16(pair, value);
    }

    /// `LD HL,SP+e`
    pub(super) fn exec_load_hl_sp<B: Bus>(&mut self, bus: &mut B, offset: i8) {
        let (value, flags) = alu::add_sp(self.regs.sp, offset);
        self.regs.set_hl(value);
        self.regs.f = flags;
        self.idle_cycle(bus);
    }

    /// `LD (nn),SP`: low byte first.
    pub(super) fn exec_store_sp<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let [lo, hi] = self.regs.sp.to_le_bytes();
        self.write_cycle(bus, addr, lo);
        self.write_cycle(bus, addr.wrapping_add(1), hi);
    }
}
