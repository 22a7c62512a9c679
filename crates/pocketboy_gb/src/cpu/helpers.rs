use super::decode::decode;
use super::instruction::{Condition, Instruction};
use super::regs::{Flags, Reg8};
use super::{Bus, Cpu};
use crate::bits::{merge, split};

/// Opcode stream reading at PC: every byte pulled is one charged read cycle
/// and advances PC.
struct Fetch<'a, B: Bus> {
    cpu: &'a mut Cpu,
    bus: &'a mut B,
}

impl<B: Bus> Iterator for Fetch<'_, B> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.cpu.fetch8(self.bus))
    }
}

impl Cpu {
    /// Perform a single bus read cycle at the given address and advance the
    /// rest of the machine by one machine cycle.
    #[inline]
    pub(super) fn read_cycle<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u8 {
        let value = bus.read8(addr);
        self.idle_cycle(bus);
        value
    }

    /// Perform a single bus write cycle at the given address and advance the
    /// rest of the machine by one machine cycle.
    #[inline]
    pub(super) fn write_cycle<B: Bus>(&mut self, bus: &mut B, addr: u16, value: u8) {
        bus.write8(addr, value);
        self.idle_cycle(bus);
    }

    /// One machine cycle without a memory access.
    #[inline]
    pub(super) fn idle_cycle<B: Bus>(&mut self, bus: &mut B) {
        self.cycles += 1;
        bus.tick(1);
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.read_cycle(bus, self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(super) fn fetch_instruction<B: Bus>(&mut self, bus: &mut B) -> Instruction {
        let mut bytes = Fetch { cpu: self, bus };
        // The fetch stream never runs dry.
        decode(&mut bytes).unwrap_or(Instruction::Nop)
    }

    /// Read an 8-bit operand; `M` costs a bus cycle at HL.
    #[inline]
    pub(super) fn get8<B: Bus>(&mut self, bus: &mut B, reg: Reg8) -> u8 {
        match self.regs.get8(reg) {
            Some(value) => value,
            None => self.read_cycle(bus, self.regs.hl()),
        }
    }

    /// Write an 8-bit operand; `M` costs a bus cycle at HL.
    #[inline]
    pub(super) fn set8<B: Bus>(&mut self, bus: &mut B, reg: Reg8, value: u8) {
        if !self.regs.set8(reg, value) {
            self.write_cycle(bus, self.regs.hl(), value);
        }
    }

    /// Push a word: one internal cycle, then high byte, then low byte.
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let (hi, lo) = split(value);
        self.idle_cycle(bus);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, lo);
    }

    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.read_cycle(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = self.read_cycle(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        merge(hi, lo)
    }

    #[inline]
    pub(super) fn condition(&self, cc: Condition) -> bool {
        let f = self.regs.f;
        match cc {
            Condition::NZ => !f.contains(Flags::Z),
            Condition::Z => f.contains(Flags::Z),
            Condition::NC => !f.contains(Flags::C),
            Condition::C => f.contains(Flags::C),
        }
    }

    #[inline]
    pub(super) fn carry(&self) -> bool {
        self.regs.f.contains(Flags::C)
    }
}
