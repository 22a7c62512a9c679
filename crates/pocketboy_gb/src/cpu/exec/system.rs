use crate::cpu::Cpu;

impl Cpu {
    pub(super) fn exec_stop(&mut self) {
        // Enter STOP low-power mode. Both the CPU and the LCD stay frozen
        // until a button press resumes the CPU.
        log::debug!("GB CPU: STOP at pc=0x{:04X}", self.regs.pc);
        self.stopped = true;
        self.halted = false;
    }

    pub(super) fn exec_halt(&mut self) {
        self.halted = true;
    }

    /// Unassigned opcodes behave as NOP; each byte is reported once.
    pub(super) fn exec_invalid(&mut self, opcode: u8) {
        let word = (opcode >> 6) as usize;
        let mask = 1u64 << (opcode & 0x3F);
        if self.invalid_reported[word] & mask == 0 {
            self.invalid_reported[word] |= mask;
            log::warn!(
                "GB CPU: invalid opcode 0x{:02X} at pc=0x{:04X}; treating as NOP",
                opcode,
                self.regs.pc.wrapping_sub(1),
            );
        }
    }
}
