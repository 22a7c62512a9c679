pub mod alu;
mod decode;
mod exec;
pub mod flags;
mod helpers;
mod instruction;
mod interrupts;
mod regs;

pub use decode::{decode, Decoder};
pub use instruction::{Condition, Instruction, Relative};
pub use interrupts::Interrupt;
pub use regs::{Flags, Reg16, Reg8, Registers};

/// Abstraction over the Game Boy bus (memory and IO).
///
/// Every `read8`/`write8` issued by the CPU is one machine cycle; the CPU
/// follows each of them (and each internal cycle) with `tick(1)` so the
/// bus can advance timers and the PPU in lockstep.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
    /// Advance bus-side peripherals by a number of machine cycles.
    ///
    /// Default implementation does nothing; system buses override this
    /// to drive the timer and PPU.
    fn tick(&mut self, _mcycles: u32) {}
}

/// LR35902 CPU core.
///
/// Holds the register file and the control latches (`ime`, `halted`,
/// `stopped`). Execution is instruction-granular: [`Cpu::step`] services
/// at most one interrupt or runs one instruction and reports the machine
/// cycles it charged.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state; cleared by [`Cpu::resume`] on button input.
    stopped: bool,
    /// Set by EI (and RETI); promoted to `ime` at the start of the next step.
    ime_pending: bool,
    /// Machine cycles charged since construction.
    cycles: u64,
    /// One bit per opcode byte already reported as invalid.
    invalid_reported: [u64; 4],
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the DMG boot ROM leaves behind at 0x0100.
    pub fn new() -> Self {
        Self::with_registers(Registers::post_boot())
    }

    /// CPU at power-on, about to run a boot ROM from 0x0000.
    pub fn power_on() -> Self {
        Self::with_registers(Registers::default())
    }

    pub fn with_registers(regs: Registers) -> Self {
        Self {
            regs,
            ime: false,
            halted: false,
            stopped: false,
            ime_pending: false,
            cycles: 0,
            invalid_reported: [0; 4],
        }
    }

    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Leave STOP mode (any button press does this on hardware).
    pub fn resume(&mut self) {
        if self.stopped {
            log::debug!("GB CPU: leaving STOP at pc=0x{:04X}", self.regs.pc);
        }
        self.stopped = false;
    }

    /// Run one step and return the number of machine cycles it took.
    ///
    /// A step is, in order: wake from HALT if an interrupt is pending,
    /// promote a pending EI, dispatch an interrupt if IME allows, and
    /// otherwise fetch/decode/execute one instruction. While stopped
    /// nothing runs and 0 is returned.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.stopped {
            return 0;
        }

        let start = self.cycles;

        if self.halted {
            if self.pending_interrupts(bus) == 0 {
                self.idle_cycle(bus);
                return 1;
            }
            // Wake up even with IME clear; dispatch below decides whether
            // the interrupt is actually taken.
            self.halted = false;
        }

        // EI (and RETI) arm IME for the start of the following step.
        if self.ime_pending {
            self.ime = true;
            self.ime_pending = false;
        }

        if !self.service_interrupt(bus) {
            let pc = self.regs.pc;
            let instruction = self.fetch_instruction(bus);
            log::trace!("GB CPU: {:04X}  {}", pc, instruction);
            self.execute(bus, instruction);
        }

        (self.cycles - start) as u32
    }
}

#[cfg(test)]
mod tests;
