use super::{Bus, Cpu};

/// Interrupt flag register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;

/// The five maskable interrupt sources, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Mask of this source in IF/IE.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Service routine address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    /// Highest-priority (lowest bit) source set in `mask`.
    pub fn highest(mask: u8) -> Option<Interrupt> {
        Self::ALL.into_iter().find(|i| mask & i.bit() != 0)
    }
}

impl Cpu {
    /// Requested and enabled interrupt lines (`IF & IE & 0x1F`).
    pub(super) fn pending_interrupts<B: Bus>(&mut self, bus: &mut B) -> u8 {
        bus.read8(IF_ADDR) & bus.read8(IE_ADDR) & 0x1F
    }

    /// Take the highest-priority pending interrupt if IME is set.
    ///
    /// Entry costs 5 machine cycles: two internal cycles, the PC push and
    /// one cycle to load the vector. Returns `true` when an interrupt was
    /// taken.
    pub(super) fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> bool {
        if !self.ime {
            return false;
        }
        let pending = self.pending_interrupts(bus);
        let Some(interrupt) = Interrupt::highest(pending) else {
            return false;
        };

        self.ime = false;
        self.ime_pending = false;

        let flags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, flags & !interrupt.bit());

        let pc = self.regs.pc;
        self.idle_cycle(bus);
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();
        self.idle_cycle(bus);

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            interrupt,
            interrupt.vector(),
            pc,
            self.regs.sp,
        );
        true
    }
}
