use crate::cpu::Interrupt;

mod io;

/// TIMA input periods in machine cycles, indexed by TAC[1:0].
const TIMA_PERIODS: [u32; 4] = [1024, 16, 64, 256];

/// Divider and programmable timer.
///
/// `counter` is the free-running 16-bit system counter and advances once
/// per machine cycle; DIV exposes its upper byte. TIMA runs
/// from its own accumulator so that the selected frequency is exact even
/// when DIV is reset.
pub(super) struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    tac: u8,
    /// Machine cycles accumulated towards the next TIMA increment.
    elapsed: u32,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            elapsed: 0,
        }
    }

    /// Timer state as the boot ROM leaves it (DIV reads 0xAB).
    pub(super) fn post_boot() -> Self {
        Self {
            counter: 0xABCC,
            ..Self::new()
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    #[inline]
    fn period(&self) -> u32 {
        TIMA_PERIODS[(self.tac & 0x03) as usize]
    }

    /// Advance by `mcycles` machine cycles.
    pub(super) fn tick(&mut self, mcycles: u32, if_reg: &mut u8) {
        self.counter = self.counter.wrapping_add(mcycles as u16);
        if !self.enabled() {
            return;
        }

        self.elapsed += mcycles;
        let period = self.period();
        while self.elapsed >= period {
            self.elapsed -= period;
            self.increment_tima(if_reg);
        }
    }

    fn increment_tima(&mut self, if_reg: &mut u8) {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            self.tima = self.tma;
            *if_reg |= Interrupt::Timer.bit();
            log::trace!("GB timer: TIMA overflow, reload 0x{:02X}", self.tma);
        } else {
            self.tima = next;
        }
    }
}
