use super::Timer;

impl Timer {
    /// DIV (FF04).
    pub(in super::super) fn div_read(&self) -> u8 {
        (self.counter >> 8) as u8
    }

    /// Any write to DIV clears the whole system counter.
    pub(in super::super) fn div_write(&mut self) {
        self.counter = 0;
    }

    /// TIMA (FF05).
    pub(in super::super) fn tima_read(&self) -> u8 {
        self.tima
    }

    pub(in super::super) fn tima_write(&mut self, value: u8) {
        self.tima = value;
    }

    /// TMA (FF06).
    pub(in super::super) fn tma_read(&self) -> u8 {
        self.tma
    }

    pub(in super::super) fn tma_write(&mut self, value: u8) {
        self.tma = value;
    }

    /// TAC (FF07); only the low three bits are stored.
    pub(in super::super) fn tac_read(&self) -> u8 {
        self.tac | 0b1111_1000
    }

    /// A TAC write that changes the value restarts the TIMA period.
    pub(in super::super) fn tac_write(&mut self, value: u8) {
        let value = value & 0x07;
        if value != self.tac {
            self.elapsed = 0;
        }
        self.tac = value;
    }
}
