use crate::cpu::Interrupt;

/// Serial port reduced to SB/SC.
///
/// There is no link partner: starting a transfer with the internal clock
/// (SC bits 7 and 0 set) captures SB into `output`, completes at once and
/// requests the serial interrupt. Test ROMs print through this path.
#[derive(Default)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Serial {
    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub(super) fn write_sc(&mut self, value: u8, if_reg: &mut u8) {
        self.sc = value & 0x81;
        if self.sc == 0x81 {
            log::debug!("GB serial: 0x{:02X} ({:?})", self.sb, self.sb as char);
            self.output.push(self.sb);
            self.sc &= !0x80;
            *if_reg |= Interrupt::Serial.bit();
        }
    }
}
