use crate::cpu::Interrupt;

/// The eight DMG buttons. Discriminants are bit positions in the
/// joypad state byte: d-pad in the low nibble, actions in the high one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    A = 4,
    B = 5,
    Select = 6,
    Start = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
    ];

    /// Bit of this button in the joypad state byte.
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// P1/JOYP (FF00) state.
pub(super) struct Joypad {
    /// Selection bits 4-5 as last written; 0 selects a group.
    select: u8,
    /// 1 = pressed, laid out as [`Button`].
    buttons: u8,
}

impl Joypad {
    pub(super) fn new() -> Self {
        Self {
            select: 0x30,
            buttons: 0,
        }
    }

    pub(super) fn read(&self) -> u8 {
        match self.select {
            0x20 => (!self.buttons & 0x0F) | self.select,
            0x10 => (!(self.buttons >> 4) & 0x0F) | self.select,
            _ => self.select | 0x0F,
        }
    }

    /// The low nibble is read-only.
    pub(super) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    /// A fresh press requests the joypad interrupt.
    pub(super) fn press(&mut self, button: Button, if_reg: &mut u8) {
        if self.buttons & button.mask() == 0 {
            self.buttons |= button.mask();
            *if_reg |= Interrupt::Joypad.bit();
        }
    }

    pub(super) fn release(&mut self, button: Button) {
        self.buttons &= !button.mask();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_group_reads_active_low() {
        let mut joypad = Joypad::new();
        let mut if_reg = 0;
        joypad.press(Button::Left, &mut if_reg);
        joypad.press(Button::Start, &mut if_reg);

        joypad.write(0x20);
        assert_eq!(joypad.read(), 0x2D);
        joypad.write(0x10);
        assert_eq!(joypad.read(), 0x17);
    }

    #[test]
    fn no_group_or_both_groups_read_released() {
        let mut joypad = Joypad::new();
        let mut if_reg = 0;
        joypad.press(Button::A, &mut if_reg);
        joypad.write(0x30);
        assert_eq!(joypad.read(), 0x3F);
        joypad.write(0x00);
        assert_eq!(joypad.read(), 0x0F);
    }

    #[test]
    fn only_new_presses_interrupt() {
        let mut joypad = Joypad::new();
        let mut if_reg = 0;
        joypad.press(Button::B, &mut if_reg);
        assert_eq!(if_reg, Interrupt::Joypad.bit());

        if_reg = 0;
        joypad.press(Button::B, &mut if_reg);
        assert_eq!(if_reg, 0);

        joypad.release(Button::B);
        joypad.press(Button::B, &mut if_reg);
        assert_eq!(if_reg, Interrupt::Joypad.bit());
    }

    #[test]
    fn writes_keep_only_selection_bits() {
        let mut joypad = Joypad::new();
        joypad.write(0xEF);
        assert_eq!(joypad.read(), 0x2F);
    }
}
