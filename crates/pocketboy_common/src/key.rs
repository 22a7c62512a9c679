/// Host keys a frontend can report to an [`App`](crate::app::App).
///
/// Only the keys some emulator maps are listed; anything else arrives as
/// `Key::None`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Z,
    X,
    A,
    S,
    Return,
    Backspace,
    Escape,
    None,
}
