use crate::{Button, GameBoy, CLOCKS_PER_HOST_FRAME, SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};
use pocketboy_common::app::App;
use pocketboy_common::key::Key;

/// Host keyboard layout for the DMG buttons.
fn map_key(key: Key) -> Option<Button> {
    match key {
        Key::Up => Some(Button::Up),
        Key::Down => Some(Button::Down),
        Key::Left => Some(Button::Left),
        Key::Right => Some(Button::Right),
        Key::Z => Some(Button::A),
        Key::X => Some(Button::B),
        Key::A | Key::Backspace => Some(Button::Select),
        Key::S | Key::Return => Some(Button::Start),
        Key::Escape | Key::None => None,
    }
}

/// Frontend wrapper driving a [`GameBoy`] once per host frame.
///
/// The frontend hands over an RGBA32 screen buffer; each update runs one
/// host frame worth of clocks and copies the last completed LCD frame.
pub struct GameBoyApp {
    pub gb: GameBoy,
    title: String,
    should_exit: bool,
    host_frames: u64,
    last_lcd_on: bool,
}

impl GameBoyApp {
    pub fn new(gb: GameBoy) -> Self {
        let title = match gb.header().title.as_str() {
            "" => "PocketBoy".to_string(),
            name => format!("PocketBoy - {name}"),
        };
        Self {
            gb,
            title,
            should_exit: false,
            host_frames: 0,
            last_lcd_on: false,
        }
    }

    fn log_summary(&mut self) {
        let lcdc = self.gb.read_memory(0xFF40);
        let ly = self.gb.read_memory(0xFF44);
        let regs = &self.gb.cpu.regs;
        log::info!(
            "GB: host_frame={} lcd_frames={} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} ime={} halted={} LCDC=0x{:02X} LY={}",
            self.host_frames,
            self.gb.frames(),
            regs.pc,
            regs.sp,
            regs.af(),
            regs.bc(),
            regs.de(),
            regs.hl(),
            self.gb.cpu.ime,
            self.gb.cpu.halted,
            lcdc,
            ly,
        );
    }
}

impl App for GameBoyApp {
    fn init(&mut self) {
        let header = self.gb.header();
        log::info!(
            "Game Boy init: '{}' ({:?}, {} ROM bytes)",
            header.title,
            header.kind,
            header.rom_size,
        );
    }

    fn update(&mut self, screen: &mut [u8]) {
        self.gb.run_for(CLOCKS_PER_HOST_FRAME);

        let frame = self.gb.frame();
        let len = frame.len().min(screen.len());
        screen[..len].copy_from_slice(&frame[..len]);

        self.host_frames += 1;

        let lcd_on = self.gb.read_memory(0xFF40) & 0x80 != 0;
        if lcd_on != self.last_lcd_on {
            log::debug!("GB LCD {}", if lcd_on { "on" } else { "off" });
            self.last_lcd_on = lcd_on;
        }

        if self.host_frames == 1 || self.host_frames % 300 == 0 {
            self.log_summary();
        }
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if key == Key::Escape {
            self.should_exit = true;
            return;
        }
        let Some(button) = map_key(key) else {
            return;
        };
        log::debug!("GB key event: {:?} -> {:?} pressed={}", key, button, is_down);
        if is_down {
            self.gb.press(button);
        } else {
            self.gb.release(button);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!(
            "Game Boy exit after {} LCD frames ({} machine cycles)",
            self.gb.frames(),
            self.gb.elapsed_mcycles(),
        );
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GameBoyApp {
        let mut rom = vec![0u8; 0x8000];
        // JR -2 at the entry point.
        rom[0x100] = 0x18;
        rom[0x101] = 0xFE;
        rom[0x134..0x138].copy_from_slice(b"DEMO");
        GameBoyApp::new(GameBoy::from_rom(&rom).unwrap())
    }

    #[test]
    fn key_layout_covers_every_button() {
        let keys = [Key::Up, Key::Down, Key::Left, Key::Right, Key::Z, Key::X, Key::A, Key::S];
        let mut seen = 0u8;
        for key in keys {
            seen |= map_key(key).unwrap().mask();
        }
        assert!(Button::ALL.iter().all(|button| seen & button.mask() != 0));
        assert_eq!(map_key(Key::Return), Some(Button::Start));
        assert_eq!(map_key(Key::None), None);
    }

    #[test]
    fn escape_requests_exit() {
        let mut app = app();
        assert!(!app.should_exit());
        app.handle_key_event(Key::Escape, true);
        assert!(app.should_exit());
    }

    #[test]
    fn update_copies_the_completed_frame() {
        let mut app = app();
        assert_eq!(app.title(), "PocketBoy - DEMO");
        let mut screen = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 4];
        // A host frame is long enough to reach the first VBlank.
        app.update(&mut screen);
        assert_eq!(app.gb.frames(), 1);
        assert_eq!(screen.as_slice(), app.gb.frame());
    }
}
