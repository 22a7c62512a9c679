use thiserror::Error;

/// Errors raised while building a machine from a cartridge image.
///
/// Nothing past initialisation fails: a running machine treats bad
/// opcodes and out-of-range bank numbers as ordinary (logged) behaviour.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported cartridge type 0x{code:02X}")]
    UnsupportedCartridge { code: u8 },
    #[error("ROM image is {len} bytes, shorter than the 0x150-byte header")]
    RomTooSmall { len: usize },
    #[error("invalid ROM size code 0x{code:02X} in header")]
    InvalidRomSize { code: u8 },
    #[error("invalid RAM size code 0x{code:02X} in header")]
    InvalidRamSize { code: u8 },
    #[error("boot ROM must be 256 bytes, got {len}")]
    InvalidBootRom { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
