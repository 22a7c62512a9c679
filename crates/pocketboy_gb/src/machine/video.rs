use pocketboy_common::Color;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// The four shades a DMG palette register can select, lightest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub colors: [Color; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [Color::WHITE, Color::LIGHT_GRAY, Color::DARK_GRAY, Color::BLACK],
        }
    }
}

/// Receiver for completed frames, one pixel at a time.
pub trait DisplaySink {
    fn write_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8, a: u8);
}

/// Push an RGBA8888 frame through a sink in row-major order.
pub(super) fn present(frame: &[u8], sink: &mut impl DisplaySink) {
    for (i, px) in frame.chunks_exact(4).enumerate() {
        sink.write_pixel(i % SCREEN_WIDTH, i / SCREEN_WIDTH, px[0], px[1], px[2], px[3]);
    }
}

/// 160x144 RGBA8888 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBuffer {
    pub pixels: Vec<u8>,
}

impl Default for RgbaBuffer {
    fn default() -> Self {
        Self {
            pixels: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * 4],
        }
    }
}

impl DisplaySink for RgbaBuffer {
    fn write_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8, a: u8) {
        let i = (y * SCREEN_WIDTH + x) * 4;
        self.pixels[i..i + 4].copy_from_slice(&[r, g, b, a]);
    }
}

/// 160x144 RGB24 image; alpha is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rgb24Buffer {
    pub pixels: Vec<u8>,
}

impl Default for Rgb24Buffer {
    fn default() -> Self {
        Self {
            pixels: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * 3],
        }
    }
}

impl DisplaySink for Rgb24Buffer {
    fn write_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8, _a: u8) {
        let i = (y * SCREEN_WIDTH + x) * 3;
        self.pixels[i..i + 3].copy_from_slice(&[r, g, b]);
    }
}
