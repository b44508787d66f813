//! Rendering: module grid -> paint commands -> RGBA surface -> PNG

pub mod paint;
pub mod raster;

use crate::{Error, Result};
use image::{ImageFormat, RgbaImage};
use sha2::{Digest, Sha256};
use std::io::Cursor;

pub use paint::{Canvas, PaintCommand};
pub use raster::{paint_commands, rasterize, rasterize_with_palette};

pub type Rgba = (u8, u8, u8, u8);

/// Colours used to paint a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark: Rgba,
    pub light: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dark: (0, 0, 0, 255),
            light: (255, 255, 255, 255),
        }
    }
}

impl Palette {
    pub fn from_hex(dark: &str, light: &str) -> Result<Self> {
        Ok(Self {
            dark: parse_hex_color(dark)?,
            light: parse_hex_color(light)?,
        })
    }
}

/// Parse `#RRGGBB` into an opaque colour.
pub fn parse_hex_color(s: &str) -> Result<Rgba> {
    let hex = s
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| Error::ConfigError(format!("expected #RRGGBB colour, got '{}'", s)))?;
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| Error::ConfigError(format!("bad colour '{}': {}", s, e)))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?, 255))
}

/// A painted surface together with its PNG encoding.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
    pub png_data: Vec<u8>,
}

impl Raster {
    pub fn from_pixels(pixels: RgbaImage) -> Result<Self> {
        let mut png_data = Vec::new();
        pixels.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)?;
        Ok(Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
            png_data,
        })
    }

    /// Colour at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| (p[0], p[1], p[2], p[3]))
    }

    /// Hex SHA-256 of the raw RGBA buffer; stable across PNG encoder versions.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.pixels.as_raw()))
    }
}
