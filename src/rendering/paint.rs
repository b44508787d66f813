/// Paint command set and the pixel surface it is applied to

use super::Rgba;
use image::RgbaImage;

// Absorbs float error so `col * cell + cell` and `(col + 1) * cell` snap to
// the same pixel edge.
const EDGE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Reset every pixel to transparent
    Clear,
    /// Axis-aligned fill in real-valued surface coordinates
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rgba: Rgba,
    },
}

/// A fixed-size RGBA drawing surface.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn apply(&mut self, cmd: &PaintCommand) {
        match cmd {
            PaintCommand::Clear => {
                for p in self.image.pixels_mut() {
                    *p = image::Rgba([0, 0, 0, 0]);
                }
            }
            PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                rgba,
            } => {
                let x0 = snap(*x, self.width());
                let x1 = snap(x + width, self.width());
                let y0 = snap(*y, self.height());
                let y1 = snap(y + height, self.height());
                let color = image::Rgba([rgba.0, rgba.1, rgba.2, rgba.3]);
                for py in y0..y1 {
                    for px in x0..x1 {
                        self.image.put_pixel(px, py, color);
                    }
                }
            }
        }
    }

    pub fn apply_all<'a>(&mut self, cmds: impl IntoIterator<Item = &'a PaintCommand>) {
        for cmd in cmds {
            self.apply(cmd);
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Map a real coordinate to a pixel edge, clamped to `[0, limit]`.
pub(crate) fn snap(v: f64, limit: u32) -> u32 {
    let e = (v + EDGE_EPSILON).floor();
    if e <= 0.0 {
        0
    } else if e >= limit as f64 {
        limit
    } else {
        e as u32
    }
}
