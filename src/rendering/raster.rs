/// Rasterizer: paints a module grid onto a square canvas scaled to fit

use super::paint::{Canvas, PaintCommand};
use super::{Palette, Raster};
use crate::matrix::RasterMatrix;
use crate::{Error, Result};

/// Build the paint commands for `matrix` on a `canvas_side` square surface.
///
/// The first two commands clear the surface and lay down the light
/// background; every following command is one dark module of size
/// `canvas_side / N`.
pub fn paint_commands(
    matrix: &RasterMatrix,
    canvas_side: u32,
    palette: &Palette,
) -> Result<Vec<PaintCommand>> {
    let n = matrix.side();
    if n == 0 {
        return Err(Error::RenderError("matrix has no modules".into()));
    }
    if canvas_side == 0 {
        return Err(Error::RenderError("canvas side must be non-zero".into()));
    }

    let side = canvas_side as f64;
    let cell = side / n as f64;

    let mut cmds = Vec::with_capacity(2 + matrix.dark_count());
    cmds.push(PaintCommand::Clear);
    cmds.push(PaintCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: side,
        height: side,
        rgba: palette.light,
    });
    for (row, col) in matrix.dark_cells() {
        cmds.push(PaintCommand::FillRect {
            x: col as f64 * cell,
            y: row as f64 * cell,
            width: cell,
            height: cell,
            rgba: palette.dark,
        });
    }
    Ok(cmds)
}

/// Rasterize with the default black-on-white palette.
pub fn rasterize(matrix: &RasterMatrix, canvas_side: u32) -> Result<Raster> {
    rasterize_with_palette(matrix, canvas_side, &Palette::default())
}

pub fn rasterize_with_palette(
    matrix: &RasterMatrix,
    canvas_side: u32,
    palette: &Palette,
) -> Result<Raster> {
    // Commands are fully built before touching the surface so a bad matrix
    // never leaves a partial image behind.
    let cmds = paint_commands(matrix, canvas_side, palette)?;
    let mut canvas = Canvas::new(canvas_side, canvas_side);
    canvas.apply_all(&cmds);
    log::debug!(
        "rasterized {}x{} modules onto {}px canvas ({} fills)",
        matrix.side(),
        matrix.side(),
        canvas_side,
        cmds.len() - 2
    );
    Raster::from_pixels(canvas.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: (u8, u8, u8, u8) = (255, 255, 255, 255);
    const BLACK: (u8, u8, u8, u8) = (0, 0, 0, 255);

    #[test]
    fn empty_matrix_paints_only_background() {
        let m = RasterMatrix::light(21);
        let cmds = paint_commands(&m, 300, &Palette::default()).unwrap();
        assert_eq!(cmds.len(), 2);

        let r = rasterize(&m, 300).unwrap();
        assert_eq!(r.width, 300);
        assert_eq!(r.height, 300);
        assert!(r.pixels.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn single_dark_cell_paints_one_square_at_offset() {
        let mut m = RasterMatrix::light(21);
        m.set(3, 5, true);
        let cell = 300.0 / 21.0;

        let cmds = paint_commands(&m, 300, &Palette::default()).unwrap();
        assert_eq!(cmds.len(), 3);
        match &cmds[2] {
            PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                rgba,
            } => {
                assert!((x - 5.0 * cell).abs() < 1e-9);
                assert!((y - 3.0 * cell).abs() < 1e-9);
                assert_eq!(*width, cell);
                assert_eq!(*height, cell);
                assert_eq!(*rgba, BLACK);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let r = rasterize(&m, 300).unwrap();
        let cx = (5.5 * cell) as u32;
        let cy = (3.5 * cell) as u32;
        assert_eq!(r.pixel(cx, cy), Some(BLACK));
        assert_eq!(r.pixel(0, 0), Some(WHITE));
        assert_eq!(r.pixel((7.5 * cell) as u32, cy), Some(WHITE));

        // Dark area is one module's worth of pixels, give or take the snap.
        let dark = r.pixels.pixels().filter(|p| p.0 == [0, 0, 0, 255]).count();
        let lo = (cell.floor() * cell.floor()) as usize;
        let hi = (cell.ceil() * cell.ceil()) as usize;
        assert!(dark >= lo && dark <= hi, "dark pixels {dark}");
    }

    #[test]
    fn fully_dark_matrix_has_no_seams() {
        let m = RasterMatrix::from_cells(21, vec![true; 21 * 21]).unwrap();
        let r = rasterize(&m, 300).unwrap();
        assert!(r.pixels.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn zero_sized_inputs_fail_cleanly() {
        assert!(matches!(
            rasterize(&RasterMatrix::light(0), 300),
            Err(Error::RenderError(_))
        ));
        assert!(matches!(
            rasterize(&RasterMatrix::light(21), 0),
            Err(Error::RenderError(_))
        ));
    }

    #[test]
    fn custom_palette_is_used() {
        let mut m = RasterMatrix::light(2);
        m.set(0, 0, true);
        let palette = Palette {
            dark: (200, 0, 0, 255),
            light: (0, 0, 200, 255),
        };
        let r = rasterize_with_palette(&m, 10, &palette).unwrap();
        assert_eq!(r.pixel(0, 0), Some((200, 0, 0, 255)));
        assert_eq!(r.pixel(9, 9), Some((0, 0, 200, 255)));
        assert_eq!(r.pixel(10, 0), None);
        assert_eq!(r.pixel(0, 10), None);
    }
}
