//! Synthetic photograph builders for the integration suite.

use image::{Rgb, RgbImage};

/// A saturated leaf green well inside the default HSV band.
pub const LEAF_GREEN: Rgb<u8> = Rgb([40u8, 200, 60]);
/// A dry-soil tan well outside of it.
pub const SOIL_BROWN: Rgb<u8> = Rgb([180u8, 150, 110]);

pub fn field(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

pub fn paint_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, color);
        }
    }
}

/// Render a dictionary marker with `side` pixels per edge at `(x0, y0)`,
/// surrounded by a white quiet zone of `margin` pixels.
///
/// Cell boundaries are mapped by integer division so any `side` works; the
/// decoder samples cell centers and does not care about the rounding.
pub fn render_marker(img: &mut RgbImage, code: u64, bits: u32, side: u32, margin: u32, x0: u32, y0: u32) {
    let cells = bits + 2;
    paint_rect(
        img,
        x0 - margin,
        y0 - margin,
        side + 2 * margin,
        side + 2 * margin,
        Rgb([255u8, 255, 255]),
    );
    for dy in 0..side {
        for dx in 0..side {
            let cx = dx * cells / side;
            let cy = dy * cells / side;
            let on_border = cx == 0 || cy == 0 || cx + 1 == cells || cy + 1 == cells;
            let black = if on_border {
                true
            } else {
                let idx = (cy - 1) * bits + (cx - 1);
                (code >> idx) & 1 == 1
            };
            if black {
                img.put_pixel(x0 + dx, y0 + dy, Rgb([0u8, 0, 0]));
            }
        }
    }
}
