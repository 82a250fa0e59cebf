//! Plain (ASCII) PPM output.

use std::io::{self, Write};

use crate::{color_to_rgb, ImageBuffer};

/// Write `image` as a plain `P3` PPM: a three-line header followed by one
/// `R G B` line per pixel, rows top to bottom.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", image.width, image.height)?;
    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(out, "{r} {g} {b}")?;
    }
    out.flush()
}

/// Render `image` to a PPM string.
pub fn to_ppm_string(image: &ImageBuffer) -> String {
    let mut buf = Vec::with_capacity(16 + image.pixels.len() * 12);
    write_ppm(image, &mut buf).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
