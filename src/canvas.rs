use std::io;
use std::io::Write;
use std::fs::File;
use std::path::Path;

use thiserror::Error;

use crate::color::Color;

/// Longest line allowed in a PPM file.
const PPM_LINE_WIDTH: usize = 70;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("failed to write image to {path}")]
    Create { path: String, #[source] source: io::Error },

    #[error("failed to write image data")]
    Write(#[from] io::Error),
}

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. Once the user
/// specifies the desired image width and height, the `Camera` generates rays
/// which are cast onto a `World`'s objects.
///
/// The canvas stores the resultant colors for each pixel ray. Once execution
/// finishes, the `Canvas` can be used to save the pixels to an image file.
///
/// For now, only PPM images are supported.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Assembles a canvas from bands of rows.
    ///
    /// Each band is its starting row and its pixels in row-major order. Bands
    /// may arrive in any order; rows no band covers stay black, and pixels
    /// past the bottom edge are dropped.
    pub fn from_rows(width: usize, height: usize,
        mut bands: Vec<(usize, Vec<Color>)>) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        bands.sort_by_key(|&(start, _)| start);

        for (start, pixels) in bands {
            let offset = (start * width).min(canvas.pixels.len());
            let room = canvas.pixels.len() - offset;
            let n = pixels.len().min(room);

            canvas.pixels[offset..offset + n].copy_from_slice(&pixels[..n]);
        }

        canvas
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in row-column
    /// order, where `y` is the row of the pixel, and `x` is the column. Rows
    /// and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use glint::color::Color;
    /// # use glint::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Returns `None` if the location is out-of-bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Writes the canvas as a plain PPM (`P3`) image.
    ///
    /// Channels are clamped to `[0, 1]` and scaled to `0..=255`. Every row
    /// starts a new line, lines never exceed 70 columns, and the output ends
    /// with a newline.
    pub fn to_ppm<W: Write>(&self, mut out: W) -> Result<(), CanvasError> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        if self.width == 0 {
            return Ok(());
        }

        for row in self.pixels.chunks(self.width) {
            let mut line = String::new();

            for pixel in row {
                let c = pixel.clamped();

                for channel in [c.r, c.g, c.b].iter() {
                    let value = ((channel * 255.0).round() as u8).to_string();

                    if !line.is_empty()
                        && line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                        writeln!(out, "{}", line)?;
                        line.clear();
                    }

                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(&value);
                }
            }

            writeln!(out, "{}", line)?;
        }

        Ok(())
    }

    /// Saves a canvas to a PPM file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| CanvasError::Create {
            path: path.display().to_string(),
            source,
        })?;

        let mut out = io::BufWriter::new(file);
        self.to_ppm(&mut out)?;
        out.flush()?;

        log::info!("saved {}x{} image to {}",
            self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
fn ppm_lines(c: &Canvas) -> Vec<String> {
    let mut out = Vec::new();
    c.to_ppm(&mut out).unwrap();

    String::from_utf8(out).unwrap().lines().map(String::from).collect()
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    assert!(c.pixels().iter().all(|&p| p == Color::black()));
}

#[test]
fn out_of_bounds_pixels() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::red());

    assert_eq!(c.read_pixel(2, 0), None);
    assert!(c.pixels().iter().all(|&p| p == Color::black()));
}

#[test]
fn ppm_header() {
    let lines = ppm_lines(&Canvas::new(5, 3));

    assert_eq!(&lines[0..3], &["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let lines = ppm_lines(&c);

    assert_eq!(&lines[3..6], &[
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let lines = ppm_lines(&c);
    let long = "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204";
    let rest = "153 255 204 153 255 204 153 255 204 153 255 204 153";

    assert_eq!(&lines[3..7], &[long, rest, long, rest]);
    assert!(lines.iter().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_newline() {
    let mut out = Vec::new();
    Canvas::new(5, 3).to_ppm(&mut out).unwrap();

    assert_eq!(out.last(), Some(&b'\n'));
}

#[test]
fn rows_merge_in_order() {
    let red = vec![Color::red(); 4];
    let blue = vec![Color::blue(); 2];

    let c = Canvas::from_rows(2, 3, vec![(2, blue), (0, red)]);

    assert_eq!(c.read_pixel(1, 0), Some(Color::red()));
    assert_eq!(c.read_pixel(0, 1), Some(Color::red()));
    assert_eq!(c.read_pixel(1, 2), Some(Color::blue()));
}

#[test]
fn rows_past_the_edge_are_dropped() {
    let c = Canvas::from_rows(2, 1, vec![(0, vec![Color::green(); 6])]);

    assert_eq!(c.pixels().len(), 2);
    assert_eq!(c.read_pixel(1, 0), Some(Color::green()));
}
