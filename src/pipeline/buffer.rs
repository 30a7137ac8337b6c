use std::io::{self, stdout, Write};
use std::path::Path;

use minifb::Window;

use crate::core::Color;
use crate::error::Result;

/// A presentation surface the pipeline draws into.
pub trait Buffer {
    fn new(width: usize, height: usize) -> Self
    where
        Self: Sized;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn clear(&mut self, color: Color);
    /// Writes one pixel. Coordinates outside the surface are ignored.
    fn put_pixel(&mut self, x: i32, y: i32, color: Color);
    /// Reallocates the surface. Contents are undefined until the next clear.
    fn resize(&mut self, width: usize, height: usize);
    fn present(&self) -> io::Result<()> {
        Ok(()) // Default does nothin
    }
    fn present_window(&self, _window: &mut Window) -> Result<()> {
        Ok(()) // Default implementation does nothing
    }
}

fn index_of(width: usize, height: usize, x: i32, y: i32) -> Option<usize> {
    let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
    (x < width && y < height).then_some(x + y * width)
}

/// 0RGB pixels, the layout minifb wants.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
}

impl Buffer for FrameBuffer {
    fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.data.fill(color.to_u32());
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = index_of(self.width, self.height, x, y) {
            self.data[index] = color.to_u32();
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data = vec![0; width * height];
    }

    fn present_window(&self, window: &mut Window) -> Result<()> {
        window.update_with_buffer(&self.data, self.width, self.height)?;
        Ok(())
    }
}

impl FrameBuffer {
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        index_of(self.width, self.height, x, y).map(|i| Color::from_u32(self.data[i]))
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let img = image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = Color::from_u32(self.data[x as usize + y as usize * self.width]);
            image::Rgb([c.r, c.g, c.b])
        });
        img.save(path)?;
        Ok(())
    }
}

/// One full block character per pixel, colored with truecolor escapes.
pub struct TermBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Color>,
}

impl Buffer for TermBuffer {
    fn new(width: usize, height: usize) -> Self {
        TermBuffer {
            width,
            height,
            data: vec![Color::BLACK; width * height],
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.data.fill(color);
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = index_of(self.width, self.height, x, y) {
            self.data[index] = color;
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data = vec![Color::BLACK; width * height];
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        stdout.write_all(self.render_ansi().as_bytes())?;
        stdout.flush()
    }
}

impl TermBuffer {
    /// The whole frame as one escape-sequence string, grouping runs of equal color.
    pub fn render_ansi(&self) -> String {
        let mut output = String::with_capacity(self.width * self.height * 4);
        let mut last_color = None;

        output.push_str("\x1B[?25l"); // Hide cursor
        for y in 0..self.height {
            output.push_str(&format!("\x1B[{};1H", y + 1));
            let row = &self.data[y * self.width..(y + 1) * self.width];
            for &color in row {
                if last_color != Some(color) {
                    output.push_str(&color.to_ansii_escape());
                    last_color = Some(color);
                }
                output.push('█');
            }
        }
        output.push_str("\x1B[0m");
        output
    }
}
