use rgb::{RGB, RGB8};

use crate::geometry::FloatType;

/// Linear radiance accumulated for one pixel.
pub(crate) type Radiance = RGB<FloatType>;

/// Finished 8-bit RGB image.
///
/// Row 0 is the bottom scanline; callers targeting top-left-origin image
/// formats invert the row order themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<RGB8>,
}

impl Frame {
    pub(crate) fn new(width: u32, height: u32) -> Frame {
        Frame {
            width,
            height,
            pixels: vec![RGB8::new(0, 0, 0); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> RGB8 {
        self.pixels[self.index(x, y)]
    }

    /// Row-major pixel data, bottom row first.
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    pub(crate) fn set_row(&mut self, y: u32, row: &[RGB8]) {
        let start = self.index(0, y);
        self.pixels[start..start + self.width as usize].copy_from_slice(row);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y * self.width + x) as usize
    }
}

/// Quantizes radiance summed over `samples` rays into an output pixel:
/// normalize, clamp to [0, 0.9999], scale to 255 and truncate.
pub(crate) fn quantize(sum: Radiance, samples: u32) -> RGB8 {
    let scale = 1.0 / samples as FloatType;
    let channel = |value: FloatType| ((value * scale).clamp(0.0, 0.9999) * 255.0) as u8;
    RGB8::new(channel(sum.r), channel(sum.g), channel(sum.b))
}

/// Floating point accumulation buffer for progressive rendering. Keeping the
/// running sums in floats avoids requantizing 8-bit values between passes.
pub(crate) struct Accumulator {
    width: u32,
    pixels: Vec<Radiance>,
}

impl Accumulator {
    pub fn new(width: u32, height: u32) -> Accumulator {
        Accumulator {
            width,
            pixels: vec![Radiance::new(0.0, 0.0, 0.0); (width * height) as usize],
        }
    }

    pub fn add(&mut self, x: u32, y: u32, radiance: Radiance) {
        self.pixels[(y * self.width + x) as usize] += radiance;
    }

    /// Quantized view of the accumulated image after `samples` full passes.
    pub fn snapshot(&self, samples: u32, into: &mut Frame) {
        debug_assert!(into.width == self.width);
        for (pixel, sum) in into.pixels.iter_mut().zip(self.pixels.iter()) {
            *pixel = quantize(*sum, samples);
        }
    }
}
