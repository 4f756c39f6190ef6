//! Single-channel 8-bit luminance frames.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame length mismatch: expected {expected} bytes for {width}x{height}, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// One decoded luminance frame in row-major order.
///
/// Pixel values are `u8`, so the [0, 255] input-domain precondition is
/// enforced by the type; the only checkable precondition left is the shape.
#[derive(Debug, Clone)]
pub struct LumaFrame {
    /// Grayscale pixel data (width * height bytes, row-major).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl LumaFrame {
    /// Wrap pixel data, verifying `data.len() == width * height`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Pixel value at `(x, y)`. Callers guarantee in-bounds coordinates.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}
