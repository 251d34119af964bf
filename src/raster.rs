//! Pixel raster written by the raycaster.
//!
//! Row-major, top-left origin. Byte `c` of pixel `(x, y)` lives at
//! `(x + y * width) * stride + c`.

use image::RgbImage;

use crate::error::{Result, TricastError};

/// Flat pixel buffer with a fixed channel stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
}

impl Raster {
    /// Number of colour channels the raycaster writes per pixel.
    pub const COLOR_CHANNELS: usize = 3;

    /// Allocate a zeroed raster.
    ///
    /// Fails with `InvalidArgument` when any dimension is zero or the byte
    /// count overflows, and with `ResourceExhausted` when the buffer cannot
    /// be reserved.
    pub fn new(width: usize, height: usize, stride: usize) -> Result<Self> {
        if width == 0 || height == 0 || stride == 0 {
            return Err(TricastError::InvalidArgument(format!(
                "raster dimensions must be non-zero (got {width}x{height}x{stride})"
            )));
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(stride))
            .ok_or_else(|| {
                TricastError::InvalidArgument(format!(
                    "raster {width}x{height}x{stride} overflows addressable memory"
                ))
            })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| TricastError::ResourceExhausted { what: "raster", bytes: len })?;
        data.resize(len, 0);

        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Allocate an RGB raster (stride 3).
    pub fn rgb(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, Self::COLOR_CHANNELS)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per pixel.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Byte offset of channel `c` of pixel `(x, y)`.
    pub fn index(&self, x: usize, y: usize, c: usize) -> usize {
        (x + y * self.width) * self.stride + c
    }

    /// All channels of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.index(x, y, 0);
        &self.data[start..start + self.stride]
    }

    /// Write the colour channels of pixel `(x, y)`. Extra channels are left alone.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let start = self.index(x, y, 0);
        self.data[start..start + Self::COLOR_CHANNELS].copy_from_slice(&rgb);
    }

    /// Raw bytes, ready for a blit layer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy the colour channels into an `image` buffer.
    ///
    /// Rasters with fewer than three channels are expanded from the first one.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let p = self.pixel(x as usize, y as usize);
            let channel = |c: usize| p.get(c).copied().unwrap_or(p[0]);
            image::Rgb([channel(0), channel(1), channel(2)])
        })
    }
}
