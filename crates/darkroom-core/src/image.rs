//! Raster representation shared by every pipeline stage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Channel layout of a raster's pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelMode {
    /// Single luminance sample per pixel.
    Grayscale,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ChannelMode {
    /// Samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Samples per pixel that carry color (alpha excluded).
    pub const fn color_channels(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb | Self::Rgba => 3,
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Short mode label used by image tooling (`L`, `RGB`, `RGBA`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grayscale => "L",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded 8-bit pixel grid.
///
/// Samples are laid out row-major and channel-interleaved. A `Raster` is
/// never mutated after construction; every transform returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    mode: ChannelMode,
    data: Vec<u8>,
}

impl Raster {
    /// Build a raster, checking that both dimensions are non-zero and that
    /// `data.len() == width * height * mode.channels()`.
    pub fn new(width: u32, height: u32, mode: ChannelMode, data: Vec<u8>) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * mode.channels();
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    /// Raster where every pixel holds the same samples.
    ///
    /// `pixel.len()` must equal `mode.channels()`.
    pub fn filled(width: u32, height: u32, mode: ChannelMode, pixel: &[u8]) -> CoreResult<Self> {
        if pixel.len() != mode.channels() {
            return Err(CoreError::BufferSize {
                expected: mode.channels(),
                actual: pixel.len(),
            });
        }
        let count = width as usize * height as usize;
        let data = pixel.repeat(count);
        Self::new(width, height, mode, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved samples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster, returning its sample buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Iterate pixels as channel slices.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.mode.channels())
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.mode.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }

    /// Convert to an RGB raster: grayscale is replicated into three
    /// channels and alpha is dropped.
    pub fn to_rgb(&self) -> Raster {
        let data = match self.mode {
            ChannelMode::Rgb => self.data.clone(),
            ChannelMode::Grayscale => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            ChannelMode::Rgba => self
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        };
        Raster {
            width: self.width,
            height: self.height,
            mode: ChannelMode::Rgb,
            data,
        }
    }

    /// Same geometry and mode with a new sample buffer. Callers inside the
    /// crate guarantee the length.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Raster {
        debug_assert_eq!(data.len(), self.data.len());
        Raster {
            width: self.width,
            height: self.height,
            mode: self.mode,
            data,
        }
    }
}
