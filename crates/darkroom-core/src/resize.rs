//! Raster resampling.
//!
//! Both directions use the triangle (bilinear) filter from
//! `image::imageops`. When downscaling the filter support widens with the
//! scale factor, so every source pixel contributes.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, Pixel, Rgb, Rgba};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::image::{ChannelMode, Raster};

/// Smallest target edge accepted by [`ResizeSpec`].
pub const MIN_DIMENSION: u32 = 50;
/// Largest target edge accepted by [`ResizeSpec`].
pub const MAX_DIMENSION: u32 = 2000;

/// Plain width/height pair, the serialized form of [`ResizeSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Validated resize target. Both edges lie in
/// `[MIN_DIMENSION, MAX_DIMENSION]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Dimensions", into = "Dimensions")]
pub struct ResizeSpec {
    width: u32,
    height: u32,
}

impl ResizeSpec {
    pub fn new(width: u32, height: u32) -> CoreResult<Self> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(CoreError::InvalidDimension { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl TryFrom<Dimensions> for ResizeSpec {
    type Error = CoreError;

    fn try_from(d: Dimensions) -> Result<Self, Self::Error> {
        Self::new(d.width, d.height)
    }
}

impl From<ResizeSpec> for Dimensions {
    fn from(spec: ResizeSpec) -> Self {
        Self {
            width: spec.width,
            height: spec.height,
        }
    }
}

/// Resample a raster to exactly `width × height`, keeping its channel mode.
///
/// Fails with [`CoreError::InvalidDimension`] when either edge is zero.
pub fn resize(raster: &Raster, width: u32, height: u32) -> CoreResult<Raster> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimension { width, height });
    }
    if (width, height) == (raster.width(), raster.height()) {
        return Ok(raster.clone());
    }

    debug!(
        from_width = raster.width(),
        from_height = raster.height(),
        width,
        height,
        "resizing raster"
    );

    let data = match raster.mode() {
        ChannelMode::Grayscale => resample::<Luma<u8>>(raster, width, height)?,
        ChannelMode::Rgb => resample::<Rgb<u8>>(raster, width, height)?,
        ChannelMode::Rgba => resample::<Rgba<u8>>(raster, width, height)?,
    };
    Raster::new(width, height, raster.mode(), data)
}

fn resample<P>(raster: &Raster, width: u32, height: u32) -> CoreResult<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let src = ImageBuffer::<P, &[u8]>::from_raw(raster.width(), raster.height(), raster.as_bytes())
        .ok_or(CoreError::BufferSize {
            expected: raster.pixel_count() * P::CHANNEL_COUNT as usize,
            actual: raster.as_bytes().len(),
        })?;
    Ok(imageops::resize(&src, width, height, FilterType::Triangle).into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32, mode: ChannelMode) -> Raster {
        let c = mode.channels();
        let mut data = Vec::with_capacity(width as usize * height as usize * c);
        for y in 0..height {
            for x in 0..width {
                let v = if (x / 4 + y / 4) % 2 == 0 { 230 } else { 20 };
                data.extend(std::iter::repeat_n(v, c));
            }
        }
        Raster::new(width, height, mode, data).unwrap()
    }

    #[test]
    fn test_resize_spec_bounds() {
        assert!(ResizeSpec::new(50, 2000).is_ok());
        assert_eq!(
            ResizeSpec::new(49, 100).unwrap_err(),
            CoreError::InvalidDimension { width: 49, height: 100 }
        );
        assert!(ResizeSpec::new(100, 2001).is_err());
    }

    #[test]
    fn test_resize_rejects_zero() {
        let r = checker(8, 8, ChannelMode::Rgb);
        assert!(matches!(resize(&r, 0, 5), Err(CoreError::InvalidDimension { .. })));
    }

    #[test]
    fn test_resize_exact_dimensions_and_mode() {
        for mode in [ChannelMode::Grayscale, ChannelMode::Rgb, ChannelMode::Rgba] {
            let r = checker(37, 23, mode);
            let out = resize(&r, 91, 50).unwrap();
            assert_eq!((out.width(), out.height(), out.mode()), (91, 50, mode));
        }
    }

    #[test]
    fn test_down_then_up_returns_original_size() {
        let r = checker(100, 100, ChannelMode::Rgb);
        let small = resize(&r, 50, 50).unwrap();
        let back = resize(&small, 100, 100).unwrap();
        assert_eq!((back.width(), back.height()), (100, 100));
    }

    #[test]
    fn test_flat_image_stays_flat() {
        let r = Raster::filled(60, 40, ChannelMode::Rgb, &[12, 130, 250]).unwrap();
        let out = resize(&r, 173, 55).unwrap();
        assert!(out.pixels().all(|p| p == [12, 130, 250]));
    }

    #[test]
    fn test_resize_spec_deserialize_validates() {
        let ok: ResizeSpec = serde_json::from_str(r#"{"width":64,"height":80}"#).unwrap();
        assert_eq!((ok.width(), ok.height()), (64, 80));
        assert!(serde_json::from_str::<ResizeSpec>(r#"{"width":10,"height":80}"#).is_err());
    }
}
