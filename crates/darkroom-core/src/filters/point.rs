//! Per-sample adjustments (brightness, contrast, saturation, invert).
//!
//! Each enhancement is a linear blend between the source and a degenerate
//! image:
//!
//! ```text
//! out = degenerate + factor × (in − degenerate)
//! ```
//!
//! | Filter     | Degenerate image          |
//! |------------|---------------------------|
//! | Brightness | black                     |
//! | Contrast   | uniform gray at mean luma |
//! | Saturation | per-pixel luma            |
//!
//! `factor = 1.0` reproduces the input. Alpha is carried through unchanged.

use crate::image::{ChannelMode, Raster};

/// Rec. 601 luma weights.
const LUMA_REC601: [f32; 3] = [0.299, 0.587, 0.114];

/// Round to nearest and clamp into the 8-bit range.
#[inline]
pub(crate) fn quantize(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn luma(px: &[u8]) -> f32 {
    px[0] as f32 * LUMA_REC601[0] + px[1] as f32 * LUMA_REC601[1] + px[2] as f32 * LUMA_REC601[2]
}

#[inline]
fn blend(degenerate: f32, sample: u8, factor: f32) -> u8 {
    quantize(degenerate + factor * (sample as f32 - degenerate))
}

/// Apply `f` to every color sample of the raster, copying alpha.
fn map_color_samples(raster: &Raster, mut f: impl FnMut(&[u8], usize) -> u8) -> Raster {
    let mode = raster.mode();
    let channels = mode.channels();
    let color = mode.color_channels();
    let mut out = Vec::with_capacity(raster.as_bytes().len());
    for px in raster.pixels() {
        for c in 0..color {
            out.push(f(px, c));
        }
        if channels > color {
            out.push(px[color]);
        }
    }
    raster.with_data(out)
}

/// Scale every color sample by `factor`.
///
/// `factor = 0.0` yields black; `factor = 1.0` is the identity.
pub fn brightness(raster: &Raster, factor: f32) -> Raster {
    map_color_samples(raster, |px, c| blend(0.0, px[c], factor))
}

/// Mean luma of the raster, rounded to the nearest integer level.
pub fn mean_luma(raster: &Raster) -> f32 {
    let n = raster.pixel_count() as f64;
    let sum: f64 = match raster.mode() {
        ChannelMode::Grayscale => raster.as_bytes().iter().map(|&v| v as f64).sum(),
        ChannelMode::Rgb | ChannelMode::Rgba => raster.pixels().map(|px| luma(px) as f64).sum(),
    };
    (sum / n).round() as f32
}

/// Push samples away from (`factor > 1`) or toward (`factor < 1`) the
/// image's mean luma.
///
/// `factor = 0.0` yields a uniform gray at the mean.
pub fn contrast(raster: &Raster, factor: f32) -> Raster {
    let mean = mean_luma(raster);
    map_color_samples(raster, |px, c| blend(mean, px[c], factor))
}

/// Blend each pixel with its luma.
///
/// `factor = 0.0` is fully desaturated, `1.0` the identity, larger values
/// oversaturate. Grayscale rasters have no chroma and are returned as-is.
pub fn saturation(raster: &Raster, factor: f32) -> Raster {
    if raster.mode() == ChannelMode::Grayscale {
        return raster.clone();
    }
    let has_alpha = raster.mode().has_alpha();
    let mut out = Vec::with_capacity(raster.as_bytes().len());
    for px in raster.pixels() {
        let y = luma(px);
        out.extend(px[..3].iter().map(|&s| blend(y, s, factor)));
        if has_alpha {
            out.push(px[3]);
        }
    }
    raster.with_data(out)
}

/// Photographic negative. The raster is coerced to RGB first, so alpha is
/// dropped and grayscale becomes three equal channels.
pub fn invert(raster: &Raster) -> Raster {
    let rgb = raster.to_rgb();
    let data = rgb.as_bytes().iter().map(|&v| 255 - v).collect();
    rgb.with_data(data)
}
