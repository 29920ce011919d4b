//! Spatial filters built on 2D convolution.
//!
//! All convolutions extend the border by replicating the nearest edge
//! sample, so flat regions stay flat up to the frame edge. Color channels
//! are filtered; alpha is copied from the source.
//!
//! # Kernels
//!
//! - [`Kernel::gaussian_row`] - 1D Gaussian, applied separably for blur
//! - [`Kernel::smooth`] - low-pass used as the unsharp-mask reference
//! - [`Kernel::emboss`] - relief, offset by mid-gray
//! - [`Kernel::find_edges`] - 8-neighbour Laplacian

use tracing::trace;

use crate::filters::point::quantize;
use crate::image::Raster;

/// Largest blur standard deviation in pixels. At this size every tap
/// already sits far outside any raster, so larger values blur identically.
pub const MAX_BLUR_SIGMA: f32 = 1.0e5;

/// Convolution kernel with normalized weights and a constant offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    width: usize,
    height: usize,
    offset: f32,
}

impl Kernel {
    /// Build a kernel from raw weights divided by `scale`.
    ///
    /// Width and height must be odd and `weights.len() == width * height`.
    fn from_weights(weights: &[f32], width: usize, height: usize, scale: f32, offset: f32) -> Self {
        debug_assert!(width % 2 == 1 && height % 2 == 1);
        debug_assert_eq!(weights.len(), width * height);
        Self {
            weights: weights.iter().map(|w| w / scale).collect(),
            width,
            height,
            offset,
        }
    }

    /// 3×3 smoothing kernel:
    ///
    /// ```text
    /// 1 1 1
    /// 1 5 1   / 13
    /// 1 1 1
    /// ```
    pub fn smooth() -> Self {
        #[rustfmt::skip]
        let w = [
            1.0, 1.0, 1.0,
            1.0, 5.0, 1.0,
            1.0, 1.0, 1.0,
        ];
        Self::from_weights(&w, 3, 3, 13.0, 0.0)
    }

    /// 3×3 emboss kernel. The result is offset by 128 so flat areas map
    /// to mid-gray.
    pub fn emboss() -> Self {
        #[rustfmt::skip]
        let w = [
            -1.0, 0.0, 0.0,
             0.0, 1.0, 0.0,
             0.0, 0.0, 0.0,
        ];
        Self::from_weights(&w, 3, 3, 1.0, 128.0)
    }

    /// 3×3 edge-finding kernel. Weights sum to zero, so flat areas map to
    /// black.
    pub fn find_edges() -> Self {
        #[rustfmt::skip]
        let w = [
            -1.0, -1.0, -1.0,
            -1.0,  8.0, -1.0,
            -1.0, -1.0, -1.0,
        ];
        Self::from_weights(&w, 3, 3, 1.0, 0.0)
    }

    /// Horizontal Gaussian of standard deviation `sigma`, truncated at
    /// `ceil(3σ)` and normalized to unit sum.
    ///
    /// The kernel never extends past `max_radius` taps on either side. Taps
    /// beyond that read the replicated edge sample when `max_radius` covers
    /// the image, so their weight is folded into the two end taps. `sigma`
    /// must be positive; values above [`MAX_BLUR_SIGMA`] (infinity
    /// included) are treated as [`MAX_BLUR_SIGMA`].
    pub fn gaussian_row(sigma: f32, max_radius: usize) -> Self {
        let sigma = f64::from(sigma.min(MAX_BLUR_SIGMA));
        let full = (3.0 * sigma).ceil().max(1.0) as usize;
        let radius = full.min(max_radius);
        let two_sigma2 = 2.0 * sigma * sigma;
        let weight = |d: usize| {
            let d = d as f64;
            (-d * d / two_sigma2).exp()
        };

        let mut half: Vec<f64> = (0..=radius).map(weight).collect();
        half[radius] += (radius + 1..=full).map(weight).sum::<f64>();

        let raw: Vec<f32> = half
            .iter()
            .rev()
            .chain(&half[1..])
            .map(|&w| w as f32)
            .collect();
        let sum: f32 = raw.iter().sum();
        Self::from_weights(&raw, raw.len(), 1, sum, 0.0)
    }

    /// The same weights laid out vertically.
    pub fn transposed(&self) -> Self {
        let mut weights = vec![0.0; self.weights.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                weights[x * self.height + y] = self.weights[y * self.width + x];
            }
        }
        Self {
            weights,
            width: self.height,
            height: self.width,
            offset: self.offset,
        }
    }

    /// Kernel half-extent `(rx, ry)`.
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

}

/// Convolve an interleaved float buffer.
///
/// The first `color` channels of each pixel are filtered; any remaining
/// channels are copied through.
fn convolve(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    color: usize,
    kernel: &Kernel,
) -> Vec<f32> {
    let (rx, ry) = kernel.radius();
    let max_x = width as isize - 1;
    let max_y = height as isize - 1;
    let mut dst = vec![0.0f32; src.len()];

    for y in 0..height {
        for x in 0..width {
            let base = (y * width + x) * channels;
            for c in 0..color {
                let mut acc = 0.0f32;
                for ky in 0..kernel.height {
                    let sy = (y as isize + ky as isize - ry as isize).clamp(0, max_y) as usize;
                    let row = &kernel.weights[ky * kernel.width..(ky + 1) * kernel.width];
                    for (kx, w) in row.iter().enumerate() {
                        if *w == 0.0 {
                            continue;
                        }
                        let sx = (x as isize + kx as isize - rx as isize).clamp(0, max_x) as usize;
                        acc += src[(sy * width + sx) * channels + c] * w;
                    }
                }
                dst[base + c] = acc + kernel.offset;
            }
            for c in color..channels {
                dst[base + c] = src[base + c];
            }
        }
    }
    dst
}

fn to_f32(raster: &Raster) -> Vec<f32> {
    raster.as_bytes().iter().map(|&v| v as f32).collect()
}

fn run(raster: &Raster, src: &[f32], kernel: &Kernel) -> Vec<f32> {
    let mode = raster.mode();
    convolve(
        src,
        raster.width() as usize,
        raster.height() as usize,
        mode.channels(),
        mode.color_channels(),
        kernel,
    )
}

/// Convolve the raster with a kernel, rounding and clamping the result.
pub fn apply_kernel(raster: &Raster, kernel: &Kernel) -> Raster {
    let out = run(raster, &to_f32(raster), kernel);
    raster.with_data(out.into_iter().map(quantize).collect())
}

/// Separable Gaussian blur with standard deviation `sigma` pixels.
///
/// Non-positive (or NaN) `sigma` leaves the image unchanged. The kernel is
/// capped at the raster's longer edge, so any positive `sigma` (infinity
/// included) costs at most that many taps per side.
pub fn gaussian_blur(raster: &Raster, sigma: f32) -> Raster {
    if !(sigma > 0.0) {
        return raster.clone();
    }
    let extent = raster.width().max(raster.height()) as usize;
    let row = Kernel::gaussian_row(sigma, extent.saturating_sub(1));
    trace!(sigma, taps = row.width, "gaussian blur");
    let horizontal = run(raster, &to_f32(raster), &row);
    let both = run(raster, &horizontal, &row.transposed());
    raster.with_data(both.into_iter().map(quantize).collect())
}

/// Unsharp-mask sharpening against the [`Kernel::smooth`] low-pass:
///
/// ```text
/// out = in + amount × (in − smooth(in))
/// ```
///
/// `amount = 0.0` is the identity.
pub fn sharpen(raster: &Raster, amount: f32) -> Raster {
    let src = to_f32(raster);
    let low = run(raster, &src, &Kernel::smooth());
    let data = src
        .iter()
        .zip(&low)
        .map(|(&v, &l)| quantize(v + amount * (v - l)))
        .collect();
    raster.with_data(data)
}
