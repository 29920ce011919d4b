//! Filter engine: one entry point dispatching over [`FilterKind`].

pub mod convolve;
pub mod params;
pub mod point;

pub use convolve::Kernel;
pub use params::{FilterKind, FilterSpec};

use tracing::debug;

use crate::image::Raster;

/// Apply a filter, producing a new raster.
///
/// Total for every raster and every intensity: out-of-range intensities
/// are applied as given and the result is clamped to `[0, 255]`.
/// Only [`FilterKind::Invert`] changes the channel mode (to RGB).
pub fn apply(raster: &Raster, spec: &FilterSpec) -> Raster {
    let intensity = spec.effective_intensity();
    debug!(
        filter = spec.kind.label(),
        intensity,
        width = raster.width(),
        height = raster.height(),
        "applying filter"
    );
    match spec.kind {
        FilterKind::None => raster.clone(),
        FilterKind::Blur => convolve::gaussian_blur(raster, intensity),
        FilterKind::Sharpen => convolve::sharpen(raster, intensity),
        FilterKind::Brightness => point::brightness(raster, intensity),
        FilterKind::Contrast => point::contrast(raster, intensity),
        FilterKind::Saturation => point::saturation(raster, intensity),
        FilterKind::Emboss => convolve::apply_kernel(raster, &Kernel::emboss()),
        FilterKind::EdgeDetection => convolve::apply_kernel(raster, &Kernel::find_edges()),
        FilterKind::Invert => point::invert(raster),
    }
}
