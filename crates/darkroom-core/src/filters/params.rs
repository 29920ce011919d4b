//! Filter selection parameters.
//!
//! `FilterSpec` is everything the filter engine needs for one application:
//! which transformation and how strong. The UI writes it, the engine reads it.

use serde::{Deserialize, Serialize};

/// The nine supported transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterKind {
    /// Pass-through.
    #[default]
    None,
    /// Gaussian blur; intensity is the standard deviation in pixels.
    Blur,
    /// Unsharp-mask sharpening; intensity is the enhancement amount.
    Sharpen,
    /// Multiplicative brightness.
    Brightness,
    /// Contrast around the mean luma.
    Contrast,
    /// Blend between the luma image and the original.
    Saturation,
    /// Fixed 3×3 relief kernel.
    Emboss,
    /// Fixed 3×3 edge-finding kernel.
    EdgeDetection,
    /// Photographic negative of the RGB image.
    Invert,
}

impl FilterKind {
    /// Human-readable label for menus.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Blur => "Blur",
            Self::Sharpen => "Sharpen",
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::Saturation => "Saturation",
            Self::Emboss => "Emboss",
            Self::EdgeDetection => "Edge Detection",
            Self::Invert => "Invert",
        }
    }

    /// All filters in menu order.
    pub fn all() -> &'static [Self] {
        const ALL: [FilterKind; 9] = [
            FilterKind::None,
            FilterKind::Blur,
            FilterKind::Sharpen,
            FilterKind::Brightness,
            FilterKind::Contrast,
            FilterKind::Saturation,
            FilterKind::Emboss,
            FilterKind::EdgeDetection,
            FilterKind::Invert,
        ];
        &ALL
    }

    /// Whether the filter reads the intensity parameter.
    pub const fn uses_intensity(&self) -> bool {
        matches!(
            self,
            Self::Blur | Self::Sharpen | Self::Brightness | Self::Contrast | Self::Saturation
        )
    }
}

/// A filter selection with its intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    /// Strength parameter. Ignored by filters that don't use it.
    #[serde(default = "FilterSpec::neutral_intensity")]
    pub intensity: f32,
}

impl FilterSpec {
    pub const fn new(kind: FilterKind, intensity: f32) -> Self {
        Self { kind, intensity }
    }

    /// Intensity the engine actually applies: 1.0 for filters that ignore it.
    pub fn effective_intensity(&self) -> f32 {
        if self.kind.uses_intensity() {
            self.intensity
        } else {
            1.0
        }
    }

    fn neutral_intensity() -> f32 {
        1.0
    }
}

impl Default for FilterSpec {
    /// No filter at neutral intensity.
    fn default() -> Self {
        Self::new(FilterKind::None, 1.0)
    }
}

impl From<FilterKind> for FilterSpec {
    fn from(kind: FilterKind) -> Self {
        Self::new(kind, 1.0)
    }
}
