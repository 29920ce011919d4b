//! Application configuration: control ranges and export naming.

use serde::{Deserialize, Serialize};

use darkroom_core::FilterKind;
use darkroom_core::resize::{MAX_DIMENSION, MIN_DIMENSION};
use darkroom_io::{EXPORT_FILE_NAME, EXPORT_MIME, SourceFormat};

/// Default slider position for every intensity control.
const DEFAULT_INTENSITY: f32 = 1.0;
/// Slider step for every intensity control.
const INTENSITY_STEP: f32 = 0.1;

/// Range and default of one intensity slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderControl {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub step: f32,
}

impl SliderControl {
    const fn intensity(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            default: DEFAULT_INTENSITY,
            step: INTENSITY_STEP,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Intensity slider for one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterControl {
    pub kind: FilterKind,
    pub label: String,
    pub slider: SliderControl,
}

/// Range of the resize width/height inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeBounds {
    pub min: u32,
    pub max: u32,
}

/// Runtime configuration sent to the UI on connect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sliders for the filters that read an intensity, in menu order.
    pub filters: Vec<FilterControl>,
    pub resize: ResizeBounds,
    /// Upload extensions, lowercase without the dot.
    pub upload_extensions: Vec<String>,
    pub export_file_name: String,
    pub export_mime: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let filters = FilterKind::all()
            .iter()
            .filter_map(|&kind| {
                default_slider(kind).map(|slider| FilterControl {
                    kind,
                    label: kind.label().to_string(),
                    slider,
                })
            })
            .collect();
        Self {
            filters,
            resize: ResizeBounds {
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            },
            upload_extensions: SourceFormat::EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            export_mime: EXPORT_MIME.to_string(),
        }
    }
}

fn default_slider(kind: FilterKind) -> Option<SliderControl> {
    match kind {
        FilterKind::Blur => Some(SliderControl::intensity(0.1, 5.0)),
        FilterKind::Sharpen | FilterKind::Brightness | FilterKind::Contrast => {
            Some(SliderControl::intensity(0.1, 3.0))
        }
        FilterKind::Saturation => Some(SliderControl::intensity(0.0, 3.0)),
        FilterKind::None | FilterKind::Emboss | FilterKind::EdgeDetection | FilterKind::Invert => {
            None
        }
    }
}

impl AppConfig {
    /// Slider for `kind`, if that filter has one.
    pub fn slider(&self, kind: FilterKind) -> Option<&SliderControl> {
        self.filters.iter().find(|c| c.kind == kind).map(|c| &c.slider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sliders_exist_only_for_intensity_filters() {
        let config = AppConfig::default();
        for &kind in FilterKind::all() {
            assert_eq!(config.slider(kind).is_some(), kind.uses_intensity(), "{kind:?}");
        }
    }

    #[test]
    fn test_default_ranges() {
        let config = AppConfig::default();
        let blur = config.slider(FilterKind::Blur).unwrap();
        assert_abs_diff_eq!(blur.min, 0.1);
        assert_abs_diff_eq!(blur.max, 5.0);
        let saturation = config.slider(FilterKind::Saturation).unwrap();
        assert_abs_diff_eq!(saturation.min, 0.0);
        assert!(saturation.contains(0.0));
        assert!(!blur.contains(5.5));
        for control in &config.filters {
            assert_abs_diff_eq!(control.slider.default, 1.0);
            assert_abs_diff_eq!(control.slider.step, 0.1);
        }
        assert_eq!(config.resize, ResizeBounds { min: 50, max: 2000 });
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"export_file_name":"out.png"}"#).unwrap();
        assert_eq!(config.export_file_name, "out.png");
        assert_eq!(config.export_mime, "image/png");
        assert_eq!(config.upload_extensions, ["png", "jpg", "jpeg", "gif", "bmp"]);
        assert_eq!(config.filters.len(), 5);
    }

    #[test]
    fn test_initialize_round_trips_config() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
