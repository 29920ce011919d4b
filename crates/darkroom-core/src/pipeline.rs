//! The processing chain behind a single "process" action.
//!
//! ```text
//!   source ──→ filter ──→ resize? ──→ processed
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CoreResult;
use crate::filters::{self, FilterSpec};
use crate::image::Raster;
use crate::resize::{self, ResizeSpec};

/// Full parameter set for one processing run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub filter: FilterSpec,
    /// Target size; `None` keeps the filtered raster's size.
    #[serde(default)]
    pub resize: Option<ResizeSpec>,
}

impl ProcessRequest {
    pub fn new(filter: FilterSpec, resize: Option<ResizeSpec>) -> Self {
        Self { filter, resize }
    }
}

/// Filter then optionally resize `source`, returning a new raster.
pub fn process(source: &Raster, request: &ProcessRequest) -> CoreResult<Raster> {
    let filtered = filters::apply(source, &request.filter);
    let out = match request.resize {
        Some(target) => resize::resize(&filtered, target.width(), target.height())?,
        None => filtered,
    };
    info!(
        filter = request.filter.kind.label(),
        width = out.width(),
        height = out.height(),
        mode = out.mode().label(),
        "processed image"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterKind;
    use crate::image::ChannelMode;

    #[test]
    fn test_default_request_is_identity() {
        let r = Raster::filled(3, 3, ChannelMode::Rgb, &[5, 6, 7]).unwrap();
        assert_eq!(process(&r, &ProcessRequest::default()).unwrap(), r);
    }

    #[test]
    fn test_filter_then_resize() {
        let r = Raster::filled(80, 60, ChannelMode::Grayscale, &[100]).unwrap();
        let request = ProcessRequest::new(
            FilterSpec::new(FilterKind::Brightness, 2.0),
            Some(ResizeSpec::new(120, 50).unwrap()),
        );
        let out = process(&r, &request).unwrap();
        assert_eq!((out.width(), out.height()), (120, 50));
        assert!(out.as_bytes().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{"filter":{"kind":"Blur","intensity":2.5},"resize":{"width":200,"height":100}}"#;
        let req: ProcessRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.filter.kind, FilterKind::Blur);
        assert_eq!(req.resize.map(|r| r.width()), Some(200));

        let bare: ProcessRequest = serde_json::from_str(r#"{"filter":{"kind":"Invert"}}"#).unwrap();
        assert_eq!(bare.filter.intensity, 1.0);
        assert!(bare.resize.is_none());
    }
}
