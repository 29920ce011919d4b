//! Darkroom Core: the image transformation and analysis layer.
//!
//! This crate holds the raster model, the filter and resize engines, and the
//! histogram/statistics scopes. It performs no I/O and has no UI
//! dependencies; every operation takes a raster by reference and returns a
//! new owned one.

pub mod error;
pub mod filters;
pub mod image;
pub mod pipeline;
pub mod resize;
pub mod scopes;

// Re-exports for convenience.
pub use error::{CoreError, CoreResult};
pub use filters::{FilterKind, FilterSpec};
pub use image::{ChannelMode, Raster};
pub use pipeline::{ProcessRequest, process};
pub use resize::ResizeSpec;
pub use scopes::{Analysis, Channel, Histogram, ImageStats};
