//! Image analysis: histograms and summary statistics.

pub mod histogram;
pub mod stats;

pub use histogram::{ChannelHistogram, Histogram};
pub use stats::{ChannelStats, ImageStats};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::image::{ChannelMode, Raster};

/// A channel reported by the analysis scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Grayscale,
}

impl Channel {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Grayscale => "Grayscale",
        }
    }

    /// Channels analysed for a given mode, in buffer order.
    pub fn reported(mode: ChannelMode) -> &'static [Channel] {
        const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
        const GRAY: [Channel; 1] = [Channel::Grayscale];
        match mode {
            ChannelMode::Grayscale => &GRAY,
            ChannelMode::Rgb | ChannelMode::Rgba => &RGB,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Histogram and statistics of one raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub histogram: Histogram,
    pub stats: ImageStats,
}

/// Run every scope over a raster.
pub fn analyze(raster: &Raster) -> Analysis {
    let histogram = histogram::compute(raster);
    let stats = stats::from_histogram(raster, &histogram);
    Analysis { histogram, stats }
}
