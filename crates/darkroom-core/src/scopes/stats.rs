//! Summary statistics: per-channel mean and standard deviation plus
//! whole-buffer extrema.
//!
//! Mean and deviation follow the histogram's channel selection (alpha
//! excluded). `global_min`, `global_max` and `pixel_count` are taken over
//! the raw interleaved buffer, alpha included, so `pixel_count` equals
//! `width × height × channels`.

use serde::{Deserialize, Serialize};

use crate::image::Raster;
use crate::scopes::Channel;
use crate::scopes::histogram::{self, ChannelHistogram, Histogram};

/// Mean and population standard deviation of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub channel: Channel,
    pub mean: f64,
    pub std_dev: f64,
}

/// Summary statistics of a raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageStats {
    /// Per-channel moments in display order.
    pub channels: Vec<ChannelStats>,
    pub global_max: u8,
    pub global_min: u8,
    /// Number of samples in the buffer (all channels).
    pub pixel_count: usize,
}

impl ImageStats {
    pub fn mean(&self, channel: Channel) -> Option<f64> {
        self.find(channel).map(|s| s.mean)
    }

    pub fn std_dev(&self, channel: Channel) -> Option<f64> {
        self.find(channel).map(|s| s.std_dev)
    }

    fn find(&self, channel: Channel) -> Option<&ChannelStats> {
        self.channels.iter().find(|s| s.channel == channel)
    }
}

/// Population moments (divisor N) from a channel's bin counts.
fn moments(series: &ChannelHistogram) -> ChannelStats {
    let n = series.total() as f64;
    let mut sum = 0.0_f64;
    for (v, &count) in series.bins.iter().enumerate() {
        sum += v as f64 * count as f64;
    }
    let mean = sum / n;

    let mut sq = 0.0_f64;
    for (v, &count) in series.bins.iter().enumerate() {
        let d = v as f64 - mean;
        sq += d * d * count as f64;
    }

    ChannelStats {
        channel: series.channel,
        mean,
        std_dev: (sq / n).sqrt(),
    }
}

/// Compute summary statistics for a raster.
pub fn compute(raster: &Raster) -> ImageStats {
    from_histogram(raster, &histogram::compute(raster))
}

/// Statistics reusing an already computed histogram of the same raster.
pub fn from_histogram(raster: &Raster, hist: &Histogram) -> ImageStats {
    let channels = hist.channels.iter().map(moments).collect();

    let bytes = raster.as_bytes();
    // Rasters are never empty, so the fallbacks are unreachable.
    let global_max = bytes.iter().copied().max().unwrap_or(0);
    let global_min = bytes.iter().copied().min().unwrap_or(0);

    ImageStats {
        channels,
        global_max,
        global_min,
        pixel_count: bytes.len(),
    }
}
