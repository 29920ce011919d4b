//! Per-channel 256-bin histograms.

use serde::{Deserialize, Serialize};

use crate::image::Raster;
use crate::scopes::Channel;

/// Number of bins per channel, one per 8-bit level.
pub const BINS: usize = 256;

/// Bin counts for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHistogram {
    pub channel: Channel,
    /// `bins[v]` is the number of pixels whose sample equals `v`. Always
    /// [`BINS`] entries.
    pub bins: Vec<u32>,
}

impl ChannelHistogram {
    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&b| b as u64).sum()
    }
}

/// Histograms for every reported channel, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub channels: Vec<ChannelHistogram>,
    /// Largest bin value across all channels (for normalization).
    pub peak: u32,
}

impl Histogram {
    /// Bins for one channel, if the raster reported it.
    pub fn get(&self, channel: Channel) -> Option<&[u32]> {
        self.channels
            .iter()
            .find(|h| h.channel == channel)
            .map(|h| h.bins.as_slice())
    }
}

/// Count exact sample values per channel.
///
/// Color rasters report red, green and blue (alpha is skipped); grayscale
/// rasters report a single [`Channel::Grayscale`] series.
pub fn compute(raster: &Raster) -> Histogram {
    let mode = raster.mode();
    let reported = Channel::reported(mode);
    let mut bins = vec![[0u32; BINS]; reported.len()];

    for px in raster.pixels() {
        for (c, counts) in bins.iter_mut().enumerate() {
            counts[px[c] as usize] += 1;
        }
    }

    let peak = bins.iter().flat_map(|b| b.iter().copied()).max().unwrap_or(0);
    let channels = reported
        .iter()
        .zip(bins)
        .map(|(&channel, counts)| ChannelHistogram {
            channel,
            bins: counts.to_vec(),
        })
        .collect();

    Histogram { channels, peak }
}
