//! Histogram chart series for the rendering collaborator.
//!
//! The channel → color mapping is a fixed table; the UI only draws what it
//! is handed.

use serde::{Deserialize, Serialize};

use darkroom_core::scopes::{Channel, Histogram};

/// Line color of each analysed channel.
const CHANNEL_COLORS: [(Channel, &str); 4] = [
    (Channel::Red, "red"),
    (Channel::Green, "green"),
    (Channel::Blue, "blue"),
    (Channel::Grayscale, "black"),
];

pub const X_AXIS_LABEL: &str = "Pixel Value";
pub const Y_AXIS_LABEL: &str = "Frequency";

/// Plot color for `channel`.
pub fn channel_color(channel: Channel) -> &'static str {
    CHANNEL_COLORS
        .iter()
        .find(|(c, _)| *c == channel)
        .map_or("black", |&(_, color)| color)
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    /// One frequency per pixel value, 256 points.
    pub points: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Upper bound of the y axis.
    pub y_max: u32,
    pub series: Vec<ChartSeries>,
}

impl HistogramChart {
    pub fn new(title: impl Into<String>, histogram: &Histogram) -> Self {
        let series = histogram
            .channels
            .iter()
            .map(|h| ChartSeries {
                label: h.channel.name().to_string(),
                color: channel_color(h.channel).to_string(),
                points: h.bins.clone(),
            })
            .collect();
        Self {
            title: title.into(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            y_max: histogram.peak,
            series,
        }
    }
}

/// Side-by-side charts of the original and processed histograms.
///
/// Both charts share the larger peak so their heights compare directly.
pub fn comparison(original: &Histogram, processed: &Histogram) -> (HistogramChart, HistogramChart) {
    let mut before = HistogramChart::new("Original", original);
    let mut after = HistogramChart::new("Processed", processed);
    let y_max = before.y_max.max(after.y_max);
    before.y_max = y_max;
    after.y_max = y_max;
    (before, after)
}
