//! PNG export and its inverse.
//!
//! The PNG color type follows the raster mode (L8, RGB8, RGBA8), so a
//! decode of the encoded bytes reproduces the raster exactly.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use darkroom_core::{ChannelMode, Raster};

use crate::error::{IoError, IoResult};
use crate::source::normalize;

/// File name offered for download.
pub const EXPORT_FILE_NAME: &str = "processed_image.png";
/// MIME type of the exported stream.
pub const EXPORT_MIME: &str = "image/png";

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

fn color_type(mode: ChannelMode) -> ExtendedColorType {
    match mode {
        ChannelMode::Grayscale => ExtendedColorType::L8,
        ChannelMode::Rgb => ExtendedColorType::Rgb8,
        ChannelMode::Rgba => ExtendedColorType::Rgba8,
    }
}

/// Encode a raster as PNG.
pub fn encode_png(raster: &Raster) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            raster.as_bytes(),
            raster.width(),
            raster.height(),
            color_type(raster.mode()),
        )
        .map_err(|e| IoError::EncodingFailure(e.to_string()))?;
    Ok(out)
}

/// Decode a PNG stream back into a raster.
pub fn decode_png(bytes: &[u8]) -> IoResult<Raster> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(IoError::decode)?;
    normalize(img)
}

/// Encode `raster` as the downloadable `processed_image.png`.
pub fn export(raster: &Raster) -> IoResult<ExportArtifact> {
    let bytes = encode_png(raster)?;
    info!(
        width = raster.width(),
        height = raster.height(),
        bytes = bytes.len(),
        "exported PNG"
    );
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME.to_string(),
        mime: EXPORT_MIME.to_string(),
        bytes,
    })
}
