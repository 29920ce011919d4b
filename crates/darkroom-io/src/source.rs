//! Image sources: decoding uploaded or fetched bytes into a [`Raster`].
//!
//! Decoding goes through the `image` crate. The encoding is sniffed from
//! the content; the declared extension or MIME type only gates which
//! uploads are accepted. Decoded images are normalized to one of the three
//! raster modes:
//!
//! | Decoded color type        | Raster mode |
//! |---------------------------|-------------|
//! | 8-bit gray                | Grayscale   |
//! | gray + alpha              | Rgba        |
//! | RGB, palette without alpha| Rgb         |
//! | RGBA, palette with alpha  | Rgba        |
//!
//! Deeper sample types are reduced to 8 bits.

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use darkroom_core::{ChannelMode, Raster};

use crate::error::{IoError, IoResult};

/// Encodings accepted from uploads and remote sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl SourceFormat {
    /// File extensions accepted for upload, lowercase without the dot.
    pub const EXTENSIONS: [&'static str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
        }
    }

    /// Parse a file extension (`"JPG"`, `".png"`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Parse a MIME type (`"image/jpeg"`), ignoring parameters.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/bmp" | "image/x-ms-bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Parse whatever an upload declared: a MIME type, a bare extension or
    /// a file name.
    pub fn from_declared(declared: &str) -> Option<Self> {
        if declared.contains('/') {
            return Self::from_mime(declared);
        }
        Self::from_extension(declared).or_else(|| {
            declared
                .rsplit_once('.')
                .and_then(|(_, ext)| Self::from_extension(ext))
        })
    }

    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Gif => ImageFormat::Gif,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Where a loaded image came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Origin {
    Upload { name: String },
    Url { url: String },
    Memory,
}

/// Descriptive metadata shown next to a freshly loaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub origin: Origin,
    /// Detected encoding; `None` for in-memory rasters.
    pub format: Option<SourceFormat>,
    pub width: u32,
    pub height: u32,
    pub mode: ChannelMode,
    /// Size of the encoded input in bytes (0 for in-memory rasters).
    pub byte_len: usize,
}

/// A decoded raster with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub raster: Raster,
    pub info: SourceInfo,
}

impl LoadedImage {
    fn new(raster: Raster, origin: Origin, format: Option<SourceFormat>, byte_len: usize) -> Self {
        let info = SourceInfo {
            origin,
            format,
            width: raster.width(),
            height: raster.height(),
            mode: raster.mode(),
            byte_len,
        };
        Self { raster, info }
    }
}

/// Convert a decoded image into a raster, choosing the closest mode.
pub(crate) fn normalize(img: DynamicImage) -> IoResult<Raster> {
    let (width, height) = (img.width(), img.height());
    let (mode, data) = match img {
        DynamicImage::ImageLuma8(buf) => (ChannelMode::Grayscale, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (ChannelMode::Rgb, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (ChannelMode::Rgba, buf.into_raw()),
        other => {
            let color = other.color();
            if color.has_alpha() {
                (ChannelMode::Rgba, other.to_rgba8().into_raw())
            } else if color.has_color() {
                (ChannelMode::Rgb, other.to_rgb8().into_raw())
            } else {
                (ChannelMode::Grayscale, other.to_luma8().into_raw())
            }
        }
    };
    Raster::new(width, height, mode, data).map_err(|e| IoError::UnsupportedFormat(e.to_string()))
}

/// Sniff the encoding of `bytes` and decode them.
///
/// Anything other than PNG, JPEG, GIF or BMP is rejected.
pub fn decode_sniffed(bytes: &[u8]) -> IoResult<(Raster, SourceFormat)> {
    let detected = image::guess_format(bytes).map_err(IoError::decode)?;
    let format = SourceFormat::from_image_format(detected)
        .ok_or_else(|| IoError::UnsupportedFormat(format!("{detected:?} images are not accepted")))?;
    let img = image::load_from_memory_with_format(bytes, format.image_format()).map_err(IoError::decode)?;
    debug!(format = format.label(), color = ?img.color(), "decoded image");
    Ok((normalize(img)?, format))
}

/// Decode uploaded bytes whose type was declared as `declared`
/// (extension, MIME type or file name).
///
/// The declaration only gates acceptance; the returned format is the one
/// sniffed from the content.
pub fn decode(bytes: &[u8], declared: &str) -> IoResult<(Raster, SourceFormat)> {
    let claimed = SourceFormat::from_declared(declared)
        .ok_or_else(|| IoError::UnsupportedFormat(format!("'{declared}' is not an accepted image type")))?;
    let (raster, format) = decode_sniffed(bytes)?;
    if claimed != format {
        debug!(
            declared = claimed.label(),
            detected = format.label(),
            "declared type differs from content"
        );
    }
    Ok((raster, format))
}

/// Decode an uploaded file. The type is taken from `declared` when given,
/// otherwise from the file name's extension.
pub fn load_upload(name: &str, declared: Option<&str>, bytes: &[u8]) -> IoResult<LoadedImage> {
    let (raster, format) = decode(bytes, declared.unwrap_or(name))?;
    info!(
        name,
        width = raster.width(),
        height = raster.height(),
        mode = raster.mode().label(),
        "loaded upload"
    );
    Ok(LoadedImage::new(
        raster,
        Origin::Upload { name: name.to_string() },
        Some(format),
        bytes.len(),
    ))
}

/// Decode bytes fetched from `url`.
pub(crate) fn load_fetched(url: &str, bytes: &[u8]) -> IoResult<LoadedImage> {
    let (raster, format) = decode_sniffed(bytes)?;
    info!(url, width = raster.width(), height = raster.height(), "loaded remote image");
    Ok(LoadedImage::new(
        raster,
        Origin::Url { url: url.to_string() },
        Some(format),
        bytes.len(),
    ))
}

/// Wrap an in-memory raster as a source.
pub fn from_raster(raster: Raster) -> LoadedImage {
    LoadedImage::new(raster, Origin::Memory, None, 0)
}
