//! Image I/O for Darkroom.
//!
//! Bridges encoded bytes and the core's [`Raster`](darkroom_core::Raster):
//! decoding uploads and fetched responses, mapping remote transport failures,
//! and encoding the processed result as PNG.

mod error;
pub mod export;
pub mod remote;
pub mod source;

pub use error::{IoError, IoResult};
pub use export::{EXPORT_FILE_NAME, EXPORT_MIME, ExportArtifact, decode_png, encode_png};
pub use remote::{FetchOutcome, RemoteSource};
pub use source::{LoadedImage, Origin, SourceFormat, SourceInfo};
