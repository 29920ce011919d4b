/// Errors raised while bringing images in or out of the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IoError {
    #[error("unsupported or corrupt image: {0}")]
    UnsupportedFormat(String),
    #[error("image source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("failed to encode image: {0}")]
    EncodingFailure(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl IoError {
    pub(crate) fn decode(err: image::ImageError) -> Self {
        Self::UnsupportedFormat(err.to_string())
    }
}
