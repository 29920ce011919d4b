use darkroom_core::CoreError;
use darkroom_io::IoError;

/// Errors surfaced to the UI by the session and the message dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("please upload an image first")]
    NoImage,
    #[error("no processed image yet; process the image first")]
    NoProcessedImage,
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Non-fatal conditions shown as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::NoImage | Self::NoProcessedImage | Self::Io(IoError::SourceUnavailable(_))
        )
    }
}
