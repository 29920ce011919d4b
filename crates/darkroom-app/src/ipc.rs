//! IPC message contracts between the UI and the Darkroom core.
//!
//! Both enums use the `#[serde(tag = "type", content = "data")]` layout.
//! Binary payloads (uploads, fetched bodies, exports) travel as standard
//! base64 strings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use darkroom_core::scopes::Analysis;
use darkroom_core::{ChannelMode, ProcessRequest};
use darkroom_io::{FetchOutcome, SourceInfo};

use crate::chart::{self, HistogramChart};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::session::{Session, SessionStatus};

/// Messages from the UI to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToCore {
    /// Request the configuration, the current image info and the session
    /// status after connecting.
    RequestState,

    /// An uploaded file.
    LoadUpload {
        /// Original file name.
        name: String,
        /// Declared MIME type, if the browser reported one.
        #[serde(default)]
        mime: Option<String>,
        /// Base64 file content.
        data: String,
    },

    /// The outcome of a GET the UI host performed for an image URL.
    LoadFetched {
        /// URL as the user entered it.
        url: String,
        /// What the transport got back.
        outcome: RemoteOutcome,
    },

    /// Apply a filter and optional resize to the current image.
    Process {
        /// Filter selection and optional target size.
        request: ProcessRequest,
    },

    /// Compute histograms and statistics.
    Analyze,

    /// Encode the processed image for download.
    Export,
}

/// Wire form of [`FetchOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RemoteOutcome {
    /// The server answered.
    Response {
        /// HTTP status code.
        status: u16,
        /// Base64 response body.
        body: String,
    },
    /// No answer within the transport's deadline.
    Timeout,
    /// Connection, DNS or TLS failure.
    Network {
        /// Transport error description.
        reason: String,
    },
}

impl RemoteOutcome {
    fn into_fetch_outcome(self) -> AppResult<FetchOutcome> {
        Ok(match self {
            Self::Response { status, body } => FetchOutcome::Response {
                status,
                body: decode_payload(&body)?,
            },
            Self::Timeout => FetchOutcome::Timeout,
            Self::Network { reason } => FetchOutcome::Network(reason),
        })
    }
}

/// Messages from the core to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CoreToUi {
    /// Initial state sync when the UI connects.
    Initialize {
        /// Control ranges and export naming.
        config: AppConfig,
    },

    /// The session holds a current image: sent after a load and again on
    /// reconnect.
    ImageLoaded {
        /// Origin, size, mode and encoded size of the image.
        info: SourceInfo,
    },

    /// Processing finished and the result is stored.
    Processed {
        /// Processed width in pixels.
        width: u32,
        /// Processed height in pixels.
        height: u32,
        /// Channel layout of the result (Invert always yields RGB).
        mode: ChannelMode,
    },

    /// Scope data for the current image, with the processed image for
    /// comparison when there is one.
    Analysis {
        /// Histogram and statistics of the current image.
        current: Analysis,
        /// Histogram and statistics of the processed image, if any.
        processed: Option<Analysis>,
        /// Ready-to-draw histogram charts: the current image alone, or
        /// original and processed side by side.
        charts: Vec<HistogramChart>,
    },

    /// Encoded download.
    ExportReady {
        /// Suggested download name.
        file_name: String,
        /// MIME type of `data`.
        mime: String,
        /// Base64 PNG bytes.
        data: String,
    },

    /// Which images the session holds.
    Status {
        /// Whether a source image is loaded.
        has_current: bool,
        /// Whether a processed result is available.
        has_processed: bool,
    },

    /// A recoverable condition the user should act on.
    Warning {
        /// Warning text for display.
        message: String,
    },

    /// The request failed.
    Error {
        /// Error description.
        message: String,
    },
}

impl From<SessionStatus> for CoreToUi {
    fn from(status: SessionStatus) -> Self {
        Self::Status {
            has_current: status.has_current,
            has_processed: status.has_processed,
        }
    }
}

impl From<AppError> for CoreToUi {
    fn from(err: AppError) -> Self {
        let message = err.to_string();
        if err.is_warning() {
            warn!("{message}");
            Self::Warning { message }
        } else {
            error!("{message}");
            Self::Error { message }
        }
    }
}

fn decode_payload(data: &str) -> AppResult<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| AppError::InvalidMessage(format!("bad base64 payload: {e}")))
}

/// Handle one inbound message. Failures are reported as `Warning` or
/// `Error` messages; the session is left as it was.
pub fn dispatch(session: &mut Session, message: UiToCore) -> Vec<CoreToUi> {
    match handle(session, message) {
        Ok(replies) => replies,
        Err(err) => vec![err.into()],
    }
}

/// Parse and handle one JSON-encoded message.
pub fn dispatch_json(session: &mut Session, json: &str) -> Vec<CoreToUi> {
    match serde_json::from_str::<UiToCore>(json) {
        Ok(message) => dispatch(session, message),
        Err(e) => vec![AppError::InvalidMessage(e.to_string()).into()],
    }
}

fn handle(session: &mut Session, message: UiToCore) -> AppResult<Vec<CoreToUi>> {
    match message {
        UiToCore::RequestState => {
            let mut replies = vec![CoreToUi::Initialize {
                config: session.config().clone(),
            }];
            if let Some(info) = session.current_info() {
                replies.push(CoreToUi::ImageLoaded { info: info.clone() });
            }
            replies.push(session.status().into());
            Ok(replies)
        }
        UiToCore::LoadUpload { name, mime, data } => {
            let bytes = decode_payload(&data)?;
            let info = session.load_upload(&name, mime.as_deref(), &bytes)?.clone();
            Ok(vec![CoreToUi::ImageLoaded { info }, session.status().into()])
        }
        UiToCore::LoadFetched { url, outcome } => {
            let outcome = outcome.into_fetch_outcome()?;
            let info = session.load_fetched(&url, outcome)?.clone();
            Ok(vec![CoreToUi::ImageLoaded { info }, session.status().into()])
        }
        UiToCore::Process { request } => {
            debug!(?request, "process requested");
            let info = session.process(&request)?;
            Ok(vec![
                CoreToUi::Processed {
                    width: info.width,
                    height: info.height,
                    mode: info.mode,
                },
                session.status().into(),
            ])
        }
        UiToCore::Analyze => {
            let comparison = session.analyze()?;
            let charts = match &comparison.processed {
                Some(after) => {
                    let (before, after) = chart::comparison(&comparison.current.histogram, &after.histogram);
                    vec![before, after]
                }
                None => vec![HistogramChart::new("Histogram", &comparison.current.histogram)],
            };
            Ok(vec![CoreToUi::Analysis {
                current: comparison.current,
                processed: comparison.processed,
                charts,
            }])
        }
        UiToCore::Export => {
            let artifact = session.export()?;
            Ok(vec![CoreToUi::ExportReady {
                file_name: artifact.file_name,
                mime: artifact.mime,
                data: STANDARD.encode(&artifact.bytes),
            }])
        }
    }
}
