//! Remote image sources.
//!
//! The HTTP transport lives outside this crate. A caller either reports the
//! outcome of its own GET as a [`FetchOutcome`], or plugs a client in through
//! [`RemoteSource`]. Any transport failure becomes
//! [`IoError::SourceUnavailable`]; there is no retry here.

use tracing::warn;

use crate::error::{IoError, IoResult};
use crate::source::{self, LoadedImage};

/// Result of one HTTP(S) GET as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server answered. `body` is the raw response payload.
    Response { status: u16, body: Vec<u8> },
    /// No answer within the transport's deadline.
    Timeout,
    /// Connection, DNS or TLS failure.
    Network(String),
}

/// Anything that can perform a GET for an image URL.
pub trait RemoteSource {
    fn fetch(&self, url: &str) -> FetchOutcome;
}

impl<F> RemoteSource for F
where
    F: Fn(&str) -> FetchOutcome,
{
    fn fetch(&self, url: &str) -> FetchOutcome {
        self(url)
    }
}

/// Validate a user-supplied URL: non-empty and HTTP(S).
pub fn check_url(url: &str) -> IoResult<&str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(IoError::SourceUnavailable("no URL given".into()));
    }
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(IoError::SourceUnavailable(format!(
            "'{url}' is not an http(s) URL"
        )));
    }
    Ok(url)
}

/// Turn a fetch outcome for `url` into a decoded image.
pub fn resolve(url: &str, outcome: FetchOutcome) -> IoResult<LoadedImage> {
    let url = check_url(url)?;
    let body = match outcome {
        FetchOutcome::Response { status, body } if (200..300).contains(&status) => body,
        FetchOutcome::Response { status, .. } => {
            warn!(url, status, "remote image request rejected");
            return Err(IoError::SourceUnavailable(format!("HTTP status {status}")));
        }
        FetchOutcome::Timeout => {
            warn!(url, "remote image request timed out");
            return Err(IoError::SourceUnavailable("request timed out".into()));
        }
        FetchOutcome::Network(reason) => {
            warn!(url, %reason, "remote image request failed");
            return Err(IoError::SourceUnavailable(reason));
        }
    };
    source::load_fetched(url, &body)
}

/// Fetch `url` through `remote` and decode the response.
pub fn load_url(remote: &dyn RemoteSource, url: &str) -> IoResult<LoadedImage> {
    let url = check_url(url)?;
    resolve(url, remote.fetch(url))
}
