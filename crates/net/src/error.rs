use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by URL handling and fetching.
#[derive(Debug, Error)]
pub enum NetError {
    /// The URL could not be parsed (missing host on a network scheme, bad port).
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: &'static str },

    /// Connecting, the TLS handshake, or the request/response exchange failed.
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: io::Error,
    },

    /// A `file:` URL could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NetError {
    pub(crate) fn invalid(url: &str, reason: &'static str) -> Self {
        Self::InvalidUrl {
            url: url.to_owned(),
            reason,
        }
    }

    pub(crate) fn transport(url: &impl ToString, source: io::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }
}
