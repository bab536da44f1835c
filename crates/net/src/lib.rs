//! Networking for the engine: URL parsing and resolution, plus a blocking
//! HTTP/1.1 client that understands redirects, chunked framing and
//! gzip/deflate content encodings.

#![allow(
    clippy::module_name_repetitions,
    reason = "Public types mirror the crate vocabulary (NetError, HttpClient)"
)]

mod chunked;
mod content;
mod error;
mod file;
mod http;
mod tls;
mod url;

pub use chunked::decode_chunked;
pub use content::{charset_from_headers, decode_text, decompress_body};
pub use error::NetError;
pub use http::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, Fetch, Headers, HttpClient,
    REDIRECT_STATUSES, Response, build_request, parse_response,
};
pub use url::{Url, default_port};
