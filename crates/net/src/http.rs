//! Blocking HTTP/1.1 client.
//!
//! One request per connection (`Connection: close`); the response is read
//! until the peer hangs up and then split into status, headers and body.

use crate::chunked::{decode_chunked, find};
use crate::content::{DEFAULT_CHARSET, charset_from_headers, decode_text, decompress_body};
use crate::error::NetError;
use crate::url::Url;
use crate::{file, tls};
use bytes::Bytes;
use core::time::Duration;
use log::{debug, info, trace};
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs as _};

/// Response headers keyed by lower-cased name. A repeated header keeps the
/// last value seen.
pub type Headers = HashMap<String, String>;

/// Status codes that are followed when a `location` header is present.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

pub const DEFAULT_MAX_REDIRECTS: u8 = 8;

/// Applies to connecting, reading and writing individually.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

pub const DEFAULT_USER_AGENT: &str = "Lumen/0.1 (headless document engine)";

const ACCEPT: &str = "text/html, text/css, image/*;q=0.9, */*;q=0.8";

/// A fully received response with transfer and content encodings removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Numeric status code, `0` when the status line could not be read.
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
    /// Charset label from `content-type`, `utf-8` by default.
    pub encoding: String,
}

impl Response {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The body decoded with the detected charset; invalid sequences are replaced.
    pub fn text(&self) -> String {
        decode_text(&self.body, &self.encoding)
    }

    pub fn is_redirect(&self) -> bool {
        REDIRECT_STATUSES.contains(&self.status)
    }
}

/// Anything that can turn a URL into a [`Response`].
///
/// The document pipeline only talks to this trait, so documents, stylesheets
/// and images can be served from the network, from disk or from memory.
pub trait Fetch {
    /// Fetch `url`, following redirects where the implementation supports them.
    ///
    /// # Errors
    /// Returns a [`NetError`] when the resource cannot be retrieved at all.
    fn fetch(&self, url: &Url) -> Result<Response, NetError>;
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    user_agent: String,
    timeout: Duration,
    max_redirects: u8,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_redirects(mut self, max_redirects: u8) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub const fn max_redirects(&self) -> u8 {
        self.max_redirects
    }

    /// Fetch `url`, following at most `max_redirects` redirects.
    ///
    /// When the budget runs out, or a redirect has no `location`, the
    /// redirect response itself is returned.
    ///
    /// # Errors
    /// Returns [`NetError::Transport`] on connection, TLS or I/O failure,
    /// [`NetError::File`] for unreadable `file:` URLs and
    /// [`NetError::InvalidUrl`] when a `location` cannot be resolved.
    pub fn fetch_with_redirects(&self, url: &Url, max_redirects: u8) -> Result<Response, NetError> {
        let mut current = url.clone();
        let mut redirects_left = max_redirects;

        loop {
            if current.scheme() == "file" {
                return file::read(&current);
            }

            let raw = self.request(&current)?;
            let response = parse_response(&raw);
            debug!(
                "{current} -> {} ({} body bytes)",
                response.status,
                response.body.len()
            );

            let location = response
                .header("location")
                .filter(|_| response.is_redirect() && redirects_left > 0);
            let Some(location) = location else {
                return Ok(response);
            };
            let next = current.resolve(location)?;
            trace!("Redirect {current} -> {next} ({redirects_left} left)");
            current = next;
            redirects_left -= 1;
        }
    }

    fn request(&self, url: &Url) -> Result<Vec<u8>, NetError> {
        info!("GET {url}");
        let request = build_request(url, &self.user_agent);
        let tcp = self
            .connect(url)
            .map_err(|err| NetError::transport(url, err))?;

        let result = if url.is_secure() {
            tls::connect(tcp, url.host())
                .and_then(|mut stream| exchange(&mut stream, request.as_bytes()))
        } else {
            let mut stream = tcp;
            exchange(&mut stream, request.as_bytes())
        };
        result.map_err(|err| NetError::transport(url, err))
    }

    fn connect(&self, url: &Url) -> io::Result<TcpStream> {
        let mut last_err = None;
        for addr in (url.host(), url.port()).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(self.timeout))?;
                    stream.set_write_timeout(Some(self.timeout))?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
        }))
    }
}

impl Fetch for HttpClient {
    fn fetch(&self, url: &Url) -> Result<Response, NetError> {
        self.fetch_with_redirects(url, self.max_redirects)
    }
}

/// The fixed-shape request sent for every fetch.
pub fn build_request(url: &Url, user_agent: &str) -> String {
    format!(
        "GET {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         Connection: close\r\n\
         User-Agent: {user_agent}\r\n\
         Accept: {ACCEPT}\r\n\
         Accept-Encoding: gzip, deflate\r\n\
         \r\n",
        path = url.path(),
        host = url.host(),
    )
}

fn exchange<S: Read + Write>(stream: &mut S, request: &[u8]) -> io::Result<Vec<u8>> {
    stream.write_all(request)?;
    stream.flush()?;

    let mut raw = Vec::new();
    let mut buf = [0_u8; 4096];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => raw.extend_from_slice(&buf[..read]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            // TLS peers frequently hang up without close_notify.
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof && !raw.is_empty() => break,
            Err(err) => return Err(err),
        }
    }
    Ok(raw)
}

/// Split a raw response into status, headers and decoded body.
///
/// Without a blank line separating head from body the whole payload is
/// treated as body with status `0`. Chunked framing and gzip/deflate
/// content encodings are removed.
pub fn parse_response(raw: &[u8]) -> Response {
    let Some(separator) = find(raw, b"\r\n\r\n") else {
        return Response {
            status: 0,
            headers: Headers::new(),
            body: Bytes::copy_from_slice(raw),
            encoding: DEFAULT_CHARSET.to_owned(),
        };
    };
    let head = &raw[..separator];
    let mut body = raw[separator + 4..].to_vec();

    let mut lines = head
        .split(|byte| *byte == b'\n')
        .map(|line| latin1(line.strip_suffix(b"\r").unwrap_or(line)));
    let status = lines.next().map_or(0, |line| parse_status(&line));

    let mut headers = Headers::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_owned());
        }
    }

    if headers
        .get("transfer-encoding")
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("chunked"))
    {
        body = decode_chunked(&body);
    }
    if let Some(content_encoding) = headers.get("content-encoding") {
        body = decompress_body(content_encoding, body);
    }

    let encoding = charset_from_headers(&headers);
    Response {
        status,
        headers,
        body: Bytes::from(body),
        encoding,
    }
}

fn parse_status(status_line: &str) -> u16 {
    status_line
        .splitn(3, ' ')
        .nth(1)
        .filter(|code| !code.is_empty() && code.bytes().all(|byte| byte.is_ascii_digit()))
        .and_then(|code| code.parse().ok())
        .unwrap_or(0)
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
