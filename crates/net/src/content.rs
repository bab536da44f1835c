//! Content-encoding removal and charset handling for response bodies.

use crate::http::Headers;
use encoding_rs::{Encoding, UTF_8};
use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use log::warn;
use std::io::Read;

/// Charset used when `content-type` does not name one.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Remove a gzip or deflate `content-encoding`.
///
/// Decompression is best-effort: on failure the body is returned exactly as
/// received. Deflate is tried zlib-wrapped first, then as a raw stream.
pub fn decompress_body(content_encoding: &str, body: Vec<u8>) -> Vec<u8> {
    let encoding = content_encoding.to_ascii_lowercase();
    if encoding.contains("gzip") {
        return read_all(MultiGzDecoder::new(body.as_slice())).unwrap_or_else(|| {
            warn!("gzip body failed to decompress; keeping it as received");
            body
        });
    }
    if encoding.contains("deflate") {
        return read_all(ZlibDecoder::new(body.as_slice()))
            .or_else(|| read_all(DeflateDecoder::new(body.as_slice())))
            .unwrap_or_else(|| {
                warn!("deflate body failed to decompress; keeping it as received");
                body
            });
    }
    body
}

fn read_all(mut reader: impl Read) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out).ok().map(|_| out)
}

/// The `charset=` parameter of `content-type`, lower-cased, or `utf-8`.
pub fn charset_from_headers(headers: &Headers) -> String {
    let Some(content_type) = headers.get("content-type") else {
        return DEFAULT_CHARSET.to_owned();
    };
    let lower = content_type.to_ascii_lowercase();
    let Some((_, after)) = lower.split_once("charset=") else {
        return DEFAULT_CHARSET.to_owned();
    };
    let charset = after
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(['"', '\'']);
    if charset.is_empty() {
        DEFAULT_CHARSET.to_owned()
    } else {
        charset.to_owned()
    }
}

/// Decode `bytes` with the encoding named by `label`.
///
/// Unknown labels fall back to UTF-8 and malformed sequences become U+FFFD.
pub fn decode_text(bytes: &[u8], label: &str) -> String {
    let encoding = Encoding::for_label(label.trim().as_bytes()).unwrap_or(UTF_8);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!("Replaced malformed {} sequences while decoding", encoding.name());
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
    use std::io::{self, Write};

    fn compress<W: Write>(mut encoder: W, finish: impl FnOnce(W) -> io::Result<Vec<u8>>) -> Vec<u8> {
        encoder.write_all(b"hello, inflated world").unwrap();
        finish(encoder).unwrap()
    }

    #[test]
    fn gzip_round_trips() {
        let packed = compress(GzEncoder::new(Vec::new(), Compression::default()), GzEncoder::finish);
        assert_eq!(decompress_body("gzip", packed), b"hello, inflated world");
    }

    #[test]
    fn deflate_accepts_zlib_and_raw_streams() {
        let zlib = compress(ZlibEncoder::new(Vec::new(), Compression::default()), ZlibEncoder::finish);
        let raw = compress(DeflateEncoder::new(Vec::new(), Compression::default()), DeflateEncoder::finish);
        assert_eq!(decompress_body("deflate", zlib), b"hello, inflated world");
        assert_eq!(decompress_body("Deflate", raw), b"hello, inflated world");
    }

    #[test]
    fn corrupt_body_is_kept() {
        let body = b"definitely not gzip".to_vec();
        assert_eq!(decompress_body("gzip", body.clone()), body);
    }

    #[test]
    fn charset_parameter_is_extracted() {
        let mut headers = Headers::new();
        headers.insert("content-type".into(), "text/html; Charset=ISO-8859-1; x=y".into());
        assert_eq!(charset_from_headers(&headers), "iso-8859-1");
        headers.insert("content-type".into(), "text/html".into());
        assert_eq!(charset_from_headers(&headers), "utf-8");
    }

    #[test]
    fn latin1_bodies_decode() {
        assert_eq!(decode_text(&[0x63, 0x61, 0x66, 0xE9], "iso-8859-1"), "café");
        assert_eq!(decode_text("ok".as_bytes(), "no-such-charset"), "ok");
    }
}
