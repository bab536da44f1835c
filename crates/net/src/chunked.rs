//! `Transfer-Encoding: chunked` framing.

use log::debug;

const CRLF: &[u8] = b"\r\n";

/// Undo chunked framing.
///
/// Each chunk is a hex size line (an optional `;extension` is ignored), the
/// chunk bytes, and a trailing CRLF. Decoding stops at the zero-size chunk.
/// A malformed size line or a chunk that runs past the end of the input
/// stops decoding and returns what was accumulated so far.
pub fn decode_chunked(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut pos = 0;

    while pos < body.len() {
        let Some(line_len) = find(&body[pos..], CRLF) else {
            break;
        };
        let line = String::from_utf8_lossy(&body[pos..pos + line_len]);
        pos += line_len + CRLF.len();

        let size_text = line.split(';').next().unwrap_or_default().trim();
        let Ok(size) = usize::from_str_radix(size_text, 16) else {
            debug!("Stopping chunked decode at malformed size line {size_text:?}");
            break;
        };
        if size == 0 {
            break;
        }
        let Some(end) = pos.checked_add(size).filter(|end| *end <= body.len()) else {
            debug!("Chunk of {size} bytes runs past the end of the body");
            break;
        };
        out.extend_from_slice(&body[pos..end]);
        pos = end;

        if body[pos..].starts_with(CRLF) {
            pos += CRLF.len();
        }
    }

    out
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
