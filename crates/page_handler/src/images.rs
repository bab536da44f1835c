//! Per-tab image loading.
//!
//! PNG and GIF are recognised by signature and always decoded. Anything else
//! goes to an optional pluggable decoder. Failures are cached as absences so
//! repaints never refetch a broken image.

use image::{DynamicImage, ImageFormat, RgbaImage, load_from_memory_with_format};
use log::{debug, warn};
use net::{Fetch, Url};
use renderer::ImageHandle;
use std::collections::HashMap;
use std::rc::Rc;

pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
pub const GIF_SIGNATURES: [&[u8]; 2] = [b"GIF87a", b"GIF89a"];

/// Decoder for formats outside the built-in signature set.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Option<RgbaImage>;
}

impl<F> ImageDecoder for F
where
    F: Fn(&[u8]) -> Option<RgbaImage>,
{
    fn decode(&self, bytes: &[u8]) -> Option<RgbaImage> {
        self(bytes)
    }
}

/// Pluggable JPEG support.
#[derive(Clone, Copy, Debug, Default)]
pub struct JpegDecoder;

impl ImageDecoder for JpegDecoder {
    fn decode(&self, bytes: &[u8]) -> Option<RgbaImage> {
        load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map(DynamicImage::into_rgba8)
            .ok()
    }
}

/// The built-in format `bytes` claim to be, by signature.
pub fn builtin_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(PNG_SIGNATURE) {
        return Some(ImageFormat::Png);
    }
    GIF_SIGNATURES
        .iter()
        .any(|sig| bytes.starts_with(sig))
        .then_some(ImageFormat::Gif)
}

/// Decode PNG or GIF data identified by its leading signature.
pub fn decode_builtin(bytes: &[u8]) -> Option<RgbaImage> {
    let format = builtin_format(bytes)?;
    match load_from_memory_with_format(bytes, format) {
        Ok(image) => Some(image.into_rgba8()),
        Err(err) => {
            warn!("Failed to decode {format:?} image: {err}");
            None
        }
    }
}

/// Decoded images keyed by absolute URL, `None` marking a failed load.
#[derive(Default)]
pub struct ImageCache {
    entries: HashMap<String, Option<ImageHandle>>,
    decoder: Option<Rc<dyn ImageDecoder>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_decoder(mut self, decoder: Rc<dyn ImageDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    pub fn set_decoder(&mut self, decoder: Option<Rc<dyn ImageDecoder>>) {
        self.decoder = decoder;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached outcome for `url`: `None` if never attempted, `Some(None)` if
    /// the last attempt failed.
    pub fn get(&self, url: &str) -> Option<Option<&ImageHandle>> {
        self.entries.get(url).map(Option::as_ref)
    }

    /// Serve `url` from the cache, fetching and decoding it on first use.
    pub fn load(&mut self, url: &Url, fetcher: &dyn Fetch) -> Option<ImageHandle> {
        let key = url.to_string();
        if let Some(cached) = self.entries.get(&key) {
            return cached.clone();
        }
        let decoded = match fetcher.fetch(url) {
            Ok(response) => self.decode(&response.body),
            Err(err) => {
                warn!("Failed to fetch image {key}: {err}");
                None
            }
        };
        let handle = decoded.map(ImageHandle::new);
        if handle.is_none() {
            debug!("Image {key} cached as unavailable");
        }
        self.entries.insert(key, handle.clone());
        handle
    }

    /// A corrupt PNG or GIF is not handed to the pluggable decoder.
    fn decode(&self, bytes: &[u8]) -> Option<RgbaImage> {
        if builtin_format(bytes).is_some() {
            decode_builtin(bytes)
        } else {
            self.decoder.as_ref()?.decode(bytes)
        }
    }
}
