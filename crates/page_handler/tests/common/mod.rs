#![allow(dead_code, reason = "Each test binary uses a different subset of helpers")]

use bytes::Bytes;
use image::{ImageFormat, RgbaImage};
use layouter::{FixedWidthMetrics, Viewport};
use net::{Fetch, Headers, NetError, Response, Url};
use page_handler::Tab;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Cursor};
use std::rc::Rc;

pub const VIEWPORT: Viewport = Viewport::new(400, 300);

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serves canned bodies keyed by normalized URL and records every request.
#[derive(Default)]
pub struct MemoryFetcher {
    bodies: RefCell<HashMap<String, Vec<u8>>>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn serve(&self, url: &str, body: impl Into<Vec<u8>>) {
        let key = Url::parse(url).unwrap().to_string();
        self.bodies.borrow_mut().insert(key, body.into());
    }

    pub fn forget(&self, url: &str) {
        let key = Url::parse(url).unwrap().to_string();
        self.bodies.borrow_mut().remove(&key);
    }

    pub fn requests_for(&self, url: &str) -> usize {
        let key = Url::parse(url).unwrap().to_string();
        self.requests
            .borrow()
            .iter()
            .filter(|seen| **seen == key)
            .count()
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, url: &Url) -> Result<Response, NetError> {
        let key = url.to_string();
        self.requests.borrow_mut().push(key.clone());
        let body = self.bodies.borrow().get(&key).cloned();
        body.map(|body| Response {
            status: 200,
            headers: Headers::new(),
            body: Bytes::from(body),
            encoding: "utf-8".to_owned(),
        })
        .ok_or_else(|| NetError::Transport {
            url: key,
            source: io::Error::new(io::ErrorKind::NotFound, "nothing served here"),
        })
    }
}

/// A tab measuring text at 8 px per character for 16 px text.
pub fn tab_on(fetcher: &Rc<MemoryFetcher>) -> Tab {
    Tab::new(
        Rc::<MemoryFetcher>::clone(fetcher),
        Rc::new(FixedWidthMetrics::default()),
        VIEWPORT,
    )
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
