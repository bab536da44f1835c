//! Document orchestration: tabs that run the fetch, parse, cascade, layout
//! and paint pipeline, keep history and scroll state, and turn clicks into
//! navigations.

#![allow(
    clippy::module_name_repetitions,
    reason = "BrowserConfig reads better than config::Browser at call sites"
)]

pub mod config;
pub mod history;
pub mod images;
pub mod resources;
pub mod session;
pub mod tab;

pub use config::BrowserConfig;
pub use history::History;
pub use images::{ImageCache, ImageDecoder, JpegDecoder, decode_builtin};
pub use resources::{collect_css, extract_title, stylesheet_links};
pub use session::Session;
pub use tab::Tab;
