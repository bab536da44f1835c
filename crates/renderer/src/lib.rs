//! Painting: turns a layout tree into an ordered display list, and replays
//! display lists onto a [`RenderTarget`].

pub mod backend;
pub mod color;
pub mod display_list;
pub mod paint;
pub mod recording;

pub use backend::{Bounds, RenderTarget};
pub use color::{BLACK, LINK_BLUE, Rgba, parse_color, visible_color};
pub use display_list::{DisplayItem, DisplayList, HitBox, ImageHandle};
pub use paint::{ImageProvider, NoImages, Painter};
pub use recording::{DrawCommand, RecordingTarget};
