//! A [`RenderTarget`] that records calls instead of drawing. Text bounds
//! come from the injected measurer, so hit-testing behaves as it would on a
//! real surface using the same metrics.

use crate::backend::{Bounds, RenderTarget};
use crate::color::Rgba;
use crate::display_list::ImageHandle;
use layouter::TextMeasurer;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font_size: i32,
        color: Rgba,
        underline: bool,
    },
    Image {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        /// False when the placeholder was drawn.
        decoded: bool,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTarget<M> {
    measurer: M,
    commands: Vec<DrawCommand>,
}

impl<M: TextMeasurer> RecordingTarget<M> {
    pub const fn new(measurer: M) -> Self {
        Self {
            measurer,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget everything recorded so far, as a new frame would.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl<M: TextMeasurer> RenderTarget for RecordingTarget<M> {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font_size: i32,
        color: Rgba,
        underline: bool,
    ) -> Option<Bounds> {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_owned(),
            font_size,
            color,
            underline,
        });
        let width = self.measurer.measure(text, font_size);
        let height = self.measurer.line_height(font_size);
        Some(Bounds::from_rect(x, y, width, height))
    }

    fn draw_image(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        image: Option<&ImageHandle>,
    ) -> Option<Bounds> {
        self.commands.push(DrawCommand::Image {
            x,
            y,
            width,
            height,
            decoded: image.is_some(),
        });
        Some(Bounds::from_rect(x, y, width, height))
    }
}
