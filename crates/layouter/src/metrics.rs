//! The text-measurement seam.

/// Measures rendered text. Implemented by whatever owns the fonts.
pub trait TextMeasurer {
    /// Advance width of `text` at `font_size` pixels.
    fn measure(&self, text: &str, font_size: i32) -> i32;

    fn line_height(&self, font_size: i32) -> i32 {
        line_height(font_size)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, i32) -> i32,
{
    fn measure(&self, text: &str, font_size: i32) -> i32 {
        self(text, font_size)
    }
}

/// `font_size * 1.35`, rounded.
pub fn line_height(font_size: i32) -> i32 {
    (f64::from(font_size) * 1.35).round() as i32
}

/// Every character advances by a fixed fraction of the font size. Good
/// enough for headless runs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthMetrics {
    /// Advance per character as a multiple of the font size.
    pub advance: f64,
}

impl Default for FixedWidthMetrics {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMeasurer for FixedWidthMetrics {
    fn measure(&self, text: &str, font_size: i32) -> i32 {
        let chars = text.chars().count() as f64;
        (chars * f64::from(font_size) * self.advance).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_height_rounds() {
        assert_eq!(line_height(16), 22);
        assert_eq!(line_height(20), 27);
        assert_eq!(line_height(32), 43);
    }

    #[test]
    fn fixed_width_scales_with_size() {
        let metrics = FixedWidthMetrics::default();
        assert_eq!(metrics.measure("abcd", 16), 32);
        assert_eq!(metrics.measure("", 16), 0);
        assert_eq!(metrics.measure("•", 10), 5);
    }
}
