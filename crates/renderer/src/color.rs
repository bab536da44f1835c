use csscolorparser::Color as CssColor;

/// Straight (non-premultiplied) RGBA with components in `[0, 1]`.
pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Colour used for link text.
pub const LINK_BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];

/// Parse any CSS colour syntax `csscolorparser` understands.
pub fn parse_color(input: &str) -> Option<Rgba> {
    let parsed: CssColor = input.trim().parse().ok()?;
    let [red, green, blue, alpha] = parsed.to_rgba8();
    Some([
        f32::from(red) / 255.0,
        f32::from(green) / 255.0,
        f32::from(blue) / 255.0,
        f32::from(alpha) / 255.0,
    ])
}

/// A colour worth painting: parseable, not `none` and not fully
/// transparent.
pub fn visible_color(input: &str) -> Option<Rgba> {
    if input.trim().eq_ignore_ascii_case("none") {
        return None;
    }
    parse_color(input).filter(|rgba| rgba[3] > 0.0)
}
