//! Length parsing for the handful of properties layout reads.

use crate::geometry::Edges;

/// Largest magnitude a parsed length may have.
pub const MAX_LENGTH: i32 = 1_000_000;

/// Parse a pixel length: a number with an optional `px` suffix, truncated
/// toward zero and clamped to [`MAX_LENGTH`]. Anything else yields `None`.
pub fn parse_length(raw: &str) -> Option<i32> {
    let lowered = raw.trim().to_ascii_lowercase();
    let number = lowered.strip_suffix("px").unwrap_or(&lowered).trim();
    let value: f64 = number.parse().ok()?;
    let limit = f64::from(MAX_LENGTH);
    value
        .is_finite()
        .then(|| value.trunc().clamp(-limit, limit) as i32)
}

/// [`parse_length`] with a fallback for missing or unparsable input.
pub fn length_or(raw: Option<&str>, fallback: i32) -> i32 {
    raw.and_then(parse_length).unwrap_or(fallback)
}

/// Expand a 1 to 4 value box shorthand (`margin`, `padding`). Commas count
/// as separators and unparsable parts read as zero.
pub fn parse_box_shorthand(raw: Option<&str>) -> Edges {
    let Some(raw) = raw else {
        return Edges::default();
    };
    let spaced = raw.replace(',', " ");
    let values: Vec<i32> = spaced
        .split_whitespace()
        .map(|part| parse_length(part).unwrap_or(0))
        .collect();
    match values.as_slice() {
        [] => Edges::default(),
        [all] => Edges::uniform(*all),
        [vertical, horizontal] => Edges {
            top: *vertical,
            right: *horizontal,
            bottom: *vertical,
            left: *horizontal,
        },
        [top, horizontal, bottom] => Edges {
            top: *top,
            right: *horizontal,
            bottom: *bottom,
            left: *horizontal,
        },
        [top, right, bottom, left, ..] => Edges {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(parse_length("12"), Some(12));
        assert_eq!(parse_length(" 12.9PX "), Some(12));
        assert_eq!(parse_length("-3.5"), Some(-3));
        assert_eq!(parse_length("2em"), None);
        assert_eq!(parse_length("inf"), None);
        assert_eq!(length_or(Some("auto"), 7), 7);
        assert_eq!(length_or(None, 7), 7);
    }

    #[test]
    fn huge_lengths_are_clamped() {
        assert_eq!(parse_length("3000000000"), Some(MAX_LENGTH));
        assert_eq!(parse_length("-1e12px"), Some(-MAX_LENGTH));
        assert_eq!(parse_length("999999"), Some(999_999));
    }

    #[test]
    fn shorthand_forms() {
        assert_eq!(parse_box_shorthand(Some("4")), Edges::uniform(4));
        assert_eq!(
            parse_box_shorthand(Some("1 2")),
            Edges { top: 1, right: 2, bottom: 1, left: 2 }
        );
        assert_eq!(
            parse_box_shorthand(Some("1px 2px 3px")),
            Edges { top: 1, right: 2, bottom: 3, left: 2 }
        );
        assert_eq!(
            parse_box_shorthand(Some("1,2,3,4,5")),
            Edges { top: 1, right: 2, bottom: 3, left: 4 }
        );
        assert_eq!(
            parse_box_shorthand(Some("auto 5")),
            Edges { top: 0, right: 5, bottom: 0, left: 5 }
        );
        assert_eq!(parse_box_shorthand(None), Edges::default());
    }
}
