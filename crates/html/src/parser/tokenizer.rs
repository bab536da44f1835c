//! Tag scanning and attribute extraction.

/// An opening or closing tag: `<`, optional `/`, an alphanumeric name,
/// attribute text, `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagToken<'src> {
    pub start: usize,
    pub end: usize,
    pub closing: bool,
    /// Lower-cased tag name.
    pub name: String,
    pub attrs: &'src str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'src> {
    Tag(TagToken<'src>),
    /// Comments, doctypes and processing instructions.
    Skipped { start: usize, end: usize },
}

impl Token<'_> {
    pub fn span(&self) -> (usize, usize) {
        match self {
            Self::Tag(tag) => (tag.start, tag.end),
            Self::Skipped { start, end } => (*start, *end),
        }
    }
}

/// Find the next tag-like token at or after `from`. A `<` that does not
/// start a well-formed tag is left in the text.
pub(crate) fn next_token(source: &str, from: usize) -> Option<Token<'_>> {
    let bytes = source.as_bytes();
    let mut search = from;

    while let Some(offset) = source.get(search..)?.find('<') {
        let start = search + offset;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            let end = rest[4..]
                .find("-->")
                .map_or(source.len(), |idx| start + 4 + idx + 3);
            return Some(Token::Skipped { start, end });
        }
        let declaration = rest.starts_with("<!") || rest.starts_with("<?");
        if let Some(idx) = rest.find('>').filter(|_| declaration) {
            return Some(Token::Skipped {
                start,
                end: start + idx + 1,
            });
        }

        let mut cursor = start + 1;
        let closing = bytes.get(cursor) == Some(&b'/');
        if closing {
            cursor += 1;
        }
        let name_len = bytes[cursor..]
            .iter()
            .take_while(|byte| byte.is_ascii_alphanumeric())
            .count();
        if name_len == 0 {
            search = start + 1;
            continue;
        }
        let name_end = cursor + name_len;
        let gt = name_end + source[name_end..].find('>')?;
        return Some(Token::Tag(TagToken {
            start,
            end: gt + 1,
            closing,
            name: source[cursor..name_end].to_ascii_lowercase(),
            attrs: &source[name_end..gt],
        }));
    }
    None
}

pub(crate) fn find_ascii_case_insensitive(haystack: &str, from: usize, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .get(from..)?
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|idx| from + idx)
}

/// `key="value"`, `key='value'` and `key=value` pairs, in order. Text that
/// does not form a pair (bare flags, stray quotes) is skipped.
pub(crate) fn parse_attributes(text: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        if let Some((name, value, end)) = attribute_at(text, pos) {
            out.push((name.to_ascii_lowercase(), value));
            pos = end;
        } else {
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    out
}

fn attribute_at(text: &str, start: usize) -> Option<(&str, String, usize)> {
    let bytes = text.as_bytes();
    let first = *bytes.get(start)?;
    if !(first.is_ascii_alphabetic() || first == b'_' || first == b':') {
        return None;
    }
    let name_end = start
        + 1
        + bytes[start + 1..]
            .iter()
            .take_while(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':' | b'.'))
            .count();
    let name = &text[start..name_end];

    let eq = skip_whitespace(text, name_end);
    if bytes.get(eq) != Some(&b'=') {
        return None;
    }
    let value_start = skip_whitespace(text, eq + 1);
    let rest = &text[value_start..];

    let quote = rest.chars().next()?;
    if quote == '"' || quote == '\'' {
        if let Some(close) = rest[1..].find(quote) {
            let value = rest[1..=close].to_owned();
            return Some((name, value, value_start + close + 2));
        }
        if quote == '"' {
            return None;
        }
    }

    let len: usize = rest
        .chars()
        .take_while(|ch| !ch.is_whitespace() && *ch != '"')
        .map(char::len_utf8)
        .sum();
    if len == 0 {
        return None;
    }
    Some((name, rest[..len].to_owned(), value_start + len))
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    from + text[from..]
        .chars()
        .take_while(|ch| ch.is_whitespace())
        .map(char::len_utf8)
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(text: &str) -> Vec<(String, String)> {
        parse_attributes(text)
    }

    #[test]
    fn quoting_styles() {
        assert_eq!(
            attrs(r#" href="/a b" ID='main' width=40"#),
            vec![
                ("href".to_owned(), "/a b".to_owned()),
                ("id".to_owned(), "main".to_owned()),
                ("width".to_owned(), "40".to_owned()),
            ]
        );
    }

    #[test]
    fn bare_flags_and_spacing() {
        assert_eq!(
            attrs(" checked  class = \"x y\" disabled"),
            vec![("class".to_owned(), "x y".to_owned())]
        );
    }

    #[test]
    fn unterminated_single_quote_is_kept_verbatim() {
        assert_eq!(attrs(" alt='oops"), vec![("alt".to_owned(), "'oops".to_owned())]);
        assert!(attrs(" alt=\"oops").is_empty());
    }

    #[test]
    fn stray_angle_brackets_are_not_tags() {
        assert_eq!(next_token("a < b", 0), None);
        let Some(Token::Tag(tag)) = next_token("x <B class=y>", 0) else {
            panic!("expected a tag");
        };
        assert_eq!(tag.name, "b");
        assert_eq!(tag.attrs, " class=y");
        assert_eq!((tag.start, tag.end), (2, 13));
    }

    #[test]
    fn comments_are_skipped_whole() {
        assert_eq!(
            next_token("<!-- <p> -->rest", 0),
            Some(Token::Skipped { start: 0, end: 12 })
        );
        assert_eq!(
            next_token("<!DOCTYPE html><p>", 0),
            Some(Token::Skipped { start: 0, end: 15 })
        );
    }
}
