//! Line classifier for the front-matter grammar
//!
//! The metadata block is read one line at a time. Each line is classified
//! here without any knowledge of the surrounding lines; the tree builder in
//! `frontmatter` owns the state that gives the classes their meaning.

/// Classification of a single metadata line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only
    Blank,
    /// Trimmed content starts with `#`
    Comment,
    /// `- ...` list item; `rest` is the trimmed text after the dash
    Item { rest: &'a str },
    /// `key: value`, split at the first colon of the untrimmed line
    Property {
        key: &'a str,
        value: &'a str,
        indented: bool,
    },
    /// Anything else (no colon, or an empty key)
    Unrecognized(&'a str),
}

/// Classify a raw metadata line
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with('#') {
        return Line::Comment;
    }
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return Line::Item { rest: rest.trim() };
    }

    match split_pair(line) {
        Some((key, value)) if !key.is_empty() => Line::Property {
            key,
            value,
            indented: is_indented(line),
        },
        _ => Line::Unrecognized(trimmed),
    }
}

/// Split `key: value` at the first colon, trimming both sides
pub fn split_pair(text: &str) -> Option<(&str, &str)> {
    let colon = text.find(':')?;
    Some((text[..colon].trim(), text[colon + 1..].trim()))
}

/// Two or more leading spaces attach a property to the open list item.
/// Tabs do not count as indentation.
fn is_indented(line: &str) -> bool {
    line.starts_with("  ")
}
