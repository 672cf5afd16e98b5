use std::fmt;

use serde::Serialize;

/// Structural level of a heading that takes part in the table of contents.
///
/// Only `h2` through `h6` qualify; the page title (`h1`) never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 6;

    /// Level of a heading tag name such as `h3`, if it is one we collect
    pub fn from_tag(tag: &str) -> Option<Self> {
        let mut chars = tag.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some('h' | 'H'), Some(digit), None) => {
                let level = digit.to_digit(10)? as u8;
                HeadingLevel::try_from(level).ok()
            }
            _ => None,
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Indentation depth of the entry, always `level - 1`
    pub fn depth(self) -> u8 {
        self.0 - 1
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(HeadingLevel(level))
        } else {
            Err(format!("heading level {} outside h{}-h{}", level, Self::MIN, Self::MAX))
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.get())
    }
}

/// A heading as found in a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub label: String,
    /// Id of the nested anchor element, if the renderer emitted one
    pub anchor: Option<String>,
}

impl Heading {
    pub fn new(level: HeadingLevel, label: impl Into<String>, anchor: Option<String>) -> Self {
        Self {
            level,
            label: label.into(),
            anchor,
        }
    }
}

/// One navigation link of the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub label: String,
    pub target: String,
    pub depth: u8,
}

impl TocEntry {
    /// Render as the link element appended to the container
    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\" data-depth=\"{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(&self.target),
            self.depth,
            html_escape::encode_text(&self.label)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_is_level_minus_one() {
        for level in 2..=6u8 {
            let heading_level = HeadingLevel::try_from(level).unwrap();
            assert_eq!(heading_level.depth(), level - 1);
        }
    }

    #[test]
    fn test_levels_outside_range_rejected() {
        assert!(HeadingLevel::try_from(1).is_err());
        assert!(HeadingLevel::try_from(7).is_err());
        assert!(HeadingLevel::try_from(0).is_err());
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(HeadingLevel::from_tag("h2").map(HeadingLevel::get), Some(2));
        assert_eq!(HeadingLevel::from_tag("H6").map(HeadingLevel::get), Some(6));
        assert_eq!(HeadingLevel::from_tag("h1"), None);
        assert_eq!(HeadingLevel::from_tag("hr"), None);
        assert_eq!(HeadingLevel::from_tag("h23"), None);
        assert_eq!(HeadingLevel::from_tag("header"), None);
    }

    #[test]
    fn test_entry_html_is_escaped() {
        let entry = TocEntry {
            label: "Fish & <Chips>".to_string(),
            target: "#fish\"chips".to_string(),
            depth: 2,
        };
        assert_eq!(
            entry.to_html(),
            "<a href=\"#fish&quot;chips\" data-depth=\"2\">Fish &amp; &lt;Chips&gt;</a>"
        );
    }
}
