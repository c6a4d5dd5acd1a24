//! Style categories and reference ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of style kinds tracked by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    Decoration,
    Text,
    Layout,
    Padding,
}

impl StyleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleCategory::Decoration => "decoration",
            StyleCategory::Text => "text",
            StyleCategory::Layout => "layout",
            StyleCategory::Padding => "padding",
        }
    }

    pub fn all() -> [StyleCategory; 4] {
        [
            StyleCategory::Decoration,
            StyleCategory::Text,
            StyleCategory::Layout,
            StyleCategory::Padding,
        ]
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decoration" => Ok(StyleCategory::Decoration),
            "text" => Ok(StyleCategory::Text),
            "layout" => Ok(StyleCategory::Layout),
            "padding" => Ok(StyleCategory::Padding),
            other => Err(format!(
                "Unknown style category '{other}' (expected decoration, text, layout, padding)"
            )),
        }
    }
}

/// Opaque reference to a canonical style, e.g. `decorationStyle3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleId(String);

impl StyleId {
    /// Build an id from its category and a store-wide sequence number.
    pub(crate) fn new(category: StyleCategory, seq: u64) -> Self {
        Self(format!("{}Style{}", category.as_str(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StyleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_and_parse_round_trip() {
        for category in StyleCategory::all() {
            let parsed: StyleCategory = category.to_string().parse().expect("parse");
            assert_eq!(parsed, category);
        }
        assert_eq!(
            "PADDING".parse::<StyleCategory>().unwrap(),
            StyleCategory::Padding
        );
        assert!("shadow".parse::<StyleCategory>().is_err());
    }

    #[test]
    fn id_is_prefixed_by_category_with_uppercase_suffix() {
        let id = StyleId::new(StyleCategory::Text, 7);
        assert_eq!(id.as_str(), "textStyle7");
        let suffix = &id.as_str()["text".len()..];
        assert!(suffix.chars().next().unwrap().is_ascii_uppercase());
    }
}
