//! Content blocks held in the document's ordered sequences

use crate::escape::split_lines;
use serde::{Deserialize, Serialize};

/// Default title for a newly added memo panel
pub const DEFAULT_MEMO_TITLE: &str = "Memo";

/// Default title for a newly added mini-section
pub const DEFAULT_MINI_TITLE: &str = "Section";

/// Default title for newly added pulldowns and pulldown children
pub const DEFAULT_PULLDOWN_TITLE: &str = "Details";

/// One row of the stats table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatEntry {
    /// Row label (not required to be unique)
    pub name: String,
    /// Row value
    pub value: String,
}

impl StatEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A free-text panel rendered as its own section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoPanel {
    pub title: String,
    pub body: String,
}

impl MemoPanel {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl Default for MemoPanel {
    fn default() -> Self {
        Self::new(DEFAULT_MEMO_TITLE, "")
    }
}

/// A heading with a bullet list, laid out in the two-column grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MiniSection {
    pub title: String,
    /// Newline-delimited list items (source of truth for `items()`)
    pub items_raw_text: String,
}

impl MiniSection {
    pub fn new(title: impl Into<String>, items_raw_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items_raw_text: items_raw_text.into(),
        }
    }

    /// Derived list items
    pub fn items(&self) -> Vec<String> {
        split_lines(&self.items_raw_text)
    }
}

impl Default for MiniSection {
    fn default() -> Self {
        Self::new(DEFAULT_MINI_TITLE, "")
    }
}

/// A top-level collapsible block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pulldown {
    pub title: String,
    pub children: Vec<PulldownChild>,
}

impl Pulldown {
    pub fn new(title: impl Into<String>, children: Vec<PulldownChild>) -> Self {
        Self {
            title: title.into(),
            children,
        }
    }
}

impl Default for Pulldown {
    fn default() -> Self {
        Self::new(DEFAULT_PULLDOWN_TITLE, Vec::new())
    }
}

/// A collapsible block nested one level inside a [`Pulldown`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PulldownChild {
    pub title: String,
    /// Newline-delimited list items (source of truth for `items()`)
    pub body_raw_text: String,
}

impl PulldownChild {
    pub fn new(title: impl Into<String>, body_raw_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_raw_text: body_raw_text.into(),
        }
    }

    /// Derived list items
    pub fn items(&self) -> Vec<String> {
        split_lines(&self.body_raw_text)
    }
}

impl Default for PulldownChild {
    fn default() -> Self {
        Self::new(DEFAULT_PULLDOWN_TITLE, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mini_section_items_are_derived() {
        let section = MiniSection::new("Likes", "tea\n\n  cats  \r\nrain");
        assert_eq!(section.items(), vec!["tea", "cats", "rain"]);
        assert_eq!(section.items(), section.items());
    }

    #[test]
    fn test_child_serializes_raw_text_only() {
        let child = PulldownChild::new("Past", "one\ntwo");
        let json = serde_json::to_value(&child).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Past", "bodyRawText": "one\ntwo" })
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let stat: StatEntry = serde_json::from_str(r#"{ "name": "HP" }"#).unwrap();
        assert_eq!(stat, StatEntry::new("HP", ""));

        let panel: MemoPanel = serde_json::from_str(r#"{ "body": "text" }"#).unwrap();
        assert_eq!(panel.title, DEFAULT_MEMO_TITLE);
        assert_eq!(panel.body, "text");
    }
}
