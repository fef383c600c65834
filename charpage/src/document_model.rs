//! Document model for a character profile page
//!
//! A [`Document`] holds everything the page generator needs: header text,
//! the stats table, the image list, free-text panels, mini-sections,
//! two-level pulldowns, and the color theme. All collections are ordered
//! and their order is the on-page order.
//!
//! Item lists (images, mini-section items, pulldown child items) are stored
//! as raw newline-delimited text and derived on demand with
//! [`crate::escape::split_lines`].

use crate::escape::split_lines;
use serde::{Deserialize, Serialize};

// Submodules
mod blocks;
mod sequence;
mod theme;

// Re-export public types
pub use blocks::{
    MemoPanel, MiniSection, Pulldown, PulldownChild, StatEntry, DEFAULT_MEMO_TITLE,
    DEFAULT_MINI_TITLE, DEFAULT_PULLDOWN_TITLE,
};
pub use sequence::move_item;
pub use theme::{is_safe_color, Theme, ThemePreset, ThemeSlot};

/// Title used when a save file has none
pub const DEFAULT_TITLE: &str = "Title";

/// Subtitle used when a save file has none
pub const DEFAULT_SUBTITLE: &str = "Subtitle";

/// The complete editable content of one character page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub subtitle: String,
    /// Two-column stats table rows
    pub stats: Vec<StatEntry>,
    /// Newline-delimited image URLs (source of truth for `images()`)
    pub image_raw_text: String,
    pub memo_panels: Vec<MemoPanel>,
    pub mini_sections: Vec<MiniSection>,
    pub pulldowns: Vec<Pulldown>,
    pub theme: Theme,
}

impl Default for Document {
    /// Sample content shown when an editing session starts
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            stats: ["Age", "Gender", "Occupation", "Height", "Origin"]
                .into_iter()
                .map(|name| StatEntry::new(name, "n"))
                .collect(),
            image_raw_text: [
                "https://picsum.photos/seed/1/800/1200",
                "https://picsum.photos/seed/2/800/1200",
            ]
            .join("\n"),
            memo_panels: vec![MemoPanel::new(
                DEFAULT_MEMO_TITLE,
                "Write anything you like here.",
            )],
            mini_sections: vec![
                MiniSection::new("Section A", "Item A1\nItem A2"),
                MiniSection::new("Section B", "Item B1\nItem B2"),
            ],
            pulldowns: vec![Pulldown::new(
                DEFAULT_PULLDOWN_TITLE,
                vec![
                    PulldownChild::new(DEFAULT_PULLDOWN_TITLE, "Item 1\nItem 2"),
                    PulldownChild::new(DEFAULT_PULLDOWN_TITLE, "Item A\nItem B"),
                ],
            )],
            theme: Theme::default(),
        }
    }
}

impl Document {
    /// Create an empty document with the default theme
    ///
    /// Every field is present; text is empty and all sequences have no
    /// elements.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            stats: Vec::new(),
            image_raw_text: String::new(),
            memo_panels: Vec::new(),
            mini_sections: Vec::new(),
            pulldowns: Vec::new(),
            theme: Theme::default(),
        }
    }

    /// Image URLs derived from `image_raw_text`
    pub fn images(&self) -> Vec<String> {
        split_lines(&self.image_raw_text)
    }

    /// Replace all ten theme slots with a preset
    pub fn apply_preset(&mut self, preset: ThemePreset) {
        self.theme = preset.theme();
    }

    // Stats

    pub fn add_stat(&mut self) {
        self.stats.push(StatEntry::default());
    }

    pub fn remove_stat(&mut self, index: usize) -> Option<StatEntry> {
        sequence::remove_item(&mut self.stats, index)
    }

    pub fn move_stat(&mut self, from: usize, to: usize) -> bool {
        sequence::move_item(&mut self.stats, from, to)
    }

    pub fn move_stat_up(&mut self, index: usize) -> bool {
        sequence::move_up(&mut self.stats, index)
    }

    pub fn move_stat_down(&mut self, index: usize) -> bool {
        sequence::move_down(&mut self.stats, index)
    }

    // Memo panels

    pub fn add_memo_panel(&mut self) {
        self.memo_panels.push(MemoPanel::default());
    }

    pub fn remove_memo_panel(&mut self, index: usize) -> Option<MemoPanel> {
        sequence::remove_item(&mut self.memo_panels, index)
    }

    pub fn move_memo_panel(&mut self, from: usize, to: usize) -> bool {
        sequence::move_item(&mut self.memo_panels, from, to)
    }

    pub fn move_memo_panel_up(&mut self, index: usize) -> bool {
        sequence::move_up(&mut self.memo_panels, index)
    }

    pub fn move_memo_panel_down(&mut self, index: usize) -> bool {
        sequence::move_down(&mut self.memo_panels, index)
    }

    // Mini-sections

    pub fn add_mini_section(&mut self) {
        self.mini_sections.push(MiniSection::default());
    }

    pub fn remove_mini_section(&mut self, index: usize) -> Option<MiniSection> {
        sequence::remove_item(&mut self.mini_sections, index)
    }

    pub fn move_mini_section(&mut self, from: usize, to: usize) -> bool {
        sequence::move_item(&mut self.mini_sections, from, to)
    }

    pub fn move_mini_section_up(&mut self, index: usize) -> bool {
        sequence::move_up(&mut self.mini_sections, index)
    }

    pub fn move_mini_section_down(&mut self, index: usize) -> bool {
        sequence::move_down(&mut self.mini_sections, index)
    }

    // Pulldowns

    pub fn add_pulldown(&mut self) {
        self.pulldowns.push(Pulldown::default());
    }

    pub fn remove_pulldown(&mut self, index: usize) -> Option<Pulldown> {
        sequence::remove_item(&mut self.pulldowns, index)
    }

    pub fn move_pulldown(&mut self, from: usize, to: usize) -> bool {
        sequence::move_item(&mut self.pulldowns, from, to)
    }

    pub fn move_pulldown_up(&mut self, index: usize) -> bool {
        sequence::move_up(&mut self.pulldowns, index)
    }

    pub fn move_pulldown_down(&mut self, index: usize) -> bool {
        sequence::move_down(&mut self.pulldowns, index)
    }

    // Pulldown children

    /// Append a default child to `pulldowns[pulldown]`
    ///
    /// # Returns
    /// * `false` if the pulldown index is out of range (nothing changes)
    pub fn add_pulldown_child(&mut self, pulldown: usize) -> bool {
        match self.pulldowns.get_mut(pulldown) {
            Some(parent) => {
                parent.children.push(PulldownChild::default());
                true
            }
            None => false,
        }
    }

    pub fn remove_pulldown_child(
        &mut self,
        pulldown: usize,
        child: usize,
    ) -> Option<PulldownChild> {
        let parent = self.pulldowns.get_mut(pulldown)?;
        sequence::remove_item(&mut parent.children, child)
    }

    pub fn move_pulldown_child(&mut self, pulldown: usize, from: usize, to: usize) -> bool {
        self.pulldowns
            .get_mut(pulldown)
            .is_some_and(|parent| sequence::move_item(&mut parent.children, from, to))
    }

    pub fn move_pulldown_child_up(&mut self, pulldown: usize, child: usize) -> bool {
        self.pulldowns
            .get_mut(pulldown)
            .is_some_and(|parent| sequence::move_up(&mut parent.children, child))
    }

    pub fn move_pulldown_child_down(&mut self, pulldown: usize, child: usize) -> bool {
        self.pulldowns
            .get_mut(pulldown)
            .is_some_and(|parent| sequence::move_down(&mut parent.children, child))
    }

    /// Number of list items across mini-sections and pulldown children
    pub fn item_count(&self) -> usize {
        let mini: usize = self.mini_sections.iter().map(|m| m.items().len()).sum();
        let nested: usize = self
            .pulldowns
            .iter()
            .flat_map(|p| &p.children)
            .map(|c| c.items().len())
            .sum();
        mini + nested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(doc: &Document) -> Vec<&str> {
        doc.memo_panels.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_default_document_has_sample_content() {
        let doc = Document::default();
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.stats.len(), 5);
        assert_eq!(doc.images().len(), 2);
        assert_eq!(doc.memo_panels.len(), 1);
        assert_eq!(doc.mini_sections.len(), 2);
        assert_eq!(doc.pulldowns[0].children.len(), 2);
        assert_eq!(doc.item_count(), 8);
    }

    #[test]
    fn test_images_are_derived_from_raw_text() {
        let mut doc = Document::empty();
        doc.image_raw_text = " a.png \r\n\r\nb.png\n".to_string();
        assert_eq!(doc.images(), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_stat_move_up_down_at_edges() {
        let mut doc = Document::empty();
        doc.stats = ["A", "B", "C"]
            .into_iter()
            .map(|name| StatEntry::new(name, ""))
            .collect();
        let names = |doc: &Document| -> Vec<String> {
            doc.stats.iter().map(|s| s.name.clone()).collect()
        };

        assert!(!doc.move_stat_up(0));
        assert!(!doc.move_stat_down(2));
        assert_eq!(names(&doc), vec!["A", "B", "C"]);

        assert!(doc.move_stat_down(0));
        assert_eq!(names(&doc), vec!["B", "A", "C"]);
        assert!(doc.move_stat_up(2));
        assert_eq!(names(&doc), vec!["B", "C", "A"]);

        let mut empty = Document::empty();
        assert!(!empty.move_stat_up(0));
        assert!(!empty.move_stat_down(0));
    }

    #[test]
    fn test_memo_panel_add_remove_move() {
        let mut doc = Document::empty();
        for title in ["A", "B", "C", "D"] {
            doc.add_memo_panel();
            doc.memo_panels.last_mut().unwrap().title = title.to_string();
        }

        assert!(doc.move_memo_panel(0, 2));
        assert_eq!(titles(&doc), vec!["B", "C", "A", "D"]);

        assert!(!doc.move_memo_panel_down(3));
        assert!(doc.move_memo_panel_up(3));
        assert_eq!(titles(&doc), vec!["B", "C", "D", "A"]);

        let removed = doc.remove_memo_panel(1).unwrap();
        assert_eq!(removed.title, "C");
        assert!(doc.remove_memo_panel(10).is_none());
        assert_eq!(titles(&doc), vec!["B", "D", "A"]);
    }

    #[test]
    fn test_added_elements_use_defaults() {
        let mut doc = Document::empty();
        doc.add_stat();
        doc.add_memo_panel();
        doc.add_mini_section();
        doc.add_pulldown();
        assert!(doc.add_pulldown_child(0));

        assert_eq!(doc.stats[0], StatEntry::default());
        assert_eq!(doc.memo_panels[0], MemoPanel::new(DEFAULT_MEMO_TITLE, ""));
        assert_eq!(doc.mini_sections[0].title, DEFAULT_MINI_TITLE);
        assert!(doc.mini_sections[0].items().is_empty());
        assert_eq!(doc.pulldowns[0].title, DEFAULT_PULLDOWN_TITLE);
        assert_eq!(doc.pulldowns[0].children.len(), 1);
    }

    #[test]
    fn test_pulldown_child_operations() {
        let mut doc = Document::empty();
        doc.add_pulldown();
        for title in ["x", "y", "z"] {
            doc.add_pulldown_child(0);
            doc.pulldowns[0].children.last_mut().unwrap().title = title.to_string();
        }

        assert!(doc.move_pulldown_child(0, 2, 0));
        let order: Vec<_> = doc.pulldowns[0]
            .children
            .iter()
            .map(|c| c.title.clone())
            .collect();
        assert_eq!(order, vec!["z", "x", "y"]);

        assert_eq!(doc.remove_pulldown_child(0, 1).unwrap().title, "x");
        assert!(doc.remove_pulldown_child(3, 0).is_none());
        assert!(!doc.add_pulldown_child(3));
        assert!(!doc.move_pulldown_child(3, 0, 1));
        assert!(doc.move_pulldown_child_down(0, 0));
        assert_eq!(doc.pulldowns[0].children[0].title, "y");
    }

    #[test]
    fn test_move_stat_clamps_out_of_range() {
        let mut doc = Document::default();
        let first = doc.stats[0].clone();
        assert!(doc.move_stat(0, 100));
        assert_eq!(doc.stats.last(), Some(&first));
        assert_eq!(doc.stats.len(), 5);
    }

    #[test]
    fn test_apply_preset() {
        let mut doc = Document::default();
        doc.apply_preset(ThemePreset::MoonViewingRabbit);
        assert_eq!(doc.theme.title_color, "#ffd966");
    }
}
