//! Color theme: ten named slots plus the built-in presets

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// The ten color tokens used by the generated stylesheet
///
/// Values are arbitrary CSS color strings. They are not validated here;
/// see [`is_safe_color`] for the grammar the strict render policy enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background: String,
    pub panel_background: String,
    pub text_color: String,
    pub title_color: String,
    pub subtitle_color: String,
    pub heading_color: String,
    pub underline_color: String,
    pub table_alt_row_background: String,
    pub table_alt_row_text: String,
    pub nested_panel_background: String,
}

impl Default for Theme {
    fn default() -> Self {
        ThemePreset::default().theme()
    }
}

impl Theme {
    /// Every slot empty; presets fill it in
    fn blank() -> Self {
        Self {
            background: String::new(),
            panel_background: String::new(),
            text_color: String::new(),
            title_color: String::new(),
            subtitle_color: String::new(),
            heading_color: String::new(),
            underline_color: String::new(),
            table_alt_row_background: String::new(),
            table_alt_row_text: String::new(),
            nested_panel_background: String::new(),
        }
    }

    /// Get the value of a slot
    pub fn get(&self, slot: ThemeSlot) -> &str {
        match slot {
            ThemeSlot::Background => &self.background,
            ThemeSlot::PanelBackground => &self.panel_background,
            ThemeSlot::TextColor => &self.text_color,
            ThemeSlot::TitleColor => &self.title_color,
            ThemeSlot::SubtitleColor => &self.subtitle_color,
            ThemeSlot::HeadingColor => &self.heading_color,
            ThemeSlot::UnderlineColor => &self.underline_color,
            ThemeSlot::TableAltRowBackground => &self.table_alt_row_background,
            ThemeSlot::TableAltRowText => &self.table_alt_row_text,
            ThemeSlot::NestedPanelBackground => &self.nested_panel_background,
        }
    }

    /// Replace the value of a slot
    pub fn set(&mut self, slot: ThemeSlot, value: impl Into<String>) {
        let target = match slot {
            ThemeSlot::Background => &mut self.background,
            ThemeSlot::PanelBackground => &mut self.panel_background,
            ThemeSlot::TextColor => &mut self.text_color,
            ThemeSlot::TitleColor => &mut self.title_color,
            ThemeSlot::SubtitleColor => &mut self.subtitle_color,
            ThemeSlot::HeadingColor => &mut self.heading_color,
            ThemeSlot::UnderlineColor => &mut self.underline_color,
            ThemeSlot::TableAltRowBackground => &mut self.table_alt_row_background,
            ThemeSlot::TableAltRowText => &mut self.table_alt_row_text,
            ThemeSlot::NestedPanelBackground => &mut self.nested_panel_background,
        };
        *target = value.into();
    }

    /// Slots whose value falls outside the safe color grammar
    pub fn unsafe_slots(&self) -> Vec<ThemeSlot> {
        ThemeSlot::ALL
            .into_iter()
            .filter(|slot| !is_safe_color(self.get(*slot)))
            .collect()
    }
}

/// Identifies one of the ten theme slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeSlot {
    Background,
    PanelBackground,
    TextColor,
    TitleColor,
    SubtitleColor,
    HeadingColor,
    UnderlineColor,
    TableAltRowBackground,
    TableAltRowText,
    NestedPanelBackground,
}

impl ThemeSlot {
    /// All slots in stylesheet order
    pub const ALL: [ThemeSlot; 10] = [
        ThemeSlot::Background,
        ThemeSlot::PanelBackground,
        ThemeSlot::TextColor,
        ThemeSlot::TitleColor,
        ThemeSlot::SubtitleColor,
        ThemeSlot::HeadingColor,
        ThemeSlot::UnderlineColor,
        ThemeSlot::TableAltRowBackground,
        ThemeSlot::TableAltRowText,
        ThemeSlot::NestedPanelBackground,
    ];

    /// Key used in save files
    pub fn key(self) -> &'static str {
        match self {
            ThemeSlot::Background => "background",
            ThemeSlot::PanelBackground => "panelBackground",
            ThemeSlot::TextColor => "textColor",
            ThemeSlot::TitleColor => "titleColor",
            ThemeSlot::SubtitleColor => "subtitleColor",
            ThemeSlot::HeadingColor => "headingColor",
            ThemeSlot::UnderlineColor => "underlineColor",
            ThemeSlot::TableAltRowBackground => "tableAltRowBackground",
            ThemeSlot::TableAltRowText => "tableAltRowText",
            ThemeSlot::NestedPanelBackground => "nestedPanelBackground",
        }
    }

    /// Shorter key written by earlier editor releases, if it differs
    pub fn legacy_key(self) -> Option<&'static str> {
        match self {
            ThemeSlot::Background => Some("bg"),
            ThemeSlot::PanelBackground => Some("panel"),
            ThemeSlot::TextColor => Some("ink"),
            ThemeSlot::TableAltRowBackground => Some("tableAltRow"),
            ThemeSlot::TableAltRowText => Some("tableAltInk"),
            ThemeSlot::NestedPanelBackground => Some("nestedBg"),
            _ => None,
        }
    }

    /// CSS custom property the stylesheet reads this slot from
    pub fn css_variable(self) -> &'static str {
        match self {
            ThemeSlot::Background => "--bg",
            ThemeSlot::PanelBackground => "--panel",
            ThemeSlot::TextColor => "--ink",
            ThemeSlot::TitleColor => "--title-color",
            ThemeSlot::SubtitleColor => "--subtitle-color",
            ThemeSlot::HeadingColor => "--heading-color",
            ThemeSlot::UnderlineColor => "--underline-color",
            ThemeSlot::TableAltRowBackground => "--table-alt",
            ThemeSlot::TableAltRowText => "--table-alt-ink",
            ThemeSlot::NestedPanelBackground => "--nested-bg",
        }
    }
}

impl std::fmt::Display for ThemeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

static SAFE_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#[0-9A-Fa-f]{3,8}|[A-Za-z]+|(?:rgba?|hsla?)\([0-9.%,/+\- ]*\))$")
        .expect("SAFE_COLOR is a compile-time constant")
});

/// Check a value against the safe color grammar
///
/// Accepts `#` followed by 3 to 8 hex digits, a bare keyword such as
/// `transparent`, or an `rgb()`/`rgba()`/`hsl()`/`hsla()` call whose
/// arguments contain only digits, `.`, `%`, `,`, `/`, `+`, `-` and spaces.
pub fn is_safe_color(value: &str) -> bool {
    SAFE_COLOR.is_match(value.trim())
}

/// Built-in theme presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreset {
    /// Paper white with black ink
    #[default]
    FuzzyBlackSheep,
    /// Dark earth tones with emerald accents
    GreenEyedTabby,
    /// Deep navy with crimson accents
    DeepseaFrilledShark,
    /// Night purple with golden highlights
    MoonViewingRabbit,
    /// Black with ultramarine highlights
    LoneCrow,
}

impl ThemePreset {
    /// All presets in display order
    pub fn all() -> [ThemePreset; 5] {
        [
            ThemePreset::FuzzyBlackSheep,
            ThemePreset::GreenEyedTabby,
            ThemePreset::DeepseaFrilledShark,
            ThemePreset::MoonViewingRabbit,
            ThemePreset::LoneCrow,
        ]
    }

    /// Stable identifier used on the command line and in charpage.toml
    pub fn id(self) -> &'static str {
        match self {
            ThemePreset::FuzzyBlackSheep => "fuzzy-black-sheep",
            ThemePreset::GreenEyedTabby => "green-eyed-tabby",
            ThemePreset::DeepseaFrilledShark => "deepsea-frilled-shark",
            ThemePreset::MoonViewingRabbit => "moon-viewing-rabbit",
            ThemePreset::LoneCrow => "lone-crow",
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ThemePreset::FuzzyBlackSheep => "Paper white with black ink",
            ThemePreset::GreenEyedTabby => "Dark earth tones with emerald accents",
            ThemePreset::DeepseaFrilledShark => "Deep navy with crimson accents",
            ThemePreset::MoonViewingRabbit => "Night purple with golden highlights",
            ThemePreset::LoneCrow => "Black with ultramarine highlights",
        }
    }

    /// Look up a preset by identifier (case-insensitive)
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|preset| preset.id().eq_ignore_ascii_case(id.trim()))
    }

    /// Build the full theme for this preset
    pub fn theme(self) -> Theme {
        let mut theme = Theme::blank();
        for (slot, value) in ThemeSlot::ALL.into_iter().zip(self.palette()) {
            theme.set(slot, value);
        }
        theme
    }

    /// Slot values in [`ThemeSlot::ALL`] order
    fn palette(self) -> [&'static str; 10] {
        match self {
            ThemePreset::FuzzyBlackSheep => [
                "#f5f5f5",
                "#ffffff",
                "#0d0d0d",
                "#111111",
                "#333333",
                "#000000",
                "#666666",
                "rgba(0,0,0,0.8)",
                "#ffffff",
                "#eeeeee",
            ],
            ThemePreset::GreenEyedTabby => [
                "#121614",
                "#1e2723",
                "#d9e6d5",
                "#7fff94",
                "#9ab59f",
                "#b4e1b0",
                "#4ade80",
                "rgba(126,163,138,0.25)",
                "#e6f5e6",
                "#2b3630",
            ],
            ThemePreset::DeepseaFrilledShark => [
                "#06080d",
                "#101620",
                "#e5ecf5",
                "#ff6384",
                "#9fb0c6",
                "#e8a3b3",
                "#f87171",
                "rgba(255,255,255,0.08)",
                "#e9f0fa",
                "#19212f",
            ],
            ThemePreset::MoonViewingRabbit => [
                "#1b1a28",
                "#2a2838",
                "#fdfcf7",
                "#ffd966",
                "#f0e9c8",
                "#ffe79e",
                "#ffed4a",
                "rgba(255,255,255,0.08)",
                "#fff8dc",
                "#3c384a",
            ],
            ThemePreset::LoneCrow => [
                "#0a0a0f",
                "#15151d",
                "#f1f1f1",
                "#8c9eff",
                "#b0b7d9",
                "#c3caff",
                "#6366f1",
                "rgba(140,158,255,0.15)",
                "#e6e9ff",
                "#1e1e2a",
            ],
        }
    }
}
