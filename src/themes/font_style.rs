use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug,
)]
pub struct FontStyle {
    bits: u8,
}

impl FontStyle {
    /// Bold font style
    pub const BOLD: Self = Self { bits: 1 };
    /// Underline font style
    pub const UNDERLINE: Self = Self { bits: 2 };
    /// Italic font style
    pub const ITALIC: Self = Self { bits: 4 };

    /// Returns an empty set of flags
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Returns `true` if no flags are currently stored
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if all of the flags in `other` are contained within `self`
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns the font style from a theme `fontStyle` value like `"bold italic"`
    pub fn from_theme_str(font_style_str: &str) -> Self {
        let mut font_style = Self::empty();
        for word in font_style_str.split_whitespace() {
            match word {
                "bold" => font_style.insert(FontStyle::BOLD),
                "italic" => font_style.insert(FontStyle::ITALIC),
                "underline" => font_style.insert(FontStyle::UNDERLINE),
                _ => (),
            }
        }
        font_style
    }

    /// Inserts the specified flags in-place
    pub fn insert(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// CSS declarations for the set flags
    pub(crate) fn css_attributes(&self) -> impl Iterator<Item = &'static str> {
        let style = *self;
        [
            (FontStyle::BOLD, "font-weight: bold;"),
            (FontStyle::ITALIC, "font-style: italic;"),
            (FontStyle::UNDERLINE, "text-decoration: underline;"),
        ]
        .into_iter()
        .filter(move |(flag, _)| style.contains(*flag))
        .map(|(_, css)| css)
    }

    /// SGR parameters for the set flags
    pub(crate) fn ansi_codes(&self) -> impl Iterator<Item = &'static str> {
        let style = *self;
        [
            (FontStyle::BOLD, "1"),
            (FontStyle::ITALIC, "3"),
            (FontStyle::UNDERLINE, "4"),
        ]
        .into_iter()
        .filter(move |(flag, _)| style.contains(*flag))
        .map(|(_, code)| code)
    }
}
