use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, KoalaResult};
use crate::grammars::TokenCategory;
use crate::themes::Color;
use crate::themes::font_style::FontStyle;
use crate::themes::raw::{RawTheme, ThemeRule};

/// A complete style with foreground, background colors and font styling
///
/// This is the runtime representation that always has concrete values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
    pub font_style: FontStyle,
}

impl Style {
    /// Whether the style draws anything on whitespace
    pub(crate) fn has_decorations(&self) -> bool {
        self.font_style.contains(FontStyle::UNDERLINE)
    }
}

/// A style modifier with optional values, as written in a theme rule.
/// Resolved against the theme default style when compiling.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StyleModifier {
    pub foreground: Option<Color>,
    pub font_style: Option<FontStyle>,
}

impl StyleModifier {
    pub fn apply_to(&self, style: &Style) -> Style {
        Style {
            foreground: self.foreground.unwrap_or(style.foreground),
            background: style.background,
            font_style: self.font_style.unwrap_or(style.font_style),
        }
    }
}

impl TryFrom<&ThemeRule> for StyleModifier {
    type Error = Error;

    fn try_from(rule: &ThemeRule) -> KoalaResult<Self> {
        let foreground = match &rule.foreground {
            Some(s) => Some(Color::from_hex(s)?),
            None => None,
        };
        let font_style = rule.font_style.as_deref().map(FontStyle::from_theme_str);
        Ok(Self {
            foreground,
            font_style,
        })
    }
}

/// Theme type for determining fallback colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeKind {
    Light,
    #[default]
    Dark,
}

impl ThemeKind {
    /// Anything that isn't a known light base is treated as dark
    pub fn from_base(base: &str) -> ThemeKind {
        match base {
            "vs" | "vs-light" | "hc-light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    fn default_chrome(&self) -> ChromeColors {
        match self {
            ThemeKind::Light => ChromeColors {
                foreground: Color::rgb(0x00, 0x00, 0x00),
                background: Color::rgb(0xFF, 0xFF, 0xFE),
                cursor: Color::rgb(0x00, 0x00, 0x00),
                line_number: Color::rgb(0x23, 0x78, 0x93),
                bracket_match_border: Color::rgb(0xB9, 0xB9, 0xB9),
            },
            ThemeKind::Dark => ChromeColors {
                foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                background: Color::rgb(0x1E, 0x1E, 0x1E),
                cursor: Color::rgb(0xAE, 0xAF, 0xAD),
                line_number: Color::rgb(0x85, 0x85, 0x85),
                bracket_match_border: Color::rgb(0x88, 0x88, 0x88),
            },
        }
    }
}

/// The editor surfaces a theme colors besides the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChromeColor {
    Background,
    Foreground,
    Cursor,
    LineNumber,
    BracketMatchBorder,
}

impl ChromeColor {
    pub const ALL: [ChromeColor; 5] = [
        ChromeColor::Background,
        ChromeColor::Foreground,
        ChromeColor::Cursor,
        ChromeColor::LineNumber,
        ChromeColor::BracketMatchBorder,
    ];

    /// The key used in a theme `colors` map
    pub const fn editor_key(self) -> &'static str {
        match self {
            ChromeColor::Background => "editor.background",
            ChromeColor::Foreground => "editor.foreground",
            ChromeColor::Cursor => "editorCursor.foreground",
            ChromeColor::LineNumber => "editorLineNumber.foreground",
            ChromeColor::BracketMatchBorder => "editorBracketMatch.border",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ChromeColor::Background => "background",
            ChromeColor::Foreground => "foreground",
            ChromeColor::Cursor => "cursor",
            ChromeColor::LineNumber => "line-number",
            ChromeColor::BracketMatchBorder => "bracket-match-border",
        }
    }
}

impl FromStr for ChromeColor {
    type Err = String;

    /// Accepts both the short name (`line-number`) and the editor key
    /// (`editorLineNumber.foreground`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChromeColor::ALL
            .into_iter()
            .find(|c| c.name() == s || c.editor_key() == s)
            .ok_or_else(|| format!("unknown editor color '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeColors {
    pub foreground: Color,
    pub background: Color,
    pub cursor: Color,
    pub line_number: Color,
    pub bracket_match_border: Color,
}

impl ChromeColors {
    fn get(&self, color: ChromeColor) -> Color {
        match color {
            ChromeColor::Background => self.background,
            ChromeColor::Foreground => self.foreground,
            ChromeColor::Cursor => self.cursor,
            ChromeColor::LineNumber => self.line_number,
            ChromeColor::BracketMatchBorder => self.bracket_match_border,
        }
    }

    fn set(&mut self, color: ChromeColor, value: Color) {
        match color {
            ChromeColor::Background => self.background = value,
            ChromeColor::Foreground => self.foreground = value,
            ChromeColor::Cursor => self.cursor = value,
            ChromeColor::LineNumber => self.line_number = value,
            ChromeColor::BracketMatchBorder => self.bracket_match_border = value,
        }
    }
}

/// A theme with a style resolved for every token category
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTheme {
    pub name: String,
    pub kind: ThemeKind,
    /// Style of unclassified text and of categories no rule matches
    pub default_style: Style,
    pub chrome: ChromeColors,
    category_styles: HashMap<TokenCategory, Style>,
}

impl CompiledTheme {
    pub fn from_raw_theme(raw_theme: RawTheme) -> KoalaResult<Self> {
        let kind = ThemeKind::from_base(&raw_theme.base);

        let mut chrome = kind.default_chrome();
        for (key, value) in &raw_theme.colors {
            if let Ok(chrome_color) = key.parse::<ChromeColor>() {
                chrome.set(chrome_color, Color::from_hex(value)?);
            }
        }

        let mut default_style = Style {
            foreground: chrome.foreground,
            background: chrome.background,
            font_style: FontStyle::empty(),
        };

        let mut modifiers: HashMap<&str, StyleModifier> = HashMap::new();
        for rule in &raw_theme.rules {
            let modifier = StyleModifier::try_from(rule)?;
            if rule.token.is_empty() {
                default_style = modifier.apply_to(&default_style);
            } else {
                // later rules for the same token win, like in the editor
                modifiers.insert(rule.token.as_str(), modifier);
            }
        }

        // Build up the style from the shortest scope prefix to the full scope,
        // each level overriding what it sets
        let category_styles = TokenCategory::ALL
            .into_iter()
            .map(|category| {
                let style = category
                    .scope_prefixes()
                    .filter_map(|prefix| modifiers.get(prefix))
                    .fold(default_style, |style, modifier| modifier.apply_to(&style));
                (category, style)
            })
            .collect();

        Ok(CompiledTheme {
            name: raw_theme.name,
            kind,
            default_style,
            chrome,
            category_styles,
        })
    }

    /// Get the style for a token category
    pub fn style_for(&self, category: TokenCategory) -> Style {
        self.category_styles
            .get(&category)
            .copied()
            .unwrap_or(self.default_style)
    }

    /// Get the style for a token, unclassified tokens get the default style
    pub fn style_for_token(&self, category: Option<TokenCategory>) -> Style {
        category.map_or(self.default_style, |c| self.style_for(c))
    }

    pub fn chrome_color(&self, color: ChromeColor) -> Color {
        self.chrome.get(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> Color {
        Color::from_hex(hex).unwrap()
    }

    fn theme(rules: Vec<ThemeRule>) -> CompiledTheme {
        RawTheme {
            name: "test".to_owned(),
            base: "vs-dark".to_owned(),
            inherit: true,
            rules,
            colors: Default::default(),
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn more_specific_scope_wins() {
        let theme = theme(vec![
            ThemeRule::new("string.escape", Some("#e06c75"), None),
            ThemeRule::new("string", Some("#98c379"), Some("italic")),
        ]);
        let escape = theme.style_for(TokenCategory::StringEscape);
        assert_eq!(escape.foreground, color("#e06c75"));
        // inherited from `string`
        assert_eq!(escape.font_style, FontStyle::ITALIC);

        let quote = theme.style_for(TokenCategory::StringQuote);
        assert_eq!(quote.foreground, color("#98c379"));
    }

    #[test]
    fn empty_token_sets_default_style() {
        let theme = theme(vec![ThemeRule::new("", Some("#abcdef"), None)]);
        assert_eq!(theme.default_style.foreground, color("#abcdef"));
        assert_eq!(theme.style_for(TokenCategory::Bracket).foreground, color("#abcdef"));
        assert_eq!(theme.style_for_token(None).foreground, color("#abcdef"));
    }

    #[test]
    fn last_rule_for_a_token_wins() {
        let theme = theme(vec![
            ThemeRule::new("number", Some("#111111"), None),
            ThemeRule::new("number", Some("#222222"), None),
        ]);
        assert_eq!(
            theme.style_for(TokenCategory::NumberLiteral).foreground,
            color("#222222")
        );
    }

    #[test]
    fn base_token_rules_are_not_inherited() {
        let raw = |inherit| RawTheme {
            name: "inherit".to_owned(),
            base: "vs-dark".to_owned(),
            inherit,
            rules: vec![ThemeRule::new("number", Some("#222222"), None)],
            colors: Default::default(),
        };
        let inheriting = raw(true).compile().unwrap();
        let standalone = raw(false).compile().unwrap();
        assert_eq!(inheriting, standalone);
        // no base rule for comments, only the base default color
        assert_eq!(
            inheriting.style_for(TokenCategory::Comment),
            inheriting.default_style
        );
    }

    #[test]
    fn invalid_rule_color_errors() {
        let res = RawTheme {
            name: "broken".to_owned(),
            base: "vs".to_owned(),
            inherit: false,
            rules: vec![ThemeRule::new("keyword", Some("orange"), None)],
            colors: Default::default(),
        }
        .compile();
        assert!(matches!(res, Err(Error::InvalidHexColor { .. })));
    }

    #[test]
    fn chrome_color_names() {
        assert_eq!("line-number".parse(), Ok(ChromeColor::LineNumber));
        assert_eq!(
            "editorBracketMatch.border".parse(),
            Ok(ChromeColor::BracketMatchBorder)
        );
        assert!("editor.selectionBackground".parse::<ChromeColor>().is_err());
    }

    #[test]
    fn unknown_editor_colors_are_ignored() {
        let mut colors = std::collections::BTreeMap::new();
        colors.insert("editorWidget.border".to_owned(), "not even a color".to_owned());
        colors.insert("editorCursor.foreground".to_owned(), "#ff0000".to_owned());
        let theme = RawTheme {
            name: "chrome".to_owned(),
            base: "hc-light".to_owned(),
            inherit: false,
            rules: vec![],
            colors,
        }
        .compile()
        .unwrap();
        assert_eq!(theme.kind, ThemeKind::Light);
        assert_eq!(theme.chrome_color(ChromeColor::Cursor), color("#ff0000"));
        assert_eq!(theme.chrome_color(ChromeColor::Foreground), color("#000000"));
    }
}
