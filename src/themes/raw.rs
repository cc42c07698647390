use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KoalaResult;
use crate::themes::compiled::CompiledTheme;

/// Styling for one token scope. `foreground` is a hex color, with or without `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ThemeRule {
    /// Scope the rule applies to, along with every scope below it:
    /// `string` also styles `string.quote`. An empty token styles the default text.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(
        rename = "fontStyle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub font_style: Option<String>,
}

impl ThemeRule {
    pub fn new(token: &str, foreground: Option<&str>, font_style: Option<&str>) -> Self {
        Self {
            token: token.to_owned(),
            foreground: foreground.map(str::to_owned),
            font_style: font_style.map(str::to_owned),
        }
    }
}

/// Theme in the form an editor defines it: a base theme providing default
/// colors, token rules and editor colors keyed like `editor.background`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTheme {
    pub name: String,
    /// `vs-dark`, `vs`, `hc-black` or `hc-light`
    pub base: String,
    /// Written back as given. Token rules of the base theme are never inherited
    /// whatever its value: the base only provides the default and editor colors.
    #[serde(default)]
    pub inherit: bool,
    #[serde(default)]
    pub rules: Vec<ThemeRule>,
    /// Editor colors. Keys we don't know about are kept but not used.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl RawTheme {
    pub fn load_from_file(path: impl AsRef<Path>) -> KoalaResult<Self> {
        let file = File::open(path)?;
        let theme = serde_json::from_reader(file)?;
        Ok(theme)
    }

    pub fn load_from_str(content: &str) -> KoalaResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> KoalaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolves colors and styles for every token category
    pub fn compile(self) -> KoalaResult<CompiledTheme> {
        CompiledTheme::from_raw_theme(self)
    }
}
