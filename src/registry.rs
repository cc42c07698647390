use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, KoalaResult};
use crate::grammars::{CompiledGrammar, RawGrammar};
use crate::highlight::{HighlightedText, Highlighter, MergingOptions};
use crate::themes::{CompiledTheme, RawTheme};
use crate::tokenizer::{LexerState, LineScanResult, Token, Tokenizer};

/// The language name of the grammar where nothing is highlighted
pub const PLAIN_LANGUAGE_NAME: &str = "plain";

/// Options for highlighting by the registry, NOT rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightOptions<'a> {
    pub(crate) lang: &'a str,
    pub(crate) theme: &'a str,
    pub(crate) merge_whitespaces: bool,
    pub(crate) merge_same_style_tokens: bool,
    pub(crate) fallback_to_plain: bool,
}

impl<'a> HighlightOptions<'a> {
    pub fn new(lang: &'a str, theme: &'a str) -> Self {
        Self {
            lang,
            theme,
            merge_whitespaces: true,
            merge_same_style_tokens: true,
            fallback_to_plain: false,
        }
    }

    /// Whitespace tokens are merged with the next non-ws tokens.
    pub fn merge_whitespace(mut self, value: bool) -> Self {
        self.merge_whitespaces = value;
        self
    }

    /// Merges tokens with the same style into a single token
    pub fn merge_same_style_tokens(mut self, value: bool) -> Self {
        self.merge_same_style_tokens = value;
        self
    }

    /// Whether to fallback to the plain grammar if the requested
    /// language is not found.
    pub fn fallback_to_plain(mut self, value: bool) -> Self {
        self.fallback_to_plain = value;
        self
    }
}

/// Highlighted code with language, theme, and tokens
#[derive(Debug, Clone)]
pub struct HighlightedCode<'a> {
    /// The language actually used, `plain` if we fell back to it
    pub language: &'a str,
    pub theme: &'a CompiledTheme,
    /// The generated tokens. Each line is a Vector
    pub tokens: Vec<Vec<HighlightedText>>,
}

#[inline]
pub(crate) fn normalize_string(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Holds the registered languages and themes and is responsible for highlighting a text.
/// It is not responsible for actually rendering those highlighted texts.
///
/// Registering a language or a theme under a name that is already taken replaces the
/// previous one.
#[derive(Debug, Default)]
pub struct Registry {
    // language name -> compiled grammar
    grammars: HashMap<String, CompiledGrammar>,
    // theme name -> compiled theme
    themes: HashMap<String, CompiledTheme>,
}

impl Registry {
    /// Compiles and registers the grammar under its name.
    pub fn register_language(&mut self, raw_grammar: RawGrammar) -> KoalaResult<()> {
        let grammar = raw_grammar.compile()?;

        #[cfg(feature = "debug")]
        log::debug!(
            "Registering language '{}' with {} states{}",
            grammar.name,
            grammar.states.len(),
            if self.grammars.contains_key(&grammar.name) {
                ", replacing the existing one"
            } else {
                ""
            }
        );

        self.grammars.insert(grammar.name.clone(), grammar);
        Ok(())
    }

    /// Reads the file and add it as a language.
    pub fn add_language_from_path(&mut self, path: impl AsRef<Path>) -> KoalaResult<()> {
        let raw_grammar = RawGrammar::load_from_file(path)?;
        self.register_language(raw_grammar)
    }

    /// Adds an empty grammar that will not match any token. Useful as a fallback if the
    /// language is not found.
    ///
    /// It will get the `plain` language name.
    pub fn add_plain_language(&mut self) -> KoalaResult<()> {
        self.register_language(RawGrammar::plain(PLAIN_LANGUAGE_NAME))
    }

    /// Compiles and registers the theme under its name.
    pub fn register_theme(&mut self, raw_theme: RawTheme) -> KoalaResult<()> {
        let theme = raw_theme.compile()?;

        #[cfg(feature = "debug")]
        log::debug!("Registering theme '{}' ({:?})", theme.name, theme.kind);

        self.themes.insert(theme.name.clone(), theme);
        Ok(())
    }

    /// Reads the file and add it as a theme.
    pub fn add_theme_from_path(&mut self, path: impl AsRef<Path>) -> KoalaResult<()> {
        let raw_theme = RawTheme::load_from_file(path)?;
        self.register_theme(raw_theme)
    }

    pub fn contains_language(&self, name: &str) -> bool {
        self.grammars.contains_key(name)
    }

    pub fn contains_theme(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn language(&self, name: &str) -> KoalaResult<&CompiledGrammar> {
        self.grammars
            .get(name)
            .ok_or_else(|| Error::LanguageNotFound(name.to_string()))
    }

    pub fn theme(&self, name: &str) -> KoalaResult<&CompiledTheme> {
        self.themes
            .get(name)
            .ok_or_else(|| Error::ThemeNotFound(name.to_string()))
    }

    /// Registered language names, sorted
    pub fn language_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.grammars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered theme names, sorted
    pub fn theme_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Scans a single line of `lang` from `state`, the state the previous line ended in.
    /// Use [`LexerState::root`] for the first line.
    pub fn scan_line(
        &self,
        lang: &str,
        line: &str,
        state: &LexerState,
    ) -> KoalaResult<LineScanResult> {
        let grammar = self.language(lang)?;
        Ok(Tokenizer::new(grammar).scan_line(line, state))
    }

    /// Tokenizes a whole document, any line ending is accepted.
    pub fn tokenize(&self, lang: &str, content: &str) -> KoalaResult<Vec<Vec<Token>>> {
        let grammar = self.language(lang)?;
        Ok(Tokenizer::new(grammar).tokenize_string(&normalize_string(content)))
    }

    fn resolve_language(&self, options: &HighlightOptions) -> KoalaResult<&CompiledGrammar> {
        self.grammars
            .get(options.lang)
            .or_else(|| {
                if options.fallback_to_plain {
                    self.grammars.get(PLAIN_LANGUAGE_NAME)
                } else {
                    None
                }
            })
            .ok_or_else(|| Error::LanguageNotFound(options.lang.to_string()))
    }

    /// The main entry point for highlighting.
    ///
    /// This returns the raw output of the tokenizer + theme matching. It's up to you to use
    /// a provided renderer or to use your own afterwards.
    pub fn highlight<'a>(
        &'a self,
        content: &str,
        options: &HighlightOptions,
    ) -> KoalaResult<HighlightedCode<'a>> {
        let grammar = self.resolve_language(options)?;
        let theme = self.theme(options.theme)?;

        let normalized_content = normalize_string(content);
        let tokens = Tokenizer::new(grammar).tokenize_string(&normalized_content);

        let merging_options = MergingOptions {
            merge_whitespaces: options.merge_whitespaces,
            merge_same_style_tokens: options.merge_same_style_tokens,
        };
        let highlighted_tokens =
            Highlighter::new(theme).highlight_tokens(&normalized_content, tokens, merging_options);

        Ok(HighlightedCode {
            language: &grammar.name,
            theme,
            tokens: highlighted_tokens,
        })
    }
}
