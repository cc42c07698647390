use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::grammars::TokenCategory;
use crate::renderers::html::HtmlEscaped;
use crate::themes::{Color, CompiledTheme, Style};
use crate::tokenizer::Token;

/// A token with associated styling information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedText {
    pub text: String,
    pub style: Style,
    /// Category of the token the text comes from. Merged tokens keep the first one.
    pub category: Option<TokenCategory>,
}

impl HighlightedText {
    /// Renders this highlighted text as an HTML span element.
    pub fn as_html(&self, default_style: &Style) -> String {
        let escaped = HtmlEscaped(self.text.as_str());
        if self.style == *default_style {
            format!("<span>{escaped}</span>")
        } else {
            let mut css_style = String::with_capacity(30);
            if self.style.foreground != default_style.foreground {
                css_style.push_str(&self.style.foreground.as_css_color_property());
            }
            if self.style.background != default_style.background {
                css_style.push_str(&self.style.background.as_css_bg_color_property());
            }
            for font_attr in self.style.font_style.css_attributes() {
                css_style.push_str(font_attr);
            }
            format!(r#"<span style="{}">{escaped}</span>"#, css_style)
        }
    }

    /// Appends this text wrapped in truecolor ANSI escape codes.
    /// The background is only written when `background` is given.
    pub fn as_ansi(&self, background: Option<Color>, out: &mut String) {
        out.push_str("\x1b[");
        self.style.foreground.as_ansi_fg(out);
        if let Some(bg) = background {
            out.push(';');
            bg.as_ansi_bg(out);
        }
        for code in self.style.font_style.ansi_codes() {
            out.push(';');
            out.push_str(code);
        }
        out.push('m');
        out.push_str(&self.text);
        out.push_str("\x1b[0m");
    }
}

/// Options for token merging behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergingOptions {
    pub merge_whitespaces: bool,
    pub merge_same_style_tokens: bool,
}

impl Default for MergingOptions {
    fn default() -> Self {
        Self {
            merge_whitespaces: true,
            merge_same_style_tokens: true,
        }
    }
}

type StyledSpan = (Range<usize>, Style, Option<TokenCategory>);

/// Highlighter that applies theme styles to tokenized code
#[derive(Debug, Clone, Copy)]
pub(crate) struct Highlighter<'r> {
    theme: &'r CompiledTheme,
}

impl<'r> Highlighter<'r> {
    pub fn new(theme: &'r CompiledTheme) -> Self {
        Highlighter { theme }
    }

    /// Apply highlighting to tokenized lines, preserving line structure.
    /// `content` must be the normalized text the tokens were produced from.
    pub fn highlight_tokens(
        &self,
        content: &str,
        tokens: Vec<Vec<Token>>,
        options: MergingOptions,
    ) -> Vec<Vec<HighlightedText>> {
        let mut result = Vec::with_capacity(tokens.len());

        for (line_tokens, line) in tokens.into_iter().zip(content.split('\n')) {
            if line_tokens.is_empty() {
                result.push(Vec::new());
                continue;
            }

            let mut line_result: Vec<StyledSpan> = line_tokens
                .into_iter()
                .map(|t| (t.span, self.theme.style_for_token(t.category), t.category))
                .collect();

            // first merge all ws by prepending to the next non-ws token
            if options.merge_whitespaces {
                line_result = self.merge_whitespaces(line, line_result);
            }

            // then merge same style tokens after we did the WS
            if options.merge_same_style_tokens {
                let mut merged: Vec<StyledSpan> = Vec::with_capacity(line_result.len());
                for (span, style, category) in line_result {
                    match merged.last_mut() {
                        Some((prev_span, prev_style, _)) if style == *prev_style => {
                            prev_span.end = span.end;
                        }
                        _ => merged.push((span, style, category)),
                    }
                }
                line_result = merged;
            }

            result.push(
                line_result
                    .into_iter()
                    .map(|(span, style, category)| HighlightedText {
                        text: line[span].to_string(),
                        style,
                        category,
                    })
                    .collect(),
            );
        }

        result
    }

    fn merge_whitespaces(&self, line: &str, spans: Vec<StyledSpan>) -> Vec<StyledSpan> {
        let num_tokens = spans.len();
        let mut merged = Vec::with_capacity(num_tokens);
        let mut carry_on_range: Option<Range<usize>> = None;

        for (idx, (span, style, category)) in spans.into_iter().enumerate() {
            let could_merge = !style.has_decorations();
            let is_whitespace_with_next = could_merge
                && line[span.clone()].chars().all(char::is_whitespace)
                && idx + 1 < num_tokens;

            if is_whitespace_with_next {
                carry_on_range = Some(match carry_on_range {
                    Some(range) => range.start..span.end,
                    None => span.clone(),
                });
                continue;
            }

            match carry_on_range.take() {
                // We can prepend all the WS to that token
                Some(carried) if could_merge => merged.push((carried.start..span.end, style, category)),
                // Underlined tokens would underline the whitespace too
                Some(carried) => {
                    merged.push((carried, self.theme.default_style, None));
                    merged.push((span, style, category));
                }
                None => merged.push((span, style, category)),
            }
        }

        merged
    }
}
