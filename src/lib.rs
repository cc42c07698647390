//! Syntax highlighting for the Koala language.
//!
//! Source is scanned one line at a time: [`Registry::scan_line`] takes the state the
//! previous line ended in and returns the tokens of the line along with the state for the
//! next one. [`Registry::highlight`] runs a whole document through a grammar and a theme,
//! ready for one of the renderers.

mod error;
pub mod grammars;
mod highlight;
pub mod koala;
mod registry;
mod renderers;
pub mod themes;
pub mod tokenizer;

pub use error::Error;
pub use highlight::HighlightedText;
pub use registry::{HighlightOptions, HighlightedCode, PLAIN_LANGUAGE_NAME, Registry};
pub use renderers::{RenderOptions, html::HtmlRenderer, terminal::TerminalRenderer};
pub use themes::{ChromeColor, Color, CompiledTheme, FontStyle, Style, ThemeKind};
pub use tokenizer::{LexerState, LineScanResult, Token};

pub const KOALA_CSS: &str = r#".koala-l {
  display: block;
}
.koala-ln {
  display: inline-block;
  user-select: none;
  white-space: pre;
  margin-right: 0.4em;
  padding: 0.4em;
  min-width: 3ch;
  text-align: right;
}
"#;
