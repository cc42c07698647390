mod color;
mod compiled;
mod font_style;
mod raw;

pub use color::Color;
pub use compiled::{
    ChromeColor, ChromeColors, CompiledTheme, Style, StyleModifier, ThemeKind,
};
pub use font_style::FontStyle;
pub use raw::{RawTheme, ThemeRule};
