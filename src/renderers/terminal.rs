use crate::registry::HighlightedCode;
use crate::renderers::RenderOptions;
use crate::themes::ChromeColor;

/// Terminal renderer via ANSI escape codes. Requires a terminal that supports truecolor
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TerminalRenderer {
    /// Paint the theme background behind the text instead of keeping the terminal one
    pub with_background: bool,
}

impl TerminalRenderer {
    /// Render to the terminal with ANSI escape codes
    pub fn render(&self, highlighted: &HighlightedCode, options: &RenderOptions) -> String {
        let theme = highlighted.theme;
        let line_number_width = options.line_number_width(highlighted.tokens.len());
        let background = self
            .with_background
            .then_some(theme.default_style.background);

        let line_count = highlighted.tokens.len();
        let mut lines = Vec::with_capacity(line_count);
        for (idx, line_tokens) in highlighted.tokens.iter().enumerate() {
            let line_num = idx + 1; // 1-indexed

            // If the last line is the final newline of the file, don't render it.
            // This matches the behaviour of "cat" and "bat"
            if line_num == line_count && line_tokens.is_empty() && line_count > 1 {
                continue;
            }
            if options.is_hidden(line_num) {
                continue;
            }

            let mut output = String::new();
            if options.show_line_numbers {
                let display_line_num = options.line_number_start + (idx as isize);
                output.push_str("\x1b[");
                theme
                    .chrome_color(ChromeColor::LineNumber)
                    .as_ansi_fg(&mut output);
                output.push('m');
                output.push_str(&format!("  {display_line_num:>line_number_width$} "));
                output.push_str("\x1b[0m");
            }

            for token in line_tokens {
                token.as_ansi(background, &mut output);
            }
            lines.push(output);
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koala::{DARK_THEME_NAME, LANGUAGE_ID};
    use crate::registry::HighlightOptions;
    use crate::test_utils::get_registry;

    #[test]
    fn renders_truecolor_tokens() {
        let registry = get_registry();
        let options = HighlightOptions::new(LANGUAGE_ID, DARK_THEME_NAME);
        let highlighted = registry.highlight("x = 5;\n", &options).unwrap();

        let ansi = TerminalRenderer::default().render(&highlighted, &RenderOptions::default());
        assert_eq!(
            ansi,
            "\x1b[38;2;255;255;255mx\x1b[0m\
             \x1b[38;2;212;212;212m = \x1b[0m\
             \x1b[38;2;209;154;102m5\x1b[0m\
             \x1b[38;2;212;212;212m;\x1b[0m"
        );
    }

    #[test]
    fn line_numbers_and_hidden_lines() {
        let registry = get_registry();
        let options = HighlightOptions::new(LANGUAGE_ID, DARK_THEME_NAME);
        let code = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj";
        let highlighted = registry.highlight(code, &options).unwrap();
        let render_options = RenderOptions {
            show_line_numbers: true,
            line_number_start: 1,
            hide_lines: vec![2..=8],
        };

        let ansi = TerminalRenderer::default().render(&highlighted, &render_options);
        let lines: Vec<_> = ansi.lines().collect();
        assert_eq!(lines.len(), 3);
        // line numbers are right aligned on the widest one
        assert!(lines[0].starts_with("\x1b[38;2;133;133;133m   1 \x1b[0m"));
        assert!(lines[1].starts_with("\x1b[38;2;133;133;133m   9 \x1b[0m"));
        assert!(lines[2].starts_with("\x1b[38;2;133;133;133m  10 \x1b[0m"));
    }

    #[test]
    fn with_background() {
        let registry = get_registry();
        let options = HighlightOptions::new(LANGUAGE_ID, DARK_THEME_NAME);
        let highlighted = registry.highlight("true", &options).unwrap();

        let renderer = TerminalRenderer {
            with_background: true,
        };
        let ansi = renderer.render(&highlighted, &RenderOptions::default());
        assert_eq!(ansi, "\x1b[38;2;86;182;194;48;2;30;30;30;1mtrue\x1b[0m");
    }
}
