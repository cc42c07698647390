use std::fmt;

use crate::registry::HighlightedCode;
use crate::renderers::RenderOptions;
use crate::themes::ChromeColor;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
/// A renderer that will output proper HTML code, styled inline with the theme colors.
/// Use [`KOALA_CSS`](crate::KOALA_CSS) for the layout of lines and line numbers.
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Renders the given highlighted code to an HTML string, escaping characters.
    pub fn render(&self, highlighted: &HighlightedCode, options: &RenderOptions) -> String {
        let theme = highlighted.theme;
        let line_number_css = theme
            .chrome_color(ChromeColor::LineNumber)
            .as_css_color_property();

        let mut lines = Vec::with_capacity(highlighted.tokens.len());
        for (idx, line_tokens) in highlighted.tokens.iter().enumerate() {
            let line_num = idx + 1; // 1-indexed
            if options.is_hidden(line_num) {
                continue;
            }

            let line_content: String = line_tokens
                .iter()
                .map(|tok| tok.as_html(&theme.default_style))
                .collect();

            // Line number (uses original source line number)
            let line_number_html = if options.show_line_numbers {
                let display_line_num = options.line_number_start + (idx as isize);
                format!(
                    r#"<span class="koala-ln" style="{line_number_css}">{display_line_num}</span>"#
                )
            } else {
                String::new()
            };

            lines.push(format!(
                r#"<span class="koala-l">{line_number_html}{line_content}</span>"#
            ));
        }
        let lines = lines.join("");

        let fg = theme.default_style.foreground.as_css_color_property();
        let bg = theme.default_style.background.as_css_bg_color_property();
        format!(
            r#"<pre class="koala" style="{fg} {bg}"><code data-lang="{}" data-theme="{}">{lines}</code></pre>"#,
            HtmlEscaped(highlighted.language),
            HtmlEscaped(&theme.name),
        )
    }
}

// From syntect
pub(crate) struct HtmlEscaped<'a>(pub &'a str);
impl fmt::Display for HtmlEscaped<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(s) = *self;
        let mut last = 0;
        for (i, ch) in s.bytes().enumerate() {
            let escaped = match ch {
                b'>' => "&gt;",
                b'<' => "&lt;",
                b'&' => "&amp;",
                b'\'' => "&#39;",
                b'"' => "&quot;",
                _ => continue,
            };
            fmt.write_str(&s[last..i])?;
            fmt.write_str(escaped)?;
            last = i + 1;
        }

        if last < s.len() {
            fmt.write_str(&s[last..])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koala::{DARK_THEME_NAME, LANGUAGE_ID, LIGHT_THEME_NAME};
    use crate::registry::HighlightOptions;
    use crate::test_utils::get_registry;

    #[test]
    fn escapes() {
        assert_eq!(
            HtmlEscaped(r#"give("<b>" & 'x')"#).to_string(),
            "give(&quot;&lt;b&gt;&quot; &amp; &#39;x&#39;)"
        );
        assert_eq!(HtmlEscaped("plain é").to_string(), "plain é");
    }

    #[test]
    fn render_with_line_numbers() {
        let registry = get_registry();
        let options = HighlightOptions::new(LANGUAGE_ID, DARK_THEME_NAME);
        let highlighted = registry.highlight("x = 5;\ngive(x);", &options).unwrap();
        let render_options = RenderOptions {
            show_line_numbers: true,
            ..Default::default()
        };

        let html = HtmlRenderer.render(&highlighted, &render_options);
        insta::assert_snapshot!(html, @r#"<pre class="koala" style="color: #D4D4D4; background-color: #1E1E1E;"><code data-lang="koala" data-theme="koalaTheme"><span class="koala-l"><span class="koala-ln" style="color: #858585;">1</span><span style="color: #FFFFFF;">x</span><span> = </span><span style="color: #D19A66;">5</span><span>;</span></span><span class="koala-l"><span class="koala-ln" style="color: #858585;">2</span><span style="color: #FF9D00;font-weight: bold;">give</span><span>(</span><span style="color: #FFFFFF;">x</span><span>);</span></span></code></pre>"#);
    }

    #[test]
    fn hidden_lines_keep_numbering() {
        let registry = get_registry();
        let options = HighlightOptions::new(LANGUAGE_ID, LIGHT_THEME_NAME);
        let highlighted = registry
            .highlight("x = 5;\n# hidden\ngive(x);", &options)
            .unwrap();
        let render_options = RenderOptions {
            show_line_numbers: true,
            line_number_start: 10,
            hide_lines: vec![2..=2],
        };

        let html = HtmlRenderer.render(&highlighted, &render_options);
        assert!(!html.contains("hidden"));
        assert!(html.contains(r#"style="color: #237893;">10</span>"#));
        assert!(html.contains(r#"style="color: #237893;">12</span>"#));
        assert!(!html.contains(">11</span>"));
        // no token rules in the light variant: everything merges into one span per line
        assert!(html.contains("<span>give(x);</span>"));
    }
}
