use std::ops::RangeInclusive;

pub mod html;
pub mod terminal;

/// Options that apply to all renderers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_line_numbers: bool,
    /// Number displayed for the first line
    pub line_number_start: isize,
    /// 1-indexed line ranges not rendered at all. Line numbers still count them.
    pub hide_lines: Vec<RangeInclusive<usize>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            line_number_start: 1,
            hide_lines: Vec::new(),
        }
    }
}

impl RenderOptions {
    pub(crate) fn is_hidden(&self, line_num: usize) -> bool {
        self.hide_lines.iter().any(|r| r.contains(&line_num))
    }

    /// Number of characters needed by the widest line number
    pub(crate) fn line_number_width(&self, line_count: usize) -> usize {
        let first = self.line_number_start;
        let last = first + line_count.saturating_sub(1) as isize;
        first.to_string().len().max(last.to_string().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_number_width() {
        let options = RenderOptions::default();
        assert_eq!(options.line_number_width(0), 1);
        assert_eq!(options.line_number_width(9), 1);
        assert_eq!(options.line_number_width(10), 2);

        let options = RenderOptions {
            line_number_start: -5,
            ..Default::default()
        };
        assert_eq!(options.line_number_width(3), 2);
    }
}
