use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::grammars::{CompiledGrammar, TokenCategory};

mod state;

pub use state::LexerState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Byte span within the line (start inclusive, end exclusive, 0-based)
    pub span: Range<usize>,
    /// `None` for text no rule classified: whitespace, operators, `;`...
    pub category: Option<TokenCategory>,
}

/// The tokens of one line and the state to start the next line with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineScanResult {
    pub tokens: Vec<Token>,
    pub state: LexerState,
}

/// Small wrapper so we only produce valid tokens: non-empty, contiguous and
/// covering the whole line once finished.
#[derive(Debug, Clone, Default)]
struct TokenAccumulator {
    tokens: Vec<Token>,
    /// Position up to which tokens have been generated
    /// (start of next token to be produced)
    last_end_pos: usize,
}

impl TokenAccumulator {
    fn produce(&mut self, end_pos: usize, category: Option<TokenCategory>) {
        // Skip empty tokens
        if self.last_end_pos >= end_pos {
            return;
        }

        #[cfg(feature = "debug")]
        log::debug!(
            "[produce]: [{}..{end_pos}] {}",
            self.last_end_pos,
            category.map_or("unclassified", TokenCategory::name)
        );

        self.tokens.push(Token {
            span: self.last_end_pos..end_pos,
            category,
        });
        self.last_end_pos = end_pos;
    }

    /// Emits the unclassified text skipped since the last token, if any
    fn flush_unclassified(&mut self, pos: usize) {
        self.produce(pos, None);
    }
}

/// Runs a compiled grammar over text, one line at a time.
///
/// The tokenizer holds no state of its own: everything that flows from a line
/// to the next is in the [`LexerState`] given to and returned by
/// [`Tokenizer::scan_line`].
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'g> {
    grammar: &'g CompiledGrammar,
}

impl<'g> Tokenizer<'g> {
    pub fn new(grammar: &'g CompiledGrammar) -> Self {
        Self { grammar }
    }

    /// Classifies a single line (without its line terminator) starting from
    /// `entry`, the exit state of the previous line.
    ///
    /// States `entry` names that the grammar doesn't have are dropped, scanning
    /// resumes in the innermost known one.
    pub fn scan_line(&self, line: &str, entry: &LexerState) -> LineScanResult {
        let mut acc = TokenAccumulator::default();
        let mut state = entry.clone();
        state.discard_unknown(self.grammar);
        let mut pos = 0;

        while pos < line.len() {
            #[cfg(feature = "debug")]
            log::trace!("[scan_line] Scanning {pos}: |{:?}|", &line[pos..]);

            let matched = self
                .grammar
                .states
                .get(state.current().as_index())
                .and_then(|current| current.match_at(line, pos));

            match matched {
                // A match has to consume something, otherwise we'd never move
                Some((rule, m)) if m.end > pos => {
                    #[cfg(feature = "debug")]
                    log::debug!(
                        "[scan_line] Matched {:?} from {} to {} => {:?}",
                        rule.pattern,
                        m.start,
                        m.end,
                        &line[m.start..m.end]
                    );
                    acc.flush_unclassified(m.start);
                    acc.produce(m.end, Some(rule.category));
                    if let Some(transition) = rule.transition {
                        state.apply(transition);
                    }
                    pos = m.end;
                }
                _ => {
                    // Unknown character: skip it, it will end up in an unclassified token
                    pos += line[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        acc.flush_unclassified(line.len());

        LineScanResult {
            tokens: acc.tokens,
            state,
        }
    }

    /// Tokenizes a whole document starting from the root state.
    /// The text is expected to be normalized to `\n` line endings.
    pub fn tokenize_string(&self, text: &str) -> Vec<Vec<Token>> {
        if text.is_empty() {
            return vec![];
        }

        let mut state = LexerState::root();
        let mut lines_tokens = Vec::new();
        for line in text.split('\n') {
            let result = self.scan_line(line, &state);
            lines_tokens.push(result.tokens);
            state = result.state;
        }
        lines_tokens
    }
}
