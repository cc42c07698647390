use std::fmt::{Debug, Formatter};

use onig::{RegSet, RegexOptions, SearchOptions};

use crate::grammars::RuleId;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PatternSetMatch {
    pub rule_id: RuleId,
    pub start: usize,
    pub end: usize,
}

/// All the patterns of one lexer state compiled into a single onig RegSet.
///
/// Every pattern is anchored with `\G` so a match can only start at the
/// search position. Among the patterns matching there, onig reports the one
/// declared first, which is exactly the rule precedence of a grammar.
pub struct PatternSet {
    rule_ids: Vec<RuleId>,
    regset: Option<RegSet>,
}

impl PatternSet {
    /// Anchors a rule pattern at the search position.
    pub(crate) fn anchor(pattern: &str) -> String {
        format!(r"\G(?:{pattern})")
    }

    pub fn new(items: Vec<(RuleId, String)>) -> Result<Self, String> {
        if items.is_empty() {
            return Ok(Self {
                rule_ids: Vec::new(),
                regset: None,
            });
        }

        let (rule_ids, patterns): (Vec<_>, Vec<_>) = items
            .into_iter()
            .map(|(id, pat)| (id, Self::anchor(&pat)))
            .unzip();
        let pattern_strs: Vec<&str> = patterns.iter().map(|s| s.as_str()).collect();

        let regset = RegSet::with_options(&pattern_strs, RegexOptions::REGEX_OPTION_NONE)
            .map_err(|e| {
                format!(
                    "Failed to compile pattern set with {} patterns: {:?}",
                    pattern_strs.len(),
                    e
                )
            })?;

        Ok(Self {
            rule_ids,
            regset: Some(regset),
        })
    }

    /// Finds the first rule matching exactly at `pos`.
    pub(crate) fn find_at(&self, text: &str, pos: usize) -> Option<PatternSetMatch> {
        let regset = self.regset.as_ref()?;

        // The full line is given so `\b` and lookarounds see the text before `pos`
        let (pattern_index, captures) = regset.captures_with_options(
            text,
            pos,
            text.len(),
            onig::RegSetLead::Position,
            SearchOptions::SEARCH_OPTION_NONE,
        )?;
        let (start, end) = captures.pos(0)?;
        if start != pos {
            return None;
        }

        Some(PatternSetMatch {
            rule_id: self.rule_ids[pattern_index],
            start,
            end,
        })
    }
}

impl Debug for PatternSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PatternSet({} rules)", self.rule_ids.len())
    }
}
