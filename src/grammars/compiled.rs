use std::collections::HashMap;

use crate::error::{Error, KoalaResult};
use crate::grammars::pattern_set::{PatternSet, PatternSetMatch};
use crate::grammars::raw::{POP_TRANSITION, ROOT_STATE, RawGrammar};
use crate::grammars::TokenCategory;

/// Index of a state in [`CompiledGrammar::states`]. The root state is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StateId(pub u16);

impl StateId {
    pub const ROOT: StateId = StateId(0);

    #[inline]
    pub fn as_index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a rule inside its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Push(StateId),
    Pop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub pattern: String,
    pub category: TokenCategory,
    pub transition: Option<Transition>,
}

#[derive(Debug)]
pub struct CompiledState {
    pub name: String,
    pub rules: Vec<CompiledRule>,
    pub patterns: PatternSet,
}

impl CompiledState {
    /// Returns the rule matching at `pos`, honouring declaration order.
    pub(crate) fn match_at(&self, line: &str, pos: usize) -> Option<(&CompiledRule, PatternSetMatch)> {
        let m = self.patterns.find_at(line, pos)?;
        Some((&self.rules[m.rule_id.0 as usize], m))
    }
}

/// A grammar whose rules are checked and compiled, one regex set per state.
#[derive(Debug)]
pub struct CompiledGrammar {
    pub name: String,
    pub states: Vec<CompiledState>,
    state_id_by_name: HashMap<String, StateId>,
}

impl CompiledGrammar {
    pub fn from_raw_grammar(raw: RawGrammar) -> KoalaResult<Self> {
        if !raw.tokenizer.contains_key(ROOT_STATE) {
            return Err(Error::MissingRootState(raw.name));
        }

        // root first so it gets id 0, the rest in name order
        let mut names: Vec<&String> = raw.tokenizer.keys().collect();
        names.sort_by_key(|name| name.as_str() != ROOT_STATE);
        let state_id_by_name: HashMap<String, StateId> = names
            .iter()
            .enumerate()
            .map(|(i, name)| ((*name).clone(), StateId(i as u16)))
            .collect();

        let mut states = Vec::with_capacity(names.len());
        for name in names {
            let raw_rules = &raw.tokenizer[name];
            let mut rules = Vec::with_capacity(raw_rules.len());

            for raw_rule in raw_rules {
                if let Err(e) = onig::Regex::new(&PatternSet::anchor(&raw_rule.regex)) {
                    return Err(Error::InvalidPattern {
                        state: name.clone(),
                        pattern: raw_rule.regex.clone(),
                        reason: e.to_string(),
                    });
                }

                let transition = match raw_rule.next.as_deref() {
                    None => None,
                    Some(POP_TRANSITION) => Some(Transition::Pop),
                    Some(target) => {
                        let target_name = target.trim_start_matches('@');
                        let id = state_id_by_name.get(target_name).ok_or_else(|| {
                            Error::UnknownState {
                                state: name.clone(),
                                target: target.to_owned(),
                            }
                        })?;
                        Some(Transition::Push(*id))
                    }
                };

                rules.push(CompiledRule {
                    pattern: raw_rule.regex.clone(),
                    category: raw_rule.token,
                    transition,
                });
            }

            let patterns = PatternSet::new(
                rules
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (RuleId(i as u16), r.pattern.clone()))
                    .collect(),
            )
            .map_err(|reason| Error::InvalidPattern {
                state: name.clone(),
                pattern: String::new(),
                reason,
            })?;

            states.push(CompiledState {
                name: name.clone(),
                rules,
                patterns,
            });
        }

        Ok(Self {
            name: raw.name,
            states,
            state_id_by_name,
        })
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_id_by_name.get(name).copied()
    }

    /// `None` for an id this grammar does not have, eg a state saved with another grammar
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.states.get(id.as_index()).map(|s| s.name.as_str())
    }

    pub(crate) fn has_state(&self, id: StateId) -> bool {
        id.as_index() < self.states.len()
    }
}
