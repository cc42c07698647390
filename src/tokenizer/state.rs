use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grammars::{CompiledGrammar, StateId, Transition};

/// What a line hands over to the next one.
///
/// It is a stack of grammar states with the root state at the bottom: the
/// root is never popped. For Koala the only reachable states are `root` and
/// `root > string`, the latter meaning a string literal is still open at the
/// end of the line.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LexerState {
    /// States entered on top of the root, innermost last
    nested: Vec<u16>,
}

impl LexerState {
    /// The state every document starts in.
    pub const fn root() -> Self {
        Self { nested: Vec::new() }
    }

    /// The state reached by entering `state_name` from the root.
    /// Returns `None` if the grammar does not have such a state.
    pub fn entered(grammar: &CompiledGrammar, state_name: &str) -> Option<Self> {
        let id = grammar.state_id(state_name)?;
        let mut state = Self::root();
        state.push(id);
        Some(state)
    }

    pub fn is_root(&self) -> bool {
        self.nested.is_empty()
    }

    /// The state whose rules are active
    pub fn current(&self) -> StateId {
        self.nested.last().map_or(StateId::ROOT, |id| StateId(*id))
    }

    /// Enters a nested state. Re-entering the root is a no-op.
    pub fn push(&mut self, id: StateId) {
        if id != StateId::ROOT {
            self.nested.push(id.0);
        }
    }

    /// Exits the current state, getting back to the previous one.
    /// Popping the root does nothing.
    pub fn pop(&mut self) -> Option<StateId> {
        self.nested.pop().map(StateId)
    }

    /// Drops every state from the first one `grammar` doesn't know about, so a
    /// state persisted with another grammar falls back to its known outer states.
    pub(crate) fn discard_unknown(&mut self, grammar: &CompiledGrammar) {
        if let Some(idx) = self
            .nested
            .iter()
            .position(|id| !grammar.has_state(StateId(*id)))
        {
            #[cfg(feature = "debug")]
            log::debug!("[discard_unknown] dropping unknown states {:?}", &self.nested[idx..]);
            self.nested.truncate(idx);
        }
    }

    pub(crate) fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Push(id) => self.push(id),
            Transition::Pop => {
                self.pop();
            }
        }
    }

    /// Readable form of the stack like `root > string`.
    /// Ids the grammar doesn't have show as `<unknown 7>`.
    pub fn describe(&self, grammar: &CompiledGrammar) -> String {
        let mut out = grammar
            .state_name(StateId::ROOT)
            .unwrap_or(crate::grammars::ROOT_STATE)
            .to_owned();
        for id in &self.nested {
            out.push_str(" > ");
            match grammar.state_name(StateId(*id)) {
                Some(name) => out.push_str(name),
                None => out.push_str(&format!("<unknown {id}>")),
            }
        }
        out
    }
}

impl Default for LexerState {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for LexerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LexerState(0")?;
        for id in &self.nested {
            write!(f, " > {id}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_pops_below_root() {
        let mut state = LexerState::root();
        assert_eq!(state.pop(), None);
        assert!(state.is_root());
        assert_eq!(state.current(), StateId::ROOT);

        state.push(StateId(1));
        assert_eq!(state.current(), StateId(1));
        assert_eq!(state.pop(), Some(StateId(1)));
        assert_eq!(state.pop(), None);
        assert_eq!(state, LexerState::root());
    }

    #[test]
    fn pushing_root_is_a_noop() {
        let mut state = LexerState::root();
        state.push(StateId::ROOT);
        assert!(state.is_root());
        assert_eq!(state.current(), StateId::ROOT);
    }
}
