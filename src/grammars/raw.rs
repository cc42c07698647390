use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KoalaResult;
use crate::grammars::TokenCategory;
use crate::grammars::compiled::CompiledGrammar;

/// The state every grammar starts in
pub const ROOT_STATE: &str = "root";
/// Transition target returning to the state below the current one
pub const POP_TRANSITION: &str = "@pop";

/// A single rule as it appears in a grammar description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    pub regex: String,
    pub token: TokenCategory,
    /// `@<state>` to enter a state, `@pop` to leave the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl RawRule {
    pub fn new(regex: &str, token: TokenCategory) -> Self {
        Self {
            regex: regex.to_owned(),
            token,
            next: None,
        }
    }

    pub fn with_next(mut self, next: &str) -> Self {
        self.next = Some(next.to_owned());
        self
    }
}

/// Grammar description in the form handed to an editor: a name and, for each
/// named state, the rules in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawGrammar {
    pub name: String,
    pub tokenizer: BTreeMap<String, Vec<RawRule>>,
}

impl RawGrammar {
    pub fn load_from_file(path: impl AsRef<Path>) -> KoalaResult<Self> {
        let file = File::open(path)?;
        let grammar = serde_json::from_reader(file)?;
        Ok(grammar)
    }

    pub fn load_from_str(content: &str) -> KoalaResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> KoalaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A grammar with an empty root state: everything stays unclassified.
    pub fn plain(name: &str) -> Self {
        let mut tokenizer = BTreeMap::new();
        tokenizer.insert(ROOT_STATE.to_owned(), Vec::new());
        Self {
            name: name.to_owned(),
            tokenizer,
        }
    }

    /// Compile this raw grammar into regex sets ready for tokenization
    pub fn compile(self) -> KoalaResult<CompiledGrammar> {
        CompiledGrammar::from_raw_grammar(self)
    }
}
