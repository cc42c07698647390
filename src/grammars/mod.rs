mod category;
mod compiled;
mod pattern_set;
mod raw;

pub use category::TokenCategory;
pub use compiled::{CompiledGrammar, CompiledRule, CompiledState, RuleId, StateId, Transition};
pub use pattern_set::{PatternSet, PatternSetMatch};
pub use raw::{POP_TRANSITION, ROOT_STATE, RawGrammar, RawRule};
