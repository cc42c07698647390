use std::fmt;

use serde::{Deserialize, Serialize};

/// What a token is, as far as highlighting is concerned.
///
/// In grammar and theme descriptions a category is written as its dotted
/// scope name (see [`TokenCategory::scope`]), brackets excepted. Theme rules match scopes by
/// dotted prefix so `string.quote` is styled by a `string` rule unless a more
/// specific rule exists.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug)]
pub enum TokenCategory {
    #[serde(rename = "keyword")]
    Keyword,
    #[serde(rename = "constant.boolean")]
    BooleanLiteral,
    #[serde(rename = "number")]
    NumberLiteral,
    #[serde(rename = "string")]
    StringLiteral,
    #[serde(rename = "string.escape")]
    StringEscape,
    #[serde(rename = "string.invalid")]
    InvalidString,
    /// The `"` opening or closing a string literal
    #[serde(rename = "string.quote")]
    StringQuote,
    #[serde(rename = "function")]
    FunctionName,
    #[serde(rename = "identifier")]
    Identifier,
    /// Written `@brackets` in descriptions, which the editor expands to
    /// `delimiter.curly`, `delimiter.parenthesis` or `delimiter.square`
    #[serde(rename = "@brackets", alias = "delimiter.bracket")]
    Bracket,
    #[serde(rename = "comment")]
    Comment,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 11] = [
        TokenCategory::Keyword,
        TokenCategory::BooleanLiteral,
        TokenCategory::NumberLiteral,
        TokenCategory::StringLiteral,
        TokenCategory::StringEscape,
        TokenCategory::InvalidString,
        TokenCategory::StringQuote,
        TokenCategory::FunctionName,
        TokenCategory::Identifier,
        TokenCategory::Bracket,
        TokenCategory::Comment,
    ];

    /// The dotted scope name used in grammar and theme descriptions.
    pub const fn scope(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::BooleanLiteral => "constant.boolean",
            TokenCategory::NumberLiteral => "number",
            TokenCategory::StringLiteral => "string",
            TokenCategory::StringEscape => "string.escape",
            TokenCategory::InvalidString => "string.invalid",
            TokenCategory::StringQuote => "string.quote",
            TokenCategory::FunctionName => "function",
            TokenCategory::Identifier => "identifier",
            TokenCategory::Bracket => "delimiter.bracket",
            TokenCategory::Comment => "comment",
        }
    }

    /// The human name of the category, eg `boolean-literal`.
    pub const fn name(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::BooleanLiteral => "boolean-literal",
            TokenCategory::NumberLiteral => "number-literal",
            TokenCategory::StringLiteral => "string-literal",
            TokenCategory::StringEscape => "string-escape",
            TokenCategory::InvalidString => "invalid-string",
            TokenCategory::StringQuote => "string-quote",
            TokenCategory::FunctionName => "function-name",
            TokenCategory::Identifier => "identifier",
            TokenCategory::Bracket => "bracket",
            TokenCategory::Comment => "comment",
        }
    }

    /// Every prefix of the scope, shortest first.
    /// `string.invalid` gives `["string", "string.invalid"]`.
    pub(crate) fn scope_prefixes(self) -> impl Iterator<Item = &'static str> {
        let scope = self.scope();
        scope
            .match_indices('.')
            .map(move |(idx, _)| &scope[..idx])
            .chain(std::iter::once(scope))
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_prefixes_go_from_shortest_to_longest() {
        let prefixes: Vec<_> = TokenCategory::InvalidString.scope_prefixes().collect();
        assert_eq!(prefixes, vec!["string", "string.invalid"]);

        let prefixes: Vec<_> = TokenCategory::Keyword.scope_prefixes().collect();
        assert_eq!(prefixes, vec!["keyword"]);
    }

    #[test]
    fn serializes_as_scope_name() {
        for category in TokenCategory::ALL {
            if category == TokenCategory::Bracket {
                continue;
            }
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.scope()));
        }
    }

    #[test]
    fn brackets_use_the_editor_shorthand() {
        let json = serde_json::to_string(&TokenCategory::Bracket).unwrap();
        assert_eq!(json, "\"@brackets\"");
        for name in ["\"@brackets\"", "\"delimiter.bracket\""] {
            let bracket: TokenCategory = serde_json::from_str(name).unwrap();
            assert_eq!(bracket, TokenCategory::Bracket);
        }
    }
}
