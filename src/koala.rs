//! The Koala language: its rule table, its themes and how to hand both to a
//! [`Registry`].

use std::collections::BTreeMap;

use crate::error::KoalaResult;
use crate::grammars::{POP_TRANSITION, ROOT_STATE, RawGrammar, RawRule, TokenCategory};
use crate::registry::Registry;
use crate::themes::{ChromeColor, RawTheme, ThemeRule};

/// Language identifier Koala is registered under
pub const LANGUAGE_ID: &str = "koala";
/// The dark palette
pub const DARK_THEME_NAME: &str = "koalaTheme";
/// Light variant, default colors of the light base and no token rules
pub const LIGHT_THEME_NAME: &str = "koala-light";

const STRING_STATE: &str = "string";

/// Word boundaries on ASCII identifier characters, `\b` in onig counts `é` as a word character
const WORD_START: &str = r"(?<![a-zA-Z0-9_])";
const WORD_END: &str = r"(?![a-zA-Z0-9_])";

pub const KEYWORDS: [&str; 8] = [
    "give",
    "take",
    "this",
    "otherwise",
    "iter",
    "iter2",
    "func",
    "return",
];

/// Code shown when opening the playground
pub const SAMPLE: &str = r#"x = 5;
give(x);
z = x + 7;
give(z);
give("Hello from Koala!");"#;

fn ascii_word(alternatives: &str) -> String {
    format!("{WORD_START}({alternatives}){WORD_END}")
}

/// The Koala rule table. Order is precedence: the first rule matching at the
/// current position wins, so a keyword used as a call target stays a keyword.
pub fn grammar() -> RawGrammar {
    use TokenCategory::*;

    let root = vec![
        RawRule::new(&ascii_word(&KEYWORDS.join("|")), Keyword),
        RawRule::new(&ascii_word("true|false"), BooleanLiteral),
        RawRule::new(r"[0-9]+", NumberLiteral),
        // a string with no closing quote on this line
        RawRule::new(r#""([^"\\]|\\.)*$"#, InvalidString),
        RawRule::new(r#"""#, StringQuote).with_next(&format!("@{STRING_STATE}")),
        RawRule::new(r"[a-zA-Z_][a-zA-Z0-9_]*(?=\s*\()", FunctionName),
        RawRule::new(r"[a-zA-Z_][a-zA-Z0-9_]*", Identifier),
        RawRule::new(r"[{}()\[\]]", Bracket),
        RawRule::new(r"#.*$", Comment),
    ];
    let string = vec![
        RawRule::new(r#"[^\\"]+"#, StringLiteral),
        RawRule::new(r"\\.", StringEscape),
        RawRule::new(r#"""#, StringQuote).with_next(POP_TRANSITION),
    ];

    let mut tokenizer = BTreeMap::new();
    tokenizer.insert(ROOT_STATE.to_owned(), root);
    tokenizer.insert(STRING_STATE.to_owned(), string);

    RawGrammar {
        name: LANGUAGE_ID.to_owned(),
        tokenizer,
    }
}

pub fn dark_theme() -> RawTheme {
    use TokenCategory::*;

    let rules = vec![
        ThemeRule::new(Keyword.scope(), Some("ff9d00"), Some("bold")),
        ThemeRule::new(BooleanLiteral.scope(), Some("56b6c2"), Some("bold")),
        ThemeRule::new(NumberLiteral.scope(), Some("d19a66"), None),
        ThemeRule::new(StringLiteral.scope(), Some("98c379"), None),
        ThemeRule::new(StringEscape.scope(), Some("e06c75"), None),
        ThemeRule::new(Comment.scope(), Some("5c6370"), Some("italic")),
        ThemeRule::new(FunctionName.scope(), Some("61afef"), None),
        ThemeRule::new(Identifier.scope(), Some("ffffff"), None),
    ];

    let colors = [
        (ChromeColor::Background, "#1e1e1e"),
        (ChromeColor::LineNumber, "#858585"),
        (ChromeColor::Cursor, "#ffffff"),
        (ChromeColor::BracketMatchBorder, "#ffd700"),
    ]
    .into_iter()
    .map(|(c, v)| (c.editor_key().to_owned(), v.to_owned()))
    .collect();

    RawTheme {
        name: DARK_THEME_NAME.to_owned(),
        base: "vs-dark".to_owned(),
        inherit: true,
        rules,
        colors,
    }
}

pub fn light_theme() -> RawTheme {
    RawTheme {
        name: LIGHT_THEME_NAME.to_owned(),
        base: "vs".to_owned(),
        inherit: true,
        rules: Vec::new(),
        colors: BTreeMap::new(),
    }
}

/// Registers the Koala language and both of its themes.
///
/// Registering again replaces the previous entries, so this can be called
/// any number of times.
pub fn register(registry: &mut Registry) -> KoalaResult<()> {
    registry.register_language(grammar())?;
    registry.register_theme(dark_theme())?;
    registry.register_theme(light_theme())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::{Color, FontStyle, ThemeKind};
    use crate::tokenizer::LexerState;

    fn color(hex: &str) -> Color {
        Color::from_hex(hex).unwrap()
    }

    #[test]
    fn root_rules_are_in_precedence_order() {
        let grammar = grammar();
        let categories: Vec<_> = grammar.tokenizer[ROOT_STATE]
            .iter()
            .map(|r| r.token)
            .collect();
        assert_eq!(
            categories,
            vec![
                TokenCategory::Keyword,
                TokenCategory::BooleanLiteral,
                TokenCategory::NumberLiteral,
                TokenCategory::InvalidString,
                TokenCategory::StringQuote,
                TokenCategory::FunctionName,
                TokenCategory::Identifier,
                TokenCategory::Bracket,
                TokenCategory::Comment,
            ]
        );
        assert_eq!(
            grammar.tokenizer[ROOT_STATE][0].regex,
            r"(?<![a-zA-Z0-9_])(give|take|this|otherwise|iter|iter2|func|return)(?![a-zA-Z0-9_])"
        );
    }

    #[test]
    fn description_survives_json() {
        let json = grammar().to_json().unwrap();
        assert!(json.contains(r#""next": "@string""#));
        assert!(json.contains(r#""next": "@pop""#));
        assert!(json.contains(r#""token": "@brackets""#));
        assert_eq!(RawGrammar::load_from_str(&json).unwrap(), grammar());
    }

    #[test]
    fn dark_palette() {
        let theme = dark_theme().compile().unwrap();
        assert_eq!(theme.kind, ThemeKind::Dark);

        let keyword = theme.style_for(TokenCategory::Keyword);
        assert_eq!(keyword.foreground, color("#ff9d00"));
        assert_eq!(keyword.font_style, FontStyle::BOLD);

        let boolean = theme.style_for(TokenCategory::BooleanLiteral);
        assert_eq!(boolean.foreground, color("#56b6c2"));
        assert_eq!(boolean.font_style, FontStyle::BOLD);

        let comment = theme.style_for(TokenCategory::Comment);
        assert_eq!(comment.foreground, color("#5c6370"));
        assert_eq!(comment.font_style, FontStyle::ITALIC);

        assert_eq!(
            theme.style_for(TokenCategory::NumberLiteral).foreground,
            color("#d19a66")
        );
        assert_eq!(
            theme.style_for(TokenCategory::StringEscape).foreground,
            color("#e06c75")
        );
        assert_eq!(
            theme.style_for(TokenCategory::FunctionName).foreground,
            color("#61afef")
        );
        assert_eq!(
            theme.style_for(TokenCategory::Identifier).foreground,
            color("#ffffff")
        );

        // quotes and unterminated strings are styled by the `string` rule
        for category in [
            TokenCategory::StringLiteral,
            TokenCategory::StringQuote,
            TokenCategory::InvalidString,
        ] {
            assert_eq!(theme.style_for(category).foreground, color("#98c379"));
        }

        // no rule for brackets
        assert_eq!(theme.style_for(TokenCategory::Bracket), theme.default_style);
        assert_eq!(theme.default_style.foreground, color("#D4D4D4"));
    }

    #[test]
    fn dark_chrome_colors() {
        let theme = dark_theme().compile().unwrap();
        assert_eq!(theme.chrome_color(ChromeColor::Background), color("#1e1e1e"));
        assert_eq!(theme.chrome_color(ChromeColor::LineNumber), color("#858585"));
        assert_eq!(theme.chrome_color(ChromeColor::Cursor), color("#ffffff"));
        assert_eq!(
            theme.chrome_color(ChromeColor::BracketMatchBorder),
            color("#ffd700")
        );
        assert_eq!(theme.default_style.background, color("#1e1e1e"));
    }

    #[test]
    fn light_variant_uses_defaults() {
        let theme = light_theme().compile().unwrap();
        assert_eq!(theme.kind, ThemeKind::Light);
        for category in TokenCategory::ALL {
            assert_eq!(theme.style_for(category), theme.default_style);
        }
        assert_eq!(theme.chrome_color(ChromeColor::Background), color("#FFFFFE"));
    }

    #[test]
    fn registering_twice_is_the_same_as_once() {
        let mut once = Registry::default();
        register(&mut once).unwrap();
        let mut twice = Registry::default();
        register(&mut twice).unwrap();
        register(&mut twice).unwrap();

        assert_eq!(twice.language_names(), vec![LANGUAGE_ID]);
        assert_eq!(twice.theme_names(), vec![LIGHT_THEME_NAME, DARK_THEME_NAME]);
        assert_eq!(once.language_names(), twice.language_names());
        assert_eq!(once.theme_names(), twice.theme_names());

        let mut state_once = LexerState::root();
        let mut state_twice = LexerState::root();
        for line in ["x = \"a\\", "b\" give(1) # c", "func f(y) { return y; }"] {
            let a = once.scan_line(LANGUAGE_ID, line, &state_once).unwrap();
            let b = twice.scan_line(LANGUAGE_ID, line, &state_twice).unwrap();
            assert_eq!(a, b);
            state_once = a.state;
            state_twice = b.state;
        }
    }

    #[test]
    fn sample_has_no_invalid_tokens() {
        let mut registry = Registry::default();
        register(&mut registry).unwrap();
        let tokens = registry.tokenize(LANGUAGE_ID, SAMPLE).unwrap();
        assert_eq!(tokens.len(), 5);
        assert!(
            tokens
                .iter()
                .flatten()
                .all(|t| t.category != Some(TokenCategory::InvalidString))
        );
    }
}
