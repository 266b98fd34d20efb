//! Line-oriented lexer for template sources using logos
//!
//! The directive language is line-structured: every token covers exactly one
//! physical line (or a bare newline), so the lexer position is always at a
//! line start and `@` / `#` classification needs no anchors.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A line opening with `@` in column 0, captured whole (name and
    /// argument string are split later by the grammar).
    #[regex(r"@[^\n]*", |lex| lex.slice().to_string(), priority = 4)]
    Directive(String),

    /// A line whose first non-blank character is `#`. Only a comment outside
    /// a content block; inside a block it is ordinary content.
    #[regex(r"[ \t]*#[^\n]*", |lex| lex.slice().to_string(), priority = 3)]
    Comment(String),

    /// Any other non-empty line, captured verbatim.
    #[regex(r"[^\n]+", |lex| lex.slice().to_string(), priority = 1)]
    Text(String),

    #[token("\n")]
    Newline,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
