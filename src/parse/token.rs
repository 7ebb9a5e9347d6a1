use crate::Code;
use logos::{Lexer, Logos};

fn number(lex: &mut Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

fn code(lex: &mut Lexer<Token>) -> Option<Code> {
    lex.slice().chars().next().map(|c| c.to_ascii_lowercase())
}

/// Classification of a whitespace-separated word of a transaction line.
///
/// Longest match decides, so `100x` and `gg` are [`Token::Other`] while `100`
/// and `G` are a number and a code.
#[derive(Debug, PartialEq, Eq, Logos, Clone, Copy)]
pub enum Token {
    #[regex(r"\s+")]
    WhiteSpace,

    #[regex(r"-?[0-9]+", number, priority = 10)]
    Number(i64),

    #[regex(r"[a-zA-Z]", code, priority = 10)]
    Code(Code),

    #[regex(r"[^\s]+")]
    Other,

    #[error]
    Error,
}

