use super::Token;
use crate::Source;
use logos::{Lexer as LogosLexer, Logos};

/// A whitespace-separated word of a transaction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'source> {
    /// Either [`Token::Number`], [`Token::Code`], or [`Token::Other`].
    pub token: Token,
    /// Index of the word in the line, the unit of distance for pairing.
    pub position: usize,
    pub text: &'source str,
    pub src: Source,
}

/// Splits a transaction line into positioned [`Word`]s.
pub struct Lexer<'source> {
    llex: LogosLexer<'source, Token>,
    col: usize,
    position: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(src: &'source str) -> Self {
        Lexer {
            llex: Token::lexer(src),
            col: 1,
            position: 0,
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Word<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.llex.next()?;
            let text = self.llex.slice();
            let start = self.col;
            self.col += text.chars().count();
            let token = match token {
                Token::WhiteSpace => continue,
                // only a number too large for an i64 fails to lex
                Token::Error => Token::Other,
                other => other,
            };
            let word = Word {
                token,
                position: self.position,
                text,
                src: Source {
                    start,
                    end: self.col,
                },
            };
            self.position += 1;
            return Some(word);
        }
    }
}

/// Splits `line` on runs of whitespace and classifies every word.
pub fn tokenize(line: &str) -> Vec<Word<'_>> {
    Lexer::new(line).collect()
}
