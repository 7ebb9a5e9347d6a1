mod lexer;
mod parser;
pub mod resolver;
mod token;

pub use lexer::{tokenize, Lexer, Word};
pub use parser::*;
pub use resolver::{Claims, Pairing, Pass};
pub use token::Token;
