mod error;
mod lexer;
mod token_set;
mod parse;

#[cfg(test)]
pub(crate) mod str_test_strategies;

pub use error::NotationError;
pub(crate) use lexer::{Lexer, Token};
pub use token_set::{DiceToken, TokenSet, Range};
pub use parse::{Parser, Notation, tokenize, tokenize_strict, render, simplify, range_of};
