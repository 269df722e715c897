//! Dice notation such as `"2d6+4"` turned into reusable dice generators.
//!
//! A notation string is parsed into a [`TokenSet`], which is then built into
//! a [`NumberGenerator`] out of dice, repetitions, offsets and combinations.
//! Every random draw comes from an injected [`RandomSource`], so binding a
//! [`Toolkit`] to a seeded or fixed source makes rolls reproducible.
//!
//! ```
//! use dicekit::{toolkit, range_of};
//!
//! let attack = toolkit().parse_notation("1d20 + 5").unwrap();
//! let (min, max) = range_of("1d20 + 5");
//!
//! let value = attack.roll();
//! assert!(value >= min && value <= max);
//! ```
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]


#[cfg(test)]
mod generator_test_strategies;

mod error;
mod source;
mod primitives;
mod generator;
mod parser;
mod toolkit;

pub use error::Error;
pub use source::{RandomSource, Source, ThreadRandom, SeededRandom, SequenceRandom};
pub use primitives::{uniform_int, uniform_integer, uniform_number, uniform_bool, uniform_element};
pub use generator::{
    NumberGenerator, CustomDie,
    constant, make_die, make_dice, make_custom_die, repeat, offset, combine
};
pub use parser::{
    NotationError, Parser, Notation,
    DiceToken, TokenSet, Range,
    tokenize, tokenize_strict, render, simplify, range_of
};
pub use toolkit::{Toolkit, ToolkitConfig, build_toolkit, toolkit, build_generator, parse_notation};
