use std::borrow::Cow;
use crate::parser::error::*;
use crate::parser::{Lexer, Token, DiceToken, TokenSet, Range};


/// Turns a notation string into a [`TokenSet`].
///
/// A lenient parser (the default) never fails. Each field is read from its
/// leading base-10 digits (`4abc` is `4`, `1.5` is `1`) and becomes NaN when
/// there are none, as does the empty term in front of a leading `-`; every
/// result rolled from a NaN field is NaN too. A dice term after a `-` counts
/// negatively, so `3d6-1d6` merges into `2d6`.
///
/// A strict parser instead requires every field to be a whole base-10
/// integer, rejects negated dice terms, empty input and dice with zero
/// sides, and reports each as a [`NotationError`] positioned at the
/// offending term. It ignores the empty leading term.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    strict: bool
}

impl Parser {
    /// Creates a lenient parser for `input`.
    pub fn new(input: &str) -> Self {
        Self { lexer: Lexer::new(input), strict: false }
    }

    /// Creates a strict parser for `input`.
    pub fn strict(input: &str) -> Self {
        Self { lexer: Lexer::new(input), strict: true }
    }

    /// Scans the whole input into a [`TokenSet`].
    ///
    /// # Errors
    /// Only a strict parser returns errors, always wrapped with
    /// [`NotationError::AtPosition`] except for [`NotationError::Empty`].
    ///
    /// # Examples
    /// ```
    /// use dicekit::{Parser, NotationError};
    ///
    /// let tokens = Parser::new("3d6 - 2").parse().unwrap();
    /// assert_eq!(tokens.range(), (1.0, 16.0));
    ///
    /// let err = Parser::strict("2d6 + 1dx").parse().unwrap_err();
    /// assert_eq!(err.pos(), Some(&6));
    /// assert!(matches!(err.err(), NotationError::Number(_)));
    /// ```
    pub fn parse(&mut self) -> Result<TokenSet> {
        let mut tokens = TokenSet::default();
        let mut terms = 0usize;

        loop {
            let token = self.lexer.next_token();
            let position = self.lexer.start;

            match token {
                Token::Eof => break,

                Token::Empty if self.strict => continue,

                Token::Empty => {
                    let value = self.settle(self.number(""), position)?;
                    tokens.add_modifier(value);
                    continue;
                },

                Token::Dice { negative, count, sides } => {
                    let multiplier = self.settle(self.dice_count(negative, count.as_deref()), position)?;
                    let sides = self.settle(self.dice_sides(&sides), position)?;
                    tokens.push(DiceToken::new(multiplier, sides));
                },

                Token::Modifier { negative, value } => {
                    let value = self.settle(self.number(&value), position)?;
                    tokens.add_modifier(if negative { -value } else { value });
                }
            }

            terms += 1;
        }

        if self.strict && terms == 0 {
            return Err(NotationError::Empty);
        }

        Ok(tokens)
    }

    fn dice_count(&self, negative: bool, count: Option<&str>) -> Result<f64> {
        if self.strict && negative {
            return Err(NotationError::NegativeDice);
        }

        let count = match count {
            Some(count) => self.number(count)?,
            None => 1.0
        };

        Ok(if negative { -count } else { count })
    }

    fn dice_sides(&self, text: &str) -> Result<f64> {
        let sides = self.number(text)?;

        if self.strict && sides < 1.0 {
            return Err(NotationError::ZeroSides);
        }

        Ok(sides)
    }

    fn settle(&self, field: Result<f64>, position: usize) -> Result<f64> {
        match field {
            Ok(value) => Ok(value),
            Err(err) if self.strict => Err(err.at_pos(position)),
            Err(err) => {
                tracing::warn!(position, %err, "Malformed dice notation field evaluates to NaN");
                Ok(f64::NAN)
            }
        }
    }

    fn number(&self, text: &str) -> Result<f64> {
        let digits = if self.strict { text } else { leading_integer(text) };
        Ok(digits.parse::<i64>()? as f64)
    }
}

/// The optional sign and digits `text` starts with.
fn leading_integer(text: &str) -> &str {
    let end = text.char_indices()
        .find(|&(i, ch)| !(ch.is_ascii_digit() || (i == 0 && matches!(ch, '+' | '-'))))
        .map_or(text.len(), |(i, _)| i);

    &text[..end]
}


/// Leniently parses `input` into a [`TokenSet`].
///
/// Case and whitespace are ignored, `d6` means `1d6`, same-sided terms are
/// merged and every modifier term is summed. Malformed fields become NaN,
/// see [`Parser`].
///
/// # Examples
/// ```
/// use dicekit::{tokenize, DiceToken};
///
/// let tokens = tokenize("2 D6 + 4");
/// assert_eq!(tokens.dice(), &[DiceToken::new(2.0, 6.0)]);
/// assert_eq!(tokens.modifier(), 4.0);
///
/// let merged = tokenize("3d6 - 1d6");
/// assert_eq!(merged.dice(), &[DiceToken::new(2.0, 6.0)]);
///
/// let broken = tokenize("-2d6");
/// assert!(broken.modifier().is_nan());
/// ```
pub fn tokenize(input: &str) -> TokenSet {
    Parser::new(input).parse()
        .unwrap_or_else(|_| TokenSet::new([], f64::NAN))
}

/// Strictly parses `input` into a [`TokenSet`].
///
/// # Errors
/// See [`Parser::parse()`].
pub fn tokenize_strict(input: &str) -> Result<TokenSet> {
    Parser::strict(input).parse()
}

/// Canonical notation for `tokens`, see [`TokenSet`]'s `Display`.
pub fn render(tokens: &TokenSet) -> String {
    tokens.to_string()
}

/// Re-renders `input` in canonical form, or returns it unchanged if it
/// does not parse to real numbers.
///
/// # Examples
/// ```
/// use dicekit::simplify;
///
/// assert_eq!(simplify("1d6 + 2 + 1D6 + 2"), "2d6+4");
/// assert_eq!(simplify("-2d6"), "-2d6");
/// ```
pub fn simplify(input: &str) -> String {
    let simplified = render(&tokenize(input));

    if simplified.contains("NaN") {
        return input.to_string();
    }

    simplified
}


/// Anything that can be read as a [`TokenSet`]: a notation string or an
/// already parsed set.
pub trait Notation {
    /// The token set this value describes.
    fn token_set(&self) -> Cow<'_, TokenSet>;
}

impl Notation for str {
    fn token_set(&self) -> Cow<'_, TokenSet> {
        Cow::Owned(tokenize(self))
    }
}

impl Notation for String {
    fn token_set(&self) -> Cow<'_, TokenSet> {
        self.as_str().token_set()
    }
}

impl Notation for TokenSet {
    fn token_set(&self) -> Cow<'_, TokenSet> {
        Cow::Borrowed(self)
    }
}

/// Bounds of every possible result, computed without rolling.
///
/// # Examples
/// ```
/// use dicekit::{range_of, tokenize};
///
/// assert_eq!(range_of("3d6-2"), (1.0, 16.0));
/// assert_eq!(range_of(&tokenize("2d6+2d12")), (4.0, 36.0));
/// ```
pub fn range_of<N: Notation + ?Sized>(notation: &N) -> Range {
    notation.token_set().range()
}
