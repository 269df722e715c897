use std::fmt::Display;


/// Inclusive `(minimum, maximum)` bounds of a notation's results.
pub type Range = (f64, f64);


/// One parsed `NdS` term: roll `multiplier` dice with `sides` faces each.
///
/// Fields are `f64` so a malformed field can be carried as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceToken {
    /// How many dice are rolled together.
    pub multiplier: f64,
    /// Number of faces on each die.
    pub sides: f64
}

impl DiceToken {
    /// Creates a token for `multiplier` dice of `sides` faces.
    pub const fn new(multiplier: f64, sides: f64) -> Self {
        Self { multiplier, sides }
    }

    /// Whether both tokens roll the same kind of die.
    ///
    /// Unlike `==` on the raw field, two NaN side counts count as the same.
    pub fn same_sides(&self, other: &DiceToken) -> bool {
        self.sides == other.sides || (self.sides.is_nan() && other.sides.is_nan())
    }
}

impl Display for DiceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.multiplier, self.sides)
    }
}


/// The parsed form of a notation string: dice terms plus one aggregate modifier.
///
/// There is at most one [`DiceToken`] per side count; same-sided terms are
/// merged by adding their multipliers, and tokens keep the order in which
/// each side count first appeared.
///
/// # Examples
/// ```
/// use dicekit::{tokenize, DiceToken};
///
/// let tokens = tokenize("1d6 + 2 + 1d6 + 2");
/// assert_eq!(tokens.dice(), &[DiceToken::new(2.0, 6.0)]);
/// assert_eq!(tokens.modifier(), 4.0);
/// assert_eq!(tokens.to_string(), "2d6+4");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenSet {
    dice: Vec<DiceToken>,
    modifier: f64
}

impl TokenSet {
    /// Builds a token set, merging same-sided dice.
    pub fn new<I: IntoIterator<Item = DiceToken>>(dice: I, modifier: f64) -> Self {
        let mut set = Self { dice: Vec::new(), modifier };

        for token in dice {
            set.push(token);
        }

        set
    }

    /// Adds a dice term, merging it into an existing token with the same sides.
    pub(crate) fn push(&mut self, token: DiceToken) {
        match self.dice.iter_mut().find(|existing| existing.same_sides(&token)) {
            Some(existing) => {
                tracing::trace!(sides = token.sides, multiplier = token.multiplier, "Merging dice term");
                existing.multiplier += token.multiplier;
            },
            None => self.dice.push(token)
        }
    }

    /// Adds `value` to the aggregate modifier.
    pub(crate) fn add_modifier(&mut self, value: f64) {
        self.modifier += value;
    }

    /// The merged dice terms.
    pub fn dice(&self) -> &[DiceToken] {
        &self.dice
    }

    /// The aggregate modifier.
    pub fn modifier(&self) -> f64 {
        self.modifier
    }

    /// Whether every field is a real number.
    pub fn is_valid(&self) -> bool {
        self.modifier.is_finite()
            && self.dice.iter().all(|token| token.multiplier.is_finite() && token.sides.is_finite())
    }

    /// Lowest possible result: every die shows `1`.
    pub fn min(&self) -> f64 {
        self.dice.iter().map(|token| token.multiplier).sum::<f64>() + self.modifier
    }

    /// Highest possible result: every die shows its highest face.
    pub fn max(&self) -> f64 {
        self.dice.iter().map(|token| token.multiplier * token.sides).sum::<f64>() + self.modifier
    }

    /// Midpoint of [`TokenSet::min()`] and [`TokenSet::max()`].
    pub fn avg(&self) -> f64 {
        (self.min() + self.max()) / 2.0
    }

    /// Equivalent to `(self.min(), self.max())`.
    pub fn range(&self) -> Range {
        (self.min(), self.max())
    }
}

impl Display for TokenSet {
    /// Canonical notation: dice terms joined by `+`, then the modifier.
    ///
    /// A zero modifier is omitted, a negative one is written as `-K`, anything
    /// else (including NaN) as `+K`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{token}")?;
        }

        match self.modifier {
            m if m == 0.0 => Ok(()),
            m if m < 0.0 || self.dice.is_empty() => write!(f, "{m}"),
            m => write!(f, "+{m}")
        }
    }
}
