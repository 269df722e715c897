use std::{fmt, rc::Rc};
use crate::{
    Error, RandomSource, SeededRandom, Source, ThreadRandom,
    NumberGenerator, CustomDie, TokenSet,
    combine, make_custom_die, make_dice, make_die, offset, repeat,
    tokenize, tokenize_strict,
};
use crate::primitives;


/// Settings applied by a [`Toolkit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToolkitConfig {
    /// Reject malformed notation instead of letting it evaluate to NaN.
    pub strict: bool
}

impl ToolkitConfig {
    /// Lenient parsing, the default.
    pub const fn lenient() -> Self {
        Self { strict: false }
    }

    /// Strict parsing, see [`crate::Parser`].
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}


/// Builds a single generator rolling every term of `tokens`.
///
/// # Errors
/// Returns [`Error::EmptyInput`] if `tokens` holds no dice.
pub fn build_generator(source: &Source, tokens: &TokenSet) -> Result<NumberGenerator, Error> {
    let dice = tokens.dice()
        .iter()
        .map(|token| make_dice(source, token.sides, token.multiplier, 0.0))
        .collect();

    let generator = offset(tokens.modifier())(combine(dice)?);

    tracing::debug!(
        notation = %tokens,
        terms = tokens.dice().len(),
        modifier = tokens.modifier(),
        "Built dice generator"
    );

    Ok(generator)
}

/// Leniently parses `notation` and builds its generator on `source`.
///
/// Malformed fields do not fail: the generator returns NaN instead.
///
/// # Errors
/// Returns [`Error::EmptyInput`] if the notation holds no dice term.
pub fn parse_notation(source: &Source, notation: &str) -> Result<NumberGenerator, Error> {
    build_generator(source, &tokenize(notation))
}


/// Every dice operation, bound to one [`RandomSource`].
///
/// Build one with [`build_toolkit`] for a custom source, [`Toolkit::seeded`]
/// for reproducible rolls, or [`toolkit`] for the platform default RNG.
///
/// # Examples
/// ```
/// use dicekit::{build_toolkit, SequenceRandom};
///
/// let kit = build_toolkit(SequenceRandom::highest());
/// let roll = kit.parse_notation("2d6+4").unwrap();
/// assert_eq!(roll.roll(), 16.0);
///
/// let kit = build_toolkit(SequenceRandom::lowest());
/// assert_eq!(kit.parse_notation("2d6+4").unwrap().roll(), 6.0);
/// ```
#[derive(Clone)]
pub struct Toolkit {
    source: Source,
    config: ToolkitConfig
}

impl Toolkit {
    /// Binds a toolkit to an already shared source.
    pub fn new(source: Source) -> Self {
        Self { source, config: ToolkitConfig::default() }
    }

    /// Binds a toolkit to a [`SeededRandom`] created from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Rc::new(SeededRandom::new(seed)))
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ToolkitConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// The bound source, shared with every generator this toolkit builds.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// One raw sample of the bound source.
    pub fn random(&self) -> f64 {
        self.source.sample()
    }

    /// See [`crate::uniform_int`].
    pub fn uniform_int(&self, max: f64, min: f64) -> f64 {
        primitives::uniform_int(self.source.as_ref(), max, min)
    }

    /// See [`crate::uniform_integer`].
    pub fn uniform_integer(&self, max: f64) -> f64 {
        primitives::uniform_integer(self.source.as_ref(), max)
    }

    /// See [`crate::uniform_number`].
    pub fn uniform_number(&self, max: f64, min: f64) -> f64 {
        primitives::uniform_number(self.source.as_ref(), max, min)
    }

    /// `true` with probability one half.
    pub fn uniform_bool(&self) -> bool {
        primitives::uniform_bool(self.source.as_ref())
    }

    /// # Errors
    /// Returns [`Error::EmptyInput`] if `items` is empty.
    pub fn uniform_element<'a, T>(&self, items: &'a [T]) -> Result<&'a T, Error> {
        primitives::uniform_element(self.source.as_ref(), items)
    }

    /// A single die with faces `1..=sides`.
    pub fn die(&self, sides: f64) -> NumberGenerator {
        make_die(&self.source, sides)
    }

    /// `multiplier` dice with `sides` faces, plus `modifier`.
    pub fn dice(&self, sides: f64, multiplier: f64, modifier: f64) -> NumberGenerator {
        make_dice(&self.source, sides, multiplier, modifier)
    }

    /// # Errors
    /// Returns [`Error::EmptyInput`] if `faces` is empty.
    pub fn custom_die<T>(&self, faces: Vec<T>) -> Result<CustomDie<T>, Error> {
        make_custom_die(&self.source, faces)
    }

    /// Sums `multiplier` rolls of `generator` per call.
    pub fn repeat(&self, generator: NumberGenerator, multiplier: f64) -> NumberGenerator {
        repeat(generator, multiplier)
    }

    /// Adds `modifier` to every result of `generator`.
    pub fn offset(&self, generator: NumberGenerator, modifier: f64) -> NumberGenerator {
        offset(modifier)(generator)
    }

    /// # Errors
    /// Returns [`Error::EmptyInput`] if `generators` is empty.
    pub fn combine(&self, generators: Vec<NumberGenerator>) -> Result<NumberGenerator, Error> {
        combine(generators)
    }

    /// Parses `notation` according to the configured strictness.
    ///
    /// # Errors
    /// Returns [`Error::Notation`] for malformed notation, strict mode only.
    pub fn tokenize(&self, notation: &str) -> Result<TokenSet, Error> {
        if self.config.strict {
            Ok(tokenize_strict(notation)?)
        } else {
            Ok(tokenize(notation))
        }
    }

    /// Parses `notation` into a generator rolling it.
    ///
    /// # Errors
    /// - Returns [`Error::EmptyInput`] if the notation holds no dice term.
    /// - Returns [`Error::Notation`] for malformed notation, strict mode only.
    ///   In lenient mode malformed notation yields a generator returning NaN.
    ///
    /// # Examples
    /// ```
    /// use dicekit::{Toolkit, ToolkitConfig, Error};
    ///
    /// let lenient = Toolkit::seeded(1);
    /// assert!(lenient.parse_notation("-2d6").unwrap().roll().is_nan());
    ///
    /// let strict = Toolkit::seeded(1).with_config(ToolkitConfig::strict());
    /// assert!(matches!(strict.parse_notation("-2d6"), Err(Error::Notation(_))));
    /// ```
    pub fn parse_notation(&self, notation: &str) -> Result<NumberGenerator, Error> {
        tracing::debug!(notation, strict = self.config.strict, "Parsing dice notation");
        build_generator(&self.source, &self.tokenize(notation)?)
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        toolkit()
    }
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}


/// Binds a [`Toolkit`] to `source`.
pub fn build_toolkit<R: RandomSource + 'static>(source: R) -> Toolkit {
    Toolkit::new(Rc::new(source))
}

/// A [`Toolkit`] bound to the platform default RNG.
pub fn toolkit() -> Toolkit {
    build_toolkit(ThreadRandom)
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::{NotationError, SequenceRandom};
    use crate::parser::str_test_strategies::notation_strategy;


    fn extremes(generator: &NumberGenerator, times: usize) -> (f64, f64) {
        generator.roll_many(times)
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    proptest! {
        #[test]
        fn test_rolls_within_range(seed: u64, expr in notation_strategy()) {
            let kit = Toolkit::seeded(seed);
            let tokens = kit.tokenize(&expr).unwrap();
            let (min, max) = tokens.range();

            match kit.parse_notation(&expr) {
                Ok(generator) => {
                    for value in generator.roll_many(20) {
                        prop_assert!(value >= min && value <= max, "{expr}: {value} not in {min}..={max}");
                    }
                },
                Err(err) => {
                    prop_assert!(tokens.dice().is_empty());
                    prop_assert!(matches!(err, Error::EmptyInput(_)));
                }
            }
        }

        #[test]
        fn test_same_seed_same_rolls(seed: u64, expr in notation_strategy()) {
            let a = Toolkit::seeded(seed).parse_notation(&expr);
            let b = Toolkit::seeded(seed).parse_notation(&expr);

            if let (Ok(a), Ok(b)) = (a, b) {
                prop_assert_eq!(a.roll_many(10), b.roll_many(10));
            }
        }
    }

    #[test]
    fn test_parse_notation_range() {
        let kit = Toolkit::seeded(100);

        let two_d6_plus4 = kit.parse_notation("2d6+4").unwrap();
        assert_eq!(extremes(&two_d6_plus4, 5000), (6.0, 16.0));

        let spaced = kit.parse_notation("2 d6    + \n  4").unwrap();
        assert_eq!(extremes(&spaced, 5000), (6.0, 16.0));

        let upper = kit.parse_notation("2D6+4").unwrap();
        assert_eq!(extremes(&upper, 5000), (6.0, 16.0));

        let minus = kit.parse_notation("3d6-2").unwrap();
        assert_eq!(extremes(&minus, 5000), (1.0, 16.0));

        let split = kit.parse_notation("1d6+2+1d6+2").unwrap();
        assert_eq!(extremes(&split, 5000), (6.0, 16.0));

        let implicit = kit.parse_notation("d6+2").unwrap();
        assert_eq!(extremes(&implicit, 5000), (3.0, 8.0));

        let mixed = kit.parse_notation("2d6+2d12").unwrap();
        assert_eq!(extremes(&mixed, 100_000), (4.0, 36.0));
    }

    #[test]
    fn test_subtracted_dice_roll_normally() {
        let kit = Toolkit::seeded(11);

        let merged = kit.parse_notation("3d6-1d6").unwrap();
        assert_eq!(extremes(&merged, 5000), (2.0, 12.0));

        // the -1d4 term rolls zero dice
        let mixed = kit.parse_notation("2d6-1d4").unwrap();
        assert!(mixed.roll_many(1000).iter().all(|v| (2.0..=12.0).contains(v)));
    }

    #[test]
    fn test_negative_dice_rolls_nan() {
        let generator = toolkit().parse_notation("-2d6").unwrap();
        assert!(generator.roll_many(100).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_no_dice_is_empty_input() {
        let kit = Toolkit::seeded(0);

        assert!(matches!(kit.parse_notation(""), Err(Error::EmptyInput(_))));
        assert!(matches!(kit.parse_notation("4"), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_strict_mode() {
        let kit = Toolkit::seeded(0).with_config(ToolkitConfig::strict());

        assert!(kit.config().strict);
        assert!(kit.parse_notation("2d6+4").is_ok());

        let err = kit.parse_notation("2d6 + 2dx").unwrap_err();
        match err {
            Error::Notation(err) => {
                assert_eq!(err.pos(), Some(&6));
                assert!(matches!(err.err(), NotationError::Number(_)));
            },
            other => panic!("unexpected error {other:?}")
        }

        assert_eq!(kit.parse_notation("  ").unwrap_err(), Error::Notation(NotationError::Empty));
    }

    #[test]
    fn test_bound_source_is_used() {
        let low = build_toolkit(SequenceRandom::lowest());
        let high = build_toolkit(SequenceRandom::highest());

        assert_eq!(low.die(20.0).roll(), 1.0);
        assert_eq!(high.die(20.0).roll(), 20.0);
        assert_eq!(low.dice(6.0, 3.0, 2.0).roll(), 5.0);
        assert_eq!(high.dice(6.0, 3.0, 2.0).roll(), 20.0);
        assert_eq!(low.uniform_element(&["a", "b"]), Ok(&"a"));
        assert_eq!(high.custom_die(vec!['x', 'y', 'z']).unwrap().roll(), 'z');
        assert_eq!(low.uniform_integer(10.0), 0.0);
        assert_eq!(high.uniform_int(-1.0, -5.0), -1.0);
        assert!(high.uniform_bool());
        assert!(!low.uniform_bool());
        assert_eq!(low.random(), 0.0);
        assert_eq!(low.uniform_number(10.0, 2.0), 2.0);
    }

    #[test]
    fn test_algebra_passthrough() {
        let kit = build_toolkit(SequenceRandom::highest());

        let d4x2 = kit.repeat(kit.die(4.0), 2.0);
        let plus1 = kit.offset(d4x2, 1.0);
        let total = kit.combine(vec![plus1, kit.die(6.0)]).unwrap();

        assert_eq!(total.roll(), 15.0);
        assert!(matches!(kit.combine(Vec::new()), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_free_parse_notation() {
        let source: Source = Rc::new(SequenceRandom::lowest());

        assert_eq!(parse_notation(&source, "3d8+1").unwrap().roll(), 4.0);
        assert_eq!(build_generator(&source, &tokenize("d4-1")).unwrap().roll(), 0.0);
    }

    #[test]
    fn test_default_toolkit_rolls() {
        let generator = Toolkit::default().parse_notation("d20").unwrap();
        assert!(generator.roll_many(200).iter().all(|v| (1.0..=20.0).contains(v)));
    }
}
