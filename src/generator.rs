use std::{fmt, rc::Rc};
use crate::{Error, Source};
use crate::primitives::{element_index, uniform_int};


/// A reusable, repeatedly-invokable source of one numeric result.
///
/// Each call to [`NumberGenerator::roll()`] is an independent trial: nothing is
/// cached between calls, and the only state a generator carries is its
/// [`Source`] and the sub-generators it wraps. Cloning is cheap and shares
/// the same underlying closure.
///
/// # Examples
/// ```
/// use dicekit::{make_die, SeededRandom, Source};
/// use std::rc::Rc;
///
/// let source: Source = Rc::new(SeededRandom::new(1));
/// let d6 = make_die(&source, 6.0);
/// let value = d6.roll();
/// assert!((1.0..=6.0).contains(&value));
/// ```
#[derive(Clone)]
pub struct NumberGenerator(Rc<dyn Fn() -> f64>);

impl NumberGenerator {
    /// Wraps a closure as a generator.
    pub fn new<F: Fn() -> f64 + 'static>(f: F) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the generator once.
    pub fn roll(&self) -> f64 {
        (self.0)()
    }

    /// Invokes the generator `times` times, collecting every result.
    pub fn roll_many(&self, times: usize) -> Vec<f64> {
        (0..times).map(|_| self.roll()).collect()
    }
}

impl fmt::Debug for NumberGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NumberGenerator")
    }
}


/// A generator that always returns `value`.
pub fn constant(value: f64) -> NumberGenerator {
    NumberGenerator::new(move || value)
}

/// A single die with faces `1..=sides`.
///
/// Degenerate `sides` are not rejected: they go through [`uniform_int`]'s
/// bound sorting, so `make_die(source, 0.0)` yields values in `0..=1`.
pub fn make_die(source: &Source, sides: f64) -> NumberGenerator {
    let source = Rc::clone(source);
    NumberGenerator::new(move || uniform_int(source.as_ref(), sides, 1.0))
}

/// Rolls `generator` `multiplier` times per call and sums the results.
///
/// A multiplier of zero (or below) always yields `0`. A NaN multiplier
/// yields NaN on every call.
pub fn repeat(generator: NumberGenerator, multiplier: f64) -> NumberGenerator {
    if multiplier.is_nan() {
        return constant(f64::NAN);
    }

    let times = multiplier.ceil().max(0.0) as u64;
    NumberGenerator::new(move || (0..times).map(|_| generator.roll()).sum())
}

/// Returns a transformer adding `modifier` to every result of a generator.
///
/// # Examples
/// ```
/// use dicekit::{constant, offset};
///
/// let plus2 = offset(2.0);
/// assert_eq!(plus2(constant(4.0)).roll(), 6.0);
/// ```
pub fn offset(modifier: f64) -> impl Fn(NumberGenerator) -> NumberGenerator {
    move |generator| NumberGenerator::new(move || generator.roll() + modifier)
}

/// Sums one roll of every generator in `generators`.
///
/// # Errors
/// Returns [`Error::EmptyInput`] if `generators` is empty.
///
/// # Examples
/// ```
/// use dicekit::{combine, constant, Error};
///
/// let combined = combine(vec![constant(1.0), constant(2.0)]).unwrap();
/// assert_eq!(combined.roll(), 3.0);
///
/// assert!(matches!(combine(Vec::new()), Err(Error::EmptyInput(_))));
/// ```
pub fn combine(generators: Vec<NumberGenerator>) -> Result<NumberGenerator, Error> {
    if generators.is_empty() {
        return Err(Error::EmptyInput("at least one generator is required to combine"));
    }

    Ok(NumberGenerator::new(move || generators.iter().map(NumberGenerator::roll).sum()))
}

/// `multiplier` dice with `sides` faces, plus `modifier`.
///
/// Equivalent to `offset(modifier)(repeat(make_die(source, sides), multiplier))`.
pub fn make_dice(source: &Source, sides: f64, multiplier: f64, modifier: f64) -> NumberGenerator {
    offset(modifier)(repeat(make_die(source, sides), multiplier))
}


/// A die whose faces are arbitrary values rather than `1..=sides`.
///
/// Useful for weighted outcome tables or non-numeric dice. Dice with
/// numeric faces convert into a [`NumberGenerator`] and can be combined
/// with the rest of the algebra.
///
/// # Examples
/// ```
/// use dicekit::{make_custom_die, combine, constant, SequenceRandom, Source};
/// use std::rc::Rc;
///
/// let source: Source = Rc::new(SequenceRandom::lowest());
/// let colors = make_custom_die(&source, vec!["red", "blue"]).unwrap();
/// assert_eq!(colors.roll(), "red");
///
/// let weighted = make_custom_die(&source, vec![1u8, 1, 1, 2]).unwrap();
/// let total = combine(vec![weighted.into(), constant(10.0)]).unwrap();
/// assert_eq!(total.roll(), 11.0);
/// ```
#[derive(Clone)]
pub struct CustomDie<T> {
    source: Source,
    faces: Rc<[T]>
}

impl<T> CustomDie<T> {
    /// The faces of this die.
    pub fn faces(&self) -> &[T] {
        &self.faces
    }
}

impl<T: Clone> CustomDie<T> {
    /// Rolls the die, returning one of its faces.
    pub fn roll(&self) -> T {
        self.faces[element_index(self.source.as_ref(), self.faces.len())].clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for CustomDie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomDie")
            .field("faces", &self.faces)
            .finish_non_exhaustive()
    }
}

impl<T: Copy + Into<f64> + 'static> From<CustomDie<T>> for NumberGenerator {
    fn from(die: CustomDie<T>) -> Self {
        NumberGenerator::new(move || die.roll().into())
    }
}

/// Builds a [`CustomDie`] over `faces`.
///
/// # Errors
/// Returns [`Error::EmptyInput`] if `faces` is empty.
pub fn make_custom_die<T>(source: &Source, faces: Vec<T>) -> Result<CustomDie<T>, Error> {
    if faces.is_empty() {
        return Err(Error::EmptyInput("a custom die needs at least one face"));
    }

    Ok(CustomDie {
        source: Rc::clone(source),
        faces: faces.into()
    })
}
