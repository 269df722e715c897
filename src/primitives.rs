use crate::{Error, RandomSource};


/// Returns an integer in the inclusive range between `max` and `min`.
///
/// The operands may be given in either order; they are sorted first, then
/// the upper bound is floored and the lower bound is ceiled. The result is
/// `floor(sample * (upper - lower + 1) + lower)`, so both bounds are reachable.
/// A NaN operand yields NaN.
///
/// # Examples
/// ```
/// use dicekit::{uniform_int, SequenceRandom};
///
/// assert_eq!(uniform_int(&SequenceRandom::lowest(), 50.0, 10.0), 10.0);
/// assert_eq!(uniform_int(&SequenceRandom::highest(), 50.0, 10.0), 50.0);
///
/// // argument order does not matter
/// assert_eq!(uniform_int(&SequenceRandom::highest(), 10.0, 50.0), 50.0);
/// ```
pub fn uniform_int<R: RandomSource + ?Sized>(source: &R, max: f64, min: f64) -> f64 {
    if max.is_nan() || min.is_nan() {
        return f64::NAN;
    }

    let upper = max.max(min).floor();
    let lower = max.min(min).ceil();

    (source.sample() * (upper - lower + 1.0) + lower).floor()
}

/// Unary form of [`uniform_int`] with a lower bound of `0`.
pub fn uniform_integer<R: RandomSource + ?Sized>(source: &R, max: f64) -> f64 {
    uniform_int(source, max, 0.0)
}

/// Returns a continuous value between `min` and `max`.
pub fn uniform_number<R: RandomSource + ?Sized>(source: &R, max: f64, min: f64) -> f64 {
    source.sample() * (max - min) + min
}

/// Returns `true` when the sample is strictly greater than `0.5`.
pub fn uniform_bool<R: RandomSource + ?Sized>(source: &R) -> bool {
    source.sample() > 0.5
}

/// Picks one element of `items` uniformly.
///
/// # Errors
/// Returns [`Error::EmptyInput`] if `items` is empty.
///
/// # Examples
/// ```
/// use dicekit::{uniform_element, SequenceRandom, Error};
///
/// let colors = ["red", "green", "blue"];
/// assert_eq!(uniform_element(&SequenceRandom::lowest(), &colors), Ok(&"red"));
/// assert_eq!(uniform_element(&SequenceRandom::highest(), &colors), Ok(&"blue"));
///
/// let none: [u8; 0] = [];
/// assert!(matches!(uniform_element(&SequenceRandom::lowest(), &none), Err(Error::EmptyInput(_))));
/// ```
pub fn uniform_element<'a, R: RandomSource + ?Sized, T>(source: &R, items: &'a [T]) -> Result<&'a T, Error> {
    if items.is_empty() {
        return Err(Error::EmptyInput("cannot pick an element of an empty sequence"));
    }

    Ok(&items[element_index(source, items.len())])
}

/// Index into a non-empty sequence of `len` elements.
pub(crate) fn element_index<R: RandomSource + ?Sized>(source: &R, len: usize) -> usize {
    let last = len.saturating_sub(1);
    (uniform_int(source, last as f64, 0.0) as usize).min(last)
}
