use proptest::prelude::*;
use crate::SeededRandom;


pub(crate) fn seeded_strategy() -> impl Strategy<Value = SeededRandom> {
    any::<u64>().prop_map(SeededRandom::new)
}

pub(crate) fn sides_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        prop::sample::select(vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 20.0, 100.0]),
        (1u16..=1000).prop_map(f64::from)
    ]
}
