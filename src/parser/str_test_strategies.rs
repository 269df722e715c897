use proptest::prelude::*;


pub(crate) fn dice_term_strategy() -> impl Strategy<Value = String> {
    (prop::option::of(0u16..=20), 1u16..=100)
        .prop_map(|(count, sides)| match count {
            Some(count) => format!("{count}d{sides}"),
            None => format!("d{sides}")
        })
}

pub(crate) fn modifier_term_strategy() -> impl Strategy<Value = String> {
    (0u16..=100).prop_map(|n| n.to_string())
}

/// Well-formed notation: dice terms are only ever added, modifiers may be
/// added or subtracted, and the first term carries no sign.
pub(crate) fn notation_strategy() -> impl Strategy<Value = String> {
    let term = prop_oneof![
        dice_term_strategy().prop_map(|t| ("+", t)),
        (prop_oneof![Just("+"), Just("-")], modifier_term_strategy()),
    ];

    prop::collection::vec(term, 1..8).prop_map(|terms| {
        terms.into_iter()
            .enumerate()
            .map(|(i, (sign, term))| match i {
                0 => term,
                _ => format!("{sign}{term}")
            })
            .collect::<String>()
    })
}

/// [`notation_strategy`] with random whitespace and upper-case letters mixed in.
pub(crate) fn noisy_notation_strategy() -> impl Strategy<Value = String> {
    notation_strategy().prop_flat_map(|expr| {
        let len = expr.chars().count();
        (
            Just(expr),
            prop::collection::vec((any::<bool>(), prop::sample::select(vec!["", " ", "\t", "\n  "])), len)
        )
    }).prop_map(|(expr, noise)| {
        expr.chars()
            .zip(noise)
            .map(|(ch, (upper, space))| {
                let ch = if upper { ch.to_ascii_uppercase() } else { ch };
                format!("{space}{ch}")
            })
            .collect::<String>()
    })
}
