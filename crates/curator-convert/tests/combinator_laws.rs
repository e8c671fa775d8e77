//! Algebraic laws of the combinator library.
//!
//! Sequential composition must be associative — `pipe([a, pipe([b, c])])`
//! and `pipe([pipe([a, b]), c])` are indistinguishable — and composing
//! with the identity converter must be a no-op. Schemas rely on both when
//! they splice shared fragments into larger pipelines.

use curator_convert::{
    cleanup_line, empty_to_absent, greater_or_equal, input_to_iso8601_date, noop, pipe, require,
    test, type_check, Context, Converter, ValueKind,
};
use proptest::prelude::*;
use serde_json::{json, Value};

/// A pool of small converters to draw pipeline steps from.
fn step(index: usize) -> Converter {
    match index % 6 {
        0 => type_check(ValueKind::String),
        1 => cleanup_line(),
        2 => empty_to_absent(),
        3 => test(|v| v.as_str().map_or(true, |s| s.len() <= 100), "String is too long"),
        4 => input_to_iso8601_date(),
        _ => greater_or_equal(0.0),
    }
}

fn arbitrary_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[ a-zA-Z0-9_-]{0,20}".prop_map(Value::from),
        Just(json!("2013-07-01")),
        Just(json!("")),
    ]
}

proptest! {
    #[test]
    fn pipe_is_associative(
        steps in proptest::collection::vec(0usize..6, 0..5),
        value in arbitrary_value(),
    ) {
        let ctx = Context::new();
        let flat = pipe(steps.iter().map(|&i| step(i)));

        // Re-group the same steps in every split position.
        for split in 0..=steps.len() {
            let (left, right) = steps.split_at(split);
            let grouped = pipe([
                pipe(left.iter().map(|&i| step(i))),
                pipe(right.iter().map(|&i| step(i))),
            ]);
            let a = flat.apply(value.clone(), &ctx);
            let b = grouped.apply(value.clone(), &ctx);
            prop_assert_eq!(a.value, b.value);
            prop_assert_eq!(a.error, b.error);
        }
    }

    #[test]
    fn noop_is_identity(
        steps in proptest::collection::vec(0usize..6, 0..4),
        value in arbitrary_value(),
    ) {
        let ctx = Context::new();
        let plain = pipe(steps.iter().map(|&i| step(i)));

        let mut padded_steps: Vec<Converter> = vec![noop()];
        for &i in &steps {
            padded_steps.push(step(i));
            padded_steps.push(noop());
        }
        let padded = pipe(padded_steps);

        let a = plain.apply(value.clone(), &ctx);
        let b = padded.apply(value.clone(), &ctx);
        prop_assert_eq!(a.value, b.value);
        prop_assert_eq!(a.error, b.error);
    }

    #[test]
    fn converters_are_reentrant(value in arbitrary_value()) {
        // The same instance applied twice to clones of one value must
        // agree with itself.
        let conv = pipe([type_check(ValueKind::String), cleanup_line(), require()]);
        let ctx = Context::new();
        let a = conv.apply(value.clone(), &ctx);
        let b = conv.apply(value, &ctx);
        prop_assert_eq!(a.value, b.value);
        prop_assert_eq!(a.error, b.error);
    }
}
