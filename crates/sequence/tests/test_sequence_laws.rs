//! Behavioral laws of sequence expressions
//!
//! These tests exercise the public API end to end: construction, operand
//! order, range direction, folds and splice isolation.

use lazyseq::{
    OpRef, Operand, OperatorNamePolicy, SeqConfig, SeqError, SequenceExpression,
};
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lazyseq=debug,lazyseq_core=debug")
        .with_test_writer()
        .try_init();
}

fn identity() -> SequenceExpression<i64> {
    SequenceExpression::from_generator(|x| x)
}

#[test]
fn test_constant_everywhere() {
    for c in [-7i64, 0, 42, i64::MAX] {
        let seq = SequenceExpression::from_constant(c);
        for i in [-100, -1, 0, 1, 99, 1_000_000] {
            assert_eq!(seq.value_at(i), Ok(c));
        }
    }
}

#[test]
fn test_generator_on_domain_value() {
    let f = |x: i64| 3 * x - 1;
    let mut seq = SequenceExpression::from_generator(f);
    for (start, step) in [(0, 1), (5, 3), (-4, -2)] {
        seq.set_start(start);
        seq.set_step(step);
        for i in -5..5 {
            assert_eq!(seq.value_at(i), Ok(f(start + step * i)));
        }
    }
}

#[test]
fn test_operand_order_law() {
    let a = SequenceExpression::from_generator(|x: i64| x * x + 7);
    let b = SequenceExpression::from_generator(|x: i64| x + 1);
    let ops: [(&str, fn(i64, i64) -> i64); 5] = [
        ("-", |x, y| x - y),
        ("/", |x, y| x / y),
        ("%", |x, y| x % y),
        (">>", |x, y| x >> y),
        ("<<", |x, y| x << y),
    ];
    for (name, op) in ops {
        let mut combined = a.clone();
        combined.combine(&b, op);
        let mut named = a.clone();
        named.combine_named(&b, name).unwrap();
        for i in 0..6 {
            let expected = op(a.value_at(i).unwrap(), b.value_at(i).unwrap());
            assert_eq!(combined.value_at(i), Ok(expected), "operator {}", name);
            assert_eq!(named.value_at(i), Ok(expected), "operator {}", name);
        }
    }
}

#[test]
fn test_range_length_and_direction() {
    let up = identity();
    let down = SequenceExpression::from_operand_with(identity(), 0, -1);
    for (lo, hi) in [(0i64, 0i64), (2, 9), (9, 2), (-3, 3), (3, -3)] {
        let n = (lo.abs_diff(hi) + 1) as usize;

        let ascending = up.range(lo, hi).unwrap();
        assert_eq!(ascending.len(), if lo <= hi { n } else { 0 });
        for (k, v) in ascending.iter().enumerate() {
            assert_eq!(Ok(*v), up.value_at(lo + k as i64));
        }

        let descending = down.range(lo, hi).unwrap();
        assert_eq!(descending.len(), if lo >= hi { n } else { 0 });
        for (k, v) in descending.iter().enumerate() {
            assert_eq!(Ok(*v), down.value_at(lo - k as i64));
        }
    }
}

#[test]
fn test_fold_matches_materialized_range() {
    let mut seq = identity();
    seq.map(|x| x % 5 + 1);
    let values = seq.range(3, 12).unwrap();
    let sum: i64 = values.iter().sum();
    let product: i64 = values.iter().product();
    assert_eq!(seq.fold_range(3, 12, |a, b| a + b), Ok(sum));
    assert_eq!(seq.fold_range(3, 12, |a, b| a * b), Ok(product));
    assert_eq!(seq.fold_range_named(3, 12, "+"), Ok(Some(sum)));
    assert_eq!(seq.fold_range_named(3, 12, "*"), Ok(Some(product)));
}

#[test]
fn test_splice_isolation() {
    init_tracing();
    let mut a = SequenceExpression::from_constant(100i64);
    let mut b = identity();
    a.combine(&b, |x, y| x - y);
    let before: Vec<i64> = a.first(5).unwrap();

    b.map(|x| x * 1000);
    b += 5i64;

    assert_eq!(a.first(5).unwrap(), before);
    assert_eq!(before, vec![100, 99, 98, 97, 96]);
}

#[test]
fn test_splice_reindexes_into_own_pools() {
    let mut a = SequenceExpression::from_constant(1i64);
    let mut b = SequenceExpression::from_constant(2i64);
    b.combine(3i64, |x, y| x * y);
    a.combine(b, |x, y| x + y);
    assert_eq!(
        a.program().ops(),
        &[
            OpRef::Const(0),
            OpRef::Const(1),
            OpRef::Const(2),
            OpRef::BinaryOp(0),
            OpRef::BinaryOp(1),
        ]
    );
    assert_eq!(a.program().constants(), &[1, 2, 3]);
    assert_eq!(a.value_at(0), Ok(7));
}

#[test]
fn test_step_zero_coercion() {
    let mut seq = identity();
    seq.set_step(0);
    assert_eq!(seq.step(), 1);

    let mut floats = SequenceExpression::from_generator(|x: f64| x);
    floats.set_step(0.0);
    assert_eq!(floats.step(), 1.0);
}

#[test]
fn test_identity_first_five() {
    assert_eq!(identity().first(5), Ok(vec![0, 1, 2, 3, 4]));
}

#[test]
fn test_constant_times_identity() {
    let mut seq = SequenceExpression::from_constant(3i64);
    seq.combine(identity(), |a, b| a * b);
    assert_eq!(seq.value_at(4), Ok(12));
}

#[test]
fn test_negative_step_first() {
    let seq = SequenceExpression::from_operand_with(Operand::generator(|x: i64| x), 10, -2);
    assert_eq!(seq.first(3), Ok(vec![10, 8, 6]));
}

#[test]
fn test_fold_first_named_sum() {
    assert_eq!(identity().fold_first_named(5, "+"), Ok(Some(10)));
}

#[test]
fn test_unresolved_names_are_silent_by_default() {
    // Permissive default: the call succeeds and nothing is appended
    init_tracing();
    let mut seq = identity();
    seq.combine_named(2i64, "pow").unwrap();
    seq.map_named("!").unwrap();
    assert_eq!(seq.program().len(), 1);
    assert_eq!(seq.fold_first_named(3, "avg"), Ok(None));
}

#[test]
fn test_strict_config_from_toml() {
    let config = SeqConfig::parse(r#"operator_names = "strict""#).unwrap();
    assert_eq!(config.operator_names, OperatorNamePolicy::Strict);
    let mut seq = identity().with_config(config);
    assert_eq!(
        seq.combine_named(2i64, "pow").err(),
        Some(SeqError::UnresolvedOperator("pow".to_string()))
    );
}

#[test]
fn test_program_layout_serializes() {
    let mut seq = SequenceExpression::from_constant(3i64);
    seq.combine(identity(), |a, b| a * b).increment();
    let json = serde_json::to_value(seq.program().ops()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"Const": 0},
            {"Generator": 0},
            {"BinaryOp": 0},
            {"UnaryOp": 1}
        ])
    );
}

#[test]
fn test_program_listing() {
    let mut seq = SequenceExpression::from_constant(3i64);
    seq.combine(identity(), |a, b| a * b);
    assert_eq!(
        seq.program().to_string(),
        "   0: const #0 (3)\n   1: gen #0\n   2: binop #0\n"
    );
    assert_eq!(seq.program().max_depth(), Ok(2));
}

#[test]
fn test_concurrent_read_only_evaluation() {
    let mut seq = identity();
    seq *= identity();
    seq += 1i64;
    let seq = Arc::new(seq);

    let handles: Vec<_> = (0..4i64)
        .map(|t| {
            let seq = Arc::clone(&seq);
            thread::spawn(move || {
                (0..50i64)
                    .map(|i| seq.value_at(t * 50 + i).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        let values = handle.join().unwrap();
        for (i, v) in values.into_iter().enumerate() {
            let x = (t * 50 + i) as i64;
            assert_eq!(v, x * x + 1);
        }
    }
}

#[test]
fn test_float_sequence() {
    let mut seq = SequenceExpression::from_generator(|x: f64| x);
    seq.set_start(1.0);
    seq.set_step(0.5);
    seq *= 2.0f64;
    assert_eq!(seq.first(4), Ok(vec![2.0, 3.0, 4.0, 5.0]));
    assert_eq!(seq.fold_first_named(4, "max"), Ok(Some(5.0)));
    // 2 & 3 & 4 & 5 on the truncated values
    assert_eq!(seq.fold_first_named(4, "&"), Ok(Some(0.0)));
    assert_eq!(seq.fold_first_named(4, "|"), Ok(Some(7.0)));
}
