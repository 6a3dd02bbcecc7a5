use proptest::prelude::*;
use causal_clock::causal::CausalOrder;
use causal_clock::clock::VectorClock;
use causal_clock::error::{ClockError, ErrorKind};
use causal_clock::testing::vector;
use causal_clock::time::{LogicalTimestamp, VectorTimestamp};
use causal_clock::types::Relation;

// Strategy for a pair of equal-length vectors with small, unflipped counts.
fn arb_vector_pair() -> impl Strategy<Value = (VectorTimestamp, VectorTimestamp)> {
    (1usize..8).prop_flat_map(|len| {
        (
            prop::collection::vec(0i64..5, len),
            prop::collection::vec(0i64..5, len),
        )
            .prop_map(|(a, b)| (vector(&a), vector(&b)))
    })
}

fn slot_at_least(result: LogicalTimestamp, bound: LogicalTimestamp) -> bool {
    !result.is_before(&bound)
}

proptest! {
    /// compare(a, b) is the mirror image of compare(b, a).
    #[test]
    fn prop_compare_mirrors((a, b) in arb_vector_pair()) {
        prop_assert_eq!(a.compare(&b).unwrap(), b.compare(&a).unwrap().reverse());
    }

    /// The relation matches the textbook pointwise dominance definition.
    #[test]
    fn prop_compare_is_pointwise_dominance((a, b) in arb_vector_pair()) {
        let any_less = a.iter().zip(b.iter()).any(|(x, y)| x.is_before(y));
        let any_greater = a.iter().zip(b.iter()).any(|(x, y)| x.is_after(y));
        let expected = match (any_less, any_greater) {
            (false, false) => Relation::Equal,
            (true, false) => Relation::HappensBefore,
            (false, true) => Relation::HappensAfter,
            (true, true) => Relation::Concurrent,
        };
        prop_assert_eq!(a.compare(&b).unwrap(), expected);
    }

    /// A merge tick never lowers a slot: each slot is at least max(before, merge).
    #[test]
    fn prop_tick_with_never_decreases((before, merge) in arb_vector_pair(), index_seed in any::<usize>()) {
        let index = index_seed % before.len();
        let clock = VectorClock::with_initial(index, before.clone()).unwrap();
        let result = clock.tick_with(&merge).unwrap();

        for i in 0..before.len() {
            let slot = result.get(i).unwrap();
            prop_assert!(slot_at_least(slot, before.get(i).unwrap()));
            if i == index {
                prop_assert_eq!(slot, before.get(i).unwrap().next());
            } else {
                prop_assert!(slot_at_least(slot, merge.get(i).unwrap()));
                prop_assert_eq!(slot, LogicalTimestamp::later(before.get(i).unwrap(), merge.get(i).unwrap()));
            }
        }
        prop_assert!(result.is_happens_after(&before).unwrap());
    }

    /// A local tick always happens after the previous value.
    #[test]
    fn prop_next_happens_after((a, _b) in arb_vector_pair(), index_seed in any::<usize>()) {
        let index = index_seed % a.len();
        let next = a.next(index).unwrap();
        prop_assert_eq!(next.compare(&a).unwrap(), Relation::HappensAfter);
    }

    /// Mismatched lengths fail with a validation error instead of producing a result.
    #[test]
    fn prop_length_mismatch_fails(a_len in 0usize..6, b_len in 0usize..6) {
        prop_assume!(a_len != b_len);
        let a = VectorTimestamp::new(a_len);
        let b = VectorTimestamp::new(b_len);
        let err = a.compare(&b).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Validation);
        if a_len > 0 {
            prop_assert_eq!(
                a.next_with(0, &b).unwrap_err(),
                ClockError::LengthMismatch { expected: a_len, actual: b_len }
            );
        }
    }

    /// Out-of-range indices fail with an index error.
    #[test]
    fn prop_index_out_of_bounds(len in 0usize..6, extra in 0usize..4) {
        let v = VectorTimestamp::new(len);
        prop_assert_eq!(v.next(len + extra).unwrap_err().kind(), ErrorKind::Index);
    }

    /// The byte encoding is an exact inverse.
    #[test]
    fn prop_bytes_round_trip(words in prop::collection::vec(any::<i64>(), 0..8)) {
        let v: VectorTimestamp = words.into_iter().map(LogicalTimestamp::from_long).collect();
        prop_assert_eq!(VectorTimestamp::from_bytes(&v.to_bytes()).unwrap(), v);
    }
}

#[test]
fn relation_examples() {
    assert_eq!(vector(&[1, 0]).compare(&vector(&[0, 1])).unwrap(), Relation::Concurrent);
    assert_eq!(vector(&[1, 0]).compare(&vector(&[2, 0])).unwrap(), Relation::HappensBefore);
    assert_eq!(vector(&[3, 7]).compare(&vector(&[3, 7])).unwrap(), Relation::Equal);
}
