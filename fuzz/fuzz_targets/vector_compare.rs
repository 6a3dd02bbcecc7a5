#![no_main]

// Harness: vector_compare – relation symmetry and merge monotonicity.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use causal_clock::causal::CausalOrder;
use causal_clock::time::{LogicalTimestamp, VectorTimestamp};
use causal_clock::types::Relation;

#[derive(Arbitrary, Debug, Clone)]
struct VectorPair {
    left: Vec<u32>,
    right: Vec<u32>,
    index: usize,
}

fn to_vector(counts: &[u32]) -> VectorTimestamp {
    counts
        .iter()
        .map(|c| LogicalTimestamp::from_long(i64::from(*c)))
        .collect()
}

fuzz_target!(|pair: VectorPair| {
    let left = to_vector(&pair.left);
    let right = to_vector(&pair.right);

    match (left.compare(&right), right.compare(&left)) {
        (Ok(a), Ok(b)) => assert_eq!(a, b.reverse()),
        (Err(_), Err(_)) => assert_ne!(left.len(), right.len()),
        other => panic!("asymmetric failure: {:?}", other),
    }

    if left.is_empty() || left.len() != right.len() {
        return;
    }
    let index = pair.index % left.len();
    let merged = left.next_with(index, &right).expect("lengths checked");
    assert_eq!(merged.compare(&left).expect("lengths checked"), Relation::HappensAfter);
    for (i, (slot, theirs)) in merged.iter().zip(right.iter()).enumerate() {
        if i != index {
            assert!(!slot.is_before(theirs));
        }
    }
});
