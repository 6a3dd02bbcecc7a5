use proptest::prelude::*;
use causal_clock::error::ClockError;
use causal_clock::time::LogicalTimestamp;
use causal_clock::clock::LogicalClock;
use causal_clock::testing::{dynamic, logical};
use causal_clock::types::ProcessId;

fn arb_timestamp() -> impl Strategy<Value = LogicalTimestamp> {
    (0..=i64::MAX, any::<bool>()).prop_map(|(count, flip)| LogicalTimestamp::new(count, flip).unwrap())
}

proptest! {
    /// Byte and word codecs are exact inverses for every valid timestamp.
    #[test]
    fn prop_codec_round_trip(ts in arb_timestamp()) {
        prop_assert_eq!(LogicalTimestamp::from_bytes(ts.to_bytes()), ts);
        prop_assert_eq!(LogicalTimestamp::from_long(ts.to_long()), ts);
        prop_assert_eq!(LogicalTimestamp::try_from(&ts.to_bytes()[..]).unwrap(), ts);
    }

    /// Every 64-bit word decodes to a timestamp that encodes back to the same word.
    #[test]
    fn prop_every_word_decodes(word in any::<i64>()) {
        let ts = LogicalTimestamp::from_long(word);
        prop_assert!(ts.count() >= 0);
        prop_assert_eq!(ts.flip(), word < 0);
        prop_assert_eq!(ts.to_long(), word);
    }

    /// The next timestamp is strictly after the current one, wrap included.
    #[test]
    fn prop_next_is_after(ts in arb_timestamp()) {
        let next = ts.next();
        prop_assert!(ts.compare_to(&next).is_lt());
        prop_assert!(next.compare_to(&ts).is_gt());
        prop_assert!(next.is_after(&ts));
        prop_assert!(ts.is_before(&next));
    }

    /// Negative counts are rejected at construction.
    #[test]
    fn prop_negative_count_rejected(count in i64::MIN..0, flip in any::<bool>()) {
        prop_assert_eq!(LogicalTimestamp::new(count, flip), Err(ClockError::NegativeCount(count)));
    }

    /// compare_to is antisymmetric.
    #[test]
    fn prop_compare_antisymmetric(a in arb_timestamp(), b in arb_timestamp()) {
        prop_assert_eq!(a.compare_to(&b), b.compare_to(&a).reverse());
    }

    /// A merged tick is after both the clock's previous value and the remote timestamp.
    #[test]
    fn prop_tick_with_is_after_both(local in 0..i64::MAX, remote in 0..i64::MAX) {
        let local = LogicalTimestamp::from_count(local).unwrap();
        let remote = LogicalTimestamp::from_count(remote).unwrap();
        let clock = LogicalClock::with_initial(local);
        let result = clock.tick_with(remote);
        prop_assert!(result.is_after(&local));
        prop_assert!(result.is_after(&remote));
        prop_assert_eq!(clock.time(), result);
    }

    /// Successive ticks are strictly increasing within one flip cycle.
    #[test]
    fn prop_successive_ticks_increase(start in 0..1_000_000i64, remotes in prop::collection::vec(0..1_000_000i64, 1..20)) {
        let clock = LogicalClock::with_initial(LogicalTimestamp::from_count(start).unwrap());
        let mut previous = clock.time();
        for (i, remote) in remotes.into_iter().enumerate() {
            let remote = LogicalTimestamp::from_count(remote).unwrap();
            let next = if i % 2 == 0 { clock.tick() } else { clock.tick_with(remote) };
            prop_assert!(next.is_after(&previous));
            previous = next;
        }
    }
}

#[test]
fn next_at_boundaries() {
    let max = LogicalTimestamp::from_long(i64::MAX);
    assert!(max.next().is_after(&max));
    assert_eq!(max.next(), LogicalTimestamp::new(0, true).unwrap());

    let min_flipped = LogicalTimestamp::from_long(i64::MIN);
    assert_eq!(min_flipped, LogicalTimestamp::new(0, true).unwrap());
    assert!(min_flipped.next().is_after(&min_flipped));

    let max_flipped = LogicalTimestamp::from_long(-1);
    assert!(max_flipped.next().is_after(&max_flipped));
    assert_eq!(max_flipped.next(), LogicalTimestamp::ZERO);
}

#[test]
#[should_panic(expected = "fixture count must not be negative")]
fn logical_fixture_rejects_negative_count() {
    logical(-1);
}

#[test]
fn dynamic_fixture_ticks_each_process() {
    let ts = dynamic(&[("a", 2), ("b", 0)]);
    assert_eq!(ts.get(&ProcessId::from("a")).unwrap().timestamp, logical(2));
    assert_eq!(ts.get(&ProcessId::from("b")).unwrap().timestamp, logical(0));
}
