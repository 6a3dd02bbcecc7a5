#![no_main]

// Harness: timestamp_roundtrip – the 8-byte word codec is an exact inverse.
// Strategy: decode arbitrary bytes, re-encode and compare bit for bit.

use libfuzzer_sys::fuzz_target;
use causal_clock::time::{LogicalTimestamp, VectorTimestamp};

fuzz_target!(|bytes: &[u8]| {
    if let Ok(ts) = LogicalTimestamp::try_from(bytes) {
        assert_eq!(&ts.to_bytes()[..], bytes);
        assert!(ts.next().is_after(&ts));
    }

    // Vector decoding only accepts whole words, and then re-encodes verbatim.
    match VectorTimestamp::from_bytes(bytes) {
        Ok(vector) => assert_eq!(vector.to_bytes(), bytes),
        Err(_) => assert_ne!(bytes.len() % 8, 0),
    }
});
