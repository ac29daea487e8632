#![no_main]

use libfuzzer_sys::fuzz_target;
use newsproof_types::{ContentHash, InformationRecord, RoleSet};

fuzz_target!(|data: &[u8]| {
    // Stored LMDB values are bincode; decoding garbage must fail cleanly.
    if let Ok(record) = bincode::deserialize::<InformationRecord>(data) {
        // Whatever decodes re-encodes to something that decodes identically.
        let encoded = bincode::serialize(&record).expect("decoded record re-encodes");
        let again: InformationRecord = bincode::deserialize(&encoded).expect("round trip");
        assert_eq!(again, record);
    }

    let _ = bincode::deserialize::<RoleSet>(data);
    let _ = bincode::deserialize::<ContentHash>(data);
});
