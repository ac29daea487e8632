#![no_main]

use libfuzzer_sys::fuzz_target;
use newsproof_crypto::{fingerprint_text, normalize_content};
use newsproof_types::{ContentHash, Identity};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Identity parsing is idempotent on its own output.
    if let Ok(identity) = Identity::parse(text) {
        let reparsed = Identity::parse(identity.as_str()).expect("normalized identity parses");
        assert_eq!(reparsed, identity);
    }

    // A parsed hash displays back to an equal hash.
    if let Ok(hash) = ContentHash::from_hex(text) {
        assert_eq!(ContentHash::from_hex(&hash.to_string()).ok(), Some(hash));
    }

    // Fingerprints depend only on the normalized text.
    let normalized = normalize_content(text);
    assert_eq!(fingerprint_text(text), fingerprint_text(&normalized));
});
