#![no_main]

use libfuzzer_sys::fuzz_target;

use biolock_core::{classify, BiometryClass, MessageTable};

fuzz_target!(|data: &[u8]| {
    // Arbitrary override documents must either parse into a usable table or
    // fail cleanly; a parsed table resolves a message for every kind.
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(table) = serde_json::from_str::<MessageTable>(text) {
            for code in -12..=2 {
                let kind = classify(code);
                let _ = table.message(kind, BiometryClass::Face);
                let _ = table.message(kind, BiometryClass::Fingerprint);
            }
        }
    }
});
