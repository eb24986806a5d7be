#![no_main]

use libfuzzer_sys::fuzz_target;

use biolock_core::{classify, AuthErrorKind, BiometryClass, MessageTable};

fuzz_target!(|code: i32| {
    // classify is total: no input may panic, and every result carries a
    // policy and a resolvable message.
    let kind = classify(code);
    let _ = kind.policy();

    let table = MessageTable::default();
    for class in [
        BiometryClass::None,
        BiometryClass::Face,
        BiometryClass::Fingerprint,
    ] {
        assert!(!table.message(kind, class).is_empty());
    }

    // Codes outside the mapping table must fold into Other.
    if !(-10..=-1).contains(&code) {
        assert_eq!(kind, AuthErrorKind::Other);
    }
});
