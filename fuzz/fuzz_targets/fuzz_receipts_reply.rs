#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Malformed replies and entries are errors, never panics.
        if let Ok(values) = fapiao::parse_receipts_reply(s) {
            for value in &values {
                let _ = fapiao::RawReceiptRecord::from_value(value);
            }
        }
    }
});
