#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let fixed = fapiao::tax_id::correct(s);
        assert_eq!(fixed.len(), s.len());
        if fapiao::tax_id::is_valid(s) {
            assert_eq!(fixed, s);
        }
    }
});
