#![no_main]

use cutover::domain::value_objects::quote;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = std::str::from_utf8(data) {
        let quoted = quote(value);
        assert!(quoted.starts_with('"') && quoted.ends_with('"'));

        // Undo the escaping and compare with the input
        let mut unquoted = String::new();
        let mut chars = quoted[1..quoted.len() - 1].chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                unquoted.extend(chars.next());
            } else {
                unquoted.push(c);
            }
        }
        assert_eq!(unquoted, value);
    }
});
