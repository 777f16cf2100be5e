#![no_main]

use cutover::config::interpolate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = interpolate(input, |name| (name.len() % 2 == 0).then(|| name.to_lowercase()));

        // Escaping every `$` must always round-trip
        let escaped = input.replace('$', "$$");
        assert_eq!(interpolate(&escaped, |_| None).as_deref(), Ok(input));
    }
});
