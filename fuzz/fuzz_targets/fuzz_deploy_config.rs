#![no_main]

use std::path::Path;

use cutover::config::{parse_with_warnings, ResolveOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and resolving arbitrary deploy files must never panic
        if let Ok((file, _warnings)) = parse_with_warnings(content, Path::new(".deploy.yml")) {
            for name in file.target_names() {
                let _ = file.resolve(name, Path::new("."), &ResolveOptions::default());
            }
        }
    }
});
