#![no_main]
use libfuzzer_sys::fuzz_target;
use verdeploy_core::output::commands::{escape_data, format_command};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let escaped = escape_data(s);
        assert!(!escaped.contains('\n'));
        assert!(!escaped.contains('\r'));

        // A command is always a single runner line
        let line = format_command("warning", s);
        assert!(line.starts_with("::warning::"));
        assert!(!line.contains('\n'));
    }
});
