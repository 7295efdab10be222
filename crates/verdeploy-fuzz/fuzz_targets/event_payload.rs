#![no_main]
use libfuzzer_sys::fuzz_target;
use verdeploy_core::event::EventPayload;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(payload) = EventPayload::parse(s) {
            let _ = payload.issue_number();
        }
    }
});
