#![no_main]
use libfuzzer_sys::fuzz_target;
use verdeploy_core::event::strip_branch_prefix;
use verdeploy_core::types::extract_deployment_url;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever comes back must be a trimmed slice of one input line
        if let Some(url) = extract_deployment_url(s) {
            assert!(!url.is_empty());
            assert_eq!(url, url.trim());
            assert!(s.lines().any(|line| line.trim() == url));
        }

        let branch = strip_branch_prefix(s);
        assert!(s.ends_with(branch));
    }
});
