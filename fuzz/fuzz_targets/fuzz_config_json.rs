//! Fuzz target: `GuardConfig::from_json`
//!
//! Feeds arbitrary bytes to the configuration loader.
//!
//! Invariants checked:
//! - No panics under any input
//! - Any accepted config passes `validate()` and serialises back to JSON
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use robotguard::config::GuardConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(config) = GuardConfig::from_json(text) {
        assert!(config.validate().is_ok(), "loader accepted an invalid config");
        assert!(!config.to_json().is_empty());
    }
});
