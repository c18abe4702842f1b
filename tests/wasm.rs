//! Smoke tests for the exported API under a real wasm runtime
//! (`wasm-pack test --node`).
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use blame_lens_core::{
    age_tier, aggregate_blame, is_bug_fix, parse_history, parse_line_attribution, relative_age,
    BlameSession,
};

#[wasm_bindgen_test]
fn line_attribution_round_trips_through_json() {
    let raw = b"^abcdef0123456789abcdef0123456789abcdef01 1 1 1\nauthor Alice\nauthor-time 1700000000\nsummary Initial commit\n";
    let parsed: serde_json::Value = serde_json::from_str(&parse_line_attribution(raw)).unwrap();
    assert_eq!(parsed["commitHash"], "abcdef0123456789abcdef0123456789abcdef01");
    assert_eq!(parse_line_attribution(b""), "null");
}

#[wasm_bindgen_test]
fn history_drops_trailing_record() {
    let raw = "h1\u{1f}A\u{1f}2024-01-01\u{1f}msg1\u{1e}h2\u{1f}B\u{1f}2024-01-02\u{1f}msg2\u{1e}";
    let parsed: serde_json::Value = serde_json::from_str(&parse_history(raw.as_bytes())).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[wasm_bindgen_test]
fn aggregate_totals_match() {
    let raw = b"1111111111111111111111111111111111111111 1 1 1\nauthor Alice\nauthor-time 1700000000\nsummary Fix bug\n\tx\n";
    let parsed: serde_json::Value = serde_json::from_str(&aggregate_blame(raw)).unwrap();
    assert_eq!(parsed["totalLines"], 1);
    assert_eq!(parsed["bugFixLineCount"], 1);
}

#[wasm_bindgen_test]
fn classification_exports() {
    assert_eq!(relative_age(0.0, 3_600.0), "1 hour ago");
    assert_eq!(age_tier(0.0, 800.0 * 86_400.0), "ancient");
    assert!(is_bug_fix("hotfix for login"));
}

#[wasm_bindgen_test]
fn session_debounces() {
    let mut session = BlameSession::new("{}");
    let ticket = session.schedule_refresh(0.0);
    assert!(!session.fire_refresh(ticket, 100.0));
    assert!(session.fire_refresh(ticket, 500.0));
}
