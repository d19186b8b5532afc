
use scroll_restore::{storage_key, History, ScrollPoint};
use serde_json::{json, Value};

use fixture::Page;

#[test]
fn reload_restores_offsets_after_the_first_round_trip() {
    let page = Page::new("/app");
    let mut first_load = page.load();
    page.viewport.scroll_to(ScrollPoint::new(33.0, 44.0));
    first_load.on_before_unload();
    let epoch = first_load.reset_token();
    drop(first_load);

    // a reloaded page comes up at the top before any content arrives
    page.viewport.scroll_to(ScrollPoint::ORIGIN);
    let second_load = page.load();

    assert_eq!(second_load.reset_token(), epoch);
    assert_eq!(second_load.current_history_index(), 0);
    assert_eq!(second_load.recorded_positions(), 1);
    assert!(second_load.has_pending_restore());
    assert_eq!(page.viewport.position(), ScrollPoint::ORIGIN);

    page.round_trips.fire();

    assert_eq!(page.viewport.position(), ScrollPoint::new(33.0, 44.0));
    assert!(!second_load.has_pending_restore());
}

#[test]
fn fractional_offsets_persist_exactly_and_restore_whole() {
    let page = Page::new("/app");
    let mut first_load = page.load();
    page.viewport.scroll_to(ScrollPoint::new(10.7, 20.2));
    first_load.on_before_unload();
    let epoch = first_load.reset_token();
    drop(first_load);

    let raw = page.storage.get(&storage_key(epoch)).expect("trail stored");
    let decoded: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded, json!({ "xPositions": [10.7], "yPositions": [20.2] }));

    page.viewport.scroll_to(ScrollPoint::ORIGIN);
    let _second_load = page.load();
    page.round_trips.fire();

    assert_eq!(page.viewport.position(), ScrollPoint::new(10.0, 20.0));
}

#[test]
fn reload_with_evicted_storage_starts_over() {
    let capture = fixture::capture_logs();
    let page = Page::new("/app");
    let mut first_load = page.load();
    page.viewport.scroll_to(ScrollPoint::new(3.0, 30.0));
    first_load.on_before_unload();
    let epoch = first_load.reset_token();
    drop(first_load);

    page.storage.clear();
    let second_load = page.load();

    assert_ne!(second_load.reset_token(), epoch);
    assert_eq!(second_load.current_history_index(), 0);
    assert_eq!(second_load.recorded_positions(), 0);
    assert!(!second_load.has_pending_restore());
    assert!(capture.any_line_contains("has no positions"));
}

#[test]
fn reload_with_unreachable_storage_starts_over() {
    let capture = fixture::capture_logs();
    let page = Page::new("/app");
    let mut first_load = page.load();
    page.viewport.scroll_to(ScrollPoint::new(3.0, 30.0));
    first_load.on_before_unload();
    let epoch = first_load.reset_token();
    drop(first_load);

    page.storage.set_fail_reads(true);
    let second_load = page.load();

    assert_ne!(second_load.reset_token(), epoch);
    assert_eq!(second_load.current_history_index(), 0);
    assert!(capture.any_line_contains("failed to get session storage"));
}

#[test]
fn undecodable_stored_trail_starts_over() {
    let capture = fixture::capture_logs();
    let page = Page::new("/app");
    page.storage.insert("scrollPos-41", "{broken");
    let mut history = page.history.clone();
    history.replace_state(
        json!({ "historyIndex": 0, "historyResetToken": 41.0 }),
        "/app",
    );

    let restorer = page.load();

    assert_ne!(restorer.reset_token().value(), 41.0);
    assert_eq!(restorer.current_history_index(), 0);
    assert!(capture.any_line_contains("not decodable"));
}

#[test]
fn stored_axes_of_unequal_length_zip_to_pairs() {
    let page = Page::new("/app");
    page.storage
        .insert("scrollPos-41", r#"{"xPositions":[12,99],"yPositions":[34]}"#);
    let mut history = page.history.clone();
    history.replace_state(
        json!({ "historyIndex": 0, "historyResetToken": 41.0 }),
        "/app",
    );

    let restorer = page.load();

    assert_eq!(restorer.recorded_positions(), 1);
    page.round_trips.fire();
    assert_eq!(page.viewport.position(), ScrollPoint::new(12.0, 34.0));
}

#[test]
fn stored_trail_shorter_than_the_entry_depth_starts_over() {
    let page = Page::new("/app");
    page.storage
        .insert("scrollPos-41", r#"{"xPositions":[12],"yPositions":[34]}"#);
    let mut history = page.history.clone();
    history.replace_state(
        json!({ "historyIndex": 1, "historyResetToken": 41.0 }),
        "/app",
    );

    let restorer = page.load();

    assert_eq!(restorer.current_history_index(), 0);
    assert_eq!(restorer.recorded_positions(), 0);
    assert_ne!(restorer.reset_token().value(), 41.0);
    assert_eq!(page.viewport.position(), ScrollPoint::ORIGIN);
}

#[test]
fn each_epoch_keeps_its_own_storage_entry() {
    let page = Page::new("/app");
    let mut first_load = page.load();
    page.viewport.scroll_to(ScrollPoint::new(1.0, 100.0));
    first_load.on_before_unload();
    let first_epoch = first_load.reset_token();
    drop(first_load);

    // leave the site in a way that breaks tracking, then come back and unload
    let mut second_load = page.load();
    second_load.on_pop_state_event(None, false);
    let second_epoch = second_load.reset_token();
    page.viewport.scroll_to(ScrollPoint::new(2.0, 200.0));
    second_load.on_before_unload();

    assert_ne!(first_epoch, second_epoch);
    assert!(page.storage.get(&storage_key(first_epoch)).is_some());
    assert!(page.storage.get(&storage_key(second_epoch)).is_some());
    assert_eq!(page.storage.len(), 2);
}
