//! Persistence gateway and snapshot transcoder, end to end: write-through
//! from App mutations, per-key corruption recovery, and the import/export
//! round trip through real files.

use std::fs;

use aflambox_lib::app::{App, AsyncAction, CurrentScreen};
use aflambox_lib::catalog::default_catalog;
use aflambox_lib::snapshot::Snapshot;
use aflambox_lib::state::ViewState;
use aflambox_lib::store::PersistStore;
use aflambox_lib::ui;
use ratatui::{backend::TestBackend, Terminal};

fn app_with_store(dir: &std::path::Path) -> App {
    let store = PersistStore::new(dir.to_path_buf());
    let loaded = store.load();
    App::new(loaded, Some(store))
}

#[test]
fn mutations_write_through_and_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let (first_id, second_id, third_id);
    {
        let mut app = app_with_store(dir.path());
        first_id = app.catalog[0].id;
        second_id = app.catalog[1].id;
        third_id = app.catalog[2].id;
        app.toggle_watchlist(first_id);
        app.set_rating(second_id, 5);
        app.set_progress(third_id, 41.5);
    }

    // "Restart": a fresh App from the same store.
    let app = app_with_store(dir.path());
    assert!(app.prefs.is_in_watchlist(first_id));
    assert_eq!(app.prefs.rating(second_id), Some(5));
    assert_eq!(app.prefs.progress(third_id), 41.5);
    // ViewState is transient and always comes back at defaults.
    assert_eq!(app.view, ViewState::default());
}

#[test]
fn corrupting_one_key_on_disk_only_loses_that_key() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut app = app_with_store(dir.path());
        let id = app.catalog[0].id;
        app.toggle_watchlist(id);
        app.set_rating(id, 2);
    }

    fs::write(dir.path().join("watchlist.json"), "{{{{").unwrap();

    let app = app_with_store(dir.path());
    assert!(app.prefs.watchlist.is_empty(), "corrupt key reverts to default");
    assert_eq!(app.prefs.rating(app.catalog[0].id), Some(2));
    assert_eq!(app.catalog, default_catalog());
}

#[test]
fn export_file_import_round_trip_reproduces_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_store(dir.path());
    let id = app.catalog[0].id;
    app.toggle_watchlist(id);
    app.set_rating(id, 3);
    app.set_progress(id, 77.0);

    let export_path = dir.path().join("aflambox_data.json");
    app.export_snapshot().write_to(&export_path).unwrap();

    // Import into a second, pristine app.
    let other_dir = tempfile::tempdir().unwrap();
    let mut other = app_with_store(other_dir.path());
    let snapshot = Snapshot::read_from(&export_path).unwrap();
    other.handle_async_action(AsyncAction::ImportLoaded(Ok(snapshot)));

    assert_eq!(other.catalog, app.catalog);
    assert_eq!(other.prefs, app.prefs);
    assert_eq!(other.view, ViewState::default());
}

#[test]
fn import_of_truncated_snapshot_applies_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_store(dir.path());
    let id = app.catalog[0].id;
    app.toggle_watchlist(id);
    let before_prefs = app.prefs.clone();
    let before_catalog = app.catalog.clone();

    // A snapshot with watchProgress stripped out.
    let mut value: serde_json::Value =
        serde_json::from_str(&app.export_snapshot().to_json().unwrap()).unwrap();
    value.as_object_mut().unwrap().remove("watchProgress");
    let bad_path = dir.path().join("bad.json");
    fs::write(&bad_path, value.to_string()).unwrap();

    let result = Snapshot::read_from(&bad_path);
    assert!(result.is_err());
    app.handle_async_action(AsyncAction::ImportLoaded(result));

    assert_eq!(app.prefs, before_prefs, "no partial mutation");
    assert_eq!(app.catalog, before_catalog);
    assert!(app.settings_error.is_some());
}

#[test]
fn detail_view_survives_an_import_with_overrange_progress() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_store(dir.path());
    let id = app.catalog[0].id;

    // A snapshot whose progress breaks the 0-100 contract but passes the
    // shape check.
    let mut value: serde_json::Value =
        serde_json::from_str(&app.export_snapshot().to_json().unwrap()).unwrap();
    let mut progress = serde_json::Map::new();
    progress.insert(id.to_string(), serde_json::json!(150.0));
    value["watchProgress"] = serde_json::Value::Object(progress);

    let snapshot = Snapshot::parse(&value.to_string()).unwrap();
    app.handle_async_action(AsyncAction::ImportLoaded(Ok(snapshot)));
    assert_eq!(app.prefs.progress(id), 100.0, "ingest clamps the value");

    // The progress gauge on the detail screen must render, not assert.
    app.detail_id = Some(id);
    app.current_screen = CurrentScreen::Detail;
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| ui::ui(f, &mut app)).unwrap();
}

#[test]
fn imported_catalog_replaces_the_store_on_next_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_store(dir.path());

    let mut small = default_catalog();
    small.truncate(2);
    let snapshot = Snapshot::from_state(&small, &Default::default());
    app.handle_async_action(AsyncAction::ImportLoaded(Ok(snapshot)));
    assert_eq!(app.catalog.len(), 2);

    let reloaded = app_with_store(dir.path());
    assert_eq!(reloaded.catalog.len(), 2, "import persisted the override");
}
