//! Tests for workspace save/load.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::tree::{Direction, Position, RatioPolicy};
use crate::workspace::Workspace;
use oneai_config::AppCatalog;

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Err(PersistenceError::Store("disk on fire".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Store("disk on fire".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Store("disk on fire".into()))
    }
}

fn store_with(raw: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.set(WORKSPACE_KEY, raw).unwrap();
    store
}

#[test]
fn missing_record_loads_default() {
    let store = MemoryStore::new();
    assert_eq!(load(&store), Workspace::builtin_default());
    assert!(try_load(&store).unwrap().is_none());
}

#[test]
fn corrupt_json_loads_default() {
    let store = store_with("{\"layout\": [");
    assert!(matches!(try_load(&store), Err(PersistenceError::Corrupt(_))));
    let ws = load(&store);
    assert_eq!(ws, Workspace::builtin_default());
    assert_eq!(ws.visible_tab_ids().len(), 3);
}

#[test]
fn dangling_tab_reference_loads_default() {
    let raw = r#"{
        "layout": {"root": "root", "nodes": [
            {"type": "split", "id": "root", "direction": "vertical", "children": ["p1", "p2"]},
            {"type": "single", "id": "p1", "tabId": "a-1"},
            {"type": "single", "id": "p2", "tabId": "ghost"}]},
        "tabs": [{"id": "a-1", "appId": "openai", "title": "ChatGPT", "createdAt": 1}],
        "activeTabId": "a-1"
    }"#;
    assert_eq!(load(&store_with(raw)), Workspace::builtin_default());
}

#[test]
fn structural_errors_load_default() {
    let one_child = r#"{
        "layout": {"root": "root", "nodes": [
            {"type": "split", "id": "root", "direction": "horizontal", "children": ["p1"], "sizes": [1.0]},
            {"type": "single", "id": "p1", "tabId": "a-1"}]},
        "tabs": [{"id": "a-1", "appId": "openai", "title": "ChatGPT", "createdAt": 1}]
    }"#;
    let bad_sizes = r#"{
        "layout": {"root": "root", "nodes": [
            {"type": "split", "id": "root", "direction": "horizontal", "children": ["p1", "p2"], "sizes": [0.9, 0.9]},
            {"type": "single", "id": "p1", "tabId": "a-1"},
            {"type": "single", "id": "p2", "tabId": "b-2"}]},
        "tabs": [{"id": "a-1", "appId": "openai", "title": "ChatGPT", "createdAt": 1},
                 {"id": "b-2", "appId": "grok", "title": "Grok", "createdAt": 2}]
    }"#;
    let unknown_active = r#"{
        "layout": {"root": "p1", "nodes": [{"type": "single", "id": "p1", "tabId": "a-1"}]},
        "tabs": [{"id": "a-1", "appId": "openai", "title": "ChatGPT", "createdAt": 1}],
        "activeTabId": "zzz"
    }"#;
    let duplicate_ids = r#"{
        "layout": {"root": "root", "nodes": [
            {"type": "split", "id": "root", "direction": "horizontal", "children": ["p1", "p1"]},
            {"type": "single", "id": "p1", "tabId": "a-1"},
            {"type": "single", "id": "p1", "tabId": "b-2"}]},
        "tabs": [{"id": "a-1", "appId": "openai", "title": "ChatGPT", "createdAt": 1},
                 {"id": "b-2", "appId": "grok", "title": "Grok", "createdAt": 2}]
    }"#;
    let shared_child = r#"{
        "layout": {"root": "root", "nodes": [
            {"type": "split", "id": "root", "direction": "horizontal", "children": ["s1", "p1"]},
            {"type": "split", "id": "s1", "direction": "vertical", "children": ["p1", "p2"]},
            {"type": "single", "id": "p1", "tabId": "a-1"},
            {"type": "single", "id": "p2", "tabId": "b-2"}]},
        "tabs": [{"id": "a-1", "appId": "openai", "title": "ChatGPT", "createdAt": 1},
                 {"id": "b-2", "appId": "grok", "title": "Grok", "createdAt": 2}]
    }"#;
    let unreachable = r#"{
        "layout": {"root": "p1", "nodes": [
            {"type": "single", "id": "p1", "tabId": "a-1"},
            {"type": "single", "id": "p2", "tabId": "b-2"}]},
        "tabs": [{"id": "a-1", "appId": "openai", "title": "ChatGPT", "createdAt": 1},
                 {"id": "b-2", "appId": "grok", "title": "Grok", "createdAt": 2}]
    }"#;
    for raw in [one_child, bad_sizes, unknown_active, duplicate_ids, shared_child, unreachable] {
        let store = store_with(raw);
        assert!(matches!(try_load(&store), Err(PersistenceError::Corrupt(_))), "{raw}");
        assert_eq!(load(&store), Workspace::builtin_default());
    }
}

#[test]
fn record_without_sizes_gets_equal_shares() {
    let raw = r#"{
        "layout": {"root": "root", "nodes": [
            {"type": "split", "id": "root", "direction": "horizontal", "children": ["pane-1", "pane-2", "pane-3"]},
            {"type": "single", "id": "pane-1", "tabId": "deepseek-1763100371335"},
            {"type": "single", "id": "pane-2", "tabId": "tencent-yuanbao-1763100374334"},
            {"type": "single", "id": "pane-3", "tabId": "moonshot-1763100396085"}]},
        "tabs": [{"id": "deepseek-1763100371335", "appId": "deepseek", "title": "DeepSeek", "createdAt": 1763100371335},
                 {"id": "tencent-yuanbao-1763100374334", "appId": "tencent-yuanbao", "title": "Tencent Yuanbao", "createdAt": 1763100374334},
                 {"id": "moonshot-1763100396085", "appId": "moonshot", "title": "Kimi", "createdAt": 1763100396085}],
        "activeTabId": "deepseek-1763100371335"
    }"#;
    let ws = try_load(&store_with(raw)).unwrap().unwrap();
    assert_eq!(ws, Workspace::builtin_default());
}

#[test]
fn saved_layout_is_flat_in_depth_first_order() {
    let store = MemoryStore::new();
    save(&store, &Workspace::builtin_default());
    let record: WorkspaceRecord =
        serde_json::from_str(&store.get(WORKSPACE_KEY).unwrap().unwrap()).unwrap();
    let layout = record.layout.unwrap();
    assert_eq!(layout.root, "root");
    let ids: Vec<&str> = layout
        .nodes
        .iter()
        .map(|n| match n {
            NodeRecord::Split { id, .. } | NodeRecord::Single { id, .. } => id.as_str(),
        })
        .collect();
    assert_eq!(ids, vec!["root", "pane-1", "pane-2", "pane-3"]);
}

#[test]
fn detached_tabs_and_empty_layout_round_trip() {
    let store = MemoryStore::new();
    let mut ws = Workspace::builtin_default();
    ws.detach_tab("moonshot-1763100396085").unwrap();
    save(&store, &ws);
    assert_eq!(load(&store), ws);

    let mut empty = Workspace::builtin_default();
    for id in empty.visible_tab_ids() {
        empty.detach_tab(&id).unwrap();
    }
    assert!(empty.layout().is_empty());
    save(&store, &empty);
    let loaded = load(&store);
    assert_eq!(loaded, empty);
    assert_eq!(loaded.tabs().len(), 3);
}

#[test]
fn save_failure_is_swallowed() {
    let ws = Workspace::builtin_default();
    save(&FailingStore, &ws);
    assert!(try_save(&FailingStore, &ws).is_err());
    assert_eq!(load(&FailingStore), Workspace::builtin_default());
}

#[test]
fn clear_resets_to_default() {
    let store = MemoryStore::new();
    let mut ws = Workspace::builtin_default();
    ws.open_app(&AppCatalog::builtin(), "openai").unwrap();
    save(&store, &ws);
    clear(&store).unwrap();
    assert_eq!(load(&store), Workspace::builtin_default());
}

#[test]
fn file_store_round_trip_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut ws = Workspace::builtin_default();
    ws.split_pane(
        &AppCatalog::builtin(),
        "moonshot-1763100396085",
        Direction::Vertical,
        "stepfun",
        Position::After,
    )
    .unwrap();
    save(&FileStore::new(&path), &ws);
    assert_eq!(load(&FileStore::new(&path)), ws);
}

#[test]
fn random_workspaces_round_trip_exactly() {
    let catalog = AppCatalog::builtin();
    let app_ids: Vec<String> = catalog.iter().map(|a| a.id.clone()).collect();
    let mut rng = StdRng::seed_from_u64(42);
    let store = MemoryStore::new();
    let mut ws = Workspace::builtin_default();

    for step in 0..400 {
        let app = &app_ids[rng.gen_range(0..app_ids.len())];
        let visible = ws.visible_tab_ids();
        let _ = match rng.gen_range(0..6) {
            0 => ws.open_app(&catalog, app).map(|_| ()),
            1 if !visible.is_empty() => {
                let target = &visible[rng.gen_range(0..visible.len())];
                let dir = if rng.gen_bool(0.5) {
                    Direction::Horizontal
                } else {
                    Direction::Vertical
                };
                ws.split_pane(&catalog, target, dir, app, Position::After)
                    .map(|_| ())
            }
            2 if visible.len() > 1 => {
                let target = visible[rng.gen_range(0..visible.len())].clone();
                ws.close_tab(&target).map(|_| ())
            }
            3 if !visible.is_empty() => {
                let target = visible[rng.gen_range(0..visible.len())].clone();
                let root = ws.layout().root().cloned().unwrap_or_default();
                ws.move_tab(&target, &root, rng.gen_range(0..4), RatioPolicy::Preserve)
            }
            4 => {
                let root = ws.layout().root().cloned().unwrap_or_default();
                let n = ws.layout().leaf_count();
                let raw: Vec<f64> = (0..n).map(|_| rng.gen_range(0.1..1.0)).collect();
                let sum: f64 = raw.iter().sum();
                let ratios: Vec<f64> = raw.iter().map(|r| r / sum).collect();
                ws.resize_split(&root, &ratios)
            }
            _ => {
                ws.focus_next();
                Ok(())
            }
        };
        ws.validate().unwrap();

        if step % 10 == 0 {
            save(&store, &ws);
            assert_eq!(load(&store), ws, "round trip failed at step {step}");
        }
    }
}

#[test]
fn deeply_nested_workspace_round_trips() {
    let catalog = AppCatalog::builtin();
    let store = MemoryStore::new();
    let mut ws = Workspace::builtin_default();
    let mut newest = "moonshot-1763100396085".to_string();
    for i in 0..200 {
        let dir = if i % 2 == 0 {
            Direction::Vertical
        } else {
            Direction::Horizontal
        };
        newest = ws
            .split_pane(&catalog, &newest, dir, "grok", Position::After)
            .unwrap();
    }
    ws.validate().unwrap();
    assert_eq!(ws.visible_tab_ids().len(), 203);

    try_save(&store, &ws).unwrap();
    assert_eq!(try_load(&store).unwrap().as_ref(), Some(&ws));
    assert_eq!(load(&store), ws);
}

#[test]
fn out_of_range_creation_time_loads_default() {
    let raw = r#"{"tabs":[{"id":"x","appId":"grok","title":"G","createdAt":18446744073709551615}],"layout":null}"#;
    let store = store_with(raw);
    assert!(matches!(try_load(&store), Err(PersistenceError::Corrupt(_))));
    let mut ws = load(&store);
    assert_eq!(ws, Workspace::builtin_default());
    ws.open_app(&AppCatalog::builtin(), "grok").unwrap();
}
