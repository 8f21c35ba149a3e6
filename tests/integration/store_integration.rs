use std::sync::Arc;

use photoadmin::api::PhotoApi;
use photoadmin::config::TreeConfig;
use photoadmin::error::StorageError;
use photoadmin::store::{MemoryRecordStore, RecordStore, SledRecordStore, StatusUpdate};
use photoadmin::types::Status;
use serde_json::json;
use tempfile::TempDir;

use super::support::{mounted_records, SESSION_BASE};

fn seeded_sled(dir: &TempDir) -> SledRecordStore {
    let store = SledRecordStore::open(&dir.path().join("store"), "photos").unwrap();
    for record in mounted_records() {
        store.upsert(&record).unwrap();
    }
    store
}

#[test]
fn sled_and_memory_stores_build_the_same_statistics() {
    let dir = TempDir::new().unwrap();
    let tree_config = TreeConfig {
        base_path: SESSION_BASE.to_string(),
        ..TreeConfig::default()
    };
    let sled_api = PhotoApi::new(Arc::new(seeded_sled(&dir)), &tree_config);
    let memory_api = PhotoApi::new(
        Arc::new(MemoryRecordStore::with_records(mounted_records())),
        &tree_config,
    );

    assert_eq!(
        sled_api.statistics(None).unwrap(),
        memory_api.statistics(None).unwrap()
    );
}

#[test]
fn status_batch_is_all_or_nothing() {
    let dir = TempDir::new().unwrap();
    let store = seeded_sled(&dir);
    let anna = format!("{}/2023/Anna/001.jpg", SESSION_BASE);

    let err = store
        .apply_status_updates(&[
            StatusUpdate {
                path: anna.clone(),
                status: Status::Approved,
            },
            StatusUpdate {
                path: "   ".to_string(),
                status: Status::Approved,
            },
        ])
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidPath(_)));
    assert_eq!(
        store.get(&anna).unwrap().unwrap().status,
        Some(Status::Review)
    );
}

#[test]
fn updates_are_visible_to_the_next_rebuild() {
    let dir = TempDir::new().unwrap();
    let api = PhotoApi::new(
        Arc::new(seeded_sled(&dir)),
        &TreeConfig {
            base_path: SESSION_BASE.to_string(),
            ..TreeConfig::default()
        },
    );
    let before = api.statistics(Some("2023")).unwrap();
    assert_eq!(before.by_status.get(Some(&Status::Approved)), 0);

    let response = api
        .update_statuses(&json!({
            "updates": [
                {"path": format!("{}/2023/Anna/001.jpg", SESSION_BASE), "status": "approved"},
                {"path": format!("{}/2023/Boris/001.jpg", SESSION_BASE), "status": "approved"},
                {"path": format!("{}/2023/New/003.jpg", SESSION_BASE), "status": "review"}
            ]
        }))
        .unwrap();
    assert_eq!(response.updated_count, 3);

    let after = api.statistics(Some("2023")).unwrap();
    assert_eq!(after.by_status.get(Some(&Status::Approved)), 2);
    assert_eq!(after.by_status.get(None), 0);
    assert_eq!(after.total_files, 4);
    assert_eq!(after.directories, 3);
}

#[test]
fn unknown_statuses_survive_persistence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store");
    {
        let store = SledRecordStore::open(&path, "photos").unwrap();
        store
            .apply_status_updates(&[StatusUpdate {
                path: "/p/x.jpg".to_string(),
                status: Status::from("needs-retouch"),
            }])
            .unwrap();
        store.flush().unwrap();
    }
    let store = SledRecordStore::open(&path, "photos").unwrap();
    assert_eq!(
        store.get("/p/x.jpg").unwrap().unwrap().status,
        Some(Status::Other("needs-retouch".to_string()))
    );
}
