//! Integration tests for store persistence.

use formforge_core::FormForgeError;
use formforge_forms::{ElementTemplate, ElementType};
use formforge_store::LocalStore;

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::load(dir.path().join("absent.json")).await.unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_save_and_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let mut store = LocalStore::new();
    let id = store.create("Customer Feedback").unwrap().id.clone();
    let mut doc = store.document(&id).unwrap().clone();
    doc.add(ElementTemplate::new(ElementType::Heading, "Tell us more"));
    doc.add(ElementTemplate::new(ElementType::MultiLine, "Comments"));
    store.save_document(&id, doc).unwrap();
    store.duplicate(&id).unwrap();
    store.save(&path).await.unwrap();

    let reloaded = LocalStore::load(&path).await.unwrap();
    assert_eq!(reloaded, store);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.summaries()[1].title, "Customer Feedback (Copy)");
    assert_eq!(reloaded.document(&id).unwrap().len(), 2);
}

#[tokio::test]
async fn test_load_reindexes_hand_edited_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let json = r#"{
      "forms": [
        {"id": "f1", "title": "Edited", "createdAt": "2024-05-01T10:00:00Z", "updatedAt": "2024-05-01T10:00:00Z"},
        {"id": "f2", "title": "No blob", "createdAt": "2024-05-01T10:00:00Z", "updatedAt": "2024-05-01T10:00:00Z"}
      ],
      "documents": {
        "f1": {
          "title": "Edited",
          "elements": [
            {"id": "a", "type": "heading", "label": "A", "index": 7},
            {"id": "b", "type": "single-line", "label": "B", "index": 7}
          ],
          "createdAt": "2024-05-01T10:00:00Z",
          "updatedAt": "2024-05-01T10:00:00Z"
        }
      }
    }"#;
    tokio::fs::write(&path, json).await.unwrap();

    let store = LocalStore::load(&path).await.unwrap();
    let doc = store.document("f1").unwrap();
    assert_eq!(doc.elements()[0].index(), 0);
    assert_eq!(doc.elements()[1].index(), 1);
    let blank = store.document("f2").unwrap();
    assert_eq!(blank.title, "No blob");
    assert!(blank.is_empty());
}

#[tokio::test]
async fn test_corrupt_file_is_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let err = LocalStore::load(&path).await.unwrap_err();
    assert!(matches!(err, FormForgeError::Serialization(_)));
}

#[tokio::test]
async fn test_duplicate_element_ids_are_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let json = r#"{
      "forms": [
        {"id": "f1", "title": "Twins", "createdAt": "2024-05-01T10:00:00Z", "updatedAt": "2024-05-01T10:00:00Z"}
      ],
      "documents": {
        "f1": {
          "title": "Twins",
          "elements": [
            {"id": "x", "type": "single-line", "label": "A"},
            {"id": "x", "type": "single-line", "label": "B"}
          ],
          "createdAt": "2024-05-01T10:00:00Z",
          "updatedAt": "2024-05-01T10:00:00Z"
        }
      }
    }"#;
    tokio::fs::write(&path, json).await.unwrap();

    let err = LocalStore::load(&path).await.unwrap_err();
    assert!(matches!(err, FormForgeError::Serialization(_)));
}
