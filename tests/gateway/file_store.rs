//! The gateway backed by a JSON document on disk.

use std::fs;

use askgate::store::{AccountStore, JsonFileStore};
use serde_json::{json, Value};

use crate::support::{harness_with, today, StubCompletion};

#[tokio::test]
async fn corrupted_document_self_heals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    fs::write(&path, b"\x00\x01 definitely not json").unwrap();

    assert!(JsonFileStore::new(&path).load().unwrap().is_empty());

    fs::write(&path, b"{ broken").unwrap();
    let h = harness_with(JsonFileStore::new(&path), StubCompletion::answering());
    h.service
        .dispatch("register", json!({ "email": "a@example.com", "password": "pw" }))
        .await
        .unwrap();
    h.service
        .dispatch("login", json!({ "email": "a@example.com", "password": "pw" }))
        .await
        .unwrap();

    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document.as_object().unwrap().len(), 1);
    let backups = fs::read_dir(dir.path())
        .unwrap()
        .filter(|entry| {
            entry
                .as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with("users.json.corrupt-")
        })
        .count();
    assert_eq!(backups, 2);
}

#[tokio::test]
async fn document_layout_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let h = harness_with(JsonFileStore::new(&path), StubCompletion::answering());

    h.service
        .dispatch("register", json!({ "email": "a@example.com", "password": "pw" }))
        .await
        .unwrap();
    h.service
        .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
        .await
        .unwrap();

    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let record = &document["a@example.com"];
    assert_eq!(record["count"], 1);
    assert_eq!(record["last"], today().format("%Y-%m-%d").to_string());
    assert!(record["password"].as_str().unwrap().starts_with("$argon2"));
}

#[tokio::test]
async fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");

    {
        let h = harness_with(JsonFileStore::new(&path), StubCompletion::answering());
        h.service
            .dispatch("register", json!({ "email": "a@example.com", "password": "pw" }))
            .await
            .unwrap();
        for _ in 0..3 {
            h.service
                .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
                .await
                .unwrap();
        }
    }

    let h = harness_with(JsonFileStore::new(&path), StubCompletion::answering());
    h.service
        .dispatch("login", json!({ "email": "a@example.com", "password": "pw" }))
        .await
        .unwrap();
    let result = h
        .service
        .dispatch("remaining", json!({ "email": "a@example.com" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "remaining": askgate::DAILY_LIMIT - 3 }));
}

#[tokio::test]
async fn legacy_plaintext_document_still_logs_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    fs::write(
        &path,
        json!({ "old@example.com": { "password": "hunter2", "count": 2, "last": "2024-11-05" } })
            .to_string(),
    )
    .unwrap();

    let h = harness_with(JsonFileStore::new(&path), StubCompletion::answering());
    h.service
        .dispatch("login", json!({ "email": "old@example.com", "password": "hunter2" }))
        .await
        .unwrap();

    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let stored = document["old@example.com"]["password"].as_str().unwrap();
    assert!(stored.starts_with("$argon2"));
    assert_eq!(document["old@example.com"]["count"], 2);
}
