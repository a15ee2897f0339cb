//! remaining / daily rollover through command dispatch.

use askgate::microsvc::HandlerError;
use askgate::store::InMemoryStore;
use askgate::{Account, Accounts, DAILY_LIMIT};
use serde_json::json;

use crate::support::{harness, harness_with, today, StubCompletion};

#[tokio::test]
async fn fresh_account_has_full_quota() {
    let h = harness();
    h.service
        .dispatch("register", json!({ "email": "a@example.com", "password": "pw" }))
        .await
        .unwrap();

    let result = h
        .service
        .dispatch("remaining", json!({ "email": "a@example.com" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "remaining": DAILY_LIMIT }));
}

#[tokio::test]
async fn remaining_for_unknown_identity_is_not_found() {
    let h = harness();
    let err = h
        .service
        .dispatch("remaining", json!({ "email": "ghost@example.com" }))
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(_)));
    assert_eq!(err.status_code(), 404);
    assert!(h.service.state().store().snapshot().unwrap().is_empty());
}

#[tokio::test]
async fn remaining_missing_field() {
    let h = harness();
    for body in [json!({}), json!({ "email": "" })] {
        let err = h.service.dispatch("remaining", body).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
    assert_eq!(h.service.state().store().inner().saves(), 0);
}

#[tokio::test]
async fn stale_day_resets_before_remaining() {
    let mut exhausted = Account::registered("pw".into(), today().pred_opt().unwrap());
    exhausted.request_count = DAILY_LIMIT;
    let mut accounts = Accounts::new();
    accounts.insert("a@example.com".into(), exhausted);

    let h = harness_with(InMemoryStore::with_accounts(accounts), StubCompletion::answering());

    let result = h
        .service
        .dispatch("remaining", json!({ "email": "a@example.com" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "remaining": DAILY_LIMIT }));

    let stored = h.service.state().store().snapshot().unwrap()["a@example.com"].clone();
    assert_eq!(stored.request_count, 0);
    assert_eq!(stored.last_reset, today());
}

#[tokio::test]
async fn exhausted_yesterday_can_ask_today() {
    let h = harness();
    for _ in 0..DAILY_LIMIT {
        h.service
            .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
            .await
            .unwrap();
    }
    let err = h
        .service
        .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    h.clock.advance_days(1);

    h.service
        .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
        .await
        .unwrap();
    let result = h
        .service
        .dispatch("remaining", json!({ "email": "a@example.com" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "remaining": DAILY_LIMIT - 1 }));
}
