//! ask: quota gating and upstream handling through command dispatch.

use askgate::microsvc::HandlerError;
use askgate::store::InMemoryStore;
use askgate::DAILY_LIMIT;
use serde_json::json;

use crate::support::{harness, harness_with, StubCompletion};

#[tokio::test]
async fn relays_answer_and_question() {
    let h = harness();
    let result = h
        .service
        .dispatch("ask", json!({ "email": "a@example.com", "question": "why is the sky blue?" }))
        .await
        .unwrap();

    assert_eq!(result, json!({ "answer": "answer to: why is the sky blue?" }));
    assert_eq!(h.completion.prompts(), vec!["why is the sky blue?".to_string()]);
}

#[tokio::test]
async fn ask_creates_account_lazily() {
    let h = harness();
    h.service
        .dispatch("ask", json!({ "email": "new@example.com", "question": "q" }))
        .await
        .unwrap();

    let stored = h.service.state().store().snapshot().unwrap()["new@example.com"].clone();
    assert_eq!(stored.request_count, 1);
    assert_eq!(stored.credential, None);

    let result = h
        .service
        .dispatch("remaining", json!({ "email": "new@example.com" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "remaining": DAILY_LIMIT - 1 }));
}

#[tokio::test]
async fn limit_reached_after_exactly_daily_limit() {
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
    assert!(matches!(err, HandlerError::QuotaExceeded(_)));
    assert_eq!(err.status_code(), 403);
    assert_eq!(err.to_string(), format!("Daily limit reached ({DAILY_LIMIT})"));

    // The rejected request never reached the completion API.
    assert_eq!(h.completion.calls(), DAILY_LIMIT as usize);
}

#[tokio::test]
async fn quotas_are_per_identity() {
    let h = harness();
    for _ in 0..DAILY_LIMIT {
        h.service
            .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
            .await
            .unwrap();
    }
    h.service
        .dispatch("ask", json!({ "email": "b@example.com", "question": "q" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn upstream_failure_is_generic_500_and_still_charged() {
    let h = harness_with(InMemoryStore::new(), StubCompletion::failing());
    let err = h
        .service
        .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
        .await
        .unwrap_err();

    assert!(matches!(err, HandlerError::Upstream(_)));
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_string(), "AI request failed");
    assert!(!err.to_string().contains("req_42"));
    assert_eq!(h.completion.calls(), 1);

    let result = h
        .service
        .dispatch("remaining", json!({ "email": "a@example.com" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "remaining": DAILY_LIMIT - 1 }));
}

#[tokio::test]
async fn missing_fields_make_no_call_and_no_write() {
    let h = harness();
    for body in [
        json!({}),
        json!({ "email": "a@example.com" }),
        json!({ "question": "q" }),
        json!({ "email": "a@example.com", "question": "" }),
    ] {
        let err = h.service.dispatch("ask", body).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
    assert_eq!(h.completion.calls(), 0);
    assert_eq!(h.service.state().store().inner().saves(), 0);
}

#[tokio::test]
async fn concurrent_asks_never_exceed_limit() {
    let h = std::sync::Arc::new(harness());
    let mut tasks = Vec::new();
    for _ in 0..(DAILY_LIMIT * 2) {
        let h = h.clone();
        tasks.push(tokio::spawn(async move {
            h.service
                .dispatch("ask", json!({ "email": "a@example.com", "question": "q" }))
                .await
                .is_ok()
        }));
    }

    let mut allowed = 0;
    for task in tasks {
        if task.await.unwrap() {
            allowed += 1;
        }
    }
    assert_eq!(allowed, DAILY_LIMIT);
    assert_eq!(h.completion.calls(), DAILY_LIMIT as usize);
}

#[tokio::test]
async fn unknown_command_is_not_found() {
    let h = harness();
    let err = h.service.dispatch("delete", json!({})).await.unwrap_err();
    assert!(matches!(err, HandlerError::UnknownCommand(_)));
    assert_eq!(err.status_code(), 404);
}
