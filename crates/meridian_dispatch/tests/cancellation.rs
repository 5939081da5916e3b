//! Deadlines and caller cancellation.

mod common;

use common::{RecordingAdapter, ScoredRetriever, SlowAdapter, single};
use core::time::Duration;
use meridian_dispatch::{
    CancelReason, CancellationToken, ComparisonRequest, DispatchConfig, DispatchError, Dispatcher,
    ExecutionOutcome,
};
use meridian_models::types::{ChatMessage, ChatRequest, GenerationRequest, RetrievalRequest};
use meridian_telemetry::{Clock, MockClock};
use std::sync::Arc;
use std::time::Instant;

fn slow(delay_secs: u64) -> Arc<SlowAdapter> {
    Arc::new(SlowAdapter {
        delay: Duration::from_secs(delay_secs),
    })
}

#[tokio::test(start_paused = true)]
async fn cancel_before_completion_yields_canceled() {
    let dispatcher = single(&slow(10)).build().unwrap();
    let token = CancellationToken::new();

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let err = dispatcher
        .execute_with_cancel(&GenerationRequest::new("Hi", "gpt-4"), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Canceled(CancelReason::Caller)));
    assert_eq!(err.status_code(), 499);
}

#[tokio::test]
async fn already_canceled_token_skips_the_adapter() {
    let adapter = RecordingAdapter::new();
    let dispatcher = single(&adapter).build().unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = dispatcher
        .chat_with_cancel(&ChatRequest::new(vec![ChatMessage::user("Hi")], "gpt-4"), &token)
        .await
        .unwrap_err();

    assert!(err.is_canceled());
    assert_eq!(adapter.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_adapter_past_deadline_yields_canceled() {
    let dispatcher = single(&slow(120))
        .with_config(DispatchConfig::new().with_generation_timeout(Duration::from_secs(5)))
        .build()
        .unwrap();

    let err = dispatcher
        .execute(&GenerationRequest::new("Hi", "claude-3-opus"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Canceled(CancelReason::Deadline(limit)) if limit == Duration::from_secs(5)
    ));
}

#[tokio::test(start_paused = true)]
async fn default_generation_deadline_is_sixty_seconds() {
    let dispatcher = single(&slow(61)).build().unwrap();

    let err = dispatcher
        .execute(&GenerationRequest::new("Hi", "gpt-4"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Canceled(CancelReason::Deadline(limit)) if limit == Duration::from_secs(60)
    ));

    let within = single(&slow(59)).build().unwrap();
    assert!(within.execute(&GenerationRequest::new("Hi", "gpt-4")).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn slow_retrieval_past_deadline_yields_canceled() {
    let adapter = RecordingAdapter::new();
    let retriever = ScoredRetriever::delayed(&[0.5], Duration::from_secs(45));
    let dispatcher = single(&adapter).with_retriever(retriever).build().unwrap();

    let err = dispatcher
        .retrieval_query(&RetrievalRequest::new("q", "gpt-4"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Canceled(CancelReason::Deadline(limit)) if limit == Duration::from_secs(30)
    ));
}

#[tokio::test(start_paused = true)]
async fn compare_records_deadline_per_model() {
    let fast = RecordingAdapter::new();
    let registry = common::registry(fast.clone(), slow(90), fast.clone());
    let dispatcher = Dispatcher::builder(registry)
        .with_config(DispatchConfig::new().with_generation_timeout(Duration::from_secs(10)))
        .build()
        .unwrap();

    let result = dispatcher
        .compare(&ComparisonRequest::new("Hi", ["gpt-4", "claude-3-opus", "local-model"]))
        .await
        .unwrap();

    assert_eq!(result.completed(), 2);
    match &result.executions[1].outcome {
        ExecutionOutcome::Failed { error } => assert!(error.contains("deadline"), "{error}"),
        ExecutionOutcome::Completed { .. } => panic!("slow model should have timed out"),
    }
}

#[tokio::test(start_paused = true)]
async fn compare_canceled_by_caller() {
    let dispatcher = single(&slow(30)).build().unwrap();
    let token = CancellationToken::new();

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        trigger.cancel();
    });

    let err = dispatcher
        .compare_with_cancel(&ComparisonRequest::new("Hi", ["gpt-4", "claude-3-opus"]), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Canceled(CancelReason::Caller)));
}

#[tokio::test]
async fn compare_latency_comes_from_the_clock() {
    let adapter = RecordingAdapter::new();
    let mock = Arc::new(MockClock::new(Instant::now()));
    let dispatcher = single(&adapter)
        .with_clock(Clock::with_provider(mock))
        .build()
        .unwrap();

    let result = dispatcher
        .compare(&ComparisonRequest::new("Hi", ["gpt-4"]))
        .await
        .unwrap();

    // A frozen clock measures no time passing.
    assert_eq!(result.executions[0].latency_ms, 0);
}
