//! Single-slot pipeline tests: refusal while busy, settle, reuse.

use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};

use dominoes_tui::{ActionClient, ActionOutcome, ActionPipeline, PlayerAction};

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{addr}")
}

fn minimal_snapshot() -> serde_json::Value {
    serde_json::json!({
        "game_id": "g-1",
        "last_update": "v1",
        "player_number": 0
    })
}

#[tokio::test]
async fn test_second_dispatch_refused_while_slot_is_occupied() {
    let router = Router::new().route(
        "/pass",
        post(|| async {
            // Hold the slot long enough for the second dispatch attempt.
            tokio::time::sleep(Duration::from_millis(150)).await;
            Json(minimal_snapshot())
        }),
    );
    let base = spawn_stub(router).await;
    let (mut pipeline, mut reply_rx) = ActionPipeline::new(ActionClient::new(base));

    assert!(pipeline.try_dispatch(PlayerAction::Pass, Some("g-1".to_string())));
    assert!(pipeline.is_busy());
    assert!(
        !pipeline.try_dispatch(PlayerAction::PickUp, Some("g-1".to_string())),
        "second dispatch must be refused while the first is in flight"
    );

    let reply = reply_rx.recv().await.expect("reply delivered");
    assert!(matches!(reply, Ok(ActionOutcome::Applied(_))));

    pipeline.settle();
    assert!(!pipeline.is_busy());
    assert!(pipeline.try_dispatch(PlayerAction::Pass, Some("g-1".to_string())));
}

#[tokio::test]
async fn test_transport_failure_still_settles_the_slot() {
    // Nothing listens here; the request fails without a response.
    let (mut pipeline, mut reply_rx) = ActionPipeline::new(ActionClient::new("http://127.0.0.1:9"));

    assert!(pipeline.try_dispatch(PlayerAction::FetchState, None));
    let reply = reply_rx.recv().await.expect("reply delivered");
    assert!(reply.is_err(), "expected a transport error reply");

    pipeline.settle();
    assert!(!pipeline.is_busy());
}

#[tokio::test]
async fn test_failure_statuses_are_replies_not_errors() {
    let router = Router::new().route(
        "/start-game",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down".to_string()) }),
    );
    let base = spawn_stub(router).await;
    let (mut pipeline, mut reply_rx) = ActionPipeline::new(ActionClient::new(base));

    pipeline.try_dispatch(PlayerAction::StartGame, Some("g-1".to_string()));
    let reply = reply_rx.recv().await.expect("reply delivered");
    match reply {
        Ok(ActionOutcome::Failed(status)) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected Failed, got {other:?}"),
    }
}
