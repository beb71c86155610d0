use std::sync::Arc;

use activity_core::{
    ActivityController, ActivityError, ActivityPhase, AttemptReporter, HttpCollector,
    ReportOutcome, SequenceModel, UniformTileLayout,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use shared::{
    domain::{AttemptOutcome, StepId},
    error::ValidationError,
    protocol::AttemptRecord,
};
use tokio::{
    net::TcpListener,
    runtime::Handle,
    sync::{mpsc, Mutex},
};
use url::Url;

const LAYOUT: UniformTileLayout = UniformTileLayout {
    origin_y: 120.0,
    tile_height: 48.0,
    gap: 10.0,
};

async fn record(
    State(tx): State<Arc<Mutex<mpsc::UnboundedSender<AttemptRecord>>>>,
    Json(record): Json<AttemptRecord>,
) -> StatusCode {
    let _ = tx.lock().await.send(record);
    StatusCode::OK
}

async fn spawn_collector() -> (Url, mpsc::UnboundedReceiver<AttemptRecord>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/exec", post(record))
        .with_state(Arc::new(Mutex::new(tx)));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve collector");
    });
    (
        Url::parse(&format!("http://{addr}/exec")).expect("url"),
        rx,
    )
}

fn controller_for(endpoint: Url) -> ActivityController {
    let reporter = AttemptReporter::new(Arc::new(HttpCollector::new(endpoint)), Handle::current());
    ActivityController::new(SequenceModel::registration_flow(), reporter)
}

fn ids(raw: &[u32]) -> Vec<StepId> {
    raw.iter().copied().map(StepId).collect()
}

fn arrange(controller: &mut ActivityController, order: &[u32]) {
    for id in order.iter().rev().copied().map(StepId) {
        controller.on_drag_start(id);
        controller.on_drag_move(0.0, &LAYOUT);
        controller.on_drag_end(id);
    }
    assert_eq!(controller.surface().current_order(), ids(order));
}

#[tokio::test]
async fn canonical_submission_is_recorded_as_correct() {
    let (url, mut rx) = spawn_collector().await;
    let mut controller = controller_for(url);
    controller
        .start("Florence", "Florence@Example.com")
        .expect("start");
    arrange(&mut controller, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let submission = controller.on_submit().expect("submit");
    assert!(submission.feedback.outcome.is_correct());
    drop(submission);

    let received = rx.recv().await.expect("collector record");
    assert_eq!(received.name, "Florence");
    assert_eq!(received.email, "florence@example.com");
    assert_eq!(received.result, AttemptOutcome::Correct);
    assert_eq!(received.submitted_order, "1, 2, 3, 4, 5, 6, 7, 8, 9");
    assert!(received.timestamp.ends_with('Z'));
}

#[tokio::test]
async fn swapped_last_pair_is_recorded_as_incorrect() {
    let (url, mut rx) = spawn_collector().await;
    let mut controller = controller_for(url);
    controller.start("Florence", "f@example.com").expect("start");
    arrange(&mut controller, &[1, 2, 3, 4, 5, 6, 7, 9, 8]);

    let submission = controller.on_submit().expect("submit");
    assert_eq!(submission.feedback.outcome, AttemptOutcome::Incorrect);
    assert_eq!(
        submission.report.outcome().await,
        ReportOutcome::Delivered { status: 200 }
    );

    let received = rx.recv().await.expect("collector record");
    assert_eq!(received.result, AttemptOutcome::Incorrect);
    assert_eq!(received.submitted_order, "1, 2, 3, 4, 5, 6, 7, 9, 8");
}

#[tokio::test]
async fn empty_name_is_refused() {
    let (url, _rx) = spawn_collector().await;
    let mut controller = controller_for(url);
    assert_eq!(
        controller.start("", "someone@example.com"),
        Err(ActivityError::Identity(ValidationError::MissingName))
    );
    assert_eq!(controller.phase(), ActivityPhase::NotStarted);
}

#[tokio::test]
async fn unreachable_collector_does_not_affect_feedback() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let mut controller =
        controller_for(Url::parse(&format!("http://{addr}/exec")).expect("url"));
    controller.start("Florence", "f@example.com").expect("start");
    arrange(&mut controller, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let submission = controller.on_submit().expect("submit");
    assert_eq!(submission.feedback.outcome, AttemptOutcome::Correct);
    assert_eq!(controller.phase(), ActivityPhase::Submitted);
    assert!(matches!(
        submission.report.outcome().await,
        ReportOutcome::Failed { .. }
    ));
}

#[tokio::test]
async fn dragging_past_the_extremes_places_first_or_last() {
    let (url, _rx) = spawn_collector().await;
    let mut controller = controller_for(url);
    controller.start("Florence", "f@example.com").expect("start");
    let order = controller.surface().current_order();
    let middle = order[4];

    controller.on_drag_start(middle);
    controller.on_drag_move(LAYOUT.origin_y - 100.0, &LAYOUT);
    assert_eq!(controller.surface().current_order()[0], middle);

    controller.on_drag_move(10_000.0, &LAYOUT);
    controller.on_drag_end(middle);
    assert_eq!(controller.surface().current_order().last(), Some(&middle));
}
