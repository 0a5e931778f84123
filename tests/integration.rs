//! Integration tests for the shift engine HTTP API.
//!
//! Every test drives the full router against an in-memory store and a
//! manual clock, covering:
//! - The clock-in / break / clock-out lifecycle
//! - Rejected transitions and their status codes
//! - Worker history windows and earnings
//! - The team summary report, including cancelled shifts
//! - The manager's single-shift detail view

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use shift_engine::api::{AppState, create_router};
use shift_engine::calculation::BreakRounding;
use shift_engine::clock::ManualClock;
use shift_engine::config::{ConfigLoader, ServiceConfig};
use shift_engine::models::{NewShift, Worker};
use shift_engine::store::MemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

struct Harness {
    router: Router,
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
}

/// Thursday 2026-01-15 09:00 UTC.
fn nine_am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
}

fn worker(id: &str, name: &str, rate: &str) -> Worker {
    Worker {
        id: id.to_string(),
        full_name: Some(name.to_string()),
        hourly_rate: Some(decimal(rate)),
    }
}

fn harness_with(config: ServiceConfig) -> Harness {
    let store = Arc::new(MemoryStore::with_workers(vec![
        worker("ada", "Ada Lovelace", "20.00"),
        worker("bea", "Bea Arthur", "30.00"),
    ]));
    let clock = Arc::new(ManualClock::new(nine_am()));
    let state = AppState::from_config(store.clone(), clock.clone(), &config);
    Harness {
        router: create_router(state),
        store,
        clock,
    }
}

fn harness() -> Harness {
    harness_with(ServiceConfig::default())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized as a JSON string.
fn dec(value: &Value) -> Decimal {
    decimal(value.as_str().unwrap_or_else(|| panic!("not a decimal: {value}")))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn post(h: &Harness, uri: &str, worker_id: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-worker-id", worker_id)
        .body(Body::empty())
        .unwrap();
    send(&h.router, request).await
}

async fn get(h: &Harness, uri: &str, worker_id: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(worker_id) = worker_id {
        builder = builder.header("x-worker-id", worker_id);
    }
    send(&h.router, builder.body(Body::empty()).unwrap()).await
}

async fn current_shift_id(h: &Harness, worker_id: &str) -> i64 {
    let (status, body) = get(h, "/shifts/current", Some(worker_id)).await;
    assert_eq!(status, StatusCode::OK);
    body["shift"]["id"].as_i64().unwrap()
}

async fn clock_out(h: &Harness, worker_id: &str, shift_id: i64) -> (StatusCode, Value) {
    post(h, &format!("/shifts/{shift_id}/clock-out"), worker_id).await
}

fn assert_ok(result: (StatusCode, Value), message: &str) {
    assert_eq!(result.0, StatusCode::OK, "body: {}", result.1);
    assert_eq!(result.1["ok"], true);
    assert_eq!(result.1["message"], message);
}

fn assert_rejected(result: (StatusCode, Value), status: StatusCode, error: &str) {
    assert_eq!(result.0, status, "body: {}", result.1);
    assert_eq!(result.1["ok"], false);
    assert_eq!(result.1["error"], error);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_full_shift_with_one_break() {
    let h = harness();

    assert_ok(post(&h, "/shifts/clock-in", "ada").await, "Clocked in successfully");
    h.clock.advance(Duration::hours(1));
    assert_ok(post(&h, "/shifts/break/start", "ada").await, "Break started");
    h.clock.advance(Duration::minutes(10));
    assert_ok(post(&h, "/shifts/break/end", "ada").await, "Break ended");
    h.clock.advance(Duration::minutes(50));

    let shift_id = current_shift_id(&h, "ada").await;
    assert_ok(clock_out(&h, "ada", shift_id).await, "Clocked out successfully");

    let (status, body) = get(&h, "/shifts/history?filter=week", Some("ada")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let shift = &body["shifts"][0];
    assert_eq!(shift["status"], "completed");
    assert_eq!(shift["break_duration_minutes"], 10);
    assert_eq!(dec(&shift["raw_hours"]), decimal("2.00"));
    assert_eq!(dec(&shift["effective_hours"]), decimal("1.83"));
    assert_eq!(dec(&body["total_hours"]), decimal("1.83"));
    assert_eq!(dec(&body["total_earnings"]), decimal("36.60"));
}

#[tokio::test]
async fn test_clock_out_while_on_break_closes_the_break() {
    let h = harness();

    post(&h, "/shifts/clock-in", "ada").await;
    h.clock.advance(Duration::hours(1));
    post(&h, "/shifts/break/start", "ada").await;
    h.clock.advance(Duration::minutes(15));

    let shift_id = current_shift_id(&h, "ada").await;
    assert_ok(clock_out(&h, "ada", shift_id).await, "Clocked out successfully");

    let (_, body) = get(&h, "/shifts/history", Some("ada")).await;
    let shift = &body["shifts"][0];
    assert_eq!(shift["break_duration_minutes"], 15);
    assert_eq!(dec(&shift["raw_hours"]), decimal("1.25"));
    assert_eq!(dec(&shift["effective_hours"]), decimal("1.00"));
    assert!(!shift["break_end"].is_null());
}

#[tokio::test]
async fn test_multiple_breaks_accumulate() {
    let h = harness();

    post(&h, "/shifts/clock-in", "ada").await;
    for _ in 0..3 {
        h.clock.advance(Duration::minutes(50));
        post(&h, "/shifts/break/start", "ada").await;
        h.clock.advance(Duration::minutes(10));
        post(&h, "/shifts/break/end", "ada").await;
    }

    let (_, body) = get(&h, "/shifts/current", Some("ada")).await;
    assert_eq!(body["shift"]["status"], "active");
    assert_eq!(body["shift"]["break_duration_minutes"], 30);
    assert_eq!(body["progress"]["break_minutes"], 30);
    assert_eq!(dec(&body["progress"]["elapsed_hours"]), decimal("3.00"));
    assert_eq!(dec(&body["progress"]["effective_hours"]), decimal("2.50"));
}

#[tokio::test]
async fn test_current_shift_is_null_when_clocked_out() {
    let h = harness();
    let (status, body) = get(&h, "/shifts/current", Some("ada")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["shift"].is_null());
    assert!(body.get("progress").is_none());
}

#[tokio::test]
async fn test_floor_rounding_from_config() {
    let config = ConfigLoader::from_yaml_str("calculation:\n  break_rounding: floor\n")
        .unwrap()
        .into_config();
    assert_eq!(config.calculation.break_rounding, BreakRounding::Floor);
    let h = harness_with(config);

    post(&h, "/shifts/clock-in", "ada").await;
    h.clock.advance(Duration::minutes(30));
    post(&h, "/shifts/break/start", "ada").await;
    h.clock.advance(Duration::seconds(90));
    post(&h, "/shifts/break/end", "ada").await;

    let (_, body) = get(&h, "/shifts/current", Some("ada")).await;
    assert_eq!(body["shift"]["break_duration_minutes"], 1);
}

// =============================================================================
// Rejected transitions
// =============================================================================

#[tokio::test]
async fn test_double_clock_in_is_conflict() {
    let h = harness();
    post(&h, "/shifts/clock-in", "ada").await;
    assert_rejected(
        post(&h, "/shifts/clock-in", "ada").await,
        StatusCode::CONFLICT,
        "You already have an active shift.",
    );
}

#[tokio::test]
async fn test_clock_in_while_on_break_is_conflict() {
    let h = harness();
    post(&h, "/shifts/clock-in", "ada").await;
    post(&h, "/shifts/break/start", "ada").await;
    assert_rejected(
        post(&h, "/shifts/clock-in", "ada").await,
        StatusCode::CONFLICT,
        "You already have an active shift.",
    );
}

#[tokio::test]
async fn test_break_transitions_without_a_shift() {
    let h = harness();
    assert_rejected(
        post(&h, "/shifts/break/start", "ada").await,
        StatusCode::CONFLICT,
        "No active shift found to start break.",
    );
    assert_rejected(
        post(&h, "/shifts/break/end", "ada").await,
        StatusCode::CONFLICT,
        "No active break to end.",
    );
}

#[tokio::test]
async fn test_second_break_start_is_conflict() {
    let h = harness();
    post(&h, "/shifts/clock-in", "ada").await;
    post(&h, "/shifts/break/start", "ada").await;
    assert_rejected(
        post(&h, "/shifts/break/start", "ada").await,
        StatusCode::CONFLICT,
        "You are already on a break.",
    );
}

#[tokio::test]
async fn test_clock_out_of_someone_elses_shift_is_not_found() {
    let h = harness();
    post(&h, "/shifts/clock-in", "ada").await;
    let shift_id = current_shift_id(&h, "ada").await;

    assert_rejected(
        clock_out(&h, "bea", shift_id).await,
        StatusCode::NOT_FOUND,
        "Shift not found or already ended.",
    );

    let (_, body) = get(&h, "/shifts/current", Some("ada")).await;
    assert_eq!(body["shift"]["status"], "active");
}

#[tokio::test]
async fn test_second_clock_out_is_conflict() {
    let h = harness();
    post(&h, "/shifts/clock-in", "ada").await;
    let shift_id = current_shift_id(&h, "ada").await;
    h.clock.advance(Duration::hours(2));

    assert_ok(clock_out(&h, "ada", shift_id).await, "Clocked out successfully");
    h.clock.advance(Duration::hours(1));
    assert_rejected(
        clock_out(&h, "ada", shift_id).await,
        StatusCode::CONFLICT,
        "Shift is already ended.",
    );

    let (_, body) = get(&h, "/shifts/history", Some("ada")).await;
    assert_eq!(dec(&body["shifts"][0]["raw_hours"]), decimal("2.00"));
}

#[tokio::test]
async fn test_on_break_without_break_start_is_unprocessable() {
    let h = harness();
    let mut shift = NewShift::starting_at("ada", nine_am()).into_shift(1);
    shift.status = shift_engine::models::ShiftStatus::OnBreak;
    h.store.put_shift(shift).await;

    assert_rejected(
        post(&h, "/shifts/break/end", "ada").await,
        StatusCode::UNPROCESSABLE_ENTITY,
        "Cannot end break: break start time not found.",
    );
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized_everywhere() {
    let h = harness();
    for uri in [
        "/shifts/clock-in",
        "/shifts/break/start",
        "/shifts/break/end",
        "/shifts/1/clock-out",
    ] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        assert_rejected(
            send(&h.router, request).await,
            StatusCode::UNAUTHORIZED,
            "Not authenticated",
        );
    }

    let (status, body) = get(&h, "/shifts/current", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

// =============================================================================
// Reporting
// =============================================================================

#[tokio::test]
async fn test_history_filters_by_week() {
    let h = harness();

    // Monday of the previous week.
    h.clock.set(Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap());
    post(&h, "/shifts/clock-in", "ada").await;
    let first = current_shift_id(&h, "ada").await;
    h.clock.advance(Duration::hours(4));
    clock_out(&h, "ada", first).await;

    h.clock.set(nine_am());
    post(&h, "/shifts/clock-in", "ada").await;
    let second = current_shift_id(&h, "ada").await;
    h.clock.advance(Duration::hours(8));
    clock_out(&h, "ada", second).await;

    let (_, week) = get(&h, "/shifts/history?filter=week", Some("ada")).await;
    assert_eq!(week["count"], 1);
    assert_eq!(week["shifts"][0]["id"], second);

    let (_, month) = get(&h, "/shifts/history", Some("ada")).await;
    assert_eq!(month["filter"], "month");
    assert_eq!(month["count"], 2);
    assert_eq!(month["shifts"][0]["id"], second);
    assert_eq!(dec(&month["total_hours"]), decimal("12.00"));
    assert_eq!(dec(&month["total_earnings"]), decimal("240.00"));
}

#[tokio::test]
async fn test_team_summary_today() {
    let h = harness();

    post(&h, "/shifts/clock-in", "ada").await;
    post(&h, "/shifts/clock-in", "bea").await;
    h.clock.advance(Duration::hours(2));
    let bea_shift = current_shift_id(&h, "bea").await;
    clock_out(&h, "bea", bea_shift).await;
    post(&h, "/shifts/break/start", "ada").await;

    let (status, body) = get(&h, "/reports/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"]["start_date"], "2026-01-15");
    assert_eq!(body["period"]["end_date"], "2026-01-15");
    assert_eq!(body["total_shifts"], 2);
    assert_eq!(body["active_now"], 0);
    assert_eq!(body["on_break_now"], 1);
    assert_eq!(body["completed_count"], 1);
    assert_eq!(dec(&body["total_effective_hours"]), decimal("2.00"));
    assert_eq!(dec(&body["total_earnings"]), decimal("60.00"));

    let workers = body["workers"].as_array().unwrap();
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0]["name"], "Bea Arthur");

    let active = body["active_shifts"].as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["worker_name"], "Ada Lovelace");
    assert_eq!(active[0]["status"], "on_break");
    assert_eq!(dec(&active[0]["progress"]["effective_hours"]), decimal("2.00"));

    let completed = body["completed_shifts"].as_array().unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["shift_id"], bea_shift);
    assert_eq!(completed[0]["worker_name"], "Bea Arthur");
    assert_eq!(dec(&completed[0]["earnings"]), decimal("60.00"));
}

#[tokio::test]
async fn test_team_summary_live_progress_follows_clock() {
    let h = harness();

    post(&h, "/shifts/clock-in", "ada").await;
    h.clock.advance(Duration::hours(1));
    post(&h, "/shifts/break/start", "ada").await;
    h.clock.advance(Duration::minutes(30));

    let (_, body) = get(&h, "/reports/summary", None).await;
    let progress = &body["active_shifts"][0]["progress"];
    assert_eq!(progress["break_minutes"], 30);
    assert_eq!(dec(&progress["elapsed_hours"]), decimal("1.50"));
    assert_eq!(dec(&progress["effective_hours"]), decimal("1.00"));
    assert!(body["completed_shifts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_team_summary_excludes_cancelled_shifts() {
    let h = harness();

    post(&h, "/shifts/clock-in", "ada").await;
    h.clock.advance(Duration::hours(3));
    let shift_id = current_shift_id(&h, "ada").await;
    clock_out(&h, "ada", shift_id).await;
    h.store.cancel_shift(shift_id).await.unwrap();

    let (_, body) = get(&h, "/reports/summary?start=2026-01-15&end=2026-01-15", None).await;
    assert_eq!(body["total_shifts"], 1);
    assert_eq!(body["completed_count"], 0);
    assert!(body["completed_shifts"].as_array().unwrap().is_empty());
    assert_eq!(dec(&body["total_effective_hours"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_team_summary_swaps_reversed_dates() {
    let h = harness();
    let (status, body) = get(&h, "/reports/summary?start=2026-01-20&end=2026-01-10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"]["start_date"], "2026-01-10");
    assert_eq!(body["period"]["end_date"], "2026-01-20");
}

#[tokio::test]
async fn test_team_summary_rejects_bad_date() {
    let h = harness();
    let (status, body) = get(&h, "/reports/summary?start=not-a-date", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

// =============================================================================
// Shift Detail
// =============================================================================

#[tokio::test]
async fn test_shift_detail_of_completed_shift() {
    let h = harness();

    post(&h, "/shifts/clock-in", "bea").await;
    h.clock.advance(Duration::hours(1));
    post(&h, "/shifts/break/start", "bea").await;
    h.clock.advance(Duration::minutes(15));
    post(&h, "/shifts/break/end", "bea").await;
    h.clock.advance(Duration::minutes(45));
    let shift_id = current_shift_id(&h, "bea").await;
    clock_out(&h, "bea", shift_id).await;

    let (status, body) = get(&h, &format!("/reports/shifts/{shift_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shift"]["status"], "completed");
    assert_eq!(body["shift"]["break_duration_minutes"], 15);
    assert_eq!(body["worker_name"], "Bea Arthur");
    assert_eq!(dec(&body["worked_hours"]), decimal("1.75"));
    assert_eq!(dec(&body["earnings"]), decimal("52.50"));
    assert!(body.get("progress").is_none());
}

#[tokio::test]
async fn test_shift_detail_reflects_updated_profile() {
    let h = harness();

    post(&h, "/shifts/clock-in", "cal").await;
    h.clock.advance(Duration::hours(4));
    let shift_id = current_shift_id(&h, "cal").await;
    clock_out(&h, "cal", shift_id).await;

    let uri = format!("/reports/shifts/{shift_id}");
    let (_, before) = get(&h, &uri, None).await;
    assert_eq!(before["worker_name"], "Unknown");
    assert_eq!(dec(&before["earnings"]), Decimal::ZERO);

    h.store.upsert_worker(worker("cal", "Cal Ripken", "12.50")).await;
    let (_, after) = get(&h, &uri, None).await;
    assert_eq!(after["worker_name"], "Cal Ripken");
    assert_eq!(dec(&after["hourly_rate"]), decimal("12.50"));
    assert_eq!(dec(&after["earnings"]), decimal("50.00"));
}

#[tokio::test]
async fn test_shift_detail_rebuilds_break_of_legacy_record() {
    let h = harness();

    let mut shift = NewShift::starting_at("ada", nine_am()).into_shift(7);
    shift.status = shift_engine::models::ShiftStatus::Completed;
    shift.end_time = Some(nine_am() + Duration::hours(2));
    shift.break_start = Some(nine_am() + Duration::hours(1));
    shift.break_end = Some(nine_am() + Duration::minutes(75));
    h.store.put_shift(shift).await;

    let (status, body) = get(&h, "/reports/shifts/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&body["worked_hours"]), decimal("1.75"));
    assert_eq!(dec(&body["earnings"]), decimal("35.00"));
}

#[tokio::test]
async fn test_shift_detail_unknown_shift_is_not_found() {
    let h = harness();
    let (status, body) = get(&h, "/reports/shifts/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SHIFT_NOT_FOUND");
}
