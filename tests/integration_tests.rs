use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde_json::{json, Value};
use tower::ServiceExt;

use biosearch::config::AppConfig;
use biosearch::db;
use biosearch::models::BookingStatus;
use biosearch::router::build_router;
use biosearch::state::AppState;

// ── Helpers ──

const TOKEN: &str = "test-token";

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        manager_token: TOKEN.to_string(),
        slot_step_minutes: 60,
        booking_initial_status: BookingStatus::Pending,
    }
}

fn test_state() -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState::new(conn, test_config()))
}

fn test_app(state: Arc<AppState>) -> Router {
    build_router(state)
}

fn next_weekday(weekday: Weekday) -> NaiveDate {
    let mut day = Utc::now().date_naive() + Duration::days(1);
    while day.weekday() != weekday {
        day += Duration::days(1);
    }
    day
}

async fn send(
    state: &Arc<AppState>,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = test_app(state.clone()).oneshot(request).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Creates a salon open Mondays 09:00–17:00 (closed otherwise) offering
/// Manicure (catalog 1, 60 min) and BIO Diamond Manicure (catalog 5, 90 min).
async fn seed_salon(state: &Arc<AppState>) -> i64 {
    let (status, salon) = send(
        state,
        "POST",
        "/api/manager/salons",
        Some(TOKEN),
        Some(json!({"name": "Studio Rita", "city": "Lisboa", "region": "Lisboa"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = salon["id"].as_i64().unwrap();

    let (status, _) = send(
        state,
        "PUT",
        &format!("/api/manager/salons/{id}/opening-hours"),
        Some(TOKEN),
        Some(json!({"0": {"start_time": "09:00", "end_time": "17:00", "is_open": true}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for (service_id, price, duration) in [(1, 20.0, 60), (5, 45.0, 90)] {
        let (status, _) = send(
            state,
            "POST",
            &format!("/api/manager/salons/{id}/services"),
            Some(TOKEN),
            Some(json!({"service_id": service_id, "price": price, "duration_minutes": duration})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    id
}

fn booking_body(salon_id: i64, service_id: i64, date: NaiveDate, time: &str) -> Value {
    json!({
        "salon_id": salon_id,
        "service_id": service_id,
        "customer_name": "Ana Silva",
        "customer_email": "ana@example.com",
        "customer_phone": "+351910000000",
        "booking_date": date.format("%Y-%m-%d").to_string(),
        "booking_time": time,
    })
}

async fn available_slots(
    state: &Arc<AppState>,
    salon_id: i64,
    date: NaiveDate,
    service_id: i64,
) -> Vec<String> {
    let (status, json) = send(
        state,
        "GET",
        &format!(
            "/api/salons/{salon_id}/availability?date={}&service_id={service_id}",
            date.format("%Y-%m-%d")
        ),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["available_slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// ── Health & catalog ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let (status, json) = send(&state, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_service_catalog_bio_diamond_filter() {
    let state = test_state();

    let (status, json) = send(&state, "GET", "/api/services", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 7);

    let (_, json) = send(&state, "GET", "/api/services?bio_diamond=true", None, None).await;
    let services = json.as_array().unwrap();
    assert_eq!(services.len(), 3);
    assert!(services.iter().all(|s| s["is_bio_diamond"] == true));
}

// ── Manager auth ──

#[tokio::test]
async fn test_manager_requires_auth() {
    let state = test_state();
    let (status, json) = send(
        &state,
        "POST",
        "/api/manager/salons",
        None,
        Some(json!({"name": "No Auth"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["kind"], "unauthorized");
}

#[tokio::test]
async fn test_manager_wrong_token() {
    let state = test_state();
    let (status, _) = send(
        &state,
        "GET",
        "/api/manager/salons/1/bookings",
        Some("wrong-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ── Salons ──

#[tokio::test]
async fn test_new_salon_gets_default_hours() {
    let state = test_state();
    let (_, salon) = send(
        &state,
        "POST",
        "/api/manager/salons",
        Some(TOKEN),
        Some(json!({"name": "Nails by Rita"})),
    )
    .await;
    let id = salon["id"].as_i64().unwrap();
    assert_eq!(salon["status"], "active");

    let (status, hours) = send(
        &state,
        "GET",
        &format!("/api/manager/salons/{id}/opening-hours"),
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hours["0"]["start_time"], "09:00");
    assert_eq!(hours["4"]["end_time"], "18:00");
    assert_eq!(hours["5"]["start_time"], "10:00");
    assert_eq!(hours["5"]["end_time"], "16:00");
    assert_eq!(hours["6"]["is_open"], false);
}

#[tokio::test]
async fn test_create_salon_requires_name() {
    let state = test_state();
    let (status, json) = send(
        &state,
        "POST",
        "/api/manager/salons",
        Some(TOKEN),
        Some(json!({"name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
}

#[tokio::test]
async fn test_salon_search_and_pagination() {
    let state = test_state();
    for (name, city) in [
        ("Alfa Nails", "Lisboa"),
        ("Beta Beauty", "Porto"),
        ("Gama Studio", "Lisboa"),
    ] {
        send(
            &state,
            "POST",
            "/api/manager/salons",
            Some(TOKEN),
            Some(json!({"name": name, "city": city})),
        )
        .await;
    }

    let (status, json) = send(&state, "GET", "/api/salons?city=lisboa", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["salons"][0]["name"], "Alfa Nails");
    assert_eq!(json["salons"][1]["name"], "Gama Studio");

    let (_, json) = send(&state, "GET", "/api/salons?search=beauty", None, None).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["salons"][0]["city"], "Porto");

    let (_, json) = send(&state, "GET", "/api/salons?per_page=2&page=2", None, None).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["pages"], 2);
    assert_eq!(json["current_page"], 2);
    assert_eq!(json["salons"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_salon_detail_and_update() {
    let state = test_state();
    let id = seed_salon(&state).await;

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/manager/salons/{id}"),
        Some(TOKEN),
        Some(json!({"phone": "+351210000000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phone"], "+351210000000");
    assert_eq!(json["name"], "Studio Rita");
    assert_eq!(json["city"], "Lisboa");

    let (status, json) = send(&state, "GET", &format!("/api/salons/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["services"].as_array().unwrap().len(), 2);
    assert_eq!(json["total_reviews"], 0);

    let (status, json) = send(&state, "GET", "/api/salons/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");
}

// ── Offered services ──

#[tokio::test]
async fn test_manage_salon_services() {
    let state = test_state();
    let id = seed_salon(&state).await;

    let (status, json) = send(
        &state,
        "POST",
        &format!("/api/manager/salons/{id}/services"),
        Some(TOKEN),
        Some(json!({"service_id": 1, "price": 25.0, "duration_minutes": 60})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, _) = send(
        &state,
        "POST",
        &format!("/api/manager/salons/{id}/services"),
        Some(TOKEN),
        Some(json!({"service_id": 2, "price": 15.0, "duration_minutes": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &state,
        "POST",
        &format!("/api/manager/salons/{id}/services"),
        Some(TOKEN),
        Some(json!({"service_id": 42, "price": 15.0, "duration_minutes": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, offerings) = send(
        &state,
        "GET",
        &format!("/api/manager/salons/{id}/services"),
        Some(TOKEN),
        None,
    )
    .await;
    let offering_id = offerings[0]["id"].as_i64().unwrap();
    assert_eq!(offerings[0]["duration_minutes"], 60);

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/manager/salons/{id}/services/{offering_id}"),
        Some(TOKEN),
        Some(json!({"price": 22.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], 22.5);
    assert_eq!(json["duration_minutes"], 60);

    let (status, _) = send(
        &state,
        "DELETE",
        &format!("/api/manager/salons/{id}/services/{offering_id}"),
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &state,
        "DELETE",
        &format!("/api/manager/salons/{id}/services/{offering_id}"),
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_opening_hours_rejected() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/manager/salons/{id}/opening-hours"),
        Some(TOKEN),
        Some(json!({"1": {"start_time": "18:00", "end_time": "09:00", "is_open": true}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
}

// ── Availability ──

#[tokio::test]
async fn test_availability_monday_scenario() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    assert_eq!(
        available_slots(&state, id, monday, 1).await,
        vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00"]
    );

    let (status, _) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "10:00"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, json) = send(
        &state,
        "GET",
        &format!("/api/salons/{id}/availability?date={}&service_id=1", monday.format("%Y-%m-%d")),
        None,
        None,
    )
    .await;
    let slots = json["time_slots"].as_array().unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[1], json!({"time": "10:00", "available": false}));
    assert_eq!(slots[7], json!({"time": "16:00", "available": true}));
    assert_eq!(json["available_slots"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_availability_query_validation() {
    let state = test_state();
    let id = seed_salon(&state).await;

    let (status, json) = send(&state, "GET", &format!("/api/salons/{id}/availability?service_id=1"), None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, _) = send(
        &state,
        "GET",
        &format!("/api/salons/{id}/availability?date=2025-13-40&service_id=1"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &state,
        "GET",
        &format!("/api/salons/{id}/availability?date=2025-06-16"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &state,
        "GET",
        &format!("/api/salons/{id}/availability?date=2025-06-16&service_id=3"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_on_closed_day_is_empty() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let sunday = next_weekday(Weekday::Sun);
    assert!(available_slots(&state, id, sunday, 1).await.is_empty());
}

// ── Bookings ──

#[tokio::test]
async fn test_create_and_get_booking() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    let (status, json) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "09:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "pending");
    assert!(json["message"].is_string());
    let booking_id = json["id"].as_str().unwrap().to_string();

    let (status, json) = send(&state, "GET", &format!("/api/bookings/{booking_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["booking_time"], "09:00");
    assert_eq!(json["duration_minutes"], 60);
    assert_eq!(json["customer_name"], "Ana Silva");

    let (status, _) = send(&state, "GET", "/api/bookings/does-not-exist", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_double_booking_conflicts() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    let (status, _) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "10:00"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "10:00"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "slot_conflict");
    assert!(json.get("reason").is_none());
}

#[tokio::test]
async fn test_long_service_around_existing_booking() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "10:00"))).await;

    let (status, _) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 5, monday, "10:00"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 5, monday, "11:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["booking"]["duration_minutes"], 90);

    // 11:00–12:30 now blocks 12:00 for everyone
    let slots = available_slots(&state, id, monday, 1).await;
    assert!(!slots.contains(&"12:00".to_string()));
    assert!(slots.contains(&"13:00".to_string()));
}

#[tokio::test]
async fn test_closed_day_booking_conflicts_with_reason() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let tuesday = next_weekday(Weekday::Tue);

    let (status, json) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, tuesday, "10:00"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "slot_conflict");
    assert_eq!(json["reason"], "closed_day");
}

#[tokio::test]
async fn test_booking_validation_errors() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    let mut body = booking_body(id, 1, monday, "10:00");
    body["customer_email"] = json!("nope");
    let (status, json) = send(&state, "POST", "/api/bookings", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let mut body = booking_body(id, 1, monday, "10:00");
    body.as_object_mut().unwrap().remove("booking_time");
    let (status, json) = send(&state, "POST", "/api/bookings", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let past = Utc::now().date_naive() - Duration::days(7);
    let (status, _) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, past, "10:00"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(&state, "POST", "/api/bookings", None, Some(booking_body(999, 1, monday, "10:00"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");
}

#[tokio::test]
async fn test_status_transitions_and_cancel_frees_slot() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    let (_, json) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "14:00"))).await;
    let booking_id = json["id"].as_str().unwrap().to_string();
    let status_uri = format!("/api/manager/bookings/{booking_id}/status");

    let (status, json) = send(&state, "PUT", &status_uri, Some(TOKEN), Some(json!({"status": "completed"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, json) = send(&state, "PUT", &status_uri, Some(TOKEN), Some(json!({"status": "confirmed"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "confirmed");

    let (status, _) = send(&state, "PUT", &status_uri, Some(TOKEN), Some(json!({"status": "archived"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(!available_slots(&state, id, monday, 1).await.contains(&"14:00".to_string()));

    let (status, json) = send(&state, "PUT", &status_uri, Some(TOKEN), Some(json!({"status": "cancelled"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "cancelled");

    assert!(available_slots(&state, id, monday, 1).await.contains(&"14:00".to_string()));

    let (status, _) = send(&state, "PUT", &status_uri, Some(TOKEN), Some(json!({"status": "confirmed"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "14:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_manager_lists_and_deletes_bookings() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    let (_, first) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "09:00"))).await;
    send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday + Duration::days(7), "09:00"))).await;

    let (status, json) = send(&state, "GET", &format!("/api/manager/salons/{id}/bookings"), Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = json.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    // newest date first
    assert_eq!(
        bookings[0]["booking_date"],
        (monday + Duration::days(7)).format("%Y-%m-%d").to_string()
    );

    let booking_id = first["id"].as_str().unwrap();
    let (status, _) = send(&state, "DELETE", &format!("/api/manager/bookings/{booking_id}"), Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, "GET", &format!("/api/bookings/{booking_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(available_slots(&state, id, monday, 1).await.contains(&"09:00".to_string()));

    let (status, _) = send(&state, "DELETE", &format!("/api/manager/bookings/{booking_id}"), Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_confirmed_initial_status_policy() {
    let conn = db::init_db(":memory:").unwrap();
    let config = AppConfig {
        booking_initial_status: BookingStatus::Confirmed,
        ..test_config()
    };
    let state = Arc::new(AppState::new(conn, config));
    let id = seed_salon(&state).await;

    let (status, json) = send(
        &state,
        "POST",
        "/api/bookings",
        None,
        Some(booking_body(id, 1, next_weekday(Weekday::Mon), "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "confirmed");
}

#[tokio::test]
async fn test_concurrent_booking_requests_admit_one() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    let requests = (0..8).map(|_| {
        let state = state.clone();
        tokio::spawn(async move {
            send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "15:00")))
                .await
                .0
        })
    });
    let mut created = 0;
    let mut conflicts = 0;
    for handle in requests.collect::<Vec<_>>() {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

// ── Reviews ──

#[tokio::test]
async fn test_reviews() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let uri = format!("/api/salons/{id}/reviews");

    for rating in [5, 4, 4] {
        let (status, json) = send(
            &state,
            "POST",
            &uri,
            None,
            Some(json!({
                "customer_name": "Ana",
                "customer_email": "ana@example.com",
                "rating": rating,
                "comment": "Lovely work",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["rating"], rating);
    }

    let (status, json) = send(
        &state,
        "POST",
        &uri,
        None,
        Some(json!({"customer_name": "Ana", "customer_email": "ana@example.com", "rating": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, json) = send(&state, "GET", &format!("{uri}?per_page=2"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_reviews"], 3);
    assert_eq!(json["average_rating"], 4.3);
    assert_eq!(json["pages"], 2);
    assert_eq!(json["reviews"].as_array().unwrap().len(), 2);

    let (status, _) = send(&state, "GET", "/api/salons/999/reviews", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Pagination bounds ──

#[tokio::test]
async fn test_huge_page_numbers_return_empty_pages() {
    let state = test_state();
    let id = seed_salon(&state).await;

    let (status, json) = send(&state, "GET", "/api/salons?page=100000000&per_page=100", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["current_page"], 100000000);
    assert!(json["salons"].as_array().unwrap().is_empty());

    let (status, json) = send(
        &state,
        "GET",
        &format!("/api/salons/{id}/reviews?page=4294967295&per_page=50"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["reviews"].as_array().unwrap().is_empty());
}

// ── Manager salon list and deactivation ──

#[tokio::test]
async fn test_manager_lists_every_salon() {
    let state = test_state();
    let (status, _) = send(&state, "GET", "/api/manager/salons", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let id = seed_salon(&state).await;
    send(
        &state,
        "POST",
        "/api/manager/salons",
        Some(TOKEN),
        Some(json!({"name": "Alfa Nails", "city": "Porto"})),
    )
    .await;

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/manager/salons/{id}"),
        Some(TOKEN),
        Some(json!({"status": "inactive"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "inactive");

    let (status, json) = send(&state, "GET", "/api/manager/salons", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    let salons = json.as_array().unwrap();
    assert_eq!(salons.len(), 2);
    assert_eq!(salons[0]["name"], "Alfa Nails");
    assert_eq!(salons[1]["name"], "Studio Rita");
    assert_eq!(salons[1]["status"], "inactive");

    // The public directory only shows the active one
    let (_, json) = send(&state, "GET", "/api/salons", None, None).await;
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_inactive_salon_has_no_availability_or_bookings() {
    let state = test_state();
    let id = seed_salon(&state).await;
    let monday = next_weekday(Weekday::Mon);

    let (status, _) = send(
        &state,
        "PUT",
        &format!("/api/manager/salons/{id}"),
        Some(TOKEN),
        Some(json!({"status": "inactive"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(
        &state,
        "GET",
        &format!("/api/salons/{id}/availability?date={}&service_id=1", monday.format("%Y-%m-%d")),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");

    let (status, _) = send(&state, "POST", "/api/bookings", None, Some(booking_body(id, 1, monday, "10:00"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, "GET", &format!("/api/salons/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
