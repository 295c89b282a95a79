use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use storage::dto::history::{Completion, NewHistoryEntry, UpdateHistoryEntryRequest};
use storage::error::{Result, StorageError};
use storage::models::{HistoryEntry, VolunteerProfile};
use storage::repository::{
    HistoryStore, MemoryHistoryStore, MemoryVolunteerDirectory, VolunteerDirectory,
};
use tower::ServiceExt;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::routes::build_router;
use crate::state::AppState;

fn profile(name: &str, skills: &[&str]) -> VolunteerProfile {
    VolunteerProfile {
        full_name: name.to_string(),
        address1: "500 Main St".to_string(),
        address2: None,
        city: "Dallas".to_string(),
        state: "TX".to_string(),
        zip: "75201".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        preferences: None,
        availability: vec![],
    }
}

/// History store whose backend is unreachable
struct UnavailableHistoryStore;

fn pool_timeout<T>() -> Result<T> {
    Err(StorageError::Database(sqlx::Error::PoolTimedOut))
}

#[axum::async_trait]
impl HistoryStore for UnavailableHistoryStore {
    async fn list_by_volunteer(&self, _volunteer_id: i64) -> Result<Vec<HistoryEntry>> {
        pool_timeout()
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<HistoryEntry>> {
        pool_timeout()
    }

    async fn create(&self, _entry: &NewHistoryEntry) -> Result<HistoryEntry> {
        pool_timeout()
    }

    async fn update(
        &self,
        _id: Uuid,
        _patch: &UpdateHistoryEntryRequest,
    ) -> Result<Option<HistoryEntry>> {
        pool_timeout()
    }

    async fn complete(&self, _id: Uuid, _completion: &Completion) -> Result<Option<HistoryEntry>> {
        pool_timeout()
    }

    async fn delete(&self, _id: Uuid) -> Result<Option<HistoryEntry>> {
        pool_timeout()
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>> {
        pool_timeout()
    }

    async fn list_by_event(&self, _event_id: i64) -> Result<Vec<HistoryEntry>> {
        pool_timeout()
    }
}

/// Volunteer directory whose backend is unreachable
struct UnavailableDirectory;

#[axum::async_trait]
impl VolunteerDirectory for UnavailableDirectory {
    async fn find_profile(&self, _volunteer_id: i64) -> Result<Option<VolunteerProfile>> {
        pool_timeout()
    }

    async fn upsert_profile(
        &self,
        _volunteer_id: i64,
        _profile: &VolunteerProfile,
    ) -> Result<VolunteerProfile> {
        pool_timeout()
    }
}

fn app() -> Router {
    build_router(AppState::in_memory())
}

fn app_with_volunteers() -> Router {
    let directory = MemoryVolunteerDirectory::with_profiles([
        (1, profile("Alex Kim", &["Cooking"])),
        (2, profile("Jordan Lee", &["Driving", "First Aid"])),
    ]);
    build_router(AppState::new(
        Arc::new(MemoryHistoryStore::new()),
        Arc::new(directory),
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn food_drive(volunteer_id: i64, event_id: i64) -> Value {
    json!({
        "volunteerId": volunteer_id,
        "eventId": event_id,
        "eventName": "Food Drive",
        "eventDate": "2024-01-01",
        "eventLocation": "Hall"
    })
}

async fn create(app: &Router, volunteer_id: i64, event_id: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/history",
        Some(food_drive(volunteer_id, event_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn complete(app: &Router, id: &str, hours: i64) {
    let (status, _) = send(
        app,
        Method::POST,
        &format!("/api/history/{}/complete", id),
        Some(json!({ "hoursWorked": hours })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_get_entry() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/history", Some(food_drive(1, 2))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "History entry created successfully");
    assert_eq!(body["data"]["status"], "scheduled");
    assert_eq!(body["data"]["volunteerId"], 1);
    assert!(body["data"]["hoursWorked"].is_null());

    let id = body["data"]["id"].as_str().unwrap();
    let (status, body) = send(&app, Method::GET, &format!("/api/history/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eventName"], "Food Drive");
    assert_eq!(body["data"]["id"], id);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let app = app();
    let first = create(&app, 1, 2).await;
    let second = create(&app, 1, 2).await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_create_missing_field_creates_nothing() {
    let app = app();

    let mut payload = food_drive(1, 2);
    payload.as_object_mut().unwrap().remove("eventLocation");

    let (status, body) = send(&app, Method::POST, "/api/history", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required fields: eventLocation");

    let (status, body) = send(&app, Method::GET, "/api/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_create_accepts_zero_and_numeric_strings() {
    let app = app();

    let payload = json!({
        "volunteerId": "0",
        "eventId": 0,
        "eventName": "Park Cleanup",
        "eventDate": "2024-05-05",
        "eventLocation": "Riverside Park",
        "status": "cancelled"
    });
    let (status, body) = send(&app, Method::POST, "/api/history", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["volunteerId"], 0);
    assert_eq!(body["data"]["eventId"], 0);
    assert_eq!(body["data"]["status"], "cancelled");
}

#[tokio::test]
async fn test_create_rejects_malformed_input() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/history")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut payload = food_drive(1, 2);
    payload["volunteerId"] = json!("abc");
    let (status, body) = send(&app, Method::POST, "/api/history", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut payload = food_drive(1, 2);
    payload["status"] = json!("completed");
    let (status, body) = send(&app, Method::POST, "/api/history", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
}

#[tokio::test]
async fn test_update_merges_fields() {
    let app = app();
    let id = create(&app, 1, 2).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/history/{}", id),
        Some(json!({ "eventLocation": "Gym", "status": "no_show" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "History entry updated successfully");
    assert_eq!(body["data"]["eventLocation"], "Gym");
    assert_eq!(body["data"]["status"], "no_show");
    assert_eq!(body["data"]["eventName"], "Food Drive");
    assert_eq!(body["data"]["eventDate"], "2024-01-01");
    assert_eq!(body["data"]["id"], id.as_str());
}

#[tokio::test]
async fn test_update_unknown_and_invalid_transitions() {
    let app = app();

    let unknown = Uuid::new_v4();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/history/{}", unknown),
        Some(json!({ "eventName": "Other" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "History entry not found");

    let id = create(&app, 1, 2).await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/history/{}", id),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot change status from 'scheduled' to 'completed'"
    );

    complete(&app, &id, 3).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/history/{}", id),
        Some(json!({ "status": "scheduled" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_rejects_blank_text_and_excess_hours() {
    let app = app();
    let id = create(&app, 1, 2).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/history/{}", id),
        Some(json!({ "eventName": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["error"].as_str().unwrap().contains("event_name"));

    complete(&app, &id, 4).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/history/{}", id),
        Some(json!({ "hoursWorked": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, &format!("/api/history/{}", id), None).await;
    assert_eq!(body["data"]["eventName"], "Food Drive");
    assert_eq!(body["data"]["hoursWorked"], 4);
}

#[tokio::test]
async fn test_complete_event() {
    let app = app();
    let id = create(&app, 1, 2).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/history/{}/complete", id),
        Some(json!({ "hoursWorked": 5, "skillsUsed": ["Sorting"], "rating": "4" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event completed successfully");
    assert_eq!(body["data"]["hoursWorked"], 5);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["eventName"], "Food Drive");
    assert_eq!(body["data"]["rating"], 4);
    assert_eq!(body["data"]["skillsUsed"], json!(["Sorting"]));

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/history/{}/complete", id),
        Some(json!({ "hoursWorked": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_requires_hours() {
    let app = app();
    let id = create(&app, 1, 2).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/history/{}/complete", id),
        Some(json!({ "feedback": "Great" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Hours worked is required");

    let (_, body) = send(&app, Method::GET, &format!("/api/history/{}", id), None).await;
    assert_eq!(body["data"]["status"], "scheduled");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/history/{}/complete", id),
        Some(json!({ "hoursWorked": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["hoursWorked"], 0);
}

#[tokio::test]
async fn test_complete_unknown_entry() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/history/{}/complete", Uuid::new_v4()),
        Some(json!({ "hoursWorked": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_entry() {
    let app = app();
    let id = create(&app, 1, 2).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/history/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "History entry deleted successfully");

    let (status, _) = send(&app, Method::GET, &format!("/api/history/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/history/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::GET, "/api/history/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_volunteer_history() {
    let app = app();
    let first = create(&app, 1, 10).await;
    create(&app, 2, 10).await;
    let third = create(&app, 1, 11).await;

    let (status, body) = send(&app, Method::GET, "/api/volunteers/1/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first.as_str(), third.as_str()]);

    let (status, body) = send(&app, Method::GET, "/api/volunteers/99/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, Method::GET, "/api/volunteers/abc/history", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_stats_for_volunteer_without_entries() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/volunteers/5/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["volunteer"].is_null());
    assert_eq!(body["data"]["stats"]["totalEvents"], 0);
    assert_eq!(body["data"]["stats"]["completedEvents"], 0);
    assert_eq!(body["data"]["stats"]["totalHours"], 0);
    assert!(body["data"]["stats"]["averageRating"].is_null());
}

#[tokio::test]
async fn test_stats_with_volunteer_details() {
    let app = app_with_volunteers();
    let id = create(&app, 2, 7).await;
    send(
        &app,
        Method::POST,
        &format!("/api/history/{}/complete", id),
        Some(json!({ "hoursWorked": 4, "rating": 5 })),
    )
    .await;
    create(&app, 2, 8).await;

    let (status, body) = send(&app, Method::GET, "/api/volunteers/2/stats", None).await;
    assert_eq!(status, StatusCode::OK);

    let volunteer = &body["data"]["volunteer"];
    assert_eq!(volunteer["id"], 2);
    assert_eq!(volunteer["name"], "Jordan Lee");
    assert_eq!(volunteer["location"], "Dallas, TX");

    let stats = &body["data"]["stats"];
    assert_eq!(stats["totalEvents"], 2);
    assert_eq!(stats["completedEvents"], 1);
    assert_eq!(stats["scheduledEvents"], 1);
    assert_eq!(stats["totalHours"], 4);
    assert_eq!(stats["averageRating"], 5.0);
    assert_eq!(stats["rank"], 1);
}

#[tokio::test]
async fn test_top_volunteers() {
    let app = app_with_volunteers();

    for (volunteer_id, hours) in [(1, 3), (2, 8), (3, 5)] {
        let id = create(&app, volunteer_id, 1).await;
        complete(&app, &id, hours).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/top-volunteers?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);

    let ranking = body["data"].as_array().unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0]["volunteerId"], 2);
    assert_eq!(ranking[0]["totalHours"], 8);
    assert_eq!(ranking[0]["volunteerName"], "Jordan Lee");
    assert_eq!(ranking[0]["volunteerSkills"], json!(["Driving", "First Aid"]));
    assert_eq!(ranking[1]["volunteerId"], 3);
    assert_eq!(ranking[1]["volunteerName"], "Unknown");
    assert_eq!(ranking[1]["volunteerSkills"], json!([]));

    let (_, body) = send(&app, Method::GET, "/api/top-volunteers", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_top_volunteers_rejects_bad_limit() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/top-volunteers?limit=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "limit must be between 1 and 100");

    let (status, body) = send(&app, Method::GET, "/api/top-volunteers?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_event_history_is_enriched() {
    let app = app_with_volunteers();
    create(&app, 1, 42).await;
    create(&app, 9, 42).await;
    create(&app, 2, 43).await;

    let (status, body) = send(&app, Method::GET, "/api/events/42/history", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["volunteerName"], "Alex Kim");
    assert_eq!(entries[0]["volunteerSkills"], json!(["Cooking"]));
    assert_eq!(entries[0]["eventName"], "Food Drive");
    assert_eq!(entries[1]["volunteerName"], "Unknown");
    assert_eq!(entries[1]["volunteerSkills"], json!([]));
}

#[tokio::test]
async fn test_volunteer_profile() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/volunteers/4/profile", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let payload = json!({
        "fullName": "Riley Chen",
        "address1": "77 Elm St",
        "city": "Miami",
        "state": "FL",
        "zip": "33101",
        "skills": ["Tutoring"],
        "availability": ["2024-07-04"]
    });
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/volunteers/4/profile",
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullName"], "Riley Chen");

    let (status, body) = send(&app, Method::GET, "/api/volunteers/4/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], json!(["2024-07-04"]));

    let (_, body) = send(&app, Method::GET, "/api/volunteers/4/stats", None).await;
    assert_eq!(body["data"]["volunteer"]["name"], "Riley Chen");

    let mut invalid = payload;
    invalid["zip"] = json!("33-101");
    let (status, body) = send(&app, Method::PUT, "/api/volunteers/4/profile", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["error"].as_str().unwrap().contains("zip"));
}

#[tokio::test]
async fn test_backend_failure_returns_internal_error() {
    let app = build_router(AppState::new(
        Arc::new(UnavailableHistoryStore),
        Arc::new(MemoryVolunteerDirectory::new()),
    ));

    for (method, uri, body) in [
        (Method::GET, "/api/history".to_string(), None),
        (Method::POST, "/api/history".to_string(), Some(food_drive(1, 2))),
        (Method::GET, format!("/api/history/{}", Uuid::new_v4()), None),
        (Method::GET, "/api/top-volunteers".to_string(), None),
        (Method::GET, "/api/volunteers/1/stats".to_string(), None),
    ] {
        let (status, body) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "An internal error occurred");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_directory_failure_falls_back_to_unknown() {
    let history = Arc::new(MemoryHistoryStore::new());
    let app = build_router(AppState::new(history, Arc::new(UnavailableDirectory)));

    let id = create(&app, 3, 1).await;
    complete(&app, &id, 6).await;

    let (status, body) = send(&app, Method::GET, "/api/top-volunteers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["volunteerId"], 3);
    assert_eq!(body["data"][0]["volunteerName"], "Unknown");
    assert_eq!(body["data"][0]["volunteerSkills"], json!([]));

    let (status, body) = send(&app, Method::GET, "/api/events/1/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["volunteerName"], "Unknown");

    let (status, body) = send(&app, Method::GET, "/api/volunteers/3/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["volunteer"].is_null());
    assert_eq!(body["data"]["stats"]["totalHours"], 6);
}

#[test]
fn test_openapi_lists_every_route() {
    let doc = crate::ApiDoc::openapi();
    let paths: Vec<&String> = doc.paths.paths.keys().collect();

    for expected in [
        "/api/history",
        "/api/history/{id}",
        "/api/history/{id}/complete",
        "/api/volunteers/{volunteer_id}/history",
        "/api/volunteers/{volunteer_id}/stats",
        "/api/volunteers/{volunteer_id}/profile",
        "/api/events/{event_id}/history",
        "/api/top-volunteers",
    ] {
        assert!(
            paths.iter().any(|p| p.as_str() == expected),
            "missing path {}",
            expected
        );
    }
}
