//! HTTP-level tests for the REST router, backed by in-memory service stubs.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use timetable_config::ServerConfig;
use timetable_core::{
    GroupId, HealthCheck, HealthStatus, ScheduleId, TimetableError, TimetableResult,
};
use timetable_rest::{create_router, AppState};
use timetable_service::{
    GroupDto, GroupService, RequestCounter, RequestCounterInterface, ScheduleDto, ScheduleService,
};
use tower::ServiceExt;

struct StubGroupService {
    groups: Mutex<BTreeMap<i64, GroupDto>>,
    counter: Arc<RequestCounter>,
}

impl StubGroupService {
    fn count(&self) {
        self.counter.increment();
    }

    fn insert(&self, mut dto: GroupDto) -> GroupDto {
        let mut groups = self.groups.lock().unwrap();
        let id = groups.len() as i64 + 1;
        dto.id = Some(GroupId::new(id));
        groups.insert(id, dto.clone());
        dto
    }
}

#[async_trait]
impl GroupService for StubGroupService {
    async fn find_all(&self) -> TimetableResult<Vec<GroupDto>> {
        self.count();
        Ok(self.groups.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: GroupId) -> TimetableResult<GroupDto> {
        self.count();
        self.groups
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .cloned()
            .ok_or_else(|| TimetableError::not_found("Group", id))
    }

    async fn find_by_group_number(&self, group_number: &str) -> TimetableResult<GroupDto> {
        self.count();
        self.groups
            .lock()
            .unwrap()
            .values()
            .find(|g| g.group_number == group_number)
            .cloned()
            .ok_or_else(|| TimetableError::group_number_not_found(group_number))
    }

    async fn create(&self, dto: GroupDto) -> TimetableResult<GroupDto> {
        self.count();
        Ok(self.insert(dto))
    }

    async fn update(&self, id: GroupId, mut dto: GroupDto) -> TimetableResult<GroupDto> {
        self.count();
        let mut groups = self.groups.lock().unwrap();
        let slot = groups
            .get_mut(&id.into_inner())
            .ok_or_else(|| TimetableError::not_found("Group", id))?;
        dto.id = Some(id);
        *slot = dto.clone();
        Ok(dto)
    }

    async fn delete(&self, id: GroupId) -> TimetableResult<()> {
        self.count();
        self.groups
            .lock()
            .unwrap()
            .remove(&id.into_inner())
            .map(|_| ())
            .ok_or_else(|| TimetableError::not_found("Group", id))
    }

    async fn create_bulk(&self, dtos: Vec<GroupDto>) -> TimetableResult<Vec<GroupDto>> {
        self.count();
        Ok(dtos.into_iter().map(|dto| self.insert(dto)).collect())
    }

    async fn update_bulk(&self, dtos: Vec<GroupDto>) -> TimetableResult<Vec<GroupDto>> {
        self.count();
        if dtos.iter().any(|d| d.id.is_none()) {
            return Err(TimetableError::validation("Group ID is required for bulk update"));
        }
        Ok(dtos)
    }
}

#[derive(Default)]
struct StubScheduleService {
    lookups: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ScheduleService for StubScheduleService {
    async fn find_all(&self) -> TimetableResult<Vec<ScheduleDto>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, id: ScheduleId) -> TimetableResult<ScheduleDto> {
        Err(TimetableError::not_found("Schedule", id))
    }

    async fn find_by_group_id(&self, _group_id: GroupId) -> TimetableResult<Vec<ScheduleDto>> {
        Ok(Vec::new())
    }

    async fn find_by_group_number_and_date(
        &self,
        group_number: &str,
        date: &str,
    ) -> TimetableResult<Vec<ScheduleDto>> {
        self.lookups
            .lock()
            .unwrap()
            .push((group_number.to_string(), date.to_string()));
        Ok(Vec::new())
    }

    async fn get_schedule(&self, group_number: &str, date: &str) -> TimetableResult<Vec<ScheduleDto>> {
        self.lookups
            .lock()
            .unwrap()
            .push((group_number.to_string(), date.to_string()));
        if date == "not-a-date" {
            return Err(TimetableError::validation("Invalid date format, expected yyyy-MM-dd"));
        }
        Ok(vec![ScheduleDto {
            id: None,
            subject: "Physics".to_string(),
            lesson_type: "LK".to_string(),
            time: "09:00-10:20".to_string(),
            auditorium: "101-1".to_string(),
            group_id: Some(GroupId::new(1)),
            group_number: Some(group_number.to_string()),
            date: Some(date.to_string()),
        }])
    }

    async fn create(&self, dto: ScheduleDto) -> TimetableResult<ScheduleDto> {
        Ok(ScheduleDto {
            id: Some(ScheduleId::new(1)),
            ..dto
        })
    }

    async fn update(&self, id: ScheduleId, _dto: ScheduleDto) -> TimetableResult<ScheduleDto> {
        Err(TimetableError::not_found("Schedule", id))
    }

    async fn delete(&self, id: ScheduleId) -> TimetableResult<()> {
        Err(TimetableError::not_found("Schedule", id))
    }

    async fn create_bulk(&self, dtos: Vec<ScheduleDto>) -> TimetableResult<Vec<ScheduleDto>> {
        Ok(dtos)
    }

    async fn update_bulk(&self, dtos: Vec<ScheduleDto>) -> TimetableResult<Vec<ScheduleDto>> {
        Ok(dtos)
    }
}

struct FailingCheck;

#[async_trait]
impl HealthCheck for FailingCheck {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Unhealthy("connection refused".to_string())
    }
}

struct TestApp {
    router: Router,
    counter: Arc<RequestCounter>,
    schedules: Arc<StubScheduleService>,
}

fn test_app() -> TestApp {
    test_app_with(|state| state)
}

fn test_app_with(customize: impl FnOnce(AppState) -> AppState) -> TestApp {
    let counter = Arc::new(RequestCounter::new());
    let groups = Arc::new(StubGroupService {
        groups: Mutex::new(BTreeMap::new()),
        counter: Arc::clone(&counter),
    });
    let schedules = Arc::new(StubScheduleService::default());

    let state = AppState::new(groups, schedules.clone(), counter.clone());
    let router = create_router(customize(state), &ServerConfig::default());

    TestApp {
        router,
        counter,
        schedules,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_group_returns_ok_envelope() {
    let app = test_app();

    let (status, body) = send(&app.router, json("POST", "/api/groups", r#"{"groupNumber":"350501"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["groupNumber"], "350501");
    assert_eq!(body["data"]["id"], 1);
}

#[tokio::test]
async fn test_bulk_create_returns_created() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        json("POST", "/api/groups/bulk", r#"[{"groupNumber":"350501"},{"groupNumber":"350502"}]"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_blank_group_number_is_unprocessable() {
    let app = test_app();

    let (status, body) = send(&app.router, json("POST", "/api/groups", r#"{"groupNumber":"  "}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(app.counter.count(), 0);
}

#[tokio::test]
async fn test_unknown_group_is_not_found() {
    let app = test_app();

    let (status, body) = send(&app.router, get("/api/groups/42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_find_by_group_number_route() {
    let app = test_app();
    send(&app.router, json("POST", "/api/groups", r#"{"groupNumber":"350501"}"#)).await;

    let (status, body) = send(&app.router, get("/api/groups/number/350501")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
}

#[tokio::test]
async fn test_delete_group_returns_no_content() {
    let app = test_app();
    send(&app.router, json("POST", "/api/groups", r#"{"groupNumber":"350501"}"#)).await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/groups/1")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_bulk_update_without_id_is_bad_request() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        json("POST", "/api/groups/bulk-update", r#"[{"groupNumber":"350501"}]"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_external_schedule_query_is_forwarded() {
    let app = test_app();

    let (status, body) = send(&app.router, get("/api/schedules/api?group=350501&date=2025-03-03")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["subject"], "Physics");
    assert_eq!(body["data"][0]["groupNumber"], "350501");
    assert_eq!(body["data"][0]["date"], "2025-03-03");
    assert_eq!(
        app.schedules.lookups.lock().unwrap().as_slice(),
        &[("350501".to_string(), "2025-03-03".to_string())]
    );
}

#[tokio::test]
async fn test_external_schedule_bad_date_is_bad_request() {
    let app = test_app();

    let (status, _) = send(&app.router, get("/api/schedules/api?group=350501&date=not-a-date")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_external_schedule_missing_query_is_rejected() {
    let app = test_app();

    let (status, _) = send(&app.router, get("/api/schedules/api?group=350501")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.schedules.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_group_and_date_query_uses_camel_case() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        get("/api/schedules/by-group-and-date?groupNumber=350501&date=09:00"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.schedules.lookups.lock().unwrap().as_slice(),
        &[("350501".to_string(), "09:00".to_string())]
    );
}

#[tokio::test]
async fn test_schedule_without_group_id_is_unprocessable() {
    let app = test_app();
    let body = r#"{"subject":"Math","lessonType":"LK","time":"09:00","auditorium":"101"}"#;

    let (status, body) = send(&app.router, json("POST", "/api/schedules", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "group_id");
}

#[tokio::test]
async fn test_unknown_schedule_delete_is_not_found() {
    let app = test_app();

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/schedules/7")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_counter_reports_service_calls_without_counting_itself() {
    let app = test_app();
    send(&app.router, get("/api/groups")).await;
    send(&app.router, get("/api/groups")).await;

    let (status, body) = send(&app.router, get("/api/counter")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], 2);

    let (_, body) = send(&app.router, get("/api/counter")).await;
    assert_eq!(body["data"], 2);
}

#[tokio::test]
async fn test_counter_reset() {
    let app = test_app();
    send(&app.router, get("/api/groups")).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/counter/reset")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.counter.count(), 0);
}

#[tokio::test]
async fn test_readiness_without_checks_is_ready() {
    let app = test_app();

    let (status, body) = send(&app.router, get("/ready")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_readiness_reports_failed_dependency() {
    let app = test_app_with(|state| state.with_health_check(Arc::new(FailingCheck)));

    let (status, body) = send(&app.router, get("/ready")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["components"][0]["name"], "database");
    assert_eq!(body["components"][0]["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app();

    let (status, body) = send(&app.router, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/schedules/api"].is_object());
}
