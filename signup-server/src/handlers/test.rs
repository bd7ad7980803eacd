use crate::router::router;
use crate::state::State;
use axum::{
    body::{to_bytes, Body},
    extract::FromRef,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use signup_core::hasher::{Argon2Hasher, Cost};
use signup_core::{Account, InMemoryUserRepository, RegistrationService, UserRepository};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

/// A server wired up to an in-memory repository and a cheap hasher.
pub struct TestApp {
    pub repo: Arc<InMemoryUserRepository>,
    pub state: State,
}

impl TestApp {
    /// Create a new, empty `TestApp` for a test
    pub fn new() -> Self {
        let repo = Arc::new(InMemoryUserRepository::new());
        let hasher = Argon2Hasher::new(Cost {
            memory_kib: Some(8),
            iterations: Some(1),
            parallelism: Some(1),
        })
        .expect("minimum cost should be valid");

        TestApp {
            state: State::new(repo.clone(), Arc::new(hasher)),
            repo,
        }
    }

    /// The registration service, as handlers see it
    pub fn registrations(&self) -> RegistrationService {
        RegistrationService::from_ref(&self.state)
    }

    /// The full router, middleware included
    pub fn router(&self) -> Router {
        router(self.state.clone(), 1024 * 1024, Duration::from_secs(5))
    }

    /// Look up an account that a test expects to exist
    pub async fn account(&self, email: &str) -> Account {
        self.repo
            .find_by_email(email)
            .await
            .unwrap()
            .expect("account should exist")
    }
}

/// Send a raw body to the router and parse the JSON response.
async fn post(router: Router, path: &str, content_type: &str, body: String) -> (StatusCode, Value) {
    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
    post(router, path, "application/json", body.to_string()).await
}

fn individual_body() -> Value {
    json!({
        "email": "a@x.com",
        "password": "pw123456",
        "fullName": "Nguyen A",
        "nationalId": "001",
    })
}

fn business_body() -> Value {
    json!({
        "adminEmail": "b@x.com",
        "adminPassword": "pw123456",
        "companyName": "ABC Co",
        "taxCode": "T001",
        "companyAddress": "123 St",
    })
}

#[test_log::test(tokio::test)]
async fn individual_then_duplicate() {
    let app = TestApp::new();

    let (status, body) = post_json(
        app.router(),
        "/api/auth/register/individual",
        individual_body(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "a@x.com");
    assert!(!body["userId"].as_str().unwrap().is_empty());
    assert_eq!(body["message"], "Individual account registered successfully!");
    assert_eq!(body.as_object().unwrap().len(), 3);

    let (status, body) = post_json(
        app.router(),
        "/api/auth/register/individual",
        individual_body(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMAIL_ALREADY_REGISTERED");
    assert_eq!(body["message"], "an account with this email already exists");
    assert!(body.get("error").is_none());
    assert_eq!(app.repo.account_count().await, 1);
}

#[test_log::test(tokio::test)]
async fn business_success() {
    let app = TestApp::new();

    let (status, body) =
        post_json(app.router(), "/api/auth/register/business", business_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["adminEmail"], "b@x.com");
    assert_eq!(body["companyName"], "ABC Co");
    assert!(!body["adminUserId"].as_str().unwrap().is_empty());
    assert_eq!(body["message"], "Business account registered successfully!");
    assert_eq!(body.as_object().unwrap().len(), 4);
}

#[test_log::test(tokio::test)]
async fn business_admin_email_collides_with_individual() {
    let app = TestApp::new();
    post_json(
        app.router(),
        "/api/auth/register/individual",
        individual_body(),
    )
    .await;

    let mut body = business_body();
    body["adminEmail"] = json!("a@x.com");
    let (status, body) = post_json(app.router(), "/api/auth/register/business", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMAIL_ALREADY_REGISTERED");
}

#[test_log::test(tokio::test)]
async fn missing_fields_are_bad_requests() {
    let app = TestApp::new();

    for field in ["email", "password", "fullName", "nationalId"] {
        let mut body = individual_body();
        body[field] = Value::Null;

        let (status, body) =
            post_json(app.router(), "/api/auth/register/individual", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(body["code"], "MISSING_FIELDS", "{field}");
        assert!(body["message"].as_str().unwrap().contains("nationalId"));
    }

    for field in [
        "adminEmail",
        "adminPassword",
        "companyName",
        "taxCode",
        "companyAddress",
    ] {
        let mut body = business_body();
        body[field] = json!("");

        let (status, body) = post_json(app.router(), "/api/auth/register/business", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(body["code"], "MISSING_FIELDS", "{field}");
    }

    assert_eq!(app.repo.account_count().await, 0);
}

#[test_log::test(tokio::test)]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = post(
        app.router(),
        "/api/auth/register/individual",
        "application/json",
        "{\"email\": ".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_BODY");
}

#[test_log::test(tokio::test)]
async fn wrong_content_type_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = post(
        app.router(),
        "/api/auth/register/business",
        "text/plain",
        business_body().to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_BODY");
    assert_eq!(app.repo.account_count().await, 0);
}

#[test_log::test(tokio::test)]
async fn responses_never_contain_password_material() {
    let app = TestApp::new();

    let (_, created) = post_json(
        app.router(),
        "/api/auth/register/individual",
        individual_body(),
    )
    .await;
    let (_, rejected) = post_json(
        app.router(),
        "/api/auth/register/individual",
        individual_body(),
    )
    .await;

    let hash = app.account("a@x.com").await.password_hash;
    for body in [created, rejected] {
        let text = body.to_string();
        assert!(!text.contains("pw123456"));
        assert!(!text.contains(hash.as_str()));
        assert!(!text.contains("passwordHash"));
        assert!(body["message"].is_string());
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn concurrent_registrations_with_one_email_succeed_once() {
    let app = TestApp::new();

    let first = tokio::spawn(post_json(
        app.router(),
        "/api/auth/register/individual",
        individual_body(),
    ));
    let second = tokio::spawn(post_json(
        app.router(),
        "/api/auth/register/individual",
        individual_body(),
    ));

    let mut statuses = vec![first.await.unwrap().0, second.await.unwrap().0];
    statuses.sort();

    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);
    assert_eq!(app.repo.account_count().await, 1);
}

#[test_log::test(tokio::test)]
async fn health_is_ok() {
    let app = TestApp::new();

    let resp = app
        .router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}
