use admissions::application::use_cases::auth::register::RegisterRequest;
use admissions::application::use_cases::auth::seed_admin::SeedAdmin;
use admissions::bootstrap::app_context::{AppContext, AppServices};
use admissions::bootstrap::config::{Config, PersistenceBackend};
use admissions::presentation::http::api_router;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@example.edu";
const ADMIN_PASSWORD: &str = "admin123";

fn config() -> Config {
    Config {
        api_port: 0,
        frontend_url: None,
        database_url: String::new(),
        persistence: PersistenceBackend::Memory,
        jwt_secret: "integration-test-secret".into(),
        jwt_expires_secs: 900,
        admin_seed: None,
        is_production: false,
    }
}

async fn app() -> Router {
    let ctx = AppContext::new(config(), AppServices::in_memory());
    let repo = ctx.user_repo();
    SeedAdmin {
        repo: repo.as_ref(),
    }
    .execute(&RegisterRequest {
        email: ADMIN_EMAIL.into(),
        name: "Admin User".into(),
        phone: None,
        password: ADMIN_PASSWORD.into(),
    })
    .await
    .expect("admin seeded");
    api_router(ctx)
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let res = app.clone().oneshot(req).await.expect("router responds");
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, value)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");
    let (status, _, value) = call(app, req).await;
    (status, value)
}

fn assert_json_error(status: StatusCode, body: &Value, expected: StatusCode, code: &str) {
    assert_eq!(status, expected, "{body}");
    assert_eq!(body["error"], code, "{body}");
    assert!(body["message"].is_string(), "{body}");
}

async fn register(app: &Router, email: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "name": "Applicant", "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["accessToken"]
        .as_str()
        .expect("token present")
        .to_string()
}

fn application_body(program: &str) -> Value {
    json!({
        "fullName": "Alice Applicant",
        "email": "alice@example.com",
        "phone": "555-0100",
        "address": "1 College Road",
        "dateOfBirth": "2005-04-12",
        "program": program,
        "previousEducation": [
            { "institution": "Central High", "degree": "HSC", "gradYear": "2023", "percentage": "91" }
        ],
        "documentUrls": [ { "name": "transcript.pdf", "url": "https://files.example.com/t.pdf" } ],
        "statement": "I like compilers.",
        "status": "ACCEPTED"
    })
}

#[tokio::test]
async fn full_admission_scenario() {
    let app = app().await;
    let alice = register(&app, "alice@example.com", "pw1pw1").await;
    assert_eq!(alice["role"], "APPLICANT");
    let alice_id = alice["id"].as_str().unwrap().to_string();
    let alice_token = login(&app, "alice@example.com", "pw1pw1").await;

    let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], alice_id.as_str());

    let (status, submitted) = send(
        &app,
        Method::POST,
        "/api/applications",
        Some(&alice_token),
        Some(application_body("CS")),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{submitted}");
    assert_eq!(submitted["status"], "UNDER_REVIEW");
    assert_eq!(submitted["userId"], alice_id.as_str());
    assert_eq!(submitted["previousEducation"][0]["gradYear"], "2023");
    let application_id = submitted["id"].as_str().unwrap().to_string();

    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/applications/{application_id}/status?status=ACCEPTED"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["status"], "ACCEPTED");

    let (status, mine) = send(
        &app,
        Method::GET,
        &format!("/api/applications/user/{alice_id}"),
        Some(&alice_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["status"], "ACCEPTED");
    assert_eq!(mine["id"], application_id.as_str());

    let (status, all) = send(&app, Method::GET, "/api/applications", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_admins_are_forbidden_from_admin_routes() {
    let app = app().await;
    let alice = register(&app, "alice@example.com", "pw1pw1").await;
    let token = login(&app, "alice@example.com", "pw1pw1").await;
    let (_, submitted) = send(
        &app,
        Method::POST,
        "/api/applications",
        Some(&token),
        Some(application_body("CS")),
    )
    .await;
    let application_id = submitted["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, "/api/applications", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
    assert!(body.get("items").is_none());

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/applications/{application_id}/status?status=ACCEPTED"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/applications", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, mine) = send(
        &app,
        Method::GET,
        &format!("/api/applications/user/{}", alice["id"].as_str().unwrap()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(mine["status"], "UNDER_REVIEW");
}

#[tokio::test]
async fn missing_application_is_not_found() {
    let app = app().await;
    let bob = register(&app, "bob@example.com", "pw2pw2").await;
    let token = login(&app, "bob@example.com", "pw2pw2").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/applications/user/{}", bob["id"].as_str().unwrap()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/applications/{}/status?status=REJECTED", uuid_like()),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registration_and_login_errors_use_precise_statuses() {
    let app = app().await;
    register(&app, "alice@example.com", "pw1pw1").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "ALICE@example.com", "name": "Again", "password": "pw1pw1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/auth/me",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_submission_and_bad_status_are_rejected() {
    let app = app().await;
    register(&app, "alice@example.com", "pw1pw1").await;
    let token = login(&app, "alice@example.com", "pw1pw1").await;
    let (_, submitted) = send(
        &app,
        Method::POST,
        "/api/applications",
        Some(&token),
        Some(application_body("CS")),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/applications",
        Some(&token),
        Some(application_body("Math")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!(
            "/api/applications/{}/status?status=MAYBE",
            submitted["id"].as_str().unwrap()
        ),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn health_reports_ok_on_memory_backend() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn malformed_requests_get_json_error_bodies() {
    let app = app().await;
    register(&app, "alice@example.com", "pw1pw1").await;
    let token = login(&app, "alice@example.com", "pw1pw1").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/applications/user/alice",
        Some(&token),
        None,
    )
    .await;
    assert_json_error(status, &body, StatusCode::BAD_REQUEST, "bad_request");

    let (status, body) = send(&app, Method::GET, "/api/applications/not-a-uuid", Some(&token), None).await;
    assert_json_error(status, &body, StatusCode::BAD_REQUEST, "bad_request");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request builds");
    let (status, headers, body) = call(&app, req).await;
    assert_json_error(status, &body, StatusCode::BAD_REQUEST, "bad_request");
    assert_eq!(
        headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com" })),
    )
    .await;
    assert_json_error(status, &body, StatusCode::BAD_REQUEST, "bad_request");

    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/applications/{}/status", uuid_like()),
        Some(&admin_token),
        None,
    )
    .await;
    assert_json_error(status, &body, StatusCode::BAD_REQUEST, "bad_request");
}

#[tokio::test]
async fn session_cookie_authenticates_and_logout_clears_it() {
    let app = app().await;
    let alice = register(&app, "alice@example.com", "pw1pw1").await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "alice@example.com", "password": "pw1pw1" }).to_string(),
        ))
        .expect("request builds");
    let (status, headers, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("cookie set")
        .to_string();
    let token = body["accessToken"].as_str().unwrap();
    assert!(set_cookie.starts_with(&format!("access_token={token};")));
    assert!(set_cookie.contains("HttpOnly"));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("theme=dark; access_token={token}"))
        .body(Body::empty())
        .expect("request builds");
    let (status, _, me) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK, "{me}");
    assert_eq!(me["id"], alice["id"]);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .body(Body::empty())
        .expect("request builds");
    let (status, headers, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let cleared = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("cookie cleared");
    assert!(cleared.starts_with("access_token=;"));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn applications_are_readable_only_by_owner_or_admin() {
    let app = app().await;
    let alice = register(&app, "alice@example.com", "pw1pw1").await;
    register(&app, "bob@example.com", "pw2pw2").await;
    let alice_token = login(&app, "alice@example.com", "pw1pw1").await;
    let bob_token = login(&app, "bob@example.com", "pw2pw2").await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, submitted) = send(
        &app,
        Method::POST,
        "/api/applications",
        Some(&alice_token),
        Some(application_body("CS")),
    )
    .await;
    let by_id = format!("/api/applications/{}", submitted["id"].as_str().unwrap());
    let by_user = format!("/api/applications/user/{}", alice["id"].as_str().unwrap());

    let (status, own) = send(&app, Method::GET, &by_id, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own["id"], submitted["id"]);

    let (status, body) = send(&app, Method::GET, &by_id, Some(&bob_token), None).await;
    assert_json_error(status, &body, StatusCode::FORBIDDEN, "forbidden");
    assert!(body.get("program").is_none());

    let (status, body) = send(&app, Method::GET, &by_user, Some(&bob_token), None).await;
    assert_json_error(status, &body, StatusCode::FORBIDDEN, "forbidden");

    let (status, seen) = send(&app, Method::GET, &by_id, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seen["program"], "CS");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/applications/{}", uuid_like()),
        Some(&alice_token),
        None,
    )
    .await;
    assert_json_error(status, &body, StatusCode::NOT_FOUND, "not_found");
}

fn uuid_like() -> &'static str {
    "7d1f5a9e-3c4b-4e8a-9f2d-1a2b3c4d5e6f"
}
