#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::{to_bytes, MessageBody},
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test,
    web::{self, Bytes},
    App, Error,
};
use chrono::Duration;
use serde_json::json;
use taskgate::auth::{AuthResponse, TokenService};
use taskgate::boundary::ErrorBoundary;
use taskgate::models::{Task, User};
use taskgate::routes;
use taskgate::store::{MemoryStore, RecordStore, TaskStore, UserStore};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct AppState {
    pub users: web::Data<UserStore>,
    pub tasks: web::Data<TaskStore>,
    pub tokens: web::Data<TokenService>,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self::with_backends(MemoryStore::<User>::new(), MemoryStore::<Task>::new())
    }

    pub fn with_backends(
        users: impl RecordStore<User> + 'static,
        tasks: impl RecordStore<Task> + 'static,
    ) -> Self {
        Self {
            users: web::Data::new(UserStore::new(users)),
            tasks: web::Data::new(TaskStore::new(tasks)),
            tokens: web::Data::new(TokenService::new(TEST_SECRET, Duration::hours(1))),
        }
    }
}

pub async fn init_app(
    state: &AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(state.users.clone())
            .app_data(state.tasks.clone())
            .app_data(state.tokens.clone())
            .app_data(routes::json_config())
            .wrap(ErrorBoundary)
            .configure(routes::config),
    )
    .await
}

/// Sends a request and returns status and body, whether the response came from a
/// handler or from an error raised by middleware.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Bytes)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            (status, test::read_body(resp).await)
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            (status, to_bytes(resp.into_body()).await.unwrap_or_default())
        }
    }
}

pub fn json_body(body: &Bytes) -> serde_json::Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "expected a JSON body, got {:?}: {}",
            String::from_utf8_lossy(body),
            e
        )
    })
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn register<S, B>(app: &S, username: &str, password: &str) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    send(app, req).await.0
}

pub async fn register_and_login<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let status = register(app, username, password).await;
    assert_eq!(status, StatusCode::CREATED, "registering {}", username);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "Login failed. Body: {:?}",
        String::from_utf8_lossy(&body)
    );

    let login: AuthResponse =
        serde_json::from_slice(&body).expect("Failed to parse login response JSON");
    assert!(!login.token.is_empty(), "Token should be a non-empty string");
    login.token
}
