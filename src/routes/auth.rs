use crate::{
    auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenService},
    error::AppError,
    models::User,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Single message for every failed login, so callers cannot tell an unknown
/// username from a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Register a new user
///
/// Hashes the password and appends the account to the credential store.
///
/// ## Responses:
/// - `201 Created`: plain-text confirmation.
/// - `400 Bad Request`: `username` or `password` missing/empty, or the username is taken.
/// - `500 Internal Server Error`: the users file could not be read or written.
#[post("/register")]
pub async fn register(
    users: web::Data<UserStore>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let (username, password) = register_data.into_inner().into_credentials()?;

    // Cheap pre-check so a duplicate does not pay for a bcrypt round; `insert`
    // re-checks under the write lock.
    if users.find(&username).await?.is_some() {
        log::warn!("Registration refused: username {:?} already exists", username);
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(&password)?;
    users.insert(User::new(username.clone(), password_hash)).await?;

    log::info!("Registered user {:?}", username);
    Ok(HttpResponse::Created().body("User registered successfully"))
}

/// Login user
///
/// Verifies the credentials and returns a bearer token valid for the configured TTL.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `401 Unauthorized`: unknown username or wrong password (same body either way).
/// - `500 Internal Server Error`: the users file could not be read.
#[post("/login")]
pub async fn login(
    users: web::Data<UserStore>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let login_data = login_data.into_inner();

    let user = users.find(&login_data.username).await?;
    let authenticated = user
        .filter(|user| verify_password(&login_data.password, &user.password_hash))
        .is_some();

    if !authenticated {
        log::warn!("Failed login for {:?}", login_data.username);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let token = tokens.issue(&login_data.username)?;
    log::info!("User {:?} logged in", login_data.username);
    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::json_config;
    use crate::store::MemoryStore;
    use actix_web::{http::StatusCode, test, App};
    use chrono::Duration;
    use serde_json::json;

    #[actix_rt::test]
    async fn test_register_validation() {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(web::Data::new(UserStore::new(MemoryStore::new())))
                .service(register),
        )
        .await;

        for payload in [
            json!({ "password": "pw123" }),
            json!({ "username": "ana" }),
            json!({ "username": "", "password": "pw123" }),
        ] {
            let req = test::TestRequest::post()
                .uri("/register")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        }

        let req = test::TestRequest::post()
            .uri("/register")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_rt::test]
    async fn test_login_rejects_malformed_stored_hash() {
        let users = UserStore::new(MemoryStore::with_records(vec![User::new(
            "ana".into(),
            "not-a-bcrypt-hash".into(),
        )]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(users))
                .app_data(web::Data::new(TokenService::new("secret", Duration::hours(1))))
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "ana", "password": "pw123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
