use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::{TokenError, TokenService};
use crate::error::AppError;

/// Guards every route it wraps with a bearer token check.
///
/// - no `Authorization: Bearer <token>` header: 401
/// - token present but bad signature, garbled or expired: 403
/// - valid token: the decoded `Claims` are inserted into request extensions and the
///   request continues
///
/// The `TokenService` is taken from app data, so it must be registered with
/// `App::app_data(web::Data<TokenService>)`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

/// Pulls the token out of a `Bearer <token>` authorization header.
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let tokens = match req.app_data::<web::Data<TokenService>>() {
            Some(tokens) => tokens.clone(),
            None => {
                let app_err =
                    AppError::InternalServerError("TokenService is not registered as app data".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        let token = match bearer_token(req.headers()) {
            Some(token) => token,
            None => {
                log::warn!("Rejected {} {}: missing bearer token", req.method(), req.path());
                let app_err = AppError::Unauthorized("Access denied: no token provided".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        match tokens.verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            Err(token_err) => {
                log::warn!("Rejected {} {}: {}", req.method(), req.path(), token_err);
                let message = match token_err {
                    TokenError::Expired => "Token expired",
                    TokenError::Invalid(_) => "Invalid token",
                };
                let app_err = AppError::Forbidden(message.into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use actix_web::{http::StatusCode, test, App, HttpResponse};
    use chrono::Duration;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    fn token_service() -> web::Data<TokenService> {
        web::Data::new(TokenService::new("middleware-test-secret", Duration::hours(1)))
    }

    #[actix_rt::test]
    async fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, "bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));

        headers.insert(AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[actix_rt::test]
    async fn test_gate_states() {
        let tokens = token_service();
        let valid = tokens.issue("ana").unwrap();
        let expired = TokenService::new("middleware-test-secret", Duration::seconds(-10))
            .issue("ana")
            .unwrap();

        let app = test::init_service(
            App::new().app_data(tokens.clone()).service(
                web::scope("/guarded")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let cases = vec![
            (None, StatusCode::UNAUTHORIZED, "no header"),
            (Some("Token abc".to_string()), StatusCode::UNAUTHORIZED, "wrong scheme"),
            (Some("Bearer garbage".to_string()), StatusCode::FORBIDDEN, "garbled token"),
            (Some(format!("Bearer {}", expired)), StatusCode::FORBIDDEN, "expired token"),
            (Some(format!("Bearer {}", valid)), StatusCode::OK, "valid token"),
        ];

        for (header, expected, description) in cases {
            let mut req = test::TestRequest::get().uri("/guarded");
            if let Some(value) = header {
                req = req.insert_header((AUTHORIZATION, value));
            }
            // Errors raised by middleware surface as Err from try_call_service.
            let status = match test::try_call_service(&app, req.to_request()).await {
                Ok(resp) => resp.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            assert_eq!(status, expected, "case: {}", description);
        }
    }

    #[actix_rt::test]
    async fn test_claims_reach_the_handler() {
        let tokens = token_service();
        let token = tokens.issue("ana").unwrap();

        let app = test::init_service(
            App::new().app_data(tokens).service(
                web::scope("/guarded")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "ana");
    }
}
