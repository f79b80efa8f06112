use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The verified identity of the caller, read from request extensions.
///
/// Only available on routes wrapped by `AuthMiddleware`, which inserts the token's
/// `Claims` after verifying it. Anywhere else extraction fails with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser {
                username: claims.username.clone(),
            })),
            None => {
                let err = AppError::Unauthorized("Access denied: no token provided".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
