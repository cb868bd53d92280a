use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::DomainError;

/// Extracts the verified identity from request extensions.
///
/// Intended for routes protected by `AuthGate`, which validates the bearer
/// token and inserts the `Claims` into request extensions. If the claims are
/// missing (the gate did not run), the request is rejected as unauthenticated.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                let err = DomainError::InvalidToken("No token provided".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

/// Extracts the raw bearer token from the `Authorization` header.
///
/// Used by handlers whose service flow re-verifies the token itself, such as
/// the password change pipeline.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl FromRequest for BearerToken {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => ready(Ok(BearerToken(token.to_string()))),
            None => {
                let err = DomainError::InvalidToken("No token provided".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
