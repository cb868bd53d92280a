use crate::{
    auth::{
        AuthService, AuthenticatedUser, BearerToken, ChangePasswordRequest, LoginRequest,
        MessageResponse, RegisterRequest, TokenResponse,
    },
    error::DomainError,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new identity. No token is issued; the client logs in separately.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, DomainError> {
    register_data.validate()?;

    service
        .register(
            &register_data.username,
            &register_data.email,
            &register_data.password,
        )
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User registered".to_string(),
    }))
}

/// Login user
///
/// Authenticates a username/password pair and returns a bearer token.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, DomainError> {
    login_data.validate()?;

    let token = service
        .login(&login_data.username, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Change password
///
/// Protected by `AuthGate`. The service re-verifies the presented token and
/// the current password before rotating the stored hash.
#[post("/change")]
pub async fn change_password(
    service: web::Data<AuthService>,
    user: AuthenticatedUser,
    token: BearerToken,
    change_data: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, DomainError> {
    change_data.validate()?;

    service
        .change_password(
            &token.0,
            &change_data.old_password,
            &change_data.new_password,
        )
        .await?;

    log::info!("password changed for user {}", user.0.username);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}
