pub mod auth;
pub mod health;

use actix_web::web;

use crate::auth::{AuthGate, TokenCodec};

/// Builds the `/auth` route tree.
///
/// Registration and login are public; the password change scope is wrapped in
/// `AuthGate`, so only requests bearing a verifiable token reach the handler.
pub fn config(codec: TokenCodec) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login)
                .service(
                    web::scope("/password")
                        .wrap(AuthGate::new(codec))
                        .service(auth::change_password),
                ),
        );
    }
}
