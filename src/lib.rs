#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "This crate contains the authentication and credential management core of the"]
#![doc = "TaskTrack application: password hashing, signed-token issuance and"]
#![doc = "verification, the register/login/change-password flows, the request"]
#![doc = "authentication gate, and the error taxonomy that maps every failure to a"]
#![doc = "stable, user-safe HTTP response. It is used by the main binary (`main.rs`)"]
#![doc = "to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
