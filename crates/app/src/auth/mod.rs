//! Login sessions and bearer authentication.

pub mod errors;
pub mod models;
mod repository;
pub mod service;
pub mod token;

pub use errors::AuthServiceError;
pub use models::{IssuedSession, UserId};
pub use service::*;
pub use token::AppSecret;
