//! Farmer and landowner accounts.

pub mod service;
pub mod types;

pub use service::Accounts;
pub use types::{LoginRequest, LoginResponse, ProfileUpdate, SignupRequest, SignupResponse};
