//! Land listings.

pub mod service;
pub mod types;

pub use service::Lands;
pub use types::{LandUpdate, NewLand};
