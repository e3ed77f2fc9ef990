//! Farmland listing backend.
//!
//! Farmers and landowners sign up, log in and maintain profiles; landowners
//! publish land listings; anyone may submit a free-form form. Every operation
//! is a direct read or write against one MongoDB collection:
//!
//! ```text
//! farm.farmers      accounts with role "farmer"
//! farm.landowners   accounts with role "landowner"
//! farm.lands        land listings, owner_id is a plain string
//! farm.forms        free-form submissions, stored verbatim
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Document storage (MongoDB and in-memory)
//! - [`account`]: Signup, login and profiles
//! - [`land`]: Land listings
//! - [`form`]: Free-form submissions
//! - [`api`]: HTTP API
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod account;
pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod land;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, FarmError, Result};
