//! HTTP handlers for the article proxy.

pub mod generate;
pub mod health;

pub use generate::{generate_article, method_not_allowed, preflight};
pub use health::{health_check, readiness_check};
