//! Request-scoped domain models.

pub mod request;

pub use request::GenerationRequest;
