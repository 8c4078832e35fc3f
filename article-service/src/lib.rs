//! Article generation proxy.
//!
//! Receives the blog's "generate article" form submission over HTTP,
//! assembles a chat-completion prompt from the form fields, forwards it
//! to the configured upstream provider, and returns the generated text.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
