//! DBT Dost API crate - axum HTTP service for the chat assistant.
//!
//! Serves the same `POST /chat` contract the remote answering service
//! speaks, answered from the local knowledge base, plus a welcome line and a
//! health check.

pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
