//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `state.rs`: store/coordinator/generator wiring and typed read helpers
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and boundary parsing into validated inputs
//! - `errors.rs`: the uniform error envelope

use std::sync::Arc;

use axum::{Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod state;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests). Owns store setup and product-catalog seeding.
pub fn build_app() -> anyhow::Result<Router> {
    let services = Arc::new(state::AppServices::new_in_memory()?);
    Ok(routes::router().layer(Extension(services)))
}
