//! # traintrack-api
//!
//! HTTP API layer for TrainTrack built on Axum.
//!
//! Provides the auth endpoints, health checks, CORS, request tracing,
//! DTOs, and the refresh-token cookie handling.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
