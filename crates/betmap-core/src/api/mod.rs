//! HTTP API module for the betmap backend.
//!
//! This module provides the `ApiClient` for talking to the auth service
//! under `/api/auth`: login, logout, registration, email verification,
//! password recovery and the authenticated `me` endpoint.
//!
//! Authenticated requests carry the stored access token as a JWT bearer
//! header and are silently retried once after a token refresh when the
//! server answers 401.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
