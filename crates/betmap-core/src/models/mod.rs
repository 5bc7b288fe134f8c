//! Data models for the betmap auth API.
//!
//! This module contains the wire types exchanged with the backend:
//!
//! - `User`, `RegisterData`: account data and the registration payload
//! - `TokenResponse`: token pair returned by login and refresh
//! - `ApiResponse`, `MessageResponse`: response envelopes

pub mod response;
pub mod user;

pub use response::{ApiResponse, MessageResponse, TokenResponse};
pub use user::{RegisterData, User};
