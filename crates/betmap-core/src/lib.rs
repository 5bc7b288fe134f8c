//! Core library for betmap, a client for the betting-tracker auth API.
//!
//! This crate contains everything the front ends share:
//!
//! - `api`: HTTP client with bearer-token attachment and silent
//!   refresh-and-retry on 401
//! - `auth`: session token persistence, keychain credential storage,
//!   and auth form validation
//! - `models`: wire types for the auth endpoints
//! - `config`: application configuration and storage paths

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
