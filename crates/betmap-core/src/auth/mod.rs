//! Authentication module for managing session tokens and credentials.
//!
//! This module provides:
//! - `SessionStore`: file-backed persistence for the bearer token pair
//! - `CredentialStore`: secure OS-level credential storage via keyring
//! - `AuthForm`: client-side validation for the login, registration and
//!   password-recovery form modes
//!
//! Tokens are persisted to `session.json` in the app data directory and
//! cleared on logout or when a refresh is rejected.

pub mod credentials;
pub mod forms;
pub mod session;

pub use credentials::CredentialStore;
pub use forms::{AuthForm, FormError, FormMode};
pub use session::{SessionStore, SessionTokens};
