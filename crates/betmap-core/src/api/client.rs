//! API client for the betmap auth service.
//!
//! This module provides the `ApiClient` struct, which owns the persisted
//! session tokens and implements the silent refresh-and-retry flow for
//! authenticated requests.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::models::{ApiResponse, MessageResponse, RegisterData, TokenResponse, User};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Retry progress for a single authenticated request. A 401 in `Initial`
/// triggers one token refresh and a re-issue; a 401 in `RetriedOnce` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryState {
    Initial,
    RetriedOnce,
}

/// Client for the auth endpoints under `{base_url}/auth`.
///
/// Owns the `SessionStore` it persists tokens through; callers inject the
/// store at construction rather than reaching for ambient global state.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client against the given base URL (e.g. `http://localhost/api`).
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth{}", self.base_url, path)
    }

    /// Read access to the underlying session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// True iff an access token is stored. Local check only; the server
    /// may still reject the token as expired.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The stored access token, if any
    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token()
    }

    /// Authenticate and persist the returned token pair.
    ///
    /// On failure any previously stored tokens are left untouched.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let tokens: TokenResponse = response.json().await?;

        self.session
            .set_tokens(tokens.access_token.clone(), tokens.refresh_token.clone())?;
        debug!("Login succeeded, session stored");

        Ok(tokens)
    }

    /// Tell the server to end the session, then clear the stored tokens.
    ///
    /// The server call is best-effort: tokens are cleared even when it
    /// fails, since the client cannot keep using them anyway.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        if let Some(token) = self.session.access_token() {
            let request = self.client.post(self.url("/logout")).bearer_auth(token);
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "Logout rejected by server");
                }
                Err(e) => warn!(error = %e, "Logout request failed"),
                Ok(_) => {}
            }
        }
        self.session.clear()?;
        Ok(())
    }

    /// Exchange the stored refresh token for a fresh token pair.
    ///
    /// Fails with `NoRefreshToken` when none is stored (and clears
    /// nothing). Any other failure clears the whole session, forcing a
    /// full re-login.
    pub async fn refresh(&mut self) -> Result<TokenResponse, ApiError> {
        let refresh_token = match self.session.refresh_token() {
            Some(token) => token.to_string(),
            None => return Err(ApiError::NoRefreshToken),
        };

        match self.request_refresh(&refresh_token).await {
            Ok(tokens) => {
                self.session
                    .set_tokens(tokens.access_token.clone(), tokens.refresh_token.clone())?;
                debug!("Token refresh succeeded");
                Ok(tokens)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh rejected, clearing session");
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "Failed to clear session after refresh failure");
                }
                Err(e)
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/refresh"))
            .bearer_auth(refresh_token)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Register a new account. No session state is touched.
    pub async fn register(&self, data: &RegisterData) -> Result<ApiResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(data)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Confirm an email address with the token from the verification mail
    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, ApiError> {
        self.post_with_query("/verify-email", &[("token", token)])
            .await
    }

    /// Ask the server to send a fresh verification mail
    pub async fn resend_verification(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.post_with_query("/resend-verification", &[("email", email)])
            .await
    }

    /// Start password recovery for the given address
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.post_with_query("/forgot-password", &[("email", email)])
            .await
    }

    /// Set a new password using the token from the recovery mail
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        self.post_with_query(
            "/reset-password",
            &[("token", token), ("new_password", new_password)],
        )
        .await
    }

    /// Fetch the account behind the current session
    pub async fn current_user(&mut self) -> Result<User, ApiError> {
        self.get_authed("/me").await
    }

    /// POST with query parameters and an empty body; these endpoints all
    /// answer with a single message.
    async fn post_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .query(query)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Authenticated GET with the silent refresh-and-retry flow.
    ///
    /// The first 401 triggers one refresh and a re-issue with the new
    /// access token; any 401 after that propagates. A failed refresh has
    /// already cleared the session and surfaces as `SessionExpired`, which
    /// front ends turn into a log-in-again prompt.
    async fn get_authed<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let mut state = RetryState::Initial;

        loop {
            let token = match self.session.access_token() {
                Some(token) => token.to_string(),
                None => return Err(ApiError::Unauthorized("No token available".to_string())),
            };

            let response = self.client.get(&url).bearer_auth(&token).send().await?;

            if response.status() == StatusCode::UNAUTHORIZED && state == RetryState::Initial {
                debug!(url = %url, "Access token rejected, attempting refresh");
                if self.refresh().await.is_err() {
                    // refresh() has already cleared the session
                    return Err(ApiError::SessionExpired);
                }
                state = RetryState::RetriedOnce;
                continue;
            }

            let response = Self::check_response(response).await?;
            return Ok(response.json().await?);
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
