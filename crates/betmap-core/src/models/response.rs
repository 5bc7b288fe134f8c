use serde::{Deserialize, Serialize};

/// Token payload returned by the login and refresh endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Envelope returned by the register endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Single-message response used by the verification and password endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let json = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
            "refresh_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
            "token_type": "bearer",
            "expires_in": 3600,
            "issued_at": "2023-01-01T00:00:00Z"
        }"#;

        let tokens: TokenResponse =
            serde_json::from_str(json).expect("Failed to parse token response");
        assert_eq!(tokens.token_type, "bearer");
        assert_eq!(tokens.expires_in, 3600);
    }

    #[test]
    fn test_parse_api_response_without_data() {
        let json = r#"{"success": true, "message": "ok"}"#;

        let response: ApiResponse =
            serde_json::from_str(json).expect("Failed to parse api response");
        assert!(response.success);
        assert_eq!(response.data, None);
    }
}
