use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration payload.
#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "Pass123")]
    pub password: Option<String>,
    #[schema(example = "Alice Anderson")]
    pub full_name: Option<String>,
}

/// Login payload. `email` wins when both identifiers are sent.
#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

// Raw passwords must never reach the logs.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("full_name", &self.full_name)
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
    /// Placeholder value; real token issuance is not implemented.
    pub token: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_passwords() {
        let request = RegisterRequest {
            username: Some("alice".to_string()),
            email: Some("alice@x.com".to_string()),
            password: Some("Pass123".to_string()),
            full_name: Some("Alice A".to_string()),
        };

        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("Pass123"));
        assert!(rendered.contains("alice@x.com"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let request: LoginRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();

        assert_eq!(request.email.as_deref(), Some("a@b.co"));
        assert!(request.password.is_none());
        assert!(request.username.is_none());
    }
}
