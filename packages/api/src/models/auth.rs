use serde::{Deserialize, Serialize};

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub username: String,
    pub user_id: i64,
    #[serde(default)]
    pub is_superuser: bool,
}

impl LoginResponse {
    pub fn into_session(self) -> store::Session {
        store::Session::new(self.user_id, self.username, self.is_superuser)
    }
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Sent as an empty string when not provided.
    pub mobile: String,
}

/// Body of `POST /reset-password`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub password: String,
}

/// Registration fields the backend can check for uniqueness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityField {
    Username,
    Email,
    Mobile,
}

impl AvailabilityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityField::Username => "username",
            AvailabilityField::Email => "email",
            AvailabilityField::Mobile => "mobile",
        }
    }
}

/// Body of `POST /check-availability`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AvailabilityRequest {
    pub field: AvailabilityField,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Availability {
    pub available: bool,
    #[serde(default)]
    pub message: String,
}

/// Generic `{ success, message }` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
