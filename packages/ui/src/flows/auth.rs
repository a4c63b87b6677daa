//! Login, registration, password reset and availability checks.

use api::{ApiClient, ApiError, AvailabilityField, RegisterRequest, Transport};
use store::Session;

use super::{check_new_password, require, FormError};
use crate::debounce::DebouncedValidator;

pub const UNREACHABLE_MESSAGE: &str =
    "Cannot connect to server. Please ensure backend is running.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.username, "Username")?;
        require(&self.password, "Password")
    }
}

/// Message shown on the login form for a failed sign-in.
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Unreachable => UNREACHABLE_MESSAGE.to_string(),
        ApiError::Unauthorized { .. } => err.message_or("Invalid username or password"),
        other => other.message_or("Login failed. Please try again."),
    }
}

/// Authenticate; on success the caller persists the returned session.
pub async fn sign_in<T: Transport>(
    client: &ApiClient<T>,
    form: &LoginForm,
) -> Result<Session, String> {
    form.validate().map_err(|e| e.to_string())?;
    match client.login(form.username.trim(), &form.password).await {
        Ok(response) => Ok(response.into_session()),
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", form.username.trim(), e);
            Err(login_error_message(&e))
        }
    }
}

/// Tell the backend the session ended. Failures are logged and ignored; the
/// caller clears the local session regardless.
pub async fn sign_out<T: Transport>(client: &ApiClient<T>, session: Option<&Session>) {
    if let Err(e) = client.logout(session).await {
        tracing::debug!("Logout request failed, continuing: {}", e);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub mobile: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.name, "Name")?;
        require(&self.username, "Username")?;
        require(&self.email, "Email")?;
        require(&self.password, "Password")?;
        check_new_password(&self.password, &self.confirm_password)
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            mobile: self.mobile.trim().to_string(),
        }
    }
}

/// Create an account; the confirmation text is shown back on the login form.
pub async fn register<T: Transport>(
    client: &ApiClient<T>,
    form: &RegistrationForm,
) -> Result<String, String> {
    form.validate().map_err(|e| e.to_string())?;
    match client.register(&form.to_request()).await {
        Ok(ack) => Ok(ack.message_or("Registration successful! Please sign in.")),
        Err(ApiError::Unreachable) => Err(UNREACHABLE_MESSAGE.to_string()),
        Err(e) => Err(e.message_or("Registration failed. Please try again.")),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl ResetForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.email, "Email")?;
        require(&self.password, "New password")?;
        check_new_password(&self.password, &self.confirm_password)
    }
}

pub async fn reset_password<T: Transport>(
    client: &ApiClient<T>,
    form: &ResetForm,
) -> Result<String, String> {
    form.validate().map_err(|e| e.to_string())?;
    match client
        .reset_password(form.email.trim(), &form.password)
        .await
    {
        Ok(ack) => Ok(ack.message_or("Password reset successful! Please sign in.")),
        Err(ApiError::Unreachable) => Err(UNREACHABLE_MESSAGE.to_string()),
        Err(e) => Err(e.message_or("Password reset failed. Please try again.")),
    }
}

/// Inline indicator next to a registration field.
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityStatus {
    Checking,
    Available(String),
    Taken(String),
    /// The check itself failed; advisory only, so nothing is shown as an error.
    Unknown,
}

/// Debounced uniqueness check for one field.
///
/// Returns `None` when the value is blank or a newer keystroke superseded this one.
pub async fn check_availability<T: Transport>(
    client: &ApiClient<T>,
    validator: &DebouncedValidator<AvailabilityField>,
    field: AvailabilityField,
    value: String,
) -> Option<AvailabilityStatus> {
    if value.trim().is_empty() {
        validator.cancel(field);
        return None;
    }
    validator
        .submit(field, || async {
            match client.check_availability(field, value.trim()).await {
                Ok(result) if result.available => AvailabilityStatus::Available(result.message),
                Ok(result) => AvailabilityStatus::Taken(result.message),
                Err(e) => {
                    tracing::debug!("Availability check for {} failed: {}", field.as_str(), e);
                    AvailabilityStatus::Unknown
                }
            }
        })
        .await
}
