//! Profile editing and history purge.

use api::{ApiClient, ApiError, Profile, ProfileUpdate, Transport};
use store::Session;

use super::{check_new_password, require, Destination, FormError, LoadError};

pub const PROFILE_SAVED: &str = "Profile updated successfully!";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub mobile: String,
    /// Left blank to keep the current password.
    pub new_password: String,
    pub confirm_password: String,
}

impl From<Profile> for ProfileForm {
    fn from(profile: Profile) -> Self {
        Self {
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            mobile: profile.mobile,
            new_password: String::new(),
            confirm_password: String::new(),
        }
    }
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.username, "Username")?;
        require(&self.email, "Email")?;
        if !self.new_password.is_empty() || !self.confirm_password.is_empty() {
            check_new_password(&self.new_password, &self.confirm_password)?;
        }
        Ok(())
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            password: (!self.new_password.is_empty()).then(|| self.new_password.clone()),
        }
    }
}

pub async fn load_profile<T: Transport>(
    client: &ApiClient<T>,
    session: Option<&Session>,
) -> Result<ProfileForm, LoadError> {
    let Some(session) = session else {
        return Err(LoadError::Redirect(Destination::Login));
    };
    client
        .profile(session)
        .await
        .map(ProfileForm::from)
        .map_err(|e| LoadError::from_api(&e, "Failed to load profile"))
}

/// Save the profile. On success returns the stored profile; the caller
/// renames the session if the username changed.
pub async fn save_profile<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    form: &ProfileForm,
) -> Result<Profile, String> {
    form.validate().map_err(|e| e.to_string())?;
    client
        .update_profile(session, &form.to_update())
        .await
        .map_err(|e| {
            tracing::warn!("Profile update failed: {}", e);
            e.message_or("Failed to update profile")
        })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClearOutcome {
    /// Declined at the prompt, or nothing to clear. No request was sent.
    Cancelled,
    Cleared(String),
}

pub fn clear_prompt(count: usize) -> String {
    format!("Are you sure you want to delete all {count} history items? This cannot be undone.")
}

/// Number of stored analyses, for the purge prompt. Failures count as zero.
pub async fn history_count<T: Transport>(client: &ApiClient<T>, session: &Session) -> usize {
    match client.history(session).await {
        Ok(records) => records.len(),
        Err(e) => {
            tracing::debug!("Could not count history: {}", e);
            0
        }
    }
}

/// Purge the user's history after an explicit confirmation.
pub async fn clear_history<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    count: usize,
    confirm: impl FnOnce(&str) -> bool,
) -> Result<ClearOutcome, String> {
    if count == 0 {
        return Ok(ClearOutcome::Cancelled);
    }
    if !confirm(&clear_prompt(count)) {
        return Ok(ClearOutcome::Cancelled);
    }
    match client.clear_history(session).await {
        Ok(ack) => Ok(ClearOutcome::Cleared(
            ack.message_or(&format!("Deleted {count} history items")),
        )),
        Err(ApiError::Unreachable) => Err(super::auth::UNREACHABLE_MESSAGE.to_string()),
        Err(e) => Err(e.message_or("Failed to clear history")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Method, RecordingTransport, RequestBody};
    use serde_json::json;

    fn session() -> Session {
        Session::new(7, "dave", false)
    }

    #[tokio::test]
    async fn declined_prompt_sends_no_delete() {
        let client = ApiClient::new(RecordingTransport::new());
        let mut prompt = String::new();

        let outcome = clear_history(&client, &session(), 5, |msg| {
            prompt = msg.to_string();
            false
        })
        .await
        .unwrap();

        assert_eq!(outcome, ClearOutcome::Cancelled);
        assert_eq!(
            prompt,
            "Are you sure you want to delete all 5 history items? This cannot be undone."
        );
        assert_eq!(client.transport().calls_to("/history/clear"), 0);
    }

    #[tokio::test]
    async fn confirmed_prompt_clears() {
        let client = ApiClient::new(RecordingTransport::new());
        client.transport().respond(
            Method::Delete,
            "/history/clear",
            200,
            json!({"success": true, "message": "Deleted 5 history items"}),
        );

        let outcome = clear_history(&client, &session(), 5, |_| true)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ClearOutcome::Cleared("Deleted 5 history items".into())
        );
        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Delete);
    }

    #[tokio::test]
    async fn empty_history_never_prompts() {
        let client = ApiClient::new(RecordingTransport::new());
        let outcome = clear_history(&client, &session(), 0, |_| panic!("prompted"))
            .await
            .unwrap();
        assert_eq!(outcome, ClearOutcome::Cancelled);
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn blank_password_is_not_sent() {
        let client = ApiClient::new(RecordingTransport::new());
        client.transport().respond(
            Method::Put,
            "/profile",
            200,
            json!({"success": true, "profile": {"username": "dave2", "email": "d@example.com", "first_name": "Dave", "mobile": null}}),
        );
        let form = ProfileForm {
            username: "dave2".into(),
            email: "d@example.com".into(),
            first_name: "Dave".into(),
            ..Default::default()
        };

        let profile = save_profile(&client, &session(), &form).await.unwrap();
        assert_eq!(profile.username, "dave2");
        let RequestBody::Json(body) = &client.transport().calls()[0].body else {
            panic!("expected json body");
        };
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn mismatched_new_password_is_caught_locally() {
        let client = ApiClient::new(RecordingTransport::new());
        let form = ProfileForm {
            username: "dave".into(),
            email: "d@example.com".into(),
            new_password: "secret1".into(),
            confirm_password: "secret2".into(),
            ..Default::default()
        };

        assert_eq!(
            save_profile(&client, &session(), &form).await.unwrap_err(),
            "Passwords do not match"
        );
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn history_count_tolerates_errors() {
        let client = ApiClient::new(RecordingTransport::new());
        assert_eq!(history_count(&client, &session()).await, 0);
    }
}
