//! # Page flows: what each screen does, without the markup
//!
//! Every page action that talks to the backend goes through a function here,
//! generic over [`api::Transport`] so it runs unchanged against
//! [`api::RecordingTransport`] in tests. Flows return plain values or
//! user-facing messages; pages only copy those into signals and navigate.
//!
//! | Module | Screen |
//! |--------|--------|
//! | [`auth`] | Login, registration, password reset, availability checks |
//! | [`dashboard`] | Image selection and analysis |
//! | [`history`] | History browser |
//! | [`settings`] | Profile editing and history purge |
//! | [`admin`] | Admin console: filters, user edit/delete |

use api::ApiError;
use store::{Session, SessionService, SessionStore};
use thiserror::Error;

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod history;
pub mod settings;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Where a page sends the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    Dashboard,
    History,
    Settings,
    Admin,
}

impl Destination {
    /// Landing page right after sign-in.
    pub fn landing(session: &Session) -> Self {
        if session.is_admin {
            Destination::Admin
        } else {
            Destination::Dashboard
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Destination::Login => "/",
            Destination::Dashboard => "/dashboard",
            Destination::History => "/history",
            Destination::Settings => "/settings",
            Destination::Admin => "/admin",
        }
    }
}

/// Why a page could not load its data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Redirect(Destination),
    Message(String),
}

impl LoadError {
    /// 401 sends the visitor to login, 403 to the dashboard; anything else is shown.
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthorized { .. } => LoadError::Redirect(Destination::Login),
            ApiError::Forbidden { .. } => LoadError::Redirect(Destination::Dashboard),
            other => {
                tracing::warn!("Load failed: {}", other);
                LoadError::Message(fallback.to_string())
            }
        }
    }
}

/// Follow a load redirect. Ending up at login means the backend rejected the
/// stored session, so it is dropped before leaving; otherwise the sign-in page
/// would forward the visitor straight back.
pub fn follow_redirect<S: SessionStore>(
    sessions: &SessionService<S>,
    to: Destination,
) -> Destination {
    if to == Destination::Login {
        tracing::info!("Stored session rejected, signing out");
        sessions.clear();
    }
    to
}

/// Client-side validation failure, caught before any request is sent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

pub(crate) fn require(value: &str, label: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::Missing(label))
    } else {
        Ok(())
    }
}

/// Confirmation must match, then the length floor applies.
pub(crate) fn check_new_password(password: &str, confirm: &str) -> Result<(), FormError> {
    if password != confirm {
        return Err(FormError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiClient, Method, RecordingTransport};
    use serde_json::json;
    use store::MemoryStore;

    #[test]
    fn landing_depends_on_admin_flag() {
        assert_eq!(
            Destination::landing(&Session::new(1, "root", true)),
            Destination::Admin
        );
        assert_eq!(
            Destination::landing(&Session::new(2, "bob", false)),
            Destination::Dashboard
        );
    }

    #[test]
    fn load_errors_redirect_on_auth_codes() {
        let unauthorized = ApiError::Unauthorized { message: None };
        let forbidden = ApiError::Forbidden { message: None };
        assert_eq!(
            LoadError::from_api(&unauthorized, "x"),
            LoadError::Redirect(Destination::Login)
        );
        assert_eq!(
            LoadError::from_api(&forbidden, "x"),
            LoadError::Redirect(Destination::Dashboard)
        );
        assert_eq!(
            LoadError::from_api(&ApiError::Unreachable, "Failed"),
            LoadError::Message("Failed".into())
        );
    }

    #[tokio::test]
    async fn rejected_session_is_cleared_before_returning_to_login() {
        let client = ApiClient::new(RecordingTransport::new());
        client
            .transport()
            .respond(Method::Get, "/admin/logs", 401, json!({"success": false}));
        let sessions = SessionService::new(MemoryStore::new());
        sessions.save(&Session::new(1, "root", true));
        let stored = sessions.load();

        let Err(LoadError::Redirect(to)) = admin::load_console(&client, stored.as_ref()).await
        else {
            panic!("expected a redirect");
        };
        assert_eq!(follow_redirect(&sessions, to), Destination::Login);
        assert_eq!(sessions.load(), None);
    }

    #[tokio::test]
    async fn forbidden_redirect_keeps_the_session() {
        let client = ApiClient::new(RecordingTransport::new());
        client
            .transport()
            .respond(Method::Get, "/admin/logs", 403, json!({"success": false}));
        let sessions = SessionService::new(MemoryStore::new());
        let bob = Session::new(2, "bob", false);
        sessions.save(&bob);

        let Err(LoadError::Redirect(to)) = admin::load_console(&client, Some(&bob)).await else {
            panic!("expected a redirect");
        };
        assert_eq!(follow_redirect(&sessions, to), Destination::Dashboard);
        assert_eq!(sessions.load(), Some(bob));
    }

    #[test]
    fn password_rules() {
        assert_eq!(
            check_new_password("secret1", "secret2"),
            Err(FormError::PasswordMismatch)
        );
        assert_eq!(
            check_new_password("abc", "abc"),
            Err(FormError::PasswordTooShort)
        );
        assert_eq!(check_new_password("abcdef", "abcdef"), Ok(()));
    }

    #[test]
    fn missing_field_message() {
        assert_eq!(
            require("  ", "Username").unwrap_err().to_string(),
            "Username is required"
        );
    }
}
