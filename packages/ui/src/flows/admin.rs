//! # Admin console logic
//!
//! Filtering of the user and log tables, the edit form, and the user
//! mutations with their [`MutationState`] machine:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Succeeded(msg) ──after 1 s──▶ modal closed
//!                       │
//!                       └──err──▶ Failed(msg)  (modal stays open)
//! ```

use api::{AdminData, AdminUser, AdminUserUpdate, AnalysisRecord, ApiClient, ApiError, Transport};
use store::Session;

use super::{require, Destination, FormError, LoadError};

pub const USER_UPDATED: &str = "✓ User updated successfully!";
pub const USER_DELETED: &str = "✓ User deleted!";

pub async fn load_console<T: Transport>(
    client: &ApiClient<T>,
    session: Option<&Session>,
) -> Result<AdminData, LoadError> {
    let Some(session) = session else {
        return Err(LoadError::Redirect(Destination::Login));
    };
    client
        .admin_overview(session)
        .await
        .map_err(|e| LoadError::from_api(&e, "Failed to load admin data"))
}

/// Users whose username or email contains `term`, ignoring case. A blank term keeps all.
pub fn filter_users<'a>(users: &'a [AdminUser], term: &str) -> Vec<&'a AdminUser> {
    let term = term.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            term.is_empty()
                || u.username.to_lowercase().contains(&term)
                || u.email.to_lowercase().contains(&term)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFilter {
    #[default]
    All,
    Real,
    Fake,
}

impl LogFilter {
    pub const ALL: [LogFilter; 3] = [LogFilter::All, LogFilter::Real, LogFilter::Fake];

    pub fn label(&self) -> &'static str {
        match self {
            LogFilter::All => "All",
            LogFilter::Real => "Real",
            LogFilter::Fake => "Fake",
        }
    }

    fn keeps(&self, record: &AnalysisRecord) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::Real => record.is_real,
            LogFilter::Fake => !record.is_real,
        }
    }
}

pub fn filter_logs(logs: &[AnalysisRecord], filter: LogFilter) -> Vec<&AnalysisRecord> {
    logs.iter().filter(|l| filter.keeps(l)).collect()
}

/// Records belonging to `user`, matched by username.
pub fn logs_for_user<'a>(logs: &'a [AnalysisRecord], user: &AdminUser) -> Vec<&'a AnalysisRecord> {
    logs.iter()
        .filter(|l| l.username.as_deref() == Some(user.username.as_str()))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MutationState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl MutationState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, MutationState::Submitting)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            MutationState::Succeeded(m) | MutationState::Failed(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub password: String,
    pub is_superuser: bool,
}

impl From<&AdminUser> for EditForm {
    fn from(user: &AdminUser) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            password: String::new(),
            is_superuser: user.is_superuser,
        }
    }
}

impl EditForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.username, "Username")?;
        require(&self.email, "Email")
    }

    pub fn to_update(&self) -> AdminUserUpdate {
        AdminUserUpdate {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            is_superuser: self.is_superuser,
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        }
    }
}

/// Admins may not change their own role or delete themselves from the console.
///
/// This is a client-side guard only; the backend does not enforce it.
pub fn is_own_account(session: &Session, user_id: i64) -> bool {
    session.user_id == user_id
}

pub fn delete_prompt(username: &str) -> String {
    format!(
        "Are you sure you want to delete user \"{username}\"? This will also delete all their analysis history."
    )
}

fn mutation_failure(err: &ApiError, rejected: &str, errored: &str) -> String {
    tracing::warn!("Admin mutation failed: {}", err);
    if let Some(message) = err.server_message() {
        return message.to_string();
    }
    match err {
        ApiError::Rejected { status, .. } if (200..300).contains(status) => rejected.to_string(),
        _ => errored.to_string(),
    }
}

pub async fn save_user<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    form: &EditForm,
) -> MutationState {
    if let Err(e) = form.validate() {
        return MutationState::Failed(e.to_string());
    }
    let mut update = form.to_update();
    if is_own_account(session, form.user_id) {
        update.is_superuser = session.is_admin;
    }
    match client.update_user(session, form.user_id, &update).await {
        Ok(_) => MutationState::Succeeded(USER_UPDATED.to_string()),
        Err(e) => MutationState::Failed(mutation_failure(
            &e,
            "Failed to update",
            "Error updating user",
        )),
    }
}

/// Delete `user` after confirmation. `None` when declined or when the target
/// is the caller's own account; no request is sent in either case.
pub async fn delete_user<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    user: &AdminUser,
    confirm: impl FnOnce(&str) -> bool,
) -> Option<MutationState> {
    if is_own_account(session, user.id) || !confirm(&delete_prompt(&user.username)) {
        return None;
    }
    Some(match client.delete_user(session, user.id).await {
        Ok(_) => MutationState::Succeeded(USER_DELETED.to_string()),
        Err(e) => MutationState::Failed(mutation_failure(
            &e,
            "Failed to delete",
            "Error deleting user",
        )),
    })
}
