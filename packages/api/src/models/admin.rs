use serde::{Deserialize, Serialize};

use super::AnalysisRecord;

/// A user row in the admin console.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub date_joined: String,
    #[serde(default)]
    pub real_count: u32,
    #[serde(default)]
    pub fake_count: u32,
    #[serde(default)]
    pub total_analyses: u32,
    #[serde(default)]
    pub avg_confidence: Option<f64>,
}

/// Response of `GET /admin/logs`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AdminData {
    #[serde(default)]
    pub logs: Vec<AnalysisRecord>,
    #[serde(default)]
    pub users: Vec<AdminUser>,
}

impl AdminData {
    pub fn real_count(&self) -> usize {
        self.logs.iter().filter(|l| l.is_real).count()
    }

    pub fn fake_count(&self) -> usize {
        self.logs.len() - self.real_count()
    }
}

/// Body of `PUT /admin/user/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminUserUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub is_superuser: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
