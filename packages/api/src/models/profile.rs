use serde::{Deserialize, Serialize};

/// The caller's editable profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mobile: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `PUT /profile`. The password is omitted unless a new one was entered.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_mobile_reads_as_empty() {
        let p: Profile = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "email": "a@example.com",
            "first_name": "Alice",
            "mobile": null
        }))
        .unwrap();
        assert_eq!(p.mobile, "");
    }

    #[test]
    fn update_omits_empty_password() {
        let update = ProfileUpdate {
            username: "alice".into(),
            email: "a@example.com".into(),
            first_name: "Alice".into(),
            mobile: String::new(),
            password: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
    }
}
