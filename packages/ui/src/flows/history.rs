use api::{AnalysisRecord, ApiClient, Transport};
use store::Session;

use super::{Destination, LoadError};

pub const HISTORY_LOAD_FAILED: &str = "Error loading history. Please log in again.";

/// Fetch the signed-in user's analyses, newest first as the backend orders them.
pub async fn load_history<T: Transport>(
    client: &ApiClient<T>,
    session: Option<&Session>,
) -> Result<Vec<AnalysisRecord>, LoadError> {
    let Some(session) = session else {
        return Err(LoadError::Redirect(Destination::Login));
    };
    client
        .history(session)
        .await
        .map_err(|e| LoadError::from_api(&e, HISTORY_LOAD_FAILED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Method, RecordingTransport};
    use serde_json::json;

    #[tokio::test]
    async fn anonymous_visitor_is_sent_to_login_without_a_request() {
        let client = ApiClient::new(RecordingTransport::new());
        assert_eq!(
            load_history(&client, None).await,
            Err(LoadError::Redirect(Destination::Login))
        );
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn records_are_returned_in_backend_order() {
        let client = ApiClient::new(RecordingTransport::new());
        client.transport().respond(
            Method::Get,
            "/history",
            200,
            json!({"success": true, "history": [
                {"id": 2, "image_path": "b.png", "is_real": false, "confidence": 88.0, "timestamp": "2024-03-02 10:00:00"},
                {"id": 1, "image_path": "a.png", "is_real": true, "confidence": 91.5, "timestamp": "2024-03-01 09:00:00"}
            ]}),
        );
        let session = Session::new(3, "carol", false);

        let records = load_history(&client, Some(&session)).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(2));
        assert_eq!(client.transport().calls()[0].identity.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn failure_shows_relogin_message() {
        let client = ApiClient::new(RecordingTransport::new());
        client
            .transport()
            .respond(Method::Get, "/history", 500, json!({}));
        let session = Session::new(3, "carol", false);

        assert_eq!(
            load_history(&client, Some(&session)).await,
            Err(LoadError::Message(HISTORY_LOAD_FAILED.to_string()))
        );
    }
}
