//! # API crate: typed client for the VeriAI detection backend
//!
//! Every page of the web client talks to the backend through [`ApiClient`].
//! The client knows the endpoint paths, the request bodies, and how a reply is
//! classified; moving the bytes is delegated to a [`Transport`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Request/response types (`LoginResponse`, `Prediction`, `AnalysisRecord`, `AdminUser`, `Profile`, ...) |
//! | [`transport`] | [`Transport`] trait, [`HttpTransport`] (reqwest), request/response envelopes |
//! | [`error`] | [`ApiError`] / [`TransportError`] |
//!
//! ## Reply classification
//!
//! | Reply | Result |
//! |-------|--------|
//! | transport failure | [`ApiError::Unreachable`] / [`ApiError::Request`] |
//! | 401 | [`ApiError::Unauthorized`] |
//! | 403 | [`ApiError::Forbidden`] |
//! | other non-2xx | [`ApiError::Rejected`] |
//! | 2xx with `"success": false` | [`ApiError::Rejected`] |
//! | 2xx otherwise | body decoded into the endpoint's type, or [`ApiError::Decode`] |
//!
//! The backend's `message` field, when present, is carried inside the error.
//!
//! ## Endpoints
//!
//! - **Auth**: `login`, `register`, `reset_password`, `check_availability`, `logout`
//! - **Analysis**: `predict`, `history`, `clear_history`
//! - **Profile**: `profile`, `update_profile`
//! - **Admin**: `admin_overview`, `update_user`, `delete_user`

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::Session;

pub mod error;
mod mock;
pub mod models;
pub mod transport;

pub use error::{ApiError, TransportError};
pub use mock::RecordingTransport;
pub use models::*;
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, RequestBody, Transport, IDENTITY_HEADER,
};

/// Lifecycle of a `/predict` call, reported as it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictPhase {
    /// The upload has been handed to the transport.
    Sent,
    /// The backend answered; the body is being interpreted.
    Received,
    /// The prediction decoded successfully.
    Decoded,
}

/// Typed backend client.
#[derive(Clone, Debug)]
pub struct ApiClient<T: Transport> {
    transport: T,
}

/// The client used by the running app.
pub type HttpClient = ApiClient<HttpTransport>;

impl HttpClient {
    pub fn http(config: &store::ClientConfig) -> Self {
        Self::new(HttpTransport::new(config.api.base_url.clone()))
    }
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    history: Vec<AnalysisRecord>,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    profile: Profile,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!("{:?} {} failed: {}", method, path, e);
            ApiError::from(e)
        })?;
        decode(response)
    }

    // -- Auth --

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.call(ApiRequest::new(Method::Post, "/login").json(to_json(&body)?))
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Ack, ApiError> {
        self.call(ApiRequest::new(Method::Post, "/register").json(to_json(request)?))
            .await
    }

    pub async fn reset_password(&self, email: &str, password: &str) -> Result<Ack, ApiError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call(ApiRequest::new(Method::Post, "/reset-password").json(to_json(&body)?))
            .await
    }

    pub async fn check_availability(
        &self,
        field: AvailabilityField,
        value: &str,
    ) -> Result<Availability, ApiError> {
        let body = AvailabilityRequest {
            field,
            value: value.to_string(),
        };
        self.call(ApiRequest::new(Method::Post, "/check-availability").json(to_json(&body)?))
            .await
    }

    pub async fn logout(&self, session: Option<&Session>) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .call(ApiRequest::new(Method::Post, "/logout").identity(session.map(Session::identity)))
            .await?;
        Ok(())
    }

    // -- Analysis --

    /// Upload an image for analysis, reporting [`PredictPhase`]s to `observe`.
    pub async fn predict(
        &self,
        session: Option<&Session>,
        upload: &Upload,
        mut observe: impl FnMut(PredictPhase),
    ) -> Result<Prediction, ApiError> {
        let request = ApiRequest::new(Method::Post, "/predict")
            .identity(session.map(Session::identity))
            .body(RequestBody::Multipart {
                field: "image".to_string(),
                file_name: upload.file_name.clone(),
                mime: upload.mime.clone(),
                bytes: upload.bytes.clone(),
            });
        tracing::info!("Submitting {} ({} bytes) for analysis", upload.file_name, upload.len());

        observe(PredictPhase::Sent);
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!("POST /predict failed: {}", e);
            ApiError::from(e)
        })?;
        observe(PredictPhase::Received);
        let prediction: Prediction = decode(response)?;
        observe(PredictPhase::Decoded);
        Ok(prediction)
    }

    pub async fn history(&self, session: &Session) -> Result<Vec<AnalysisRecord>, ApiError> {
        let envelope: HistoryEnvelope = self
            .call(ApiRequest::new(Method::Get, "/history").identity(Some(session.identity())))
            .await?;
        Ok(envelope.history)
    }

    pub async fn clear_history(&self, session: &Session) -> Result<Ack, ApiError> {
        self.call(
            ApiRequest::new(Method::Delete, "/history/clear").identity(Some(session.identity())),
        )
        .await
    }

    // -- Profile --

    pub async fn profile(&self, session: &Session) -> Result<Profile, ApiError> {
        let envelope: ProfileEnvelope = self
            .call(ApiRequest::new(Method::Get, "/profile").identity(Some(session.identity())))
            .await?;
        Ok(envelope.profile)
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Profile, ApiError> {
        let envelope: ProfileEnvelope = self
            .call(
                ApiRequest::new(Method::Put, "/profile")
                    .identity(Some(session.identity()))
                    .json(to_json(update)?),
            )
            .await?;
        Ok(envelope.profile)
    }

    // -- Admin --

    pub async fn admin_overview(&self, session: &Session) -> Result<AdminData, ApiError> {
        self.call(ApiRequest::new(Method::Get, "/admin/logs").identity(Some(session.identity())))
            .await
    }

    pub async fn update_user(
        &self,
        session: &Session,
        user_id: i64,
        update: &AdminUserUpdate,
    ) -> Result<Ack, ApiError> {
        self.call(
            ApiRequest::new(Method::Put, format!("/admin/user/{user_id}"))
                .identity(Some(session.identity()))
                .json(to_json(update)?),
        )
        .await
    }

    pub async fn delete_user(&self, session: &Session, user_id: i64) -> Result<Ack, ApiError> {
        self.call(
            ApiRequest::new(Method::Delete, format!("/admin/user/{user_id}"))
                .identity(Some(session.identity())),
        )
        .await
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))
}

/// Classify a raw reply and decode its body.
fn decode<R: DeserializeOwned>(response: ApiResponse) -> Result<R, ApiError> {
    let parsed = if response.body.is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_slice::<Value>(&response.body)
    };
    let message = parsed
        .as_ref()
        .ok()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if !response.is_success() {
        return Err(match response.status {
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden { message },
            status => ApiError::Rejected { status, message },
        });
    }

    let value = parsed.map_err(|e| ApiError::Decode(e.to_string()))?;
    if value.get("success") == Some(&Value::Bool(false)) {
        return Err(ApiError::Rejected {
            status: response.status,
            message,
        });
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ApiClient<RecordingTransport> {
        ApiClient::new(RecordingTransport::new())
    }

    #[tokio::test]
    async fn login_decodes_session_fields() {
        let client = client();
        client.transport().respond(
            Method::Post,
            "/login",
            200,
            json!({"success": true, "username": "root", "user_id": 1, "is_superuser": true}),
        );

        let session = client.login("root", "pw").await.unwrap().into_session();
        assert_eq!(session, Session::new(1, "root", true));

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body,
            RequestBody::Json(json!({"username": "root", "password": "pw"}))
        );
        assert!(calls[0].identity.is_none());
    }

    #[tokio::test]
    async fn status_codes_are_classified() {
        let client = client();
        let session = Session::new(9, "mallory", false);
        client.transport().respond(
            Method::Get,
            "/admin/logs",
            403,
            json!({"success": false, "message": "Admins only"}),
        );
        client
            .transport()
            .respond(Method::Get, "/history", 401, json!({"success": false}));
        client
            .transport()
            .respond(Method::Get, "/profile", 500, json!({}));

        let err = client.admin_overview(&session).await.unwrap_err();
        assert!(err.is_forbidden());
        assert_eq!(err.server_message(), Some("Admins only"));

        assert!(client.history(&session).await.unwrap_err().is_unauthorized());
        assert_eq!(
            client.profile(&session).await.unwrap_err(),
            ApiError::Rejected {
                status: 500,
                message: None
            }
        );
    }

    #[tokio::test]
    async fn success_false_is_rejected_with_message() {
        let client = client();
        client.transport().respond(
            Method::Post,
            "/register",
            200,
            json!({"success": false, "message": "Username already exists"}),
        );
        let request = RegisterRequest {
            name: "A".into(),
            username: "a".into(),
            email: "a@example.com".into(),
            password: "secret1".into(),
            mobile: String::new(),
        };
        let err = client.register(&request).await.unwrap_err();
        assert_eq!(err.message_or("Registration failed"), "Username already exists");
    }

    #[tokio::test]
    async fn unreachable_server() {
        let client = client();
        client.transport().unreachable(Method::Post, "/login");
        assert_eq!(
            client.login("a", "b").await.unwrap_err(),
            ApiError::Unreachable
        );
    }

    #[tokio::test]
    async fn identity_header_is_attached() {
        let client = client();
        let session = Session::new(42, "alice", false);
        client
            .transport()
            .respond(Method::Get, "/history", 200, json!({"success": true, "history": []}));

        assert!(client.history(&session).await.unwrap().is_empty());
        assert_eq!(client.transport().calls()[0].identity.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn predict_reports_phases_in_order() {
        let client = client();
        client.transport().respond(
            Method::Post,
            "/predict",
            200,
            json!({"success": true, "isReal": true, "confidence": 93.2, "real_prob": 93.2, "fake_prob": 6.8}),
        );
        let upload = Upload::image("cat.png", vec![0x89, 0x50]).unwrap();
        let mut phases = Vec::new();

        let prediction = client
            .predict(None, &upload, |p| phases.push(p))
            .await
            .unwrap();

        assert!(prediction.is_real);
        assert_eq!(
            phases,
            vec![PredictPhase::Sent, PredictPhase::Received, PredictPhase::Decoded]
        );
        match &client.transport().calls()[0].body {
            RequestBody::Multipart {
                field,
                file_name,
                mime,
                ..
            } => {
                assert_eq!(field, "image");
                assert_eq!(file_name, "cat.png");
                assert_eq!(mime, "image/png");
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn predict_failure_stops_before_decoded() {
        let client = client();
        client
            .transport()
            .respond(Method::Post, "/predict", 500, json!({"success": false}));
        let upload = Upload::image("cat.png", vec![1]).unwrap();
        let mut phases = Vec::new();

        assert!(client.predict(None, &upload, |p| phases.push(p)).await.is_err());
        assert_eq!(phases, vec![PredictPhase::Sent, PredictPhase::Received]);
    }

    #[tokio::test]
    async fn admin_update_path_and_partial_body() {
        let client = client();
        let session = Session::new(1, "root", true);
        client.transport().respond(
            Method::Put,
            "/admin/user/5",
            200,
            json!({"success": true, "message": "User updated"}),
        );
        let update = AdminUserUpdate {
            username: "bob".into(),
            email: "bob@example.com".into(),
            first_name: "Bob".into(),
            is_superuser: false,
            password: None,
        };

        let ack = client.update_user(&session, 5, &update).await.unwrap();
        assert_eq!(ack.message_or(""), "User updated");

        let RequestBody::Json(body) = &client.transport().calls()[0].body else {
            panic!("expected json body");
        };
        assert!(body.get("password").is_none());
        assert_eq!(body["is_superuser"], false);
    }

    #[tokio::test]
    async fn logout_accepts_empty_body() {
        let client = client();
        client.transport().respond(Method::Post, "/logout", 200, Value::Null);
        client.logout(None).await.unwrap();
    }

    #[tokio::test]
    async fn availability_sends_lowercase_field() {
        let client = client();
        client.transport().respond(
            Method::Post,
            "/check-availability",
            200,
            json!({"available": false, "message": "Username already taken"}),
        );

        let result = client
            .check_availability(AvailabilityField::Username, "alice")
            .await
            .unwrap();
        assert!(!result.available);
        assert_eq!(
            client.transport().calls()[0].body,
            RequestBody::Json(json!({"field": "username", "value": "alice"}))
        );
    }
}
