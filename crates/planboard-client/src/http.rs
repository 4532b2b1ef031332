use crate::error::{RemoteError, Result};
use crate::traits::RecordClient;
use async_trait::async_trait;
use planboard_types::{Record, ValidationErrors, clip};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

const MESSAGE_CLIP: usize = 200;

/// `RecordClient` over HTTP against a REST-style store.
///
/// Collection endpoints are `{base}/{entity}/`, member endpoints
/// `{base}/{entity}/{id}/`, trailing slashes included. Bodies are JSON
/// in the canonical wire format.
#[derive(Clone)]
pub struct HttpRecordClient<R: Record> {
    http_client: Arc<Client>,
    base_url: String,
    _record: PhantomData<R>,
}

impl<R: Record> HttpRecordClient<R> {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(Arc::new(http_client), base_url))
    }

    /// Build on a shared connection pool, the way per-entity clients
    /// of one store should.
    pub fn with_client(http_client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying connection pool, for siblings of this client.
    pub fn http_client(&self) -> Arc<Client> {
        self.http_client.clone()
    }

    fn collection_url(&self) -> String {
        format!("{}/{}/", self.base_url, R::ENTITY)
    }

    fn member_url(&self, id: R::Id) -> String {
        format!("{}/{}/{}/", self.base_url, R::ENTITY, id)
    }

    async fn check(response: Response, id: Option<String>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(decode_failure(R::ENTITY, status, &body, id))
    }

    async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| RemoteError::Decode {
            entity: R::ENTITY,
            source,
        })
    }
}

#[async_trait]
impl<R: Record> RecordClient<R> for HttpRecordClient<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let response = self.http_client.get(self.collection_url()).send().await?;
        let response = Self::check(response, None).await?;
        Self::decode_body(response).await
    }

    async fn get(&self, id: R::Id) -> Result<R> {
        let response = self.http_client.get(self.member_url(id)).send().await?;
        let response = Self::check(response, Some(id.to_string())).await?;
        Self::decode_body(response).await
    }

    async fn create(&self, fields: &R::Fields) -> Result<R> {
        let response = self
            .http_client
            .post(self.collection_url())
            .json(fields)
            .send()
            .await?;
        let response = Self::check(response, None).await?;
        Self::decode_body(response).await
    }

    async fn update(&self, id: R::Id, fields: &R::Fields) -> Result<R> {
        let response = self
            .http_client
            .put(self.member_url(id))
            .json(fields)
            .send()
            .await?;
        let response = Self::check(response, Some(id.to_string())).await?;
        Self::decode_body(response).await
    }

    async fn delete(&self, id: R::Id) -> Result<()> {
        let response = self.http_client.delete(self.member_url(id)).send().await?;
        Self::check(response, Some(id.to_string())).await?;
        Ok(())
    }
}

/// Map an unsuccessful response onto the remote error taxonomy.
///
/// A 404 against a member URL names a record that is not there; any
/// other 4xx with a decodable field-error body is a validation
/// failure; everything else is a generic remote failure carrying the
/// clipped body.
fn decode_failure(
    entity: &'static str,
    status: StatusCode,
    body: &str,
    id: Option<String>,
) -> RemoteError {
    if status == StatusCode::NOT_FOUND
        && let Some(id) = id
    {
        return RemoteError::NotFound { entity, id };
    }
    if status.is_client_error()
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(errors) = ValidationErrors::from_value(&value)
    {
        return RemoteError::Validation(errors);
    }
    RemoteError::Remote {
        status: status.as_u16(),
        message: clip(body, MESSAGE_CLIP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_types::{Task, TaskId};

    fn client() -> HttpRecordClient<Task> {
        HttpRecordClient::with_client(
            Arc::new(Client::new()),
            "http://localhost:8000/api/v1/",
        )
    }

    #[test]
    fn test_url_layout_keeps_trailing_slashes() {
        let client = client();
        assert_eq!(client.collection_url(), "http://localhost:8000/api/v1/tasks/");
        assert_eq!(client.member_url(TaskId::new(3)), "http://localhost:8000/api/v1/tasks/3/");
    }

    #[test]
    fn test_member_404_is_not_found() {
        let err = decode_failure("tasks", StatusCode::NOT_FOUND, "", Some("3".to_string()));
        assert!(matches!(
            err,
            RemoteError::NotFound { entity: "tasks", ref id } if id == "3"
        ));
    }

    #[test]
    fn test_collection_404_stays_generic() {
        let err = decode_failure("tasks", StatusCode::NOT_FOUND, "gone", None);
        assert!(matches!(err, RemoteError::Remote { status: 404, .. }));
    }

    #[test]
    fn test_field_error_body_becomes_validation() {
        let body = r#"{"name": ["This field is required."]}"#;
        let err = decode_failure("projects", StatusCode::BAD_REQUEST, body, None);
        match err {
            RemoteError::Validation(errors) => {
                assert_eq!(errors.field("name").unwrap(), ["This field is required."]);
            }
            other => panic!("expected validation, got {:?}", other),
        }
    }

    #[test]
    fn test_shapeless_4xx_and_5xx_stay_generic() {
        let err = decode_failure("projects", StatusCode::BAD_REQUEST, "<html>bad</html>", None);
        assert!(matches!(err, RemoteError::Remote { status: 400, .. }));

        let body = r#"{"name": ["required"]}"#;
        let err = decode_failure("projects", StatusCode::INTERNAL_SERVER_ERROR, body, None);
        assert!(matches!(err, RemoteError::Remote { status: 500, .. }));
    }

    #[test]
    fn test_long_failure_bodies_are_clipped() {
        let body = "x".repeat(1000);
        let err = decode_failure("tasks", StatusCode::BAD_GATEWAY, &body, None);
        match err {
            RemoteError::Remote { message, .. } => {
                assert!(message.len() <= MESSAGE_CLIP + 3);
                assert!(message.ends_with("..."));
            }
            other => panic!("expected remote, got {:?}", other),
        }
    }
}
