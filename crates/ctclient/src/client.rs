//! Bearer-token REST client.

use crate::error::{Error, Result};
use crate::models::Creation;
use crate::transport::{HttpTransport, Method, Request, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Client for the management API.
///
/// All paths passed to the request methods are relative to the API base,
/// which is the configured URL with `/api` appended.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Validate a server URL and derive the API base from it.
pub fn api_base(url: &str) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| invalid("scheme must be http or https"))?;

    if rest.contains(['?', '#', ' ']) {
        return Err(invalid("query, fragment and whitespace are not allowed"));
    }

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(invalid("host is missing"));
    }

    Ok(format!("{}/api", url.trim_end_matches('/')))
}

impl Client {
    /// Create a client that talks HTTP to `url`.
    pub fn new(url: &str, api_key: &str, skip_ssl_validation: bool) -> Result<Self> {
        Self::with_transport(url, api_key, HttpTransport::new(skip_ssl_validation))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        url: &str,
        api_key: &str,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        Ok(Self {
            base_url: api_base(url)?,
            api_key: api_key.to_string(),
            transport: Arc::new(transport),
        })
    }

    /// The API base URL (configured URL plus `/api`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<String> {
        let request = Request {
            method,
            path: path.to_string(),
            url: format!("{}{}", self.base_url, path),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            body,
        };

        log::debug!("{} {}", request.method, request.url);
        if let Some(body) = &request.body {
            log::trace!("request body: {body}");
        }

        let response = self.transport.send(&request)?;
        log::trace!("{} {} -> {}", request.method, request.url, response.status);

        if !response.is_success() {
            return Err(Error::http(
                method.as_str(),
                request.url,
                response.status,
                response.body,
            ));
        }
        Ok(response.body)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|_| Error::InvalidResponse(body.to_string()))
    }

    /// GET and decode the response.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(Method::Get, path, None)?;
        Self::decode(&body)
    }

    /// GET as untyped JSON.
    pub fn get_value(&self, path: &str) -> Result<Value> {
        self.get(path)
    }

    /// POST a body and decode the [`Creation`] response.
    ///
    /// Association endpoints answer 200 with no record id, so a zero id
    /// is not an error here; see [`Client::create`].
    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Creation> {
        let body = self.send(Method::Post, path, Some(serde_json::to_value(body)?))?;
        if body.trim().is_empty() {
            return Ok(Creation::default());
        }
        Self::decode(&body)
    }

    /// POST a new object and return its id.
    pub fn create<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<i64> {
        let creation = self.post(path, body)?;
        if creation.record_id == 0 {
            return Err(Error::ZeroRecordId {
                path: path.to_string(),
            });
        }
        Ok(creation.record_id)
    }

    /// POST a body and return the untyped JSON response.
    pub fn post_value<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let body = self.send(Method::Post, path, Some(serde_json::to_value(body)?))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Self::decode(&body)
    }

    /// PATCH a body; the response body is ignored.
    pub fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::Patch, path, Some(serde_json::to_value(body)?))?;
        Ok(())
    }

    /// DELETE, optionally with a body.
    pub fn delete(&self, path: &str, body: Option<&Value>) -> Result<()> {
        self.send(Method::Delete, path, body.cloned())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChangeOwners, Envelope, ObjectWithId};
    use crate::transport::MockTransport;
    use serde_json::json;

    fn client(mock: &MockTransport) -> Client {
        Client::with_transport("https://ct.example.com", "secret", mock.clone()).unwrap()
    }

    #[test]
    fn test_api_base_appends_api() {
        assert_eq!(api_base("https://ct.example.com").unwrap(), "https://ct.example.com/api");
        assert_eq!(api_base("https://ct.example.com/").unwrap(), "https://ct.example.com/api");
        assert_eq!(
            api_base("http://10.0.0.1:8080/ct").unwrap(),
            "http://10.0.0.1:8080/ct/api"
        );
    }

    #[test]
    fn test_api_base_rejects_bad_urls() {
        for url in ["", "ct.example.com", "ftp://ct.example.com", "https://", "https://x/?a=1"] {
            let err = api_base(url).unwrap_err();
            assert!(matches!(err, Error::InvalidUrl { .. }), "{url}");
        }
    }

    #[test]
    fn test_requests_carry_bearer_token() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/v3/me/cloud-access-role", 200, json!({"data": [], "status": 200}));

        client(&mock).get_value("/v3/me/cloud-access-role").unwrap();

        let sent = &mock.requests()[0];
        assert_eq!(sent.url, "https://ct.example.com/api/v3/me/cloud-access-role");
        assert_eq!(sent.header("Authorization"), Some("Bearer secret"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_get_decodes_envelope() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/v3/cft/1/owner",
            200,
            json!({"data": [{"id": 5}], "status": 200}),
        );

        let env: Envelope<Vec<ObjectWithId>> = client(&mock).get("/v3/cft/1/owner").unwrap();
        assert_eq!(env.data, vec![ObjectWithId { id: 5 }]);
    }

    #[test]
    fn test_non_success_status_is_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Patch, "/v3/ou/4", 400, json!({"message": "bad name"}));

        let err = client(&mock).patch("/v3/ou/4", &json!({"name": ""})).unwrap_err();
        match err {
            Error::Http { method, url, status, body } => {
                assert_eq!(method, "PATCH");
                assert_eq!(url, "https://ct.example.com/api/v3/ou/4");
                assert_eq!(status, 400);
                assert!(body.contains("bad name"));
            }
            other => panic!("Expected Error::Http, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_route_is_not_found() {
        let mock = MockTransport::new();
        let err = client(&mock).get_value("/v3/cft/99").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_returns_record_id() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/v3/cft", 201, json!({"record_id": 12, "status": 201}));

        let id = client(&mock).create("/v3/cft", &json!({"name": "base"})).unwrap();
        assert_eq!(id, 12);
        assert_eq!(mock.requests()[0].body, Some(json!({"name": "base"})));
    }

    #[test]
    fn test_create_rejects_zero_record_id() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/v3/cft", 201, json!({"record_id": 0, "status": 201}));

        let err = client(&mock).create("/v3/cft", &json!({})).unwrap_err();
        assert!(matches!(err, Error::ZeroRecordId { ref path } if path == "/v3/cft"));
    }

    #[test]
    fn test_post_allows_zero_record_id() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/v3/cft/1/owner", 200, json!({"status": 200}));

        let body = ChangeOwners {
            owner_user_group_ids: vec![],
            owner_user_ids: vec![3],
        };
        let creation = client(&mock).post("/v3/cft/1/owner", &body).unwrap();
        assert_eq!(creation.record_id, 0);
    }

    #[test]
    fn test_post_empty_body() {
        let mock = MockTransport::new();
        mock.respond_raw(Method::Post, "/v2/ou/4/move", 200, "");

        let client = client(&mock);
        assert_eq!(client.post("/v2/ou/4/move", &7).unwrap(), Creation::default());
        assert_eq!(client.post_value("/v2/ou/4/move", &7).unwrap(), Value::Null);
        assert_eq!(mock.requests()[0].body, Some(json!(7)));
    }

    #[test]
    fn test_undecodable_body() {
        let mock = MockTransport::new();
        mock.respond_raw(Method::Get, "/v3/cft", 200, "<html>");

        let err = client(&mock).get_value("/v3/cft").unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(ref body) if body == "<html>"));
    }

    #[test]
    fn test_delete_with_and_without_body() {
        let mock = MockTransport::new();
        mock.respond(Method::Delete, "/v3/cft/1", 200, json!({}));
        mock.respond(Method::Delete, "/v3/cft/1/owner", 200, json!({}));

        let client = client(&mock);
        client.delete("/v3/cft/1", None).unwrap();
        client
            .delete("/v3/cft/1/owner", Some(&json!({"owner_user_ids": [2]})))
            .unwrap();

        let sent = mock.mutations();
        assert_eq!(sent[0].body, None);
        assert_eq!(sent[1].body, Some(json!({"owner_user_ids": [2]})));
    }
}
