//! Blocking Client
//!
//! Blocking front end over the same request engine as [`Funder`]. Every call
//! blocks the calling thread until the response is read, then returns the
//! decoded body for any status. A transport failure is returned as a 503
//! envelope, not as an error.
//!
//! Must not be used from inside an async runtime.

use crate::api::{ParamValue, Params, Response};
use crate::config::{ClientConfig, Resource};
use crate::error::{FunderError, Result};
use crate::{require_id, Funder};
use reqwest::Method;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Blocking wrapper for the Funder client
pub struct BlockingFunder {
    inner: Arc<Funder>,
    runtime: tokio::runtime::Runtime,
}

impl BlockingFunder {
    /// Create a client for `base_url` with default resource paths
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a client from a config file
    pub fn with_config_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::wrap(Funder::with_config_path(path)?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::wrap(Funder::from_config(config)?)
    }

    fn wrap(inner: Funder) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FunderError::Internal(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            inner: Arc::new(inner),
            runtime,
        })
    }

    /// The async client sharing this client's configuration
    pub fn async_client(&self) -> Arc<Funder> {
        self.inner.clone()
    }

    pub fn set_base_url(&self, url: impl Into<String>) {
        self.inner.set_base_url(url);
    }

    pub fn base_url(&self) -> Option<String> {
        self.inner.base_url()
    }

    pub fn set_resource_path(&self, resource: Resource, path: impl Into<String>) {
        self.inner.set_resource_path(resource, path);
    }

    pub fn resource_path(&self, resource: Resource) -> String {
        self.inner.resource_path(resource)
    }

    pub fn add_adhoc_field(&self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.inner.add_adhoc_field(name, value);
    }

    pub fn adhoc_fields(&self) -> Params {
        self.inner.adhoc_fields()
    }

    pub fn add_adhoc_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.add_adhoc_header(name, value);
    }

    pub fn adhoc_headers(&self) -> HashMap<String, String> {
        self.inner.adhoc_headers()
    }

    pub fn config(&self) -> ClientConfig {
        self.inner.config()
    }

    pub fn get_campaign(&self, params: &Params) -> Result<Response> {
        self.request(Method::GET, Resource::Campaigns, params)
    }

    pub fn get_project(&self, params: &Params) -> Result<Response> {
        self.get_campaign(params)
    }

    pub fn get_perks(&self, params: &Params) -> Result<Response> {
        self.request(Method::GET, Resource::Perks, params)
    }

    pub fn make_payment(&self, params: &Params) -> Result<Response> {
        self.request(Method::POST, Resource::Payments, params)
    }

    /// Update a payment; `params` must carry `id`
    pub fn update_payment(&self, params: &Params) -> Result<Response> {
        require_id(params)?;
        self.request(Method::PUT, Resource::Payments, params)
    }

    /// Partially update a payment; `params` must carry `id`
    pub fn patch_payment(&self, params: &Params) -> Result<Response> {
        require_id(params)?;
        self.request(Method::PATCH, Resource::Payments, params)
    }

    pub fn get_payment(&self, params: &Params) -> Result<Response> {
        self.request(Method::GET, Resource::Payments, params)
    }

    pub fn get_advertisements(&self, params: &Params) -> Result<Response> {
        self.request(Method::GET, Resource::Advertisements, params)
    }

    pub fn make_pledge(&self, params: &Params) -> Result<Response> {
        self.request(Method::POST, Resource::Pledges, params)
    }

    /// Issue a request and block until it completes; no status branching
    pub fn request(
        &self,
        method: Method,
        resource: Resource,
        params: &Params,
    ) -> Result<Response> {
        let outcome = self.runtime.block_on(self.inner.fetch(method, resource, params));
        Response::from_outcome(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::encoding::decode_pairs;
    use crate::init_test_logging;
    use mockito::Matcher;
    use serde_json::json;

    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn funder(server: &mockito::ServerGuard) -> BlockingFunder {
        init_test_logging();
        BlockingFunder::new(server.url()).unwrap()
    }

    #[test]
    fn test_get_campaign_returns_body_unchanged() {
        let mut server = mockito::Server::new();
        let body = json!({
            "id": 31337,
            "name": "alpha",
            "goal": 1000,
            "amtRaised": 250.5,
            "numBackers": 4,
            "startDate": "2015-01-01T00:00:00Z"
        });
        let mock = server
            .mock("GET", "/campaigns")
            .match_query(Matcher::UrlEncoded("name".into(), "alpha".into()))
            .with_status(200)
            .with_body(body.to_string())
            .create();

        let response = funder(&server)
            .get_campaign(&Params::new().with("name", "alpha"))
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.into_json(), body);
        mock.assert();
    }

    #[test]
    fn test_error_status_is_returned_not_raised() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/payments")
            .with_status(400)
            .with_body(r#"{"Code": 400, "Message": "Invalid credit card"}"#)
            .create();

        let response = funder(&server)
            .make_payment(&Params::new().with("creditCardAccountNumber", "4000000000000002"))
            .unwrap();

        let reply = response.reply().unwrap();
        assert_eq!(reply.status, 400);
        let status = reply.server_status().unwrap();
        assert_eq!(status.code, 400);
        assert_eq!(status.message, "Invalid credit card");
    }

    #[test]
    fn test_get_perks_unreachable_returns_envelope() {
        init_test_logging();
        let funder = BlockingFunder::new(UNREACHABLE).unwrap();

        let response = funder
            .get_perks(&Params::new().with("campaign_name", "alpha"))
            .unwrap();
        assert!(response.is_unavailable());
        assert_eq!(response.status(), 503);

        let json = response.into_json();
        assert_eq!(json["code"], 503);
        assert_eq!(json["code_message"], "Service unavailable");
        assert!(json["message"].is_string());
    }

    #[test]
    fn test_query_string_round_trip() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/campaigns")
            .match_query(Matcher::Exact("a=1%202&b=x%26y".into()))
            .with_status(200)
            .with_body("{}")
            .create();

        let funder = funder(&server);
        let params = Params::new().with("a", "1 2").with("b", "x&y");
        funder.get_campaign(&params).unwrap();
        mock.assert();

        assert_eq!(decode_pairs("a=1%202&b=x%26y").unwrap(), params.to_pairs());
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/advertisements")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("")
            .create();

        let err = funder(&server)
            .get_advertisements(&Params::new().with("campaign_name", "alpha"))
            .unwrap_err();
        assert!(matches!(err, FunderError::MalformedResponse { status: 200, .. }));
    }

    #[test]
    fn test_update_payment_without_id() {
        init_test_logging();
        let funder = BlockingFunder::new(UNREACHABLE).unwrap();
        let err = funder
            .update_payment(&Params::new().with("paypalToken", "t"))
            .unwrap_err();
        assert!(matches!(err, FunderError::MissingParameter("id")));
    }

    #[test]
    fn test_missing_base_url() {
        let funder = BlockingFunder::from_config(ClientConfig::default()).unwrap();
        let err = funder.get_payment(&Params::new()).unwrap_err();
        assert!(matches!(err, FunderError::Config(_)));
    }

    #[test]
    fn test_shares_configuration_with_async_client() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/pledges")
            .match_header("x-client", "demo")
            .match_body("perkId=1&currency=USD")
            .with_status(202)
            .with_body(r#"{"Code": 202, "Message": "Pledge queued"}"#)
            .create();

        let funder = funder(&server);
        let shared = funder.async_client();
        shared.add_adhoc_field("currency", "USD");
        funder.add_adhoc_header("X-Client", "demo");

        assert_eq!(funder.adhoc_fields().len(), 1);
        assert_eq!(shared.adhoc_headers().len(), 1);

        let response = funder.make_pledge(&Params::new().with("perkId", 1)).unwrap();
        assert_eq!(response.status(), 202);
        mock.assert();
    }

    #[test]
    fn test_with_config_path() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"base_url": "{}", "paths": {{"campaigns": "/projects"}}}}"#,
            UNREACHABLE
        )
        .unwrap();

        let funder = BlockingFunder::with_config_path(file.path()).unwrap();
        assert_eq!(funder.base_url().as_deref(), Some(UNREACHABLE));
        assert_eq!(funder.resource_path(Resource::Campaigns), "/projects");
        assert_eq!(funder.config().resource_path(Resource::Perks), "/perks");
    }
}
