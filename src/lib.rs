//! Funder - crowdfunding backend client
//!
//! A small HTTP client for a campaign, perk, payment, pledge and advertisement
//! backend. [`Funder`] exposes every operation as a future; [`BlockingFunder`]
//! exposes the same operations as blocking calls. Both build one request per
//! call from a snapshot of their configuration and never retry.

use parking_lot::RwLock;
use reqwest::Method;
use std::collections::HashMap;
use std::path::Path;

pub mod api;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;

pub use api::{ErrorEnvelope, ParamValue, Params, Reply, Response, ServerStatus};
pub use blocking::BlockingFunder;
pub use client::StatusClass;
pub use config::{ClientConfig, ConfigLoader, Resource};
pub use error::{FunderError, Result};

use client::{HttpClient, PreparedRequest, RawReply};

/// The non-blocking Funder client
pub struct Funder {
    /// Configuration; every call works on a clone taken at call time
    config: RwLock<ClientConfig>,

    /// HTTP client
    http_client: HttpClient,
}

impl Funder {
    /// Create a client for `base_url` with default resource paths
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a client from a config file
    pub fn with_config_path(path: impl AsRef<Path>) -> Result<Self> {
        let loader = ConfigLoader::from_path(path)?;
        Self::from_config(loader.into_config())
    }

    /// Create a client from a config object
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            config: RwLock::new(config),
            http_client: HttpClient::new()?,
        })
    }

    pub fn set_base_url(&self, url: impl Into<String>) {
        self.config.write().base_url = Some(url.into());
    }

    pub fn base_url(&self) -> Option<String> {
        self.config.read().base_url.clone()
    }

    pub fn set_resource_path(&self, resource: Resource, path: impl Into<String>) {
        self.config.write().set_resource_path(resource, path);
    }

    pub fn resource_path(&self, resource: Resource) -> String {
        self.config.read().resource_path(resource).to_string()
    }

    /// Add a field sent with every later request; same name overwrites
    pub fn add_adhoc_field(&self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.config.write().add_adhoc_field(name, value);
    }

    pub fn adhoc_fields(&self) -> Params {
        self.config.read().adhoc_fields.clone()
    }

    /// Add a header sent with every later request; same name overwrites
    pub fn add_adhoc_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.config.write().add_adhoc_header(name, value);
    }

    pub fn adhoc_headers(&self) -> HashMap<String, String> {
        self.config.read().adhoc_headers.clone()
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> ClientConfig {
        self.config.read().clone()
    }

    /// Read a campaign
    pub async fn get_campaign(&self, params: &Params) -> Result<Reply> {
        self.request(Method::GET, Resource::Campaigns, params).await
    }

    /// Read a project (project-oriented deployments of the campaigns resource)
    pub async fn get_project(&self, params: &Params) -> Result<Reply> {
        self.get_campaign(params).await
    }

    pub async fn get_perks(&self, params: &Params) -> Result<Reply> {
        self.request(Method::GET, Resource::Perks, params).await
    }

    /// Create a payment
    pub async fn make_payment(&self, params: &Params) -> Result<Reply> {
        self.request(Method::POST, Resource::Payments, params).await
    }

    /// Update a payment; `params` must carry `id`
    pub async fn update_payment(&self, params: &Params) -> Result<Reply> {
        require_id(params)?;
        self.request(Method::PUT, Resource::Payments, params).await
    }

    /// Partially update a payment; `params` must carry `id`
    pub async fn patch_payment(&self, params: &Params) -> Result<Reply> {
        require_id(params)?;
        self.request(Method::PATCH, Resource::Payments, params).await
    }

    pub async fn get_payment(&self, params: &Params) -> Result<Reply> {
        self.request(Method::GET, Resource::Payments, params).await
    }

    pub async fn get_advertisements(&self, params: &Params) -> Result<Reply> {
        self.request(Method::GET, Resource::Advertisements, params).await
    }

    /// Create a pledge
    pub async fn make_pledge(&self, params: &Params) -> Result<Reply> {
        self.request(Method::POST, Resource::Pledges, params).await
    }

    /// Issue a request and classify its status.
    ///
    /// Success statuses yield the decoded body. Error statuses yield
    /// [`FunderError::Http`] with the decoded body passed through. Any other
    /// status yields [`FunderError::UnhandledStatus`] without decoding.
    pub async fn request(
        &self,
        method: Method,
        resource: Resource,
        params: &Params,
    ) -> Result<Reply> {
        let raw = self.send(method, resource, params).await?;

        match StatusClass::of(raw.status) {
            Some(StatusClass::Success) => raw.into_reply(),
            Some(class) if class.is_error() => {
                let reply = raw.into_reply()?;
                Err(FunderError::Http {
                    status: reply.status,
                    body: reply.body,
                })
            }
            _ => Err(FunderError::UnhandledStatus { status: raw.status }),
        }
    }

    /// Issue a request and decode the body whatever the status
    pub(crate) async fn fetch(
        &self,
        method: Method,
        resource: Resource,
        params: &Params,
    ) -> Result<Reply> {
        self.send(method, resource, params).await?.into_reply()
    }

    async fn send(&self, method: Method, resource: Resource, params: &Params) -> Result<RawReply> {
        let request = {
            let config = self.config.read().clone();
            PreparedRequest::build(&config, method, resource, params)?
        };
        self.http_client.send(request).await
    }
}

pub(crate) fn require_id(params: &Params) -> Result<()> {
    if params.contains_key("id") {
        Ok(())
    } else {
        Err(FunderError::MissingParameter("id"))
    }
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
