//! Client Configuration
//!
//! Defines the configuration a Funder client builds every request from.

use crate::api::{ParamValue, Params};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Backend collections the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Campaigns, or projects in the project-oriented variant
    Campaigns,
    Perks,
    Payments,
    Pledges,
    Advertisements,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Campaigns,
        Resource::Perks,
        Resource::Payments,
        Resource::Pledges,
        Resource::Advertisements,
    ];

    /// Conventional path for this resource
    pub fn default_path(self) -> &'static str {
        match self {
            Resource::Campaigns => "/campaigns",
            Resource::Perks => "/perks",
            Resource::Payments => "/payments",
            Resource::Pledges => "/pledges",
            Resource::Advertisements => "/advertisements",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Campaigns => "campaigns",
            Resource::Perks => "perks",
            Resource::Payments => "payments",
            Resource::Pledges => "pledges",
            Resource::Advertisements => "advertisements",
        };
        f.write_str(name)
    }
}

/// URL suffix per resource, appended verbatim to the base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    pub campaigns: String,
    pub perks: String,
    pub payments: String,
    pub pledges: String,
    pub advertisements: String,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            campaigns: Resource::Campaigns.default_path().to_string(),
            perks: Resource::Perks.default_path().to_string(),
            payments: Resource::Payments.default_path().to_string(),
            pledges: Resource::Pledges.default_path().to_string(),
            advertisements: Resource::Advertisements.default_path().to_string(),
        }
    }
}

impl ResourcePaths {
    pub fn get(&self, resource: Resource) -> &str {
        match resource {
            Resource::Campaigns => &self.campaigns,
            Resource::Perks => &self.perks,
            Resource::Payments => &self.payments,
            Resource::Pledges => &self.pledges,
            Resource::Advertisements => &self.advertisements,
        }
    }

    pub fn set(&mut self, resource: Resource, path: impl Into<String>) {
        let slot = match resource {
            Resource::Campaigns => &mut self.campaigns,
            Resource::Perks => &mut self.perks,
            Resource::Payments => &mut self.payments,
            Resource::Pledges => &mut self.pledges,
            Resource::Advertisements => &mut self.advertisements,
        };
        *slot = path.into();
    }
}

/// Everything a request is built from.
///
/// A client keeps one of these and hands each call its own clone, so a call
/// only ever sees the configuration as it was when the call was issued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:3000`; required before any call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-resource paths
    #[serde(default)]
    pub paths: ResourcePaths,

    /// Fields appended to every request's query string or body
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub adhoc_fields: Params,

    /// Headers added to every request
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub adhoc_headers: HashMap<String, String>,
}

impl ClientConfig {
    pub const PROJECTS_PATH: &'static str = "/projects";

    /// Configuration with a base URL and default paths
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Project-oriented variant: the campaigns slot points at `/projects`
    pub fn for_projects(base_url: impl Into<String>) -> Self {
        let mut config = Self::new(base_url);
        config.paths.set(Resource::Campaigns, Self::PROJECTS_PATH);
        config
    }

    pub fn resource_path(&self, resource: Resource) -> &str {
        self.paths.get(resource)
    }

    pub fn set_resource_path(&mut self, resource: Resource, path: impl Into<String>) {
        self.paths.set(resource, path);
    }

    /// Register an ad-hoc field; a later value for the same name wins
    pub fn add_adhoc_field(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.adhoc_fields.insert(name, value);
    }

    /// Register an ad-hoc header; a later value for the same name wins
    pub fn add_adhoc_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.adhoc_headers.insert(name.into(), value.into());
    }

    /// Full URL for a resource: base URL and path concatenated as-is
    pub fn resource_url(&self, resource: Resource) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base, self.resource_path(resource)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_none());
        for resource in Resource::ALL {
            assert_eq!(config.resource_path(resource), resource.default_path());
        }
        assert_eq!(config.resource_path(Resource::Campaigns), "/campaigns");
        assert_eq!(config.resource_path(Resource::Pledges), "/pledges");
    }

    #[test]
    fn test_project_variant() {
        let config = ClientConfig::for_projects("http://localhost:3000");
        assert_eq!(config.resource_path(Resource::Campaigns), "/projects");
        assert_eq!(
            config.resource_url(Resource::Campaigns).as_deref(),
            Some("http://localhost:3000/projects")
        );
    }

    #[test]
    fn test_paths_are_independent() {
        let mut config = ClientConfig::new("http://localhost:3000");
        config.set_resource_path(Resource::Pledges, "/payments");
        assert_eq!(config.resource_path(Resource::Pledges), "/payments");
        assert_eq!(config.resource_path(Resource::Payments), "/payments");
        assert_eq!(config.resource_path(Resource::Perks), "/perks");
    }

    #[test]
    fn test_url_is_not_normalized() {
        let mut config = ClientConfig::new("http://localhost:3000/api/");
        config.set_resource_path(Resource::Perks, "/perks");
        assert_eq!(
            config.resource_url(Resource::Perks).as_deref(),
            Some("http://localhost:3000/api//perks")
        );
    }

    #[test]
    fn test_adhoc_overwrite() {
        let mut config = ClientConfig::default();
        config.add_adhoc_field("currency", "EUR");
        config.add_adhoc_field("currency", "USD");
        config.add_adhoc_header("X-Client", "a");
        config.add_adhoc_header("X-Client", "b");

        assert_eq!(config.adhoc_fields.len(), 1);
        assert_eq!(
            config.adhoc_fields.get("currency"),
            Some(&ParamValue::Text("USD".to_string()))
        );
        assert_eq!(config.adhoc_headers.get("X-Client").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{
            "base_url": "http://localhost:3000",
            "paths": { "campaigns": "/projects" },
            "adhoc_fields": { "currency": "USD" }
        }"#;

        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.resource_path(Resource::Campaigns), "/projects");
        assert_eq!(config.resource_path(Resource::Payments), "/payments");
        assert!(config.adhoc_headers.is_empty());
    }
}
