// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # Configuration
//!
//! Cloud connection configuration, either constructed explicitly through the
//! builder or read from the standard `OS_*` environment variables.

use std::time::Duration;

use derive_builder::Builder;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::api_types::catalog::{Interface, InvalidInterface};
use crate::api_types::scope::{Domain, Scope, ScopeProject};

/// Default lead before token expiry at which the session re-authenticates.
const DEFAULT_EXPIRY_LEAD_SECS: u64 = 30;

fn default_expiry_lead_secs() -> u64 {
    DEFAULT_EXPIRY_LEAD_SECS
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The identity endpoint URL is not set.
    #[error("the auth url is required (set OS_AUTH_URL)")]
    MissingAuthUrl,

    /// The identity endpoint URL does not parse.
    #[error("invalid auth url `{url}`: {source}")]
    InvalidAuthUrl {
        url: String,
        source: url::ParseError,
    },

    /// Neither the user name nor the user id is set.
    #[error("either the user name or the user id is required")]
    MissingUser,

    /// The password is not set.
    #[error("the password is required for password authentication")]
    MissingPassword,

    /// The requested endpoint interface is not a valid value.
    #[error(transparent)]
    InvalidInterface {
        #[from]
        source: InvalidInterface,
    },

    /// Builder error.
    #[error("{0}")]
    Builder(String),
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        Self::Builder(value.to_string())
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        Self::Builder(value)
    }
}

/// Connection and authentication parameters for a Keystone cloud.
#[derive(Builder, Clone, Debug, Deserialize)]
#[builder(build_fn(error = "ConfigError"), setter(into, strip_option))]
pub struct CloudConfig {
    /// The identity endpoint URL, e.g. `https://keystone.example.org/`.
    pub auth_url: Url,
    /// User name to authenticate with.
    #[builder(default)]
    #[serde(default)]
    pub user_name: Option<String>,
    /// User ID to authenticate with, alternative to the user name.
    #[builder(default)]
    #[serde(default)]
    pub user_id: Option<String>,
    /// Name of the domain the user belongs to.
    #[builder(default)]
    #[serde(default)]
    pub user_domain_name: Option<String>,
    /// ID of the domain the user belongs to.
    #[builder(default)]
    #[serde(default)]
    pub user_domain_id: Option<String>,
    /// User password.
    #[builder(default)]
    #[serde(default)]
    pub password: Option<SecretString>,
    /// Name of the project to scope the session to.
    #[builder(default)]
    #[serde(default)]
    pub project_name: Option<String>,
    /// ID of the project to scope the session to.
    #[builder(default)]
    #[serde(default)]
    pub project_id: Option<String>,
    /// Name of the domain the scope project belongs to.
    #[builder(default)]
    #[serde(default)]
    pub project_domain_name: Option<String>,
    /// ID of the domain the scope project belongs to.
    #[builder(default)]
    #[serde(default)]
    pub project_domain_id: Option<String>,
    /// Preferred region when resolving catalog endpoints.
    #[builder(default)]
    #[serde(default)]
    pub region_name: Option<String>,
    /// Preferred endpoint interface when resolving catalog endpoints.
    #[builder(default)]
    #[serde(default)]
    pub interface: Interface,
    /// Seconds before token expiry at which the session re-authenticates.
    #[builder(default = "DEFAULT_EXPIRY_LEAD_SECS")]
    #[serde(default = "default_expiry_lead_secs")]
    pub expiry_lead_secs: u64,
}

impl CloudConfig {
    /// Read the configuration from the standard `OS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("OS_AUTH_URL").ok_or(ConfigError::MissingAuthUrl)?;
        let interface = match lookup("OS_INTERFACE") {
            Some(value) => value.parse()?,
            None => Interface::default(),
        };
        let config = Self {
            auth_url: parse_auth_url(&raw_url)?,
            user_name: lookup("OS_USERNAME"),
            user_id: lookup("OS_USER_ID"),
            user_domain_name: lookup("OS_USER_DOMAIN_NAME"),
            user_domain_id: lookup("OS_USER_DOMAIN_ID"),
            password: lookup("OS_PASSWORD").map(SecretString::from),
            project_name: lookup("OS_PROJECT_NAME"),
            project_id: lookup("OS_PROJECT_ID"),
            project_domain_name: lookup("OS_PROJECT_DOMAIN_NAME"),
            project_domain_id: lookup("OS_PROJECT_DOMAIN_ID"),
            region_name: lookup("OS_REGION_NAME"),
            interface,
            expiry_lead_secs: DEFAULT_EXPIRY_LEAD_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Ensure the configuration is sufficient for password authentication.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_name.is_none() && self.user_id.is_none() {
            return Err(ConfigError::MissingUser);
        }
        if self.password.is_none() {
            return Err(ConfigError::MissingPassword);
        }
        Ok(())
    }

    /// The scope the configuration asks for. A project scope requires the
    /// project id, or the project name together with its domain; anything
    /// less is an explicitly unscoped session.
    pub fn scope(&self) -> Scope {
        if let Some(project_id) = &self.project_id {
            return Scope::Project(ScopeProject {
                id: Some(project_id.clone()),
                ..Default::default()
            });
        }
        if let Some(project_name) = &self.project_name {
            let domain = if self.project_domain_id.is_some() {
                Some(Domain {
                    id: self.project_domain_id.clone(),
                    ..Default::default()
                })
            } else {
                self.project_domain_name.as_ref().map(|name| Domain {
                    name: Some(name.clone()),
                    ..Default::default()
                })
            };
            if let Some(domain) = domain {
                return Scope::Project(ScopeProject {
                    name: Some(project_name.clone()),
                    domain: Some(domain),
                    ..Default::default()
                });
            }
        }
        Scope::Unscoped
    }

    /// Lead before token expiry at which the session re-authenticates.
    pub fn expiry_lead(&self) -> Duration {
        Duration::from_secs(self.expiry_lead_secs)
    }
}

/// Parse the auth URL, forcing a trailing slash so that relative API paths
/// join under it instead of replacing its last path segment.
fn parse_auth_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|source| ConfigError::InvalidAuthUrl {
        url: raw.to_string(),
        source,
    })
}
