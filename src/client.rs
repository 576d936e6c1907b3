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
//! # Client
//!
//! The top-level SDK handle: HTTP client construction, the session, and
//! access to the identity API and the service catalog.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::RwLock;
use url::Url;

use crate::api_types::v3::auth::Token;
use crate::catalog::ServiceCatalog;
use crate::config::CloudConfig;
use crate::error::KeystoneClientError;
use crate::identity::{IdentityApi, TokenCreateOptions};
use crate::request::ApiError;
use crate::session::{RefreshHandle, Session};

/// Overall timeout of a single API request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout of establishing the TCP connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The `User-Agent` the client presents.
pub const USER_AGENT: &str = concat!("openstack-keystone-client/", env!("CARGO_PKG_VERSION"));

/// The Keystone SDK client.
///
/// Owns the [`Session`] behind an `Arc`; cloning the client is cheap and
/// every clone shares the same token.
#[derive(Clone, Debug)]
pub struct Client {
    config: CloudConfig,
    session: Arc<Session>,
    catalog: Arc<RwLock<Option<ServiceCatalog>>>,
}

impl Client {
    /// Build a client from the given configuration. No request is made
    /// until [`Client::login`] or an identity operation is invoked.
    pub fn new(config: CloudConfig) -> Result<Self, KeystoneClientError> {
        config.validate()?;
        let auth_request = TokenCreateOptions::from(&config).auth_request()?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::from)?;
        let session = Arc::new(Session::new(
            http,
            config.auth_url.clone(),
            auth_request,
            config.expiry_lead(),
        ));
        Ok(Self {
            config,
            session,
            catalog: Arc::new(RwLock::new(None)),
        })
    }

    /// The configuration the client was built with.
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Authenticate the session and populate the service catalog.
    pub async fn login(&self) -> Result<(), KeystoneClientError> {
        let catalog = self.session.login().await?;
        let mut slot = self.catalog.write().await;
        *slot = Some(catalog);
        Ok(())
    }

    /// Revoke the session token and drop the catalog.
    pub async fn logout(&self) -> Result<(), KeystoneClientError> {
        {
            let mut slot = self.catalog.write().await;
            slot.take();
        }
        self.session.logout().await?;
        Ok(())
    }

    /// The identity API bound to this client's session.
    pub fn identity(&self) -> IdentityApi {
        IdentityApi::new(Arc::clone(&self.session))
    }

    /// The service catalog obtained at login, when logged in.
    pub async fn service_catalog(&self) -> Option<ServiceCatalog> {
        let slot = self.catalog.read().await;
        slot.clone()
    }

    /// Resolve the endpoint of a service from the catalog, applying the
    /// configured interface and region preferences.
    pub async fn resolve_endpoint(&self, service_type: &str) -> Result<Url, KeystoneClientError> {
        let catalog = self
            .service_catalog()
            .await
            .ok_or(crate::session::SessionError::NotAuthenticated)?;
        let url = catalog.endpoint(
            service_type,
            self.config.interface,
            self.config.region_name.as_deref(),
        )?;
        Ok(url)
    }

    /// The current session token value, renewed first when needed.
    pub async fn token(&self) -> Result<SecretString, KeystoneClientError> {
        Ok(self.session.token().await?)
    }

    /// Metadata of the current session token, when logged in.
    pub async fn token_info(&self) -> Option<Token> {
        self.session.token_info().await
    }

    /// Start renewing the session token in the background. The task stops
    /// when the returned handle is dropped or cancelled.
    pub fn start_refresh(&self) -> RefreshHandle {
        Arc::clone(&self.session).start_refresh()
    }
}
