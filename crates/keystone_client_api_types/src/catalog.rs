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
//! # Catalog API types

use std::fmt;
use std::str::FromStr;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Links;
use crate::error::BuilderError;

/// The service catalog returned alongside a token and by the
/// `GET /v3/auth/catalog` operation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Catalog(pub Vec<CatalogService>);

impl Catalog {
    /// Iterate over the services in the catalog.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogService> {
        self.0.iter()
    }

    /// Whether the catalog carries no services at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Catalog {
    type Item = CatalogService;
    type IntoIter = std::vec::IntoIter<CatalogService>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An OpenStack service, such as Compute (nova), Object Storage (swift) or
/// Image service (glance), that provides one or more endpoints through
/// which users can access resources and perform operations.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct CatalogService {
    /// Service ID.
    pub id: String,
    /// Service type, e.g. `identity` or `compute`.
    pub r#type: String,
    /// Service name, e.g. `keystone` or `nova`.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Endpoints through which the service is reachable.
    #[builder(default)]
    pub endpoints: Vec<Endpoint>,
}

/// A network-accessible address through which a service can be consumed.
///
/// The interface tells the intended audience apart: `public` endpoints are
/// for everyone including subscribers, `admin` endpoints for cloud
/// administrators, and `internal` endpoints for inter-service traffic.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Endpoint {
    /// Endpoint ID.
    pub id: String,
    /// Endpoint URL.
    pub url: String,
    /// Endpoint interface (`public`, `internal` or `admin`).
    pub interface: String,
    /// Endpoint region name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Endpoint region ID.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
}

/// Complete response of the `GET /v3/auth/catalog` operation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CatalogResponse {
    /// The catalog object.
    pub catalog: Catalog,
    /// Collection links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// The visibility class of a catalog endpoint.
///
/// The wire format keeps the interface as a free-form string; this enum is
/// the client-side vocabulary used when resolving endpoints.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    /// Public endpoint, reachable by every API consumer.
    #[default]
    Public,
    /// Internal endpoint, devoted to inter-service communication.
    Internal,
    /// Administrative endpoint.
    Admin,
}

impl Interface {
    /// The interface name as it appears in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`Interface`] out of its catalog representation.
#[derive(Debug, Error)]
#[error("unknown endpoint interface {0:?}")]
pub struct InvalidInterface(pub String);

impl FromStr for Interface {
    type Err = InvalidInterface;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "public" => Ok(Self::Public),
            "internal" => Ok(Self::Internal),
            "admin" => Ok(Self::Admin),
            other => Err(InvalidInterface(other.into())),
        }
    }
}
