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
//! # Domain API types

use serde::{Deserialize, Serialize};

use crate::Links;

/// Domain response object.
///
/// A domain is a container of users, roles, projects and resources; it is
/// itself associated with a limited number of services when a token is
/// scoped to it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Domain {
    /// Domain ID.
    pub id: String,
    /// Domain name.
    pub name: String,
    /// Domain description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the domain is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Resource links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// List of domains, as returned by `GET /v3/auth/domains`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DomainList {
    /// Collection of domain objects.
    pub domains: Vec<Domain>,
    /// Collection links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}
