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
//! # Application credential API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Links;
use crate::v3::role::Role;

/// Application credential response object.
///
/// An application credential lets an application authenticate as if it were
/// interacting on behalf of a user, restricted to the project the
/// credential was created under, without sharing the user's own
/// credentials. The secret is only reported once, at creation time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ApplicationCredential {
    /// Application credential ID.
    pub id: String,
    /// Application credential name, unique per owning user.
    pub name: String,
    /// The ID of the user owning the credential.
    pub user_id: String,
    /// The ID of the project the credential is bound to.
    pub project_id: String,
    /// Credential description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The date and time when the credential expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// The roles the credential is authorized for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    /// Whether the credential may itself create or delete application
    /// credentials and trusts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrestricted: Option<bool>,
}

/// List of application credentials owned by a user.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ApplicationCredentialList {
    /// Collection of application credential objects.
    pub application_credentials: Vec<ApplicationCredential>,
    /// Collection links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Application credential list query filters.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ApplicationCredentialListParameters {
    /// Filter credentials by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
