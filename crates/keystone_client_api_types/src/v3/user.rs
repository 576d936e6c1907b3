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
//! # User API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Links;

/// User response object.
///
/// A user is a digital representation of a person, system, or service that
/// uses OpenStack cloud services.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct User {
    /// User ID.
    pub id: String,
    /// User name.
    pub name: String,
    /// User domain ID.
    pub domain_id: String,
    /// The ID of the default project for the user. Setting this attribute
    /// does not grant any actual authorization on the project; it is merely
    /// provided for convenience. If the user does not have authorization to
    /// their default project, the default project is ignored at token
    /// creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,
    /// If the user is enabled, this value is true. If the user is disabled,
    /// this value is false.
    pub enabled: bool,
    /// The date and time when the password expires. The time zone is UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_expires_at: Option<DateTime<Utc>>,
    /// Additional user properties reported by the server (resource options,
    /// federation data and whatever newer servers may add).
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

/// List of users.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct UserList {
    /// Collection of user objects.
    pub users: Vec<User>,
    /// Collection links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// User list query filters.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct UserListParameters {
    /// Filter users by domain ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    /// Filter users by the enabled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Filter users by the identity provider ID.
    #[serde(rename = "idp_id", skip_serializing_if = "Option::is_none")]
    pub identity_provider_id: Option<String>,
    /// Filter users by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Filter users by password expiry, as an `operator:timestamp` pair,
    /// e.g. `lt:2026-12-08T22:02:00Z`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_expires_at: Option<String>,
    /// Filter users by the federation protocol ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_id: Option<String>,
    /// Filter users by the federated unique ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
}
