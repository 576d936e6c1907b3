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

//! # OpenStack Keystone client API types
//!
//! This crate defines the JSON entities that the Keystone v3 REST API
//! exchanges with its clients. The structures are passive mirrors of the
//! documented wire format; fields that the server may omit are `Option` and
//! unknown fields coming from newer servers are ignored on deserialization.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

pub mod catalog;
pub mod error;
pub mod scope;
pub mod v3;

/// Links to the resource itself and to the neighbouring pages of a
/// collection.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Links {
    /// Link to the resource or collection itself.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Link to the previous page of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Link to the next page of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Serialize a [`SecretString`] field by exposing its value.
///
/// Credentials travel in request bodies, so the secret must be written out
/// at the serialization boundary and nowhere else.
pub fn expose_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Serialize an optional [`SecretString`] field by exposing its value.
pub fn expose_optional_secret<S>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match secret {
        Some(secret) => serializer.serialize_str(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}
