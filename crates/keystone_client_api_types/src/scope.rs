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
//! # Keystone Scope API types

use derive_builder::Builder;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuilderError;

/// The authorization scope: a project, a domain, the whole system, or the
/// explicit request for an unscoped token.
///
/// A token cannot be simultaneously scoped to multiple authorization
/// targets, so the scope is an enum rather than a struct of optional
/// targets. An ID is sufficient to uniquely identify a project but if a
/// project is specified by name, then the domain of the project must also
/// be given in order to uniquely identify it. A domain scope may be
/// specified by either the domain's ID or name with equivalent results.
/// The explicitly unscoped request travels as the literal string
/// `"unscoped"`.
#[derive(Clone, Debug, PartialEq)]
pub enum Scope {
    /// Project scope.
    Project(ScopeProject),
    /// Domain scope.
    Domain(Domain),
    /// System scope.
    System(System),
    /// Explicitly unscoped authorization request.
    Unscoped,
}

impl Serialize for Scope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Project(project) => {
                let mut scope = serializer.serialize_struct("Scope", 1)?;
                scope.serialize_field("project", project)?;
                scope.end()
            }
            Self::Domain(domain) => {
                let mut scope = serializer.serialize_struct("Scope", 1)?;
                scope.serialize_field("domain", domain)?;
                scope.end()
            }
            Self::System(system) => {
                let mut scope = serializer.serialize_struct("Scope", 1)?;
                scope.serialize_field("system", system)?;
                scope.end()
            }
            Self::Unscoped => serializer.serialize_str("unscoped"),
        }
    }
}

/// Intermediate representation distinguishing the `"unscoped"` marker from
/// the keyed scope object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScopeRepr {
    Marker(String),
    Targets {
        project: Option<ScopeProject>,
        domain: Option<Domain>,
        system: Option<System>,
    },
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match ScopeRepr::deserialize(deserializer)? {
            ScopeRepr::Marker(marker) if marker == "unscoped" => Ok(Self::Unscoped),
            ScopeRepr::Marker(other) => Err(D::Error::custom(format!(
                "invalid scope marker {other:?}, expected \"unscoped\""
            ))),
            ScopeRepr::Targets {
                project,
                domain,
                system,
            } => match (project, domain, system) {
                (Some(project), None, None) => Ok(Self::Project(project)),
                (None, Some(domain), None) => Ok(Self::Domain(domain)),
                (None, None, Some(system)) => Ok(Self::System(system)),
                (None, None, None) => {
                    Err(D::Error::custom("scope must specify an authorization target"))
                }
                _ => Err(D::Error::custom(
                    "scope cannot specify multiple authorization targets",
                )),
            },
        }
    }
}

/// Project scope information.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct ScopeProject {
    /// Project ID.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Project Name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project domain.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

/// Domain information.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct Domain {
    /// Domain ID.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Domain Name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// System scope.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct System {
    /// All systems access.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
}
