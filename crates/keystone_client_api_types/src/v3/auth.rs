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
//! # Authentication request and token types
//!
//! Bodies of the `POST /v3/auth/tokens` operation and of the token
//! validation responses. The token value itself never appears in a body:
//! it travels in the `X-Subject-Token` header.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::BuilderError;
use crate::scope::{Domain, Scope, System};
use crate::v3::role::Role;
use crate::{expose_secret, expose_optional_secret};

/// An authentication request root.
#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct AuthRequest {
    /// The authentication payload.
    pub auth: AuthRequestInner,
}

/// The authentication payload: an identity plus an optional scope.
#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct AuthRequestInner {
    /// An identity object.
    pub identity: Identity,

    /// The authorization scope. An omitted scope requests the default
    /// (implicitly unscoped) behaviour of the server; the explicit
    /// `"unscoped"` marker forbids falling back to a default project.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

/// An identity object.
///
/// The `methods` list names the authentication methods in use; the matching
/// payload objects carry the actual credentials.
#[derive(Builder, Clone, Debug, Default, Deserialize, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct Identity {
    /// The authentication methods: `password`, `token` or
    /// `application_credential`.
    pub methods: Vec<String>,

    /// The password payload.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordAuth>,

    /// The token payload.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenAuth>,

    /// The application credential payload.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_credential: Option<ApplicationCredentialAuth>,
}

/// The password authentication payload.
#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct PasswordAuth {
    /// The user credentials.
    pub user: UserPassword,
}

/// User credentials for password authentication.
///
/// A user is identified either by ID, or by name plus the owning domain.
#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct UserPassword {
    /// User ID.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User domain.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    /// User password.
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

/// The token authentication payload.
#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct TokenAuth {
    /// An existing authentication token value.
    #[serde(serialize_with = "expose_secret")]
    pub id: SecretString,
}

/// The application credential authentication payload.
///
/// The credential is identified either by its ID, or by its name plus the
/// owning user.
#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct ApplicationCredentialAuth {
    /// Application credential ID.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Application credential name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The user owning the credential, when the credential is given by name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    /// The credential secret issued by Keystone.
    #[builder(default)]
    #[serde(
        serialize_with = "expose_optional_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret: Option<SecretString>,
}

/// A reference to a user by ID, or by name plus domain.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct UserRef {
    /// User ID.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User domain.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

/// Authorization token metadata, as reported by the server when the token
/// is issued or validated.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct Token {
    /// A list of one or two audit IDs. An audit ID is a unique, randomly
    /// generated, URL-safe string that can be used to track a token or a
    /// chain of re-scoped tokens across requests and endpoints without
    /// exposing the token value.
    #[builder(default)]
    pub audit_ids: Vec<String>,

    /// The accumulated set of authentication methods that were used to
    /// obtain the token. A token obtained by password and later exchanged
    /// via the token method carries both `password` and `token`.
    #[builder(default)]
    pub methods: Vec<String>,

    /// The date and time when the token was issued.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,

    /// The date and time when the token expires.
    pub expires_at: DateTime<Utc>,

    /// The user the token was issued to.
    pub user: TokenUser,

    /// The project the token is scoped to. Only present in project-scoped
    /// tokens.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<TokenProject>,

    /// The domain the token is scoped to. Only present in domain-scoped
    /// tokens.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,

    /// The system the token is scoped to. Only present in system-scoped
    /// tokens.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<System>,

    /// Whether the scoped project is acting as a domain.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_domain: Option<bool>,

    /// The roles granted on the scope.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,

    /// The service catalog. Omitted when the token was requested with
    /// `nocatalog`.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Catalog>,
}

/// The user object embedded in a token.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct TokenUser {
    /// User ID.
    pub id: String,
    /// User name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User domain.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    /// The date and time when the user password expires.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_expires_at: Option<DateTime<Utc>>,
}

/// The project object embedded in a project-scoped token.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct TokenProject {
    /// Project ID.
    pub id: String,
    /// Project name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project domain.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

/// Complete response with the token data.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct TokenResponse {
    /// Token metadata.
    pub token: Token,
}

/// Query parameters of the create-token operation.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CreateTokenParameters {
    /// Exclude the service catalog from the authentication response. By
    /// default the response includes the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nocatalog: Option<bool>,
}

/// Query parameters of the validate-token operation.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ValidateTokenParameters {
    /// Exclude the service catalog from the validation response. By
    /// default the response includes the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nocatalog: Option<bool>,
    /// Allow fetching a token that has expired. By default expired tokens
    /// yield a 404.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_expired: Option<bool>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::scope::{DomainBuilder, ScopeProjectBuilder};

    use super::*;

    fn password_identity() -> Identity {
        IdentityBuilder::default()
            .methods(vec!["password".to_string()])
            .password(
                PasswordAuthBuilder::default()
                    .user(
                        UserPasswordBuilder::default()
                            .name("admin")
                            .domain(DomainBuilder::default().id("default").build().unwrap())
                            .password("secret")
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn serialize_password_auth_request() {
        let request = AuthRequestBuilder::default()
            .auth(
                AuthRequestInnerBuilder::default()
                    .identity(password_identity())
                    .scope(Scope::Project(
                        ScopeProjectBuilder::default()
                            .name("admin")
                            .domain(DomainBuilder::default().id("default").build().unwrap())
                            .build()
                            .unwrap(),
                    ))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "auth": {
                    "identity": {
                        "methods": ["password"],
                        "password": {
                            "user": {
                                "name": "admin",
                                "domain": {"id": "default"},
                                "password": "secret"
                            }
                        }
                    },
                    "scope": {
                        "project": {
                            "name": "admin",
                            "domain": {"id": "default"}
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn serialize_token_auth_request() {
        let identity = IdentityBuilder::default()
            .methods(vec!["token".to_string()])
            .token(TokenAuthBuilder::default().id("gAAAAAB").build().unwrap())
            .build()
            .unwrap();
        let request = AuthRequest {
            auth: AuthRequestInner {
                identity,
                scope: Some(Scope::Unscoped),
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "auth": {
                    "identity": {
                        "methods": ["token"],
                        "token": {"id": "gAAAAAB"}
                    },
                    "scope": "unscoped"
                }
            })
        );
    }

    #[test]
    fn deserialize_token_response() {
        let response: TokenResponse = serde_json::from_value(json!({
            "token": {
                "audit_ids": ["3T2dc1CGQxyJsHdDu1xkcw"],
                "methods": ["password"],
                "issued_at": "2026-08-29T10:00:00.000000Z",
                "expires_at": "2026-08-29T11:00:00.000000Z",
                "user": {
                    "id": "ee4dfb6e5540447cb3741905149d9b6e",
                    "name": "admin",
                    "domain": {"id": "default", "name": "Default"},
                    "password_expires_at": null
                },
                "project": {
                    "id": "a6944d763bf64ee6a275f1263fae0352",
                    "name": "admin",
                    "domain": {"id": "default", "name": "Default"}
                },
                "roles": [{"id": "51cc68287d524c759f47c811e6463340", "name": "admin"}],
                "catalog": [{
                    "id": "s1",
                    "type": "identity",
                    "endpoints": [{
                        "id": "e1",
                        "url": "http://keystone:5000/v3",
                        "interface": "public"
                    }]
                }]
            }
        }))
        .unwrap();

        let token = response.token;
        assert_eq!(token.methods, vec!["password"]);
        assert_eq!(token.user.name.as_deref(), Some("admin"));
        assert_eq!(
            token.project.as_ref().map(|p| p.id.as_str()),
            Some("a6944d763bf64ee6a275f1263fae0352")
        );
        assert!(token.catalog.is_some_and(|c| !c.is_empty()));
    }

    #[test]
    fn token_response_tolerates_unknown_fields() {
        let response: TokenResponse = serde_json::from_value(json!({
            "token": {
                "audit_ids": [],
                "methods": ["password"],
                "expires_at": "2026-08-29T11:00:00Z",
                "user": {"id": "u1"},
                "is_admin_token": false,
                "some_future_field": {"nested": true}
            }
        }))
        .unwrap();
        assert_eq!(response.token.user.id, "u1");
    }
}
