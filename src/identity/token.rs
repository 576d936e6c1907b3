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
//! # Token operations
//!
//! Issue, validate, check and revoke authentication tokens.

use derive_builder::Builder;
use reqwest::{Method, StatusCode};
use secrecy::SecretString;

use crate::api_types::error::BuilderError;
use crate::api_types::scope::{Domain, Scope, ScopeProject, System};
use crate::api_types::v3::auth::{
    ApplicationCredentialAuth, AuthRequest, AuthRequestInner, CreateTokenParameters, Identity,
    PasswordAuth, Token, TokenAuth, TokenResponse, UserPassword, UserRef,
    ValidateTokenParameters,
};
use crate::config::CloudConfig;
use crate::identity::{IdentityApi, IdentityApiError};
use crate::request::{self, ApiError, SUBJECT_TOKEN_HEADER};
use crate::session::sensitive_header;

/// Options of the create-token operation.
///
/// The options carry credentials for up to three authentication methods and
/// a set of scope fields; [`TokenCreateOptions::auth_request`] picks the
/// effective method and scope:
///
/// - method priority: password, then token, then application credential;
/// - scope priority: project by id, project by name (with its domain),
///   domain by id, domain by name, the whole system, the explicit
///   `unscoped` request; with no scope field set the request carries no
///   scope at all and the server applies its default.
#[derive(Builder, Clone, Debug, Default)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option), default)]
pub struct TokenCreateOptions {
    /// User ID for password authentication.
    pub user_id: Option<String>,
    /// User name for password authentication.
    pub user_name: Option<String>,
    /// ID of the domain the user belongs to.
    pub user_domain_id: Option<String>,
    /// Name of the domain the user belongs to.
    pub user_domain_name: Option<String>,
    /// Password for the password method.
    pub password: Option<SecretString>,
    /// An existing token for the token method.
    pub token: Option<SecretString>,
    /// Application credential ID.
    pub application_credential_id: Option<String>,
    /// Application credential name. Requires the owning user.
    pub application_credential_name: Option<String>,
    /// Application credential secret.
    pub application_credential_secret: Option<SecretString>,
    /// ID of the user owning the application credential.
    pub application_credential_user_id: Option<String>,
    /// Scope: project by ID.
    pub project_id: Option<String>,
    /// Scope: project by name. Requires the project domain.
    pub project_name: Option<String>,
    /// ID of the domain the scope project belongs to.
    pub project_domain_id: Option<String>,
    /// Name of the domain the scope project belongs to.
    pub project_domain_name: Option<String>,
    /// Scope: domain by ID.
    pub domain_id: Option<String>,
    /// Scope: domain by name.
    pub domain_name: Option<String>,
    /// Scope: the whole deployment system.
    pub system: bool,
    /// Request an explicitly unscoped token instead of the server default.
    pub unscoped: bool,
    /// Exclude the service catalog from the response.
    pub nocatalog: bool,
}

impl TokenCreateOptions {
    /// Build the authentication request body out of the options.
    pub fn auth_request(&self) -> Result<AuthRequest, IdentityApiError> {
        Ok(AuthRequest {
            auth: AuthRequestInner {
                identity: self.identity()?,
                scope: self.scope()?,
            },
        })
    }

    fn identity(&self) -> Result<Identity, IdentityApiError> {
        if let Some(password) = &self.password {
            if self.user_id.is_none() && self.user_name.is_none() {
                return Err(IdentityApiError::MissingUser);
            }
            let domain = match (&self.user_domain_id, &self.user_domain_name) {
                (Some(id), _) => Some(Domain {
                    id: Some(id.clone()),
                    ..Default::default()
                }),
                (None, Some(name)) => Some(Domain {
                    name: Some(name.clone()),
                    ..Default::default()
                }),
                (None, None) => None,
            };
            return Ok(Identity {
                methods: vec!["password".to_string()],
                password: Some(PasswordAuth {
                    user: UserPassword {
                        id: self.user_id.clone(),
                        name: self.user_name.clone(),
                        domain,
                        password: password.clone(),
                    },
                }),
                ..Default::default()
            });
        }
        if let Some(token) = &self.token {
            return Ok(Identity {
                methods: vec!["token".to_string()],
                token: Some(TokenAuth { id: token.clone() }),
                ..Default::default()
            });
        }
        if self.application_credential_id.is_some() || self.application_credential_name.is_some()
        {
            let user = match &self.application_credential_id {
                Some(_) => None,
                None => Some(UserRef {
                    id: Some(
                        self.application_credential_user_id
                            .clone()
                            .ok_or(IdentityApiError::MissingApplicationCredentialUser)?,
                    ),
                    ..Default::default()
                }),
            };
            return Ok(Identity {
                methods: vec!["application_credential".to_string()],
                application_credential: Some(ApplicationCredentialAuth {
                    id: self.application_credential_id.clone(),
                    name: self.application_credential_name.clone(),
                    user,
                    secret: self.application_credential_secret.clone(),
                }),
                ..Default::default()
            });
        }
        Err(IdentityApiError::NoAuthMethod)
    }

    fn scope(&self) -> Result<Option<Scope>, IdentityApiError> {
        if let Some(id) = &self.project_id {
            return Ok(Some(Scope::Project(ScopeProject {
                id: Some(id.clone()),
                ..Default::default()
            })));
        }
        if let Some(name) = &self.project_name {
            let domain = match (&self.project_domain_id, &self.project_domain_name) {
                (Some(id), _) => Domain {
                    id: Some(id.clone()),
                    ..Default::default()
                },
                (None, Some(domain_name)) => Domain {
                    name: Some(domain_name.clone()),
                    ..Default::default()
                },
                (None, None) => return Err(IdentityApiError::MissingProjectDomain),
            };
            return Ok(Some(Scope::Project(ScopeProject {
                name: Some(name.clone()),
                domain: Some(domain),
                ..Default::default()
            })));
        }
        if let Some(id) = &self.domain_id {
            return Ok(Some(Scope::Domain(Domain {
                id: Some(id.clone()),
                ..Default::default()
            })));
        }
        if let Some(name) = &self.domain_name {
            return Ok(Some(Scope::Domain(Domain {
                name: Some(name.clone()),
                ..Default::default()
            })));
        }
        if self.system {
            return Ok(Some(Scope::System(System { all: Some(true) })));
        }
        if self.unscoped {
            return Ok(Some(Scope::Unscoped));
        }
        Ok(None)
    }
}

impl From<&CloudConfig> for TokenCreateOptions {
    fn from(config: &CloudConfig) -> Self {
        let mut options = Self {
            user_id: config.user_id.clone(),
            user_name: config.user_name.clone(),
            user_domain_id: config.user_domain_id.clone(),
            user_domain_name: config.user_domain_name.clone(),
            password: config.password.clone(),
            ..Default::default()
        };
        match config.scope() {
            Scope::Project(project) => {
                options.project_id = project.id;
                options.project_name = project.name;
                if let Some(domain) = project.domain {
                    options.project_domain_id = domain.id;
                    options.project_domain_name = domain.name;
                }
            }
            Scope::Unscoped => options.unscoped = true,
            Scope::Domain(_) | Scope::System(_) => {}
        }
        options
    }
}

impl IdentityApi {
    /// Issue an authentication token: `POST /v3/auth/tokens`.
    ///
    /// This is the only operation that does not require an authenticated
    /// session. Returns the token value together with its metadata.
    #[tracing::instrument(level = "info", skip(self, options))]
    pub async fn create_token(
        &self,
        options: &TokenCreateOptions,
    ) -> Result<(SecretString, Token), IdentityApiError> {
        let body = options.auth_request()?;
        let parameters = CreateTokenParameters {
            nocatalog: options.nocatalog.then_some(true),
        };
        let request = self
            .session
            .anonymous_request(Method::POST, "v3/auth/tokens")?
            .query(&parameters)
            .json(&body);
        let response =
            request::send_checked(request, &[StatusCode::CREATED, StatusCode::OK]).await?;
        let value = SecretString::from(request::subject_token(response.headers())?);
        let body: TokenResponse = response.json().await.map_err(ApiError::from)?;
        tracing::info!(expires_at = %body.token.expires_at, "token issued");
        Ok((value, body.token))
    }

    /// Validate a token and fetch its metadata: `GET /v3/auth/tokens`.
    ///
    /// Returns the subject token value as confirmed by the server together
    /// with the parsed metadata.
    #[tracing::instrument(level = "info", skip(self, subject, parameters))]
    pub async fn validate_token(
        &self,
        subject: &SecretString,
        parameters: &ValidateTokenParameters,
    ) -> Result<(SecretString, Token), IdentityApiError> {
        let request = self
            .session
            .authenticated_request(Method::GET, "v3/auth/tokens")
            .await?
            .header(SUBJECT_TOKEN_HEADER, sensitive_header(subject)?)
            .query(parameters);
        let response = request::send_checked(request, &[StatusCode::OK]).await?;
        let value = SecretString::from(request::subject_token(response.headers())?);
        let body: TokenResponse = response.json().await.map_err(ApiError::from)?;
        Ok((value, body.token))
    }

    /// Check whether a token is valid: `HEAD /v3/auth/tokens`.
    ///
    /// A valid token yields `true`, an unknown or expired one `false`; any
    /// other outcome is an error.
    #[tracing::instrument(level = "info", skip(self, subject))]
    pub async fn check_token(&self, subject: &SecretString) -> Result<bool, IdentityApiError> {
        let request = self
            .session
            .authenticated_request(Method::HEAD, "v3/auth/tokens")
            .await?
            .header(SUBJECT_TOKEN_HEADER, sensitive_header(subject)?);
        let response = request.send().await.map_err(ApiError::from)?;
        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(ApiError::from_status(status, None).into()),
        }
    }

    /// Revoke a token: `DELETE /v3/auth/tokens`.
    #[tracing::instrument(level = "info", skip(self, subject))]
    pub async fn revoke_token(&self, subject: &SecretString) -> Result<(), IdentityApiError> {
        let request = self
            .session
            .authenticated_request(Method::DELETE, "v3/auth/tokens")
            .await?
            .header(SUBJECT_TOKEN_HEADER, sensitive_header(subject)?);
        request::send_checked(request, &[StatusCode::NO_CONTENT]).await?;
        tracing::info!("token revoked");
        Ok(())
    }
}
