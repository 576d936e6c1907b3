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
//! # Session
//!
//! The authenticated session: the credentials used to (re)issue tokens, the
//! current token value and metadata behind a read/write lock, on-demand
//! renewal before expiry, and an optional background renewal task.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::HeaderValue;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api_types::v3::auth::{AuthRequest, Token, TokenResponse};
use crate::catalog::ServiceCatalog;
use crate::request::{self, ApiError, AUTH_TOKEN_HEADER, SUBJECT_TOKEN_HEADER};

/// Session error.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An authenticated call was attempted without a logged-in session.
    #[error("no valid token for authenticated call, log in first")]
    NotAuthenticated,

    /// The login response carried no service catalog.
    #[error("the authentication response carried no service catalog")]
    MissingCatalog,

    /// The token value cannot be transported in an HTTP header.
    #[error("the token value is not a valid header value")]
    TokenEncoding,

    /// The API call itself failed.
    #[error(transparent)]
    Api {
        #[from]
        source: ApiError,
    },

    /// A relative API path does not join against the auth URL.
    #[error(transparent)]
    UrlParse {
        #[from]
        source: url::ParseError,
    },
}

/// The current token of a session: the secret value together with the
/// metadata the server reported when issuing it.
#[derive(Clone, Debug)]
pub struct SessionToken {
    /// The token value, as carried in `X-Subject-Token`.
    pub value: SecretString,
    /// The token metadata, notably `expires_at`.
    pub info: Token,
}

/// Whether a token expiring at `expires_at` must be renewed at `now`,
/// given the renewal lead.
fn needs_renewal(expires_at: DateTime<Utc>, lead: Duration, now: DateTime<Utc>) -> bool {
    now + TimeDelta::seconds(lead.as_secs() as i64) >= expires_at
}

/// An authenticated Keystone session.
///
/// The session keeps the credentials it was created with and uses them to
/// re-issue the token whenever the current one is about to expire, so a
/// long-lived session keeps working across token lifetimes. Renewal happens
/// on demand inside [`Session::token`]; [`Session::start_refresh`]
/// additionally renews proactively in the background.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    auth_url: Url,
    auth_request: AuthRequest,
    expiry_lead: Duration,
    state: RwLock<Option<SessionToken>>,
}

impl Session {
    pub fn new(
        http: reqwest::Client,
        auth_url: Url,
        auth_request: AuthRequest,
        expiry_lead: Duration,
    ) -> Self {
        Self {
            http,
            auth_url,
            auth_request,
            expiry_lead,
            state: RwLock::new(None),
        }
    }

    /// The URL of an API path relative to the auth URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.auth_url.join(path)
    }

    /// Start a request against an API path without authentication headers.
    pub fn anonymous_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, SessionError> {
        let url = self.endpoint(path)?;
        Ok(self.http.request(method, url))
    }

    /// Start a request against an API path carrying the session token in
    /// `X-Auth-Token`, renewing the token first when needed.
    pub async fn authenticated_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, SessionError> {
        let token = self.token().await?;
        let request = self
            .anonymous_request(method, path)?
            .header(AUTH_TOKEN_HEADER, sensitive_header(&token)?);
        Ok(request)
    }

    /// Authenticate the session and return the service catalog issued with
    /// the token.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn login(&self) -> Result<ServiceCatalog, SessionError> {
        let mut state = self.state.write().await;
        let token = self.issue_token().await?;
        let catalog = token
            .info
            .catalog
            .clone()
            .ok_or(SessionError::MissingCatalog)?;
        tracing::info!(
            user = token.info.user.name.as_deref().unwrap_or(&token.info.user.id),
            expires_at = %token.info.expires_at,
            "session authenticated"
        );
        *state = Some(token);
        Ok(ServiceCatalog::new(catalog))
    }

    /// The current token value, re-issued first when the token is within
    /// the expiry lead. Fails with [`SessionError::NotAuthenticated`] when
    /// the session was never logged in (or was logged out).
    pub async fn token(&self) -> Result<SecretString, SessionError> {
        {
            let state = self.state.read().await;
            match state.as_ref() {
                None => return Err(SessionError::NotAuthenticated),
                Some(token)
                    if !needs_renewal(token.info.expires_at, self.expiry_lead, Utc::now()) =>
                {
                    return Ok(token.value.clone());
                }
                Some(_) => {}
            }
        }
        self.renew().await
    }

    /// Metadata of the current token, when the session is authenticated.
    pub async fn token_info(&self) -> Option<Token> {
        let state = self.state.read().await;
        state.as_ref().map(|token| token.info.clone())
    }

    /// Re-issue the token under the write lock.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn renew(&self) -> Result<SecretString, SessionError> {
        let mut state = self.state.write().await;
        // Another task may have renewed while this one waited for the lock.
        if let Some(token) = state.as_ref() {
            if !needs_renewal(token.info.expires_at, self.expiry_lead, Utc::now()) {
                return Ok(token.value.clone());
            }
        } else {
            return Err(SessionError::NotAuthenticated);
        }
        let token = self.issue_token().await?;
        tracing::debug!(expires_at = %token.info.expires_at, "session token renewed");
        let value = token.value.clone();
        *state = Some(token);
        Ok(value)
    }

    /// Issue a fresh token from the session credentials.
    async fn issue_token(&self) -> Result<SessionToken, SessionError> {
        let request = self
            .anonymous_request(Method::POST, "v3/auth/tokens")?
            .json(&self.auth_request);
        let response = request::send_checked(
            request,
            &[StatusCode::CREATED, StatusCode::OK],
        )
        .await?;
        let value = SecretString::from(request::subject_token(response.headers())?);
        let body: TokenResponse = response.json().await.map_err(ApiError::from)?;
        Ok(SessionToken {
            value,
            info: body.token,
        })
    }

    /// Revoke the current token and clear the session.
    ///
    /// The slot is cleared even when the revocation call fails; the error
    /// is still reported to the caller.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        let token = {
            let mut state = self.state.write().await;
            state.take()
        };
        let Some(token) = token else {
            return Ok(());
        };
        let header = sensitive_header(&token.value)?;
        let request = self
            .anonymous_request(Method::DELETE, "v3/auth/tokens")?
            .header(AUTH_TOKEN_HEADER, header.clone())
            .header(SUBJECT_TOKEN_HEADER, header);
        request::send_checked(request, &[StatusCode::NO_CONTENT]).await?;
        tracing::info!("session token revoked");
        Ok(())
    }

    /// Spawn a background task renewing the token shortly before expiry.
    ///
    /// The task stops when the returned handle is cancelled or dropped,
    /// when the session is logged out, or when a renewal fails. On-demand
    /// renewal in [`Session::token`] stays in effect either way.
    pub fn start_refresh(self: Arc<Self>) -> RefreshHandle {
        let session = self;
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            loop {
                let Some(info) = session.token_info().await else {
                    tracing::debug!("session is not authenticated, stopping token refresh");
                    break;
                };
                let lead = TimeDelta::seconds(session.expiry_lead.as_secs() as i64);
                let wait = (info.expires_at - lead - Utc::now())
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = tokio::time::sleep(wait) => {}
                }
                match session.renew().await {
                    Ok(_) => {}
                    Err(SessionError::NotAuthenticated) => break,
                    Err(error) => {
                        tracing::warn!(%error, "background token renewal failed, stopping");
                        break;
                    }
                }
            }
        });
        RefreshHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Handle of the background renewal task. Cancels the task when dropped.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl RefreshHandle {
    /// Stop the background renewal task and wait for it to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub(crate) fn sensitive_header(token: &SecretString) -> Result<HeaderValue, SessionError> {
    let mut value = HeaderValue::from_str(token.expose_secret())
        .map_err(|_| SessionError::TokenEncoding)?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renewal_triggers_within_the_lead() {
        let now = Utc::now();
        let lead = Duration::from_secs(30);
        assert!(needs_renewal(now + TimeDelta::seconds(10), lead, now));
        assert!(needs_renewal(now + TimeDelta::seconds(30), lead, now));
        assert!(needs_renewal(now - TimeDelta::seconds(5), lead, now));
        assert!(!needs_renewal(now + TimeDelta::seconds(31), lead, now));
        assert!(!needs_renewal(now + TimeDelta::hours(1), lead, now));
    }

    #[test]
    fn token_header_is_marked_sensitive() {
        let header = sensitive_header(&SecretString::from("gAAAAABs")).unwrap();
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "gAAAAABs");
    }
}
