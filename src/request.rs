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
//! # Request plumbing
//!
//! Shared helpers for issuing HTTP requests against Keystone and mapping
//! response statuses to typed errors.

use reqwest::{RequestBuilder, Response, StatusCode, header::HeaderMap};
use serde::Deserialize;
use thiserror::Error;

/// Response header carrying the token issued or validated by an
/// `/v3/auth/tokens` call.
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Request header carrying the token the caller authenticates with.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Error returned by a Keystone API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400.
    #[error("invalid request due to incorrect syntax or missing required parameters{}", format_detail(.detail))]
    BadRequest { detail: Option<ErrorDetail> },

    /// 401.
    #[error("authentication failed due to invalid credentials or expired token{}", format_detail(.detail))]
    Unauthorized { detail: Option<ErrorDetail> },

    /// 403.
    #[error("insufficient permission to perform the requested action{}", format_detail(.detail))]
    Forbidden { detail: Option<ErrorDetail> },

    /// 404.
    #[error("the requested resource could not be found{}", format_detail(.detail))]
    NotFound { detail: Option<ErrorDetail> },

    /// 405.
    #[error("method not allowed for the requested resource{}", format_detail(.detail))]
    MethodNotAllowed { detail: Option<ErrorDetail> },

    /// 409.
    #[error("the request conflicts with the current state of the resource{}", format_detail(.detail))]
    Conflict { detail: Option<ErrorDetail> },

    /// Any other status outside the expected set.
    #[error("unexpected response status {}{}", status, format_detail(.detail))]
    Unexpected {
        status: StatusCode,
        detail: Option<ErrorDetail>,
    },

    /// The response did not carry a header the protocol requires.
    #[error("response is missing the required {} header", header)]
    MissingHeader { header: &'static str },

    /// A required response header carried bytes that are not valid text.
    #[error("the {} response header is not valid text", header)]
    HeaderEncoding { header: &'static str },

    /// Failure of the HTTP transport itself.
    #[error(transparent)]
    Transport {
        #[from]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Construct the typed error matching an unexpected response status.
    pub fn from_status(status: StatusCode, detail: Option<ErrorDetail>) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest { detail },
            StatusCode::UNAUTHORIZED => Self::Unauthorized { detail },
            StatusCode::FORBIDDEN => Self::Forbidden { detail },
            StatusCode::NOT_FOUND => Self::NotFound { detail },
            StatusCode::METHOD_NOT_ALLOWED => Self::MethodNotAllowed { detail },
            StatusCode::CONFLICT => Self::Conflict { detail },
            status => Self::Unexpected { status, detail },
        }
    }

    /// The response status the error was built from, when there is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::MethodNotAllowed { .. } => Some(StatusCode::METHOD_NOT_ALLOWED),
            Self::Conflict { .. } => Some(StatusCode::CONFLICT),
            Self::Unexpected { status, .. } => Some(*status),
            Self::Transport { source } => source.status(),
            Self::MissingHeader { .. } | Self::HeaderEncoding { .. } => None,
        }
    }

    /// Whether the error corresponds to a 4xx response.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|status| status.is_client_error())
    }

    /// Whether the error corresponds to a 5xx response.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status.is_server_error())
    }
}

/// Error information reported by Keystone in the response body.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ErrorDetail {
    /// The HTTP status code as repeated in the body.
    pub code: Option<u16>,
    /// Short error title.
    pub title: Option<String>,
    /// Human readable error explanation.
    pub message: Option<String>,
}

/// Keystone wraps error information into an `error` envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

fn format_detail(detail: &Option<ErrorDetail>) -> String {
    match detail {
        Some(ErrorDetail {
            message: Some(message),
            ..
        }) => format!(": {message}"),
        _ => String::new(),
    }
}

/// Send the request and ensure the response status is one of `expected`.
///
/// On any other status the response body is drained and, when it parses as
/// the Keystone error envelope, attached to the returned [`ApiError`].
#[tracing::instrument(level = "debug", skip(request))]
pub async fn send_checked(
    request: RequestBuilder,
    expected: &[StatusCode],
) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if expected.contains(&status) {
        return Ok(response);
    }

    let detail = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error),
        Err(_) => None,
    };
    tracing::debug!(status = %status, ?detail, "keystone reported an error");
    Err(ApiError::from_status(status, detail))
}

/// Extract the subject token from the response headers of a token call.
pub fn subject_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(SUBJECT_TOKEN_HEADER)
        .ok_or(ApiError::MissingHeader {
            header: SUBJECT_TOKEN_HEADER,
        })?;
    let token = value.to_str().map_err(|_| ApiError::HeaderEncoding {
        header: SUBJECT_TOKEN_HEADER,
    })?;
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue};

    use super::*;

    #[test]
    fn from_status_maps_known_codes() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, None),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, None),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, None),
            ApiError::Unexpected {
                status: StatusCode::BAD_GATEWAY,
                ..
            }
        ));
    }

    #[test]
    fn error_classification() {
        let err = ApiError::from_status(StatusCode::CONFLICT, None);
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, None);
        assert!(err.is_server_error());

        let err = ApiError::MissingHeader {
            header: SUBJECT_TOKEN_HEADER,
        };
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn detail_message_is_rendered() {
        let err = ApiError::Unauthorized {
            detail: Some(ErrorDetail {
                code: Some(401),
                title: Some("Unauthorized".into()),
                message: Some("The request you have made requires authentication.".into()),
            }),
        };
        assert!(
            err.to_string()
                .ends_with("The request you have made requires authentication.")
        );
    }

    #[test]
    fn subject_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(SUBJECT_TOKEN_HEADER, HeaderValue::from_static("gAAAAABs"));
        assert_eq!(subject_token(&headers).unwrap(), "gAAAAABs");

        let empty = HeaderMap::new();
        assert!(matches!(
            subject_token(&empty),
            Err(ApiError::MissingHeader {
                header: SUBJECT_TOKEN_HEADER
            })
        ));
    }
}
