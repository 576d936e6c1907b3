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
//! # Domain scope discovery

use reqwest::{Method, StatusCode};

use crate::api_types::v3::domain::{Domain, DomainList};
use crate::identity::{IdentityApi, IdentityApiError};
use crate::request::{self, ApiError};

impl IdentityApi {
    /// List the domains the current user can scope a token to:
    /// `GET /v3/auth/domains`.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn list_auth_domains(&self) -> Result<Vec<Domain>, IdentityApiError> {
        let request = self
            .session
            .authenticated_request(Method::GET, "v3/auth/domains")
            .await?;
        let response = request::send_checked(request, &[StatusCode::OK]).await?;
        let body: DomainList = response.json().await.map_err(ApiError::from)?;
        Ok(body.domains)
    }
}
