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
//! # Catalog operations

use reqwest::{Method, StatusCode};

use crate::api_types::catalog::{Catalog, CatalogResponse};
use crate::identity::{IdentityApi, IdentityApiError};
use crate::request::{self, ApiError};

impl IdentityApi {
    /// Fetch the service catalog of the current token:
    /// `GET /v3/auth/catalog`.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn get_catalog(&self) -> Result<Catalog, IdentityApiError> {
        let request = self
            .session
            .authenticated_request(Method::GET, "v3/auth/catalog")
            .await?;
        let response = request::send_checked(request, &[StatusCode::OK]).await?;
        let body: CatalogResponse = response.json().await.map_err(ApiError::from)?;
        Ok(body.catalog)
    }
}
