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
//! # Error
//!
//! Diverse errors that can occur while talking to Keystone.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::identity::error::IdentityApiError;
use crate::request::ApiError;
use crate::session::SessionError;

/// Keystone client error.
#[derive(Debug, Error)]
pub enum KeystoneClientError {
    #[error(transparent)]
    Api {
        #[from]
        source: ApiError,
    },

    #[error(transparent)]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error(transparent)]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error(transparent)]
    Identity {
        #[from]
        source: IdentityApiError,
    },

    #[error(transparent)]
    Session {
        #[from]
        source: SessionError,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    JsonError {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// Url parsing error.
    #[error(transparent)]
    UrlParse {
        #[from]
        source: url::ParseError,
    },
}
