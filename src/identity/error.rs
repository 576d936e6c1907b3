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
//! # Identity API errors

use thiserror::Error;

use crate::api_types::error::BuilderError;
use crate::request::ApiError;
use crate::session::SessionError;

/// Identity API error.
#[derive(Debug, Error)]
pub enum IdentityApiError {
    /// No authentication method can be derived from the token options.
    #[error(
        "at least one authentication method is required: password, token or \
         application credential"
    )]
    NoAuthMethod,

    /// Password authentication without a user identification.
    #[error("password authentication requires the user id, or name plus domain")]
    MissingUser,

    /// A project scope by name without the project domain.
    #[error("a project scope by name requires the project domain id or name")]
    MissingProjectDomain,

    /// Application credential by name without the owning user.
    #[error("an application credential by name requires the owning user")]
    MissingApplicationCredentialUser,

    /// The API call failed.
    #[error(transparent)]
    Api {
        #[from]
        source: ApiError,
    },

    /// The session could not provide a token for the call.
    #[error(transparent)]
    Session {
        #[from]
        source: SessionError,
    },

    /// A request body failed to build.
    #[error(transparent)]
    Builder {
        #[from]
        source: BuilderError,
    },
}
