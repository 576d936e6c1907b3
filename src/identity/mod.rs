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
//! # Identity API
//!
//! Typed wrappers for the Keystone v3 identity operations, one module per
//! operation group.

use std::sync::Arc;

use crate::session::Session;

pub mod application_credential;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod project;
pub mod system;
pub mod token;
pub mod user;

pub use error::IdentityApiError;
pub use token::{TokenCreateOptions, TokenCreateOptionsBuilder};

/// The identity API surface, bound to a [`Session`].
///
/// Obtained from [`Client::identity`](crate::Client::identity). All
/// operations except token creation carry the session token in
/// `X-Auth-Token` and renew it first when it is close to expiry.
#[derive(Clone, Debug)]
pub struct IdentityApi {
    pub(crate) session: Arc<Session>,
}

impl IdentityApi {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}
