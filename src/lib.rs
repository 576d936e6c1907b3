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

//! # OpenStack Keystone client SDK
//!
//! An asynchronous client for the OpenStack Identity (Keystone) v3 API.
//! The crate covers the identity bootstrap surface that every other
//! OpenStack interaction hangs off of: issuing authentication tokens,
//! validating, checking and revoking them, retrieving the service catalog,
//! discovering the projects, domains and systems available for scoping,
//! and listing users and application credentials.
//!
//! The entry point is [`Client`], configured through [`CloudConfig`]
//! (explicitly or from the standard `OS_*` environment variables). The
//! client owns a [`session::Session`] that holds the current token and its
//! metadata behind a read/write lock, re-authenticates on demand when the
//! token approaches expiry, and can additionally run a cancellable
//! background renewal task.
//!
//! ```no_run
//! use openstack_keystone_client::{Client, CloudConfig};
//!
//! # async fn doc() -> Result<(), openstack_keystone_client::KeystoneClientError> {
//! let client = Client::new(CloudConfig::from_env()?)?;
//! client.login().await?;
//!
//! let projects = client.identity().list_auth_projects().await?;
//! for project in projects {
//!     println!("{}: {}", project.id, project.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! All wire entities live in the `openstack_keystone_client_api_types`
//! crate, re-exported here as [`api_types`].

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod request;
pub mod session;

pub use openstack_keystone_client_api_types as api_types;

pub use crate::catalog::ServiceCatalog;
pub use crate::client::Client;
pub use crate::config::CloudConfig;
pub use crate::error::KeystoneClientError;
pub use crate::identity::IdentityApi;
