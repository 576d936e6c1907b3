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
//! # System scope discovery types

use serde::{Deserialize, Serialize};

use crate::Links;
use crate::scope::System;

/// List of systems available to be scoped to, as returned by
/// `GET /v3/auth/system`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SystemList {
    /// Collection of system objects. The wire field is singular.
    pub system: Vec<System>,
    /// Collection links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}
