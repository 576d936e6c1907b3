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
//! API type construction errors.

use thiserror::Error;

/// Error building an API structure out of its parts.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A mandatory field was not initialized.
    #[error("field {0} is required")]
    UninitializedField(&'static str),

    /// The combination of fields is not valid.
    #[error("{0}")]
    ValidationError(String),
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(error: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(error.field_name())
    }
}

impl From<String> for BuilderError {
    fn from(error: String) -> Self {
        Self::ValidationError(error)
    }
}
