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
#![allow(dead_code)]

use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

use openstack_keystone_client::config::{CloudConfig, CloudConfigBuilder};

pub const TOKEN: &str = "gAAAAABfirsttoken";
pub const RENEWED_TOKEN: &str = "gAAAAABrenewedtoken";

/// Password configuration pointing at the mock server.
pub fn config(server: &MockServer) -> CloudConfig {
    CloudConfigBuilder::default()
        .auth_url(Url::parse(&server.uri()).expect("mock server uri parses"))
        .user_name("admin")
        .user_domain_name("Default")
        .password("sup3rs3cret")
        .build()
        .expect("config builds")
}

/// A token response body expiring `expires_in_secs` from now.
pub fn token_body(expires_in_secs: i64) -> Value {
    let now = Utc::now();
    json!({
        "token": {
            "audit_ids": ["3T2dc1CGQxyJsHdDu1xkcw"],
            "methods": ["password"],
            "issued_at": now.to_rfc3339(),
            "expires_at": (now + TimeDelta::seconds(expires_in_secs)).to_rfc3339(),
            "user": {
                "id": "ee4dfb6e5540447cb3741905149d9b6e",
                "name": "admin",
                "domain": {"id": "default", "name": "Default"}
            },
            "project": {
                "id": "a6944d763bf64ee6a275f1263fae0352",
                "name": "admin",
                "domain": {"id": "default", "name": "Default"}
            },
            "roles": [{"id": "51cc68287d524c759f47c811e6463340", "name": "admin"}],
            "catalog": catalog_body()
        }
    })
}

/// The catalog as embedded in a token and served by `GET /v3/auth/catalog`.
pub fn catalog_body() -> Value {
    json!([
        {
            "id": "050726f278654128aba89757ae25950c",
            "type": "identity",
            "name": "keystone",
            "endpoints": [
                {
                    "id": "068d1b359ee84b438266cb736d81de97",
                    "url": "https://keystone.example.org/v3",
                    "interface": "public",
                    "region": "RegionOne",
                    "region_id": "RegionOne"
                },
                {
                    "id": "8bfc846841ab441ca38471be6d164ced",
                    "url": "https://keystone.internal.example.org/v3",
                    "interface": "internal",
                    "region": "RegionOne",
                    "region_id": "RegionOne"
                }
            ]
        },
        {
            "id": "26d8c4f8c0c44bb5b48ba520525b3598",
            "type": "compute",
            "name": "nova",
            "endpoints": [
                {
                    "id": "c8d346c91de746bd9e1d5f9e76e6b1aa",
                    "url": "https://nova.example.org/v2.1",
                    "interface": "public",
                    "region": "RegionOne",
                    "region_id": "RegionOne"
                }
            ]
        }
    ])
}

/// The Keystone error envelope of a failed request.
pub fn error_body(code: u16, title: &str, message: &str) -> Value {
    json!({"error": {"code": code, "title": title, "message": message}})
}
