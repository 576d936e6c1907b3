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
//! Session lifecycle: login, on-demand renewal, background refresh, logout.

use std::time::Duration;

use eyre::Result;
use secrecy::ExposeSecret;
use tracing_test::traced_test;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openstack_keystone_client::api_types::catalog::Interface;
use openstack_keystone_client::error::KeystoneClientError;
use openstack_keystone_client::session::SessionError;
use openstack_keystone_client::Client;

mod common;

#[tokio::test]
#[traced_test]
async fn login_populates_token_and_catalog() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::TOKEN)
                .set_body_json(common::token_body(3600)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(common::config(&server))?;
    assert!(client.service_catalog().await.is_none());
    client.login().await?;

    let token = client.token().await?;
    assert_eq!(token.expose_secret(), common::TOKEN);
    let info = client.token_info().await.expect("token metadata present");
    assert_eq!(info.user.name.as_deref(), Some("admin"));

    let catalog = client.service_catalog().await.expect("catalog present");
    let url = catalog.endpoint("identity", Interface::Public, Some("RegionOne"))?;
    assert_eq!(url.as_str(), "https://keystone.example.org/v3");
    let url = client.resolve_endpoint("compute").await?;
    assert_eq!(url.as_str(), "https://nova.example.org/v2.1");

    assert!(logs_contain("session authenticated"));
    Ok(())
}

#[tokio::test]
async fn token_before_login_is_not_authenticated() -> Result<()> {
    let server = MockServer::start().await;
    let client = Client::new(common::config(&server))?;
    let result = client.token().await;
    assert!(matches!(
        result,
        Err(KeystoneClientError::Session {
            source: SessionError::NotAuthenticated
        })
    ));
    Ok(())
}

#[tokio::test]
async fn token_renews_on_demand_within_the_expiry_lead() -> Result<()> {
    let server = MockServer::start().await;

    // First issue: a token already inside the default 30 s renewal lead.
    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::TOKEN)
                .set_body_json(common::token_body(10)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::RENEWED_TOKEN)
                .set_body_json(common::token_body(3600)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(common::config(&server))?;
    client.login().await?;

    let token = client.token().await?;
    assert_eq!(token.expose_secret(), common::RENEWED_TOKEN);

    // The renewed token is outside the lead, so no further issue happens.
    let token = client.token().await?;
    assert_eq!(token.expose_secret(), common::RENEWED_TOKEN);
    Ok(())
}

#[tokio::test]
async fn background_refresh_renews_before_expiry() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::TOKEN)
                .set_body_json(common::token_body(2)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::RENEWED_TOKEN)
                .set_body_json(common::token_body(3600)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = common::config(&server);
    config.expiry_lead_secs = 1;
    let client = Client::new(config)?;
    client.login().await?;

    let refresh = client.start_refresh();
    // The first token expires in 2 s with a 1 s lead, so the task renews
    // after roughly a second.
    tokio::time::sleep(Duration::from_millis(1700)).await;
    refresh.stop().await;

    let info = client.token_info().await.expect("token metadata present");
    let token = client.token().await?;
    assert_eq!(token.expose_secret(), common::RENEWED_TOKEN);
    assert!(info.expires_at > chrono::Utc::now() + chrono::TimeDelta::seconds(60));
    Ok(())
}

#[tokio::test]
async fn stopped_refresh_task_makes_no_further_requests() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::TOKEN)
                .set_body_json(common::token_body(3600)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(common::config(&server))?;
    client.login().await?;

    let refresh = client.start_refresh();
    refresh.stop().await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    // The expectation of exactly one POST is verified when the mock server
    // shuts down.
    Ok(())
}

#[tokio::test]
async fn logout_revokes_the_token_and_clears_the_session() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::TOKEN)
                .set_body_json(common::token_body(3600)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/auth/tokens"))
        .and(header("X-Auth-Token", common::TOKEN))
        .and(header("X-Subject-Token", common::TOKEN))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(common::config(&server))?;
    client.login().await?;
    client.logout().await?;

    assert!(client.service_catalog().await.is_none());
    assert!(client.token_info().await.is_none());
    let result = client.token().await;
    assert!(matches!(
        result,
        Err(KeystoneClientError::Session {
            source: SessionError::NotAuthenticated
        })
    ));

    // A second logout is a no-op.
    client.logout().await?;
    Ok(())
}

#[tokio::test]
async fn login_without_a_catalog_in_the_response_is_an_error() -> Result<()> {
    let server = MockServer::start().await;

    let mut body = common::token_body(3600);
    body["token"]
        .as_object_mut()
        .expect("token object")
        .remove("catalog");
    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", common::TOKEN)
                .set_body_json(body),
        )
        .mount(&server)
        .await;

    let client = Client::new(common::config(&server))?;
    let result = client.login().await;
    assert!(matches!(
        result,
        Err(KeystoneClientError::Session {
            source: SessionError::MissingCatalog
        })
    ));
    Ok(())
}
