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
//! # Service catalog registry
//!
//! Endpoint resolution over the catalog Keystone issues alongside a token.

use thiserror::Error;
use url::Url;

use crate::api_types::catalog::{Catalog, CatalogService, Interface};

/// Catalog resolution error.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No service of the requested type exists in the catalog.
    #[error("no service of type {service_type:?} in the catalog")]
    ServiceNotFound { service_type: String },

    /// The service exists but carries no matching endpoint.
    #[error(
        "no {interface} endpoint of service {service_type:?} in region {}",
        region.as_deref().unwrap_or("<any>")
    )]
    EndpointNotFound {
        service_type: String,
        interface: Interface,
        region: Option<String>,
    },

    /// The catalog carries an endpoint URL that does not parse.
    #[error("invalid url {url:?} for the {interface} endpoint of service {service_type:?}")]
    InvalidEndpointUrl {
        service_type: String,
        interface: Interface,
        url: String,
        source: url::ParseError,
    },
}

/// The parsed service catalog of an authenticated session.
///
/// Wraps the raw [`Catalog`] entity with endpoint lookup by service type,
/// interface and optional region.
#[derive(Clone, Debug, Default)]
pub struct ServiceCatalog {
    catalog: Catalog,
}

impl ServiceCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// The raw catalog entity.
    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }

    /// Find the service of the given type.
    pub fn service(&self, service_type: &str) -> Option<&CatalogService> {
        self.catalog
            .iter()
            .find(|service| service.r#type == service_type)
    }

    /// Resolve the endpoint URL for a service type and interface.
    ///
    /// When `region` is given only endpoints of that region match; otherwise
    /// the first endpoint carrying the interface wins, in catalog order.
    pub fn endpoint(
        &self,
        service_type: &str,
        interface: Interface,
        region: Option<&str>,
    ) -> Result<Url, CatalogError> {
        let service =
            self.service(service_type)
                .ok_or_else(|| CatalogError::ServiceNotFound {
                    service_type: service_type.to_string(),
                })?;
        let endpoint = service
            .endpoints
            .iter()
            .filter(|endpoint| endpoint.interface == interface.as_str())
            .find(|endpoint| match region {
                Some(region) => {
                    endpoint.region.as_deref() == Some(region)
                        || endpoint.region_id.as_deref() == Some(region)
                }
                None => true,
            })
            .ok_or_else(|| CatalogError::EndpointNotFound {
                service_type: service_type.to_string(),
                interface,
                region: region.map(str::to_string),
            })?;
        Url::parse(&endpoint.url).map_err(|source| CatalogError::InvalidEndpointUrl {
            service_type: service_type.to_string(),
            interface,
            url: endpoint.url.clone(),
            source,
        })
    }
}

impl From<Catalog> for ServiceCatalog {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}

#[cfg(test)]
mod tests {
    use crate::api_types::catalog::Endpoint;

    use super::*;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(Catalog(vec![
            CatalogService {
                id: "s1".into(),
                r#type: "identity".into(),
                name: Some("keystone".into()),
                endpoints: vec![
                    Endpoint {
                        id: "e1".into(),
                        url: "http://keystone.internal:5000/v3".into(),
                        interface: "internal".into(),
                        region: Some("RegionOne".into()),
                        region_id: Some("RegionOne".into()),
                    },
                    Endpoint {
                        id: "e2".into(),
                        url: "https://keystone.example.org/v3".into(),
                        interface: "public".into(),
                        region: Some("RegionOne".into()),
                        region_id: Some("RegionOne".into()),
                    },
                    Endpoint {
                        id: "e3".into(),
                        url: "https://keystone.two.example.org/v3".into(),
                        interface: "public".into(),
                        region: Some("RegionTwo".into()),
                        region_id: Some("RegionTwo".into()),
                    },
                ],
            },
            CatalogService {
                id: "s2".into(),
                r#type: "compute".into(),
                name: Some("nova".into()),
                endpoints: vec![Endpoint {
                    id: "e4".into(),
                    url: "not a url".into(),
                    interface: "public".into(),
                    region: None,
                    region_id: None,
                }],
            },
        ]))
    }

    #[test]
    fn resolves_by_type_and_interface() {
        let url = catalog()
            .endpoint("identity", Interface::Public, None)
            .unwrap();
        assert_eq!(url.as_str(), "https://keystone.example.org/v3");
    }

    #[test]
    fn region_narrows_the_match() {
        let url = catalog()
            .endpoint("identity", Interface::Public, Some("RegionTwo"))
            .unwrap();
        assert_eq!(url.as_str(), "https://keystone.two.example.org/v3");
    }

    #[test]
    fn unknown_service_is_an_error() {
        let err = catalog()
            .endpoint("volume", Interface::Public, None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::ServiceNotFound { .. }));
    }

    #[test]
    fn unknown_interface_or_region_is_an_error() {
        let err = catalog()
            .endpoint("identity", Interface::Admin, None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::EndpointNotFound { .. }));

        let err = catalog()
            .endpoint("identity", Interface::Public, Some("RegionThree"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::EndpointNotFound { .. }));
    }

    #[test]
    fn malformed_endpoint_url_is_an_error() {
        let err = catalog()
            .endpoint("compute", Interface::Public, None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEndpointUrl { .. }));
    }
}
