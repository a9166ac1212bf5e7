// Copyright 2025 JiangLong.
//
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

use super::istio::{
    Destination, HttpRoute, HttpRouteDestination, PortSelector, VirtualService,
    VirtualServiceSpec,
};
use super::naming::{owner_reference, ResourceNaming};
use crate::domain::model::{Application, Component};
use crate::infrastructure::constants::{ISTIO_API_VERSION, KIND_VIRTUAL_SERVICE};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

/// Builds the VirtualService exposing a component through the namespace gateway.
///
/// The destination address is formatted from the same naming helper the
/// service builder uses rather than read from a built Service, so both can be
/// produced independently. An empty host is passed through as-is.
pub struct VirtualServiceBuilder {
    naming: ResourceNaming,
    host: String,
    server_port: i32,
    owner: OwnerReference,
}

impl VirtualServiceBuilder {
    pub fn new(component: &Component, app: &Application) -> Self {
        let ingress = component.ingress_traits();
        Self {
            naming: ResourceNaming::new(component, app),
            host: ingress.host,
            server_port: ingress.server_port,
            owner: owner_reference(app),
        }
    }

    pub fn build(&self) -> VirtualService {
        let metadata = ObjectMeta {
            name: Some(self.naming.virtual_service_name()),
            namespace: Some(self.naming.namespace().to_string()),
            owner_references: Some(vec![self.owner.clone()]),
            ..Default::default()
        };

        let destination = Destination {
            host: self.naming.service_address(),
            port: Some(PortSelector {
                number: self.server_port,
            }),
        };

        tracing::debug!(
            virtual_service = %self.naming.virtual_service_name(),
            host = %self.host,
            destination = %destination.host,
            "Built virtual service"
        );

        VirtualService {
            api_version: ISTIO_API_VERSION.to_string(),
            kind: KIND_VIRTUAL_SERVICE.to_string(),
            metadata,
            spec: VirtualServiceSpec {
                hosts: vec![self.host.clone()],
                gateways: vec![self.naming.gateway_name()],
                http: vec![HttpRoute {
                    route: vec![HttpRouteDestination { destination }],
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> Application {
        Application::new("shop", "prod").with_uid("uid-1")
    }

    #[test]
    fn test_virtual_service_routes_to_service_address() {
        let component = Component::new("api").with_ingress("api.example.com", 8080);
        let vs = VirtualServiceBuilder::new(&component, &app()).build();

        assert_eq!(vs.api_version, "networking.istio.io/v1alpha3");
        assert_eq!(vs.kind, "VirtualService");
        assert_eq!(vs.metadata.name.as_deref(), Some("shop-api-vs"));
        assert_eq!(vs.metadata.namespace.as_deref(), Some("prod"));
        assert_eq!(vs.spec.gateways, vec!["prod-gateway".to_string()]);
        assert_eq!(vs.spec.hosts, vec!["api.example.com".to_string()]);

        assert_eq!(vs.spec.http.len(), 1);
        assert_eq!(vs.spec.http[0].route.len(), 1);
        let destination = &vs.spec.http[0].route[0].destination;
        assert_eq!(destination.host, "shop-api-service.prod.svc.cluster.local");
        assert_eq!(destination.port, Some(PortSelector { number: 8080 }));
    }

    #[test]
    fn test_owner_reference_points_at_application() {
        let component = Component::new("api").with_ingress("api.example.com", 8080);
        let vs = VirtualServiceBuilder::new(&component, &app()).build();
        let owners = vs.metadata.owner_references.unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].name, "shop");
        assert_eq!(owners[0].uid, "uid-1");
    }

    #[test]
    fn test_empty_host_passes_through() {
        let component = Component::new("api").with_ingress("", 8080);
        let vs = VirtualServiceBuilder::new(&component, &app()).build();
        assert_eq!(vs.spec.hosts, vec![String::new()]);
    }

    #[test]
    fn test_wire_format() {
        let component = Component::new("api").with_ingress("api.example.com", 8080);
        let vs = VirtualServiceBuilder::new(&component, &app()).build();
        let value = serde_json::to_value(&vs).unwrap();

        assert_eq!(value["apiVersion"], json!("networking.istio.io/v1alpha3"));
        assert_eq!(
            value["spec"],
            json!({
                "hosts": ["api.example.com"],
                "gateways": ["prod-gateway"],
                "http": [{
                    "route": [{
                        "destination": {
                            "host": "shop-api-service.prod.svc.cluster.local",
                            "port": { "number": 8080 }
                        }
                    }]
                }]
            })
        );
        assert_eq!(
            value["metadata"]["ownerReferences"][0]["blockOwnerDeletion"],
            json!(true)
        );
    }
}
