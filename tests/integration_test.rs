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

#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
    use mesh_expose::domain::config::apply_to_mesh_config;
    use mesh_expose::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::io::Write;

    fn shop() -> Application {
        Application::new("shop", "prod").with_uid("7c1e9a52")
    }

    fn api() -> Component {
        Component::new("api").with_ingress("api.example.com", 8080)
    }

    #[test]
    fn test_worked_example_service() {
        let service = ServiceBuilder::new(&api(), &shop()).build();

        assert_eq!(service.metadata.name.as_deref(), Some("shop-api-service"));
        assert_eq!(service.metadata.namespace.as_deref(), Some("prod"));

        let owner = &service.metadata.owner_references.as_ref().unwrap()[0];
        assert_eq!(owner.api_version, "project.cattle.io/v3");
        assert_eq!(owner.kind, "Application");
        assert_eq!(owner.name, "shop");
        assert_eq!(owner.uid, "7c1e9a52");
        assert_eq!(owner.controller, Some(true));
        assert_eq!(owner.block_owner_deletion, Some(true));

        let spec = service.spec.unwrap();
        assert_eq!(
            spec.selector.unwrap().get("app").map(String::as_str),
            Some("shop-api-workload")
        );
        let ports = spec.ports.unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].name.as_deref(), Some("http-api"));
        assert_eq!(ports[0].port, 8080);
        assert_eq!(ports[0].target_port, Some(IntOrString::Int(8080)));
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn test_worked_example_virtual_service() {
        let vs = VirtualServiceBuilder::new(&api(), &shop()).build();

        assert_eq!(vs.metadata.name.as_deref(), Some("shop-api-vs"));
        assert_eq!(
            serde_json::to_value(&vs.spec).unwrap(),
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
    }

    #[test]
    fn test_worked_example_destination_rule() {
        let rule = DestinationRuleBuilder::new(&api(), &shop()).build();

        assert_eq!(rule.api_version, "networking.istio.io/v1alpha3");
        assert_eq!(rule.metadata.name.as_deref(), Some("shop-api-destinationrule"));
        assert_eq!(
            serde_json::to_value(&rule.spec).unwrap(),
            json!({
                "host": "shop-api-service.prod.svc.cluster.local",
                "trafficPolicy": {}
            })
        );
    }

    #[test]
    fn test_load_balancer_precedence() {
        let cases = [
            ("session", "least-connection", json!({ "consistentHash": { "useSourceIp": true } })),
            ("", "least-connection", json!({ "simple": "LEAST_CONN" })),
            ("", "round-robin", json!({ "simple": "ROUND_ROBIN" })),
            ("", "random", json!({ "simple": "RANDOM" })),
            ("", "weighted", json!({})),
        ];

        for (key, strategy, expected) in cases {
            let component = api().with_load_balance(key, strategy);
            let rule = DestinationRuleBuilder::new(&component, &shop()).build();
            let value = serde_json::to_value(&rule.spec).unwrap();
            assert_eq!(
                value["trafficPolicy"]["loadBalancer"], expected,
                "key={:?} strategy={:?}",
                key, strategy
            );
        }
    }

    #[test]
    fn test_builders_are_idempotent() {
        let component = api().with_load_balance("", "random");
        let first = build_component_resources(&component, &shop());
        let second = build_component_resources(&component, &shop());
        assert_eq!(first, second);
    }

    #[test]
    fn test_route_targets_service_address() {
        for component in [
            api(),
            Component::new("cart").with_ingress("cart.example.com", 9090),
            Component::new("edge"),
        ] {
            let resources = build_component_resources(&component, &shop());
            let service = &resources.service;
            let expected = format!(
                "{}.{}.svc.cluster.local",
                service.metadata.name.as_deref().unwrap(),
                service.metadata.namespace.as_deref().unwrap()
            );

            let route = &resources.virtual_service.spec.http[0].route[0].destination;
            assert_eq!(route.host, expected);
            assert_eq!(resources.destination_rule.spec.host, expected);
            assert_eq!(
                route.port.as_ref().unwrap().number,
                service.spec.as_ref().unwrap().ports.as_ref().unwrap()[0].port
            );
        }
    }

    #[test]
    fn test_missing_ingress_uses_defaults() {
        let resources = build_component_resources(&Component::new("worker"), &shop());
        assert_eq!(resources.virtual_service.spec.hosts, vec![String::new()]);
        let port = &resources.service.spec.unwrap().ports.unwrap()[0];
        assert_eq!(port.port, 0);
    }

    #[test]
    fn test_manifest_file_to_yaml_stream() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
application:
  name: shop
  namespace: prod
components:
  - name: api
    ingress:
      host: api.example.com
      serverPort: 8080
  - name: cart
    ingress:
      host: cart.example.com
      serverPort: 9090
    loadBalance:
      consistentHashKey: session
"#
        )
        .unwrap();

        let manifest = ApplicationManifest::from_file(file.path()).unwrap();
        let planned = plan(&manifest, &MeshConfig::default()).unwrap();
        assert_eq!(planned.len(), 2);

        let mut documents = Vec::new();
        for resources in &planned {
            documents.extend(resources.to_documents().unwrap());
        }
        let stream =
            mesh_expose::infrastructure::kubernetes::resources::to_yaml_stream(&documents)
                .unwrap();

        assert_eq!(stream.matches("---\n").count(), 6);
        assert!(stream.contains("name: shop-cart-destinationrule"));
        assert!(stream.contains("useSourceIp: true"));
    }

    #[test]
    fn test_strict_and_permissive_plans() {
        let manifest = ApplicationManifest {
            application: shop(),
            components: vec![api().with_load_balance("", "rr")],
        };

        let err = plan(&manifest, &MeshConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unknown load balance strategy 'rr'"));

        let mut config = MeshConfig::default();
        let mut props = HashMap::new();
        props.insert("mesh.validation".to_string(), "permissive".to_string());
        apply_to_mesh_config(&props, &mut config);
        assert_eq!(config.validation, ValidationMode::Permissive);

        let planned = plan(&manifest, &config).unwrap();
        assert_eq!(
            LoadBalancerSelection::from_rule(&planned[0].destination_rule),
            LoadBalancerSelection::Simple(None)
        );
    }
}
