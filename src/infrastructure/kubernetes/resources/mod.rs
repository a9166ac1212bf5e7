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

//! Resource builders for component exposure

pub mod destination_rule;
pub mod istio;
pub mod naming;
pub mod service;
pub mod virtual_service;

pub use self::destination_rule::{DestinationRuleBuilder, LoadBalancerSelection};
pub use self::istio::{DestinationRule, SimpleLb, VirtualService};
pub use self::naming::{owner_reference, ResourceKind, ResourceNaming};
pub use self::service::ServiceBuilder;
pub use self::virtual_service::VirtualServiceBuilder;

use crate::domain::model::{Application, Component};
use crate::infrastructure::constants::KIND_SERVICE;
use crate::shared::error::MeshError;
use k8s_openapi::api::core::v1::Service;
use serde::Serialize;

/// The three resources derived for one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentResources {
    pub component: String,
    pub service: Service,
    pub virtual_service: VirtualService,
    pub destination_rule: DestinationRule,
}

/// Runs the three builders for one component.
pub fn build_component_resources(component: &Component, app: &Application) -> ComponentResources {
    ComponentResources {
        component: component.name.clone(),
        service: ServiceBuilder::new(component, app).build(),
        virtual_service: VirtualServiceBuilder::new(component, app).build(),
        destination_rule: DestinationRuleBuilder::new(component, app).build(),
    }
}

impl ComponentResources {
    /// The resources as JSON documents, Service first.
    pub fn to_documents(&self) -> Result<Vec<serde_json::Value>, MeshError> {
        Ok(vec![
            service_document(&self.service)?,
            serde_json::to_value(&self.virtual_service)?,
            serde_json::to_value(&self.destination_rule)?,
        ])
    }
}

/// `Service` from k8s-openapi leaves apiVersion/kind to the client, so they
/// are added here for standalone manifests.
fn service_document(service: &Service) -> Result<serde_json::Value, MeshError> {
    let mut value = serde_json::to_value(service)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("apiVersion".to_string(), "v1".into());
        object.insert("kind".to_string(), KIND_SERVICE.into());
    }
    Ok(value)
}

/// Renders documents as a multi-document YAML stream.
pub fn to_yaml_stream<T: Serialize>(documents: &[T]) -> Result<String, MeshError> {
    let mut out = String::new();
    for document in documents {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(document)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_are_typed() {
        let app = Application::new("shop", "prod");
        let component = Component::new("api").with_ingress("api.example.com", 8080);
        let docs = build_component_resources(&component, &app)
            .to_documents()
            .unwrap();

        let kinds: Vec<_> = docs.iter().map(|d| d["kind"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["Service", "VirtualService", "DestinationRule"]);
        assert_eq!(docs[0]["apiVersion"], "v1");
    }

    #[test]
    fn test_yaml_stream() {
        let app = Application::new("shop", "prod");
        let component = Component::new("api").with_ingress("api.example.com", 8080);
        let docs = build_component_resources(&component, &app)
            .to_documents()
            .unwrap();

        let yaml = to_yaml_stream(&docs).unwrap();
        assert_eq!(yaml.matches("---\n").count(), 3);
        assert!(yaml.contains("name: shop-api-service"));
        assert!(yaml.contains("host: shop-api-service.prod.svc.cluster.local"));
    }
}
