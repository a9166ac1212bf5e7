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

use crate::domain::config::{MeshConfig, ValidationMode};
use crate::domain::exposure::validator::ComponentValidator;
use crate::domain::model::ApplicationManifest;
use crate::infrastructure::kubernetes::client::{MeshKubeClient, MeshKubeClientImpl};
use crate::infrastructure::kubernetes::resources::{
    build_component_resources, ComponentResources, ResourceNaming,
};
use crate::shared::error::MeshError;

/// Validates a manifest according to `config` and derives the resources of
/// every component. Nothing is submitted.
pub fn plan(
    manifest: &ApplicationManifest,
    config: &MeshConfig,
) -> Result<Vec<ComponentResources>, MeshError> {
    if config.validation == ValidationMode::Strict {
        ComponentValidator::new()?.validate_manifest(manifest)?;
    }

    Ok(manifest
        .components
        .iter()
        .map(|component| build_component_resources(component, &manifest.application))
        .collect())
}

/// Observed state of a component's Service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub component: String,
    pub service: String,
    pub cluster_ip: Option<String>,
    pub found: bool,
}

pub struct ExposureDescriptor {
    client: Box<dyn MeshKubeClient>,
    config: MeshConfig,
}

impl ExposureDescriptor {
    pub async fn new_with_config(
        namespace: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
        config: MeshConfig,
    ) -> Result<Self, MeshError> {
        let client = MeshKubeClientImpl::new_with_config(
            namespace,
            kubeconfig_path,
            context,
            config.field_manager.clone(),
            config.retry.clone(),
        )
        .await?;

        Ok(Self::with_client(Box::new(client), config))
    }

    pub fn with_client(client: Box<dyn MeshKubeClient>, config: MeshConfig) -> Self {
        Self { client, config }
    }

    /// Builds and submits the resources of every component.
    ///
    /// Strict mode also requires an application uid here, since every
    /// submitted resource carries it in its owner reference. The three
    /// resources of a component are submitted concurrently; the first failure
    /// aborts the run.
    pub async fn apply(
        &self,
        manifest: &ApplicationManifest,
    ) -> Result<Vec<ComponentResources>, MeshError> {
        if self.config.validation == ValidationMode::Strict {
            let findings = ComponentValidator::new()?.ownership_findings(&manifest.application);
            if !findings.is_empty() {
                return Err(MeshError::validation(&findings));
            }
        }

        let planned = plan(manifest, &self.config)?;

        for resources in &planned {
            futures::try_join!(
                self.client.apply_service(&resources.service),
                self.client.apply_virtual_service(&resources.virtual_service),
                self.client.apply_destination_rule(&resources.destination_rule),
            )?;

            tracing::info!(
                application = %manifest.application.name,
                namespace = %manifest.application.namespace,
                component = %resources.component,
                "Applied component resources"
            );
        }

        Ok(planned)
    }

    pub async fn service_status(
        &self,
        manifest: &ApplicationManifest,
    ) -> Result<Vec<ServiceStatus>, MeshError> {
        let mut statuses = Vec::with_capacity(manifest.components.len());

        for component in &manifest.components {
            let service = ResourceNaming::new(component, &manifest.application).service_name();
            let status = match self.client.get_service(&service).await {
                Ok(found) => ServiceStatus {
                    component: component.name.clone(),
                    service,
                    cluster_ip: found.spec.and_then(|spec| spec.cluster_ip),
                    found: true,
                },
                Err(MeshError::NotFound { .. }) => ServiceStatus {
                    component: component.name.clone(),
                    service,
                    cluster_ip: None,
                    found: false,
                },
                Err(e) => return Err(e),
            };
            statuses.push(status);
        }

        Ok(statuses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Application, Component};
    use crate::infrastructure::kubernetes::resources::{DestinationRule, VirtualService};
    use k8s_openapi::api::core::v1::{Service, ServiceSpec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingClient {
        applied: Arc<Mutex<Vec<String>>>,
        existing: Vec<String>,
    }

    impl RecordingClient {
        fn record(&self, kind: &str, meta: &ObjectMeta) {
            self.applied.lock().unwrap().push(format!(
                "{}/{}",
                kind,
                meta.name.clone().unwrap_or_default()
            ));
        }
    }

    #[async_trait::async_trait]
    impl MeshKubeClient for RecordingClient {
        async fn apply_service(&self, service: &Service) -> Result<(), MeshError> {
            self.record("Service", &service.metadata);
            Ok(())
        }

        async fn apply_virtual_service(&self, vs: &VirtualService) -> Result<(), MeshError> {
            self.record("VirtualService", &vs.metadata);
            Ok(())
        }

        async fn apply_destination_rule(&self, dr: &DestinationRule) -> Result<(), MeshError> {
            self.record("DestinationRule", &dr.metadata);
            Ok(())
        }

        async fn get_service(&self, name: &str) -> Result<Service, MeshError> {
            if self.existing.iter().any(|s| s == name) {
                Ok(Service {
                    metadata: ObjectMeta {
                        name: Some(name.to_string()),
                        ..Default::default()
                    },
                    spec: Some(ServiceSpec {
                        cluster_ip: Some("10.0.0.12".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
            } else {
                Err(MeshError::not_found("Service", name, "prod"))
            }
        }
    }

    fn manifest(components: Vec<Component>) -> ApplicationManifest {
        ApplicationManifest {
            application: Application::new("shop", "prod").with_uid("uid-1"),
            components,
        }
    }

    #[test]
    fn test_plan_strict_rejects_bad_input() {
        let m = manifest(vec![Component::new("api").with_ingress("", 0)]);
        let err = plan(&m, &MeshConfig::default()).unwrap_err();
        assert!(matches!(err, MeshError::ValidationError(_)));
    }

    #[test]
    fn test_plan_permissive_passes_through() {
        let m = manifest(vec![Component::new("api")
            .with_ingress("", 0)
            .with_load_balance("", "weighted")]);
        let config = MeshConfig {
            validation: ValidationMode::Permissive,
            ..Default::default()
        };

        let planned = plan(&m, &config).unwrap();
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].virtual_service.spec.hosts, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_apply_submits_every_resource() {
        let client = RecordingClient::default();
        let applied = client.applied.clone();
        let descriptor = ExposureDescriptor::with_client(Box::new(client), MeshConfig::default());

        let m = manifest(vec![
            Component::new("api").with_ingress("api.example.com", 8080),
            Component::new("cart").with_ingress("cart.example.com", 9090),
        ]);
        let planned = descriptor.apply(&m).await.unwrap();
        assert_eq!(planned.len(), 2);

        let mut applied = applied.lock().unwrap().clone();
        applied.sort();
        assert_eq!(
            applied,
            vec![
                "DestinationRule/shop-api-destinationrule",
                "DestinationRule/shop-cart-destinationrule",
                "Service/shop-api-service",
                "Service/shop-cart-service",
                "VirtualService/shop-api-vs",
                "VirtualService/shop-cart-vs",
            ]
        );
    }

    #[tokio::test]
    async fn test_apply_validation_failure_submits_nothing() {
        let client = RecordingClient::default();
        let applied = client.applied.clone();
        let descriptor = ExposureDescriptor::with_client(Box::new(client), MeshConfig::default());

        let m = manifest(vec![Component::new("api").with_ingress("api.example.com", 0)]);
        assert!(descriptor.apply(&m).await.is_err());
        assert!(applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_apply_requires_owner_uid_in_strict_mode() {
        let client = RecordingClient::default();
        let applied = client.applied.clone();
        let descriptor = ExposureDescriptor::with_client(Box::new(client), MeshConfig::default());

        let m = ApplicationManifest {
            application: Application::new("shop", "prod"),
            components: vec![Component::new("api").with_ingress("api.example.com", 8080)],
        };

        // Offline rendering does not need a uid.
        assert!(plan(&m, &MeshConfig::default()).is_ok());

        let err = descriptor.apply(&m).await.unwrap_err();
        assert!(matches!(err, MeshError::ValidationError(_)));
        assert!(err.to_string().contains("uid is empty"));
        assert!(applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_apply_carries_owner_uid() {
        let client = RecordingClient::default();
        let descriptor = ExposureDescriptor::with_client(Box::new(client), MeshConfig::default());

        let m = manifest(vec![Component::new("api").with_ingress("api.example.com", 8080)]);
        let planned = descriptor.apply(&m).await.unwrap();

        let owners = [
            &planned[0].service.metadata,
            &planned[0].virtual_service.metadata,
            &planned[0].destination_rule.metadata,
        ];
        for meta in owners {
            assert_eq!(meta.owner_references.as_ref().unwrap()[0].uid, "uid-1");
        }
    }

    #[tokio::test]
    async fn test_service_status() {
        let client = RecordingClient {
            existing: vec!["shop-api-service".to_string()],
            ..Default::default()
        };
        let descriptor = ExposureDescriptor::with_client(Box::new(client), MeshConfig::default());

        let m = manifest(vec![
            Component::new("api").with_ingress("api.example.com", 8080),
            Component::new("cart").with_ingress("cart.example.com", 9090),
        ]);
        let statuses = descriptor.service_status(&m).await.unwrap();

        assert_eq!(statuses.len(), 2);
        assert!(statuses[0].found);
        assert_eq!(statuses[0].cluster_ip.as_deref(), Some("10.0.0.12"));
        assert!(!statuses[1].found);
        assert_eq!(statuses[1].service, "shop-cart-service");
    }
}
