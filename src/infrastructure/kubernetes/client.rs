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

use crate::domain::config::RetrySettings;
use crate::infrastructure::constants::{
    ISTIO_NETWORKING_GROUP, ISTIO_NETWORKING_VERSION, KIND_DESTINATION_RULE, KIND_SERVICE,
    KIND_VIRTUAL_SERVICE,
};
use crate::infrastructure::kubernetes::resources::{DestinationRule, VirtualService};
use crate::shared::error::MeshError;
use backon::{ExponentialBuilder, Retryable};
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{DynamicObject, GroupVersionKind, Patch, PatchParams, PostParams};
use kube::discovery::ApiResource;
use kube::{Api, Client};
use serde::Serialize;

#[async_trait::async_trait]
pub trait MeshKubeClient: Send + Sync {
    async fn apply_service(&self, service: &Service) -> Result<(), MeshError>;

    async fn apply_virtual_service(&self, virtual_service: &VirtualService)
        -> Result<(), MeshError>;

    async fn apply_destination_rule(
        &self,
        destination_rule: &DestinationRule,
    ) -> Result<(), MeshError>;

    async fn get_service(&self, name: &str) -> Result<Service, MeshError>;
}

pub struct MeshKubeClientImpl {
    client: Client,
    namespace: String,
    field_manager: String,
    retry: RetrySettings,
}

impl MeshKubeClientImpl {
    pub async fn new_with_config(
        namespace: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
        field_manager: String,
        retry: RetrySettings,
    ) -> Result<Self, MeshError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| MeshError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| MeshError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                MeshError::KubeError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            MeshError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self {
            client,
            namespace,
            field_manager,
            retry,
        })
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.retry.min_delay())
            .with_max_delay(self.retry.max_delay())
            .with_max_times(self.retry.retries())
            .with_jitter()
    }

    async fn apply_service_once(&self, service: &Service) -> Result<(), MeshError> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), &self.namespace);
        let name = service
            .metadata
            .name
            .as_ref()
            .ok_or_else(|| MeshError::ConfigError("Service name is required".to_string()))?;

        match api.get(name).await {
            Ok(existing) => {
                let mut service_to_patch = service.clone();
                if let (Some(existing_spec), Some(ref mut new_spec)) =
                    (&existing.spec, &mut service_to_patch.spec)
                {
                    new_spec.cluster_ip = existing_spec.cluster_ip.clone();
                    new_spec.cluster_ips = existing_spec.cluster_ips.clone();
                }

                let mut patch = serde_json::to_value(&service_to_patch).map_err(|e| {
                    MeshError::KubeError(format!("Failed to serialize Service: {}", e))
                })?;
                if let Some(object) = patch.as_object_mut() {
                    object.insert("apiVersion".to_string(), "v1".into());
                    object.insert("kind".to_string(), KIND_SERVICE.into());
                }

                let patch_params = PatchParams::apply(&self.field_manager).force();
                api.patch(name, &patch_params, &Patch::Apply(patch)).await?;
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                let pp = PostParams::default();
                api.create(&pp, service).await?;
            }
            Err(e) => return Err(MeshError::from(e)),
        }
        Ok(())
    }

    /// Server-side apply of an Istio object through the dynamic API.
    async fn apply_istio_once<T: Serialize>(
        &self,
        kind: &str,
        metadata: &ObjectMeta,
        object: &T,
    ) -> Result<(), MeshError> {
        let name = metadata
            .name
            .as_ref()
            .ok_or_else(|| MeshError::ConfigError(format!("{} name is required", kind)))?;

        let gvk = GroupVersionKind::gvk(ISTIO_NETWORKING_GROUP, ISTIO_NETWORKING_VERSION, kind);
        let api_resource = ApiResource::from_gvk(&gvk);
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), &self.namespace, &api_resource);

        let patch = serde_json::to_value(object)
            .map_err(|e| MeshError::KubeError(format!("Failed to serialize {}: {}", kind, e)))?;
        let patch_params = PatchParams::apply(&self.field_manager).force();

        api.patch(name, &patch_params, &Patch::Apply(&patch))
            .await
            .map_err(|e| {
                lookup_error(
                    e,
                    &format!("{} (is Istio installed?)", kind),
                    name,
                    &self.namespace,
                )
            })?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MeshKubeClient for MeshKubeClientImpl {
    async fn apply_service(&self, service: &Service) -> Result<(), MeshError> {
        (|| self.apply_service_once(service))
            .retry(&self.backoff())
            .when(MeshError::is_transient)
            .notify(|err: &MeshError, dur| {
                tracing::warn!(error = %err, delay = ?dur, "Retrying Service apply");
            })
            .await
    }

    async fn apply_virtual_service(
        &self,
        virtual_service: &VirtualService,
    ) -> Result<(), MeshError> {
        (|| {
            self.apply_istio_once(
                KIND_VIRTUAL_SERVICE,
                &virtual_service.metadata,
                virtual_service,
            )
        })
        .retry(&self.backoff())
        .when(MeshError::is_transient)
        .notify(|err: &MeshError, dur| {
            tracing::warn!(error = %err, delay = ?dur, "Retrying VirtualService apply");
        })
        .await
    }

    async fn apply_destination_rule(
        &self,
        destination_rule: &DestinationRule,
    ) -> Result<(), MeshError> {
        (|| {
            self.apply_istio_once(
                KIND_DESTINATION_RULE,
                &destination_rule.metadata,
                destination_rule,
            )
        })
        .retry(&self.backoff())
        .when(MeshError::is_transient)
        .notify(|err: &MeshError, dur| {
            tracing::warn!(error = %err, delay = ?dur, "Retrying DestinationRule apply");
        })
        .await
    }

    async fn get_service(&self, name: &str) -> Result<Service, MeshError> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), &self.namespace);
        api.get(name)
            .await
            .map_err(|e| lookup_error(e, KIND_SERVICE, name, &self.namespace))
    }
}

/// A 404 becomes `NotFound`; everything else keeps the transient classification.
fn lookup_error(err: kube::Error, kind: &str, name: &str, namespace: &str) -> MeshError {
    match err {
        kube::Error::Api(ae) if ae.code == 404 => MeshError::not_found(kind, name, namespace),
        e => MeshError::from(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(kube::error::ErrorResponse {
            status: "Failure".to_string(),
            message: format!("status {}", code),
            reason: String::new(),
            code,
        })
    }

    #[test]
    fn test_lookup_error_not_found() {
        let err = lookup_error(api_error(404), KIND_SERVICE, "shop-api-service", "prod");
        assert!(matches!(err, MeshError::NotFound { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_lookup_error_keeps_transient_classification() {
        let lookup = |code| lookup_error(api_error(code), KIND_SERVICE, "shop-api-service", "prod");
        assert!(lookup(503).is_transient());
        assert!(lookup(429).is_transient());
        assert!(!lookup(403).is_transient());
    }
}
