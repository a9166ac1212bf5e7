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

use super::naming::{owner_reference, ResourceNaming};
use crate::domain::model::{Application, Component};
use crate::infrastructure::constants::PROTOCOL_TCP;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::core::v1::ServicePort;
use k8s_openapi::api::core::v1::ServiceSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Builds the cluster-internal Service of a component.
///
/// The server port is published unchanged as both port and target port; it is
/// not range checked here.
pub struct ServiceBuilder {
    naming: ResourceNaming,
    server_port: i32,
    owner: OwnerReference,
}

impl ServiceBuilder {
    pub fn new(component: &Component, app: &Application) -> Self {
        Self {
            naming: ResourceNaming::new(component, app),
            server_port: component.ingress_traits().server_port,
            owner: owner_reference(app),
        }
    }

    pub fn build(&self) -> Service {
        let metadata = ObjectMeta {
            name: Some(self.naming.service_name()),
            namespace: Some(self.naming.namespace().to_string()),
            owner_references: Some(vec![self.owner.clone()]),
            ..Default::default()
        };

        let service = Service {
            metadata,
            spec: Some(ServiceSpec {
                ports: Some(vec![self.create_service_port()]),
                selector: Some(self.naming.selector()),
                ..Default::default()
            }),
            ..Default::default()
        };

        tracing::debug!(
            service = %self.naming.service_name(),
            port = self.server_port,
            "Built service"
        );

        service
    }

    fn create_service_port(&self) -> ServicePort {
        ServicePort {
            name: Some(self.naming.port_name()),
            port: self.server_port,
            target_port: Some(IntOrString::Int(self.server_port)),
            protocol: Some(PROTOCOL_TCP.to_string()),
            ..Default::default()
        }
    }
}
