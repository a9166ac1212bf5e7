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

//! Canonical names and owner linkage for derived resources.
//!
//! Every builder derives names, selector labels and the internal service
//! address through [`ResourceNaming`]. The service, route and traffic policy
//! only bind to each other when these strings agree.

use crate::domain::model::{Application, Component};
use crate::infrastructure::constants::*;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use std::collections::BTreeMap;

/// Kinds of resources derived for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    VirtualService,
    DestinationRule,
}

impl ResourceKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            ResourceKind::Service => SUFFIX_SERVICE,
            ResourceKind::VirtualService => SUFFIX_VIRTUAL_SERVICE,
            ResourceKind::DestinationRule => SUFFIX_DESTINATION_RULE,
        }
    }
}

/// Names derived from an `(application, component)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNaming {
    app: String,
    component: String,
    namespace: String,
}

impl ResourceNaming {
    pub fn new(component: &Component, app: &Application) -> Self {
        Self::from_parts(&app.name, &component.name, &app.namespace)
    }

    pub fn from_parts(app: &str, component: &str, namespace: &str) -> Self {
        Self {
            app: app.to_string(),
            component: component.to_string(),
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `{app}-{component}-{suffix}`
    pub fn resource_name(&self, kind: ResourceKind) -> String {
        self.prefixed(kind.suffix())
    }

    pub fn service_name(&self) -> String {
        self.resource_name(ResourceKind::Service)
    }

    pub fn virtual_service_name(&self) -> String {
        self.resource_name(ResourceKind::VirtualService)
    }

    pub fn destination_rule_name(&self) -> String {
        self.resource_name(ResourceKind::DestinationRule)
    }

    /// Label value carried by the workload backing this component.
    pub fn workload_label(&self) -> String {
        self.prefixed(SUFFIX_WORKLOAD)
    }

    pub fn selector(&self) -> BTreeMap<String, String> {
        let mut selector = BTreeMap::new();
        selector.insert(LABEL_APP.to_string(), self.workload_label());
        selector
    }

    /// Fully-qualified in-cluster address of the component's service.
    pub fn service_address(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.service_name(),
            self.namespace,
            SERVICE_DOMAIN,
            POD_CLUSTER_DOMAIN
        )
    }

    /// Mesh gateway shared by every route in the namespace.
    pub fn gateway_name(&self) -> String {
        format!("{}{}{}", self.namespace, NAME_SEPARATOR, SUFFIX_GATEWAY)
    }

    pub fn port_name(&self) -> String {
        format!("{}{}{}", PORT_NAME_PREFIX, NAME_SEPARATOR, self.component)
    }

    fn prefixed(&self, suffix: &str) -> String {
        [self.app.as_str(), self.component.as_str(), suffix].join(NAME_SEPARATOR)
    }
}

/// Owner reference pointing at the application, so that deleting it cascades
/// to every derived resource.
pub fn owner_reference(app: &Application) -> OwnerReference {
    OwnerReference {
        api_version: OWNER_API_VERSION.to_string(),
        kind: OWNER_KIND.to_string(),
        name: app.name.clone(),
        uid: app.uid.clone(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}
