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

// Core modules
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export commonly used types
pub use domain::config::{MeshConfig, RetrySettings, ValidationMode};
pub use domain::exposure::{plan, ComponentValidator, ExposureDescriptor, ServiceStatus};
pub use domain::model::{
    Application, ApplicationManifest, Component, IngressTraits, LoadBalanceTraits,
};
pub use infrastructure::kubernetes::resources::{
    build_component_resources, owner_reference, ComponentResources, DestinationRule,
    DestinationRuleBuilder, LoadBalancerSelection, ResourceNaming, ServiceBuilder,
    VirtualService, VirtualServiceBuilder,
};
pub use infrastructure::kubernetes::{MeshKubeClient, MeshKubeClientImpl};
pub use shared::{MeshError, Result};
