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

//! Naming conventions shared by every derived resource.
//!
//! Services, routes and traffic policies refer to each other only through the
//! strings built from these values, so they must stay in one place.

/// Resource name suffixes
pub const SUFFIX_SERVICE: &str = "service";
pub const SUFFIX_VIRTUAL_SERVICE: &str = "vs";
pub const SUFFIX_DESTINATION_RULE: &str = "destinationrule";
pub const SUFFIX_WORKLOAD: &str = "workload";
pub const SUFFIX_GATEWAY: &str = "gateway";

/// Name separator
pub const NAME_SEPARATOR: &str = "-";

/// Network configuration
pub const SERVICE_DOMAIN: &str = "svc";
pub const POD_CLUSTER_DOMAIN: &str = "cluster.local";

/// Selector label
pub const LABEL_APP: &str = "app";

/// Port naming and protocol
pub const PORT_NAME_PREFIX: &str = "http";
pub const PROTOCOL_TCP: &str = "TCP";

/// Owner (Application) identity
pub const OWNER_API_VERSION: &str = "project.cattle.io/v3";
pub const OWNER_KIND: &str = "Application";

/// Istio networking API
pub const ISTIO_NETWORKING_GROUP: &str = "networking.istio.io";
pub const ISTIO_NETWORKING_VERSION: &str = "v1alpha3";
pub const ISTIO_API_VERSION: &str = "networking.istio.io/v1alpha3";
pub const KIND_VIRTUAL_SERVICE: &str = "VirtualService";
pub const KIND_DESTINATION_RULE: &str = "DestinationRule";
pub const KIND_SERVICE: &str = "Service";

/// Load balancer strategy names accepted on components
pub const STRATEGY_ROUND_ROBIN: &str = "round-robin";
pub const STRATEGY_LEAST_CONNECTION: &str = "least-connection";
pub const STRATEGY_RANDOM: &str = "random";

/// Server-side apply
pub const DEFAULT_FIELD_MANAGER: &str = "mesh-expose";

/// Port range accepted by the platform
pub const MIN_PORT: i32 = 1;
pub const MAX_PORT: i32 = 65535;
