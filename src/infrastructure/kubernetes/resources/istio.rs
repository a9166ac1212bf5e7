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

//! Istio networking resource types (`networking.istio.io/v1alpha3`).
//!
//! Only the fields the builders emit are modelled. Metadata reuses the
//! Kubernetes `ObjectMeta` so owner references serialize the usual way.

use crate::infrastructure::constants::{
    STRATEGY_LEAST_CONNECTION, STRATEGY_RANDOM, STRATEGY_ROUND_ROBIN,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

// =============================================================================
// VirtualService
// =============================================================================

/// Istio VirtualService routing external traffic to an in-mesh destination
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualService {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: VirtualServiceSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceSpec {
    /// Hosts matched by this route
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Gateways the route is attached to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gateways: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http: Vec<HttpRoute>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HttpRoute {
    #[serde(default)]
    pub route: Vec<HttpRouteDestination>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HttpRouteDestination {
    pub destination: Destination,
}

/// Target of routed traffic
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    /// Fully-qualified service address
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortSelector>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PortSelector {
    pub number: i32,
}

// =============================================================================
// DestinationRule
// =============================================================================

/// Istio DestinationRule carrying the traffic policy of a service
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRule {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: DestinationRuleSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRuleSpec {
    /// Fully-qualified service address the policy applies to
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_policy: Option<TrafficPolicy>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrafficPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<LoadBalancerSettings>,
}

/// Load balancer settings.
///
/// Istio treats `simple` and `consistentHash` as a oneof; the builders never
/// set both.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple: Option<SimpleLb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistent_hash: Option<ConsistentHashLb>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimpleLb {
    RoundRobin,
    LeastConn,
    Random,
}

impl SimpleLb {
    /// Maps a component strategy name; unknown names map to `None`.
    pub fn from_strategy(strategy: &str) -> Option<Self> {
        match strategy {
            STRATEGY_ROUND_ROBIN => Some(SimpleLb::RoundRobin),
            STRATEGY_LEAST_CONNECTION => Some(SimpleLb::LeastConn),
            STRATEGY_RANDOM => Some(SimpleLb::Random),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimpleLb::RoundRobin => "ROUND_ROBIN",
            SimpleLb::LeastConn => "LEAST_CONN",
            SimpleLb::Random => "RANDOM",
        }
    }
}

/// Consistent hashing keyed on the client source address
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsistentHashLb {
    pub use_source_ip: bool,
}

impl ConsistentHashLb {
    pub fn source_ip() -> Self {
        Self {
            use_source_ip: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_lb_from_strategy() {
        assert_eq!(SimpleLb::from_strategy("round-robin"), Some(SimpleLb::RoundRobin));
        assert_eq!(
            SimpleLb::from_strategy("least-connection"),
            Some(SimpleLb::LeastConn)
        );
        assert_eq!(SimpleLb::from_strategy("random"), Some(SimpleLb::Random));
        assert_eq!(SimpleLb::from_strategy("rr"), None);
        assert_eq!(SimpleLb::from_strategy(""), None);
    }

    #[test]
    fn test_load_balancer_wire_format() {
        let simple = LoadBalancerSettings {
            simple: Some(SimpleLb::LeastConn),
            consistent_hash: None,
        };
        assert_eq!(
            serde_json::to_value(&simple).unwrap(),
            json!({ "simple": "LEAST_CONN" })
        );

        let hashed = LoadBalancerSettings {
            simple: None,
            consistent_hash: Some(ConsistentHashLb::source_ip()),
        };
        assert_eq!(
            serde_json::to_value(&hashed).unwrap(),
            json!({ "consistentHash": { "useSourceIp": true } })
        );
    }

    #[test]
    fn test_empty_traffic_policy_serializes_empty() {
        let policy = TrafficPolicy::default();
        assert_eq!(serde_json::to_value(&policy).unwrap(), json!({}));
    }
}
