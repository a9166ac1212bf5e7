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
    ConsistentHashLb, DestinationRule, DestinationRuleSpec, LoadBalancerSettings, SimpleLb,
    TrafficPolicy,
};
use super::naming::{owner_reference, ResourceNaming};
use crate::domain::model::{Application, Component, LoadBalanceTraits};
use crate::infrastructure::constants::{ISTIO_API_VERSION, KIND_DESTINATION_RULE};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

/// Load balancing selected for a component, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadBalancerSelection {
    /// Hash on the client source address. The key literal is not inspected.
    ConsistentHash,
    /// A named strategy; `None` when the name is not recognized.
    Simple(Option<SimpleLb>),
    /// Platform default
    Default,
}

impl LoadBalancerSelection {
    pub fn from_traits(traits: &LoadBalanceTraits) -> Self {
        if !traits.consistent_hash_key.is_empty() {
            LoadBalancerSelection::ConsistentHash
        } else if !traits.strategy.is_empty() {
            LoadBalancerSelection::Simple(SimpleLb::from_strategy(&traits.strategy))
        } else {
            LoadBalancerSelection::Default
        }
    }

    pub fn settings(&self) -> Option<LoadBalancerSettings> {
        match self {
            LoadBalancerSelection::ConsistentHash => Some(LoadBalancerSettings {
                simple: None,
                consistent_hash: Some(ConsistentHashLb::source_ip()),
            }),
            LoadBalancerSelection::Simple(simple) => Some(LoadBalancerSettings {
                simple: *simple,
                consistent_hash: None,
            }),
            LoadBalancerSelection::Default => None,
        }
    }

    /// Recovers the selection from a built rule.
    pub fn from_rule(rule: &DestinationRule) -> Self {
        let settings = rule
            .spec
            .traffic_policy
            .as_ref()
            .and_then(|policy| policy.load_balancer.as_ref());

        match settings {
            None => LoadBalancerSelection::Default,
            Some(lb) if lb.consistent_hash.is_some() => LoadBalancerSelection::ConsistentHash,
            Some(lb) => LoadBalancerSelection::Simple(lb.simple),
        }
    }

    /// Short label for summaries
    pub fn describe(&self) -> String {
        match self {
            LoadBalancerSelection::ConsistentHash => "CONSISTENT_HASH(source-ip)".to_string(),
            LoadBalancerSelection::Simple(Some(simple)) => simple.as_str().to_string(),
            LoadBalancerSelection::Simple(None) => "UNSET".to_string(),
            LoadBalancerSelection::Default => "default".to_string(),
        }
    }
}

/// Builds the DestinationRule carrying a component's load-balancing policy.
pub struct DestinationRuleBuilder {
    naming: ResourceNaming,
    selection: LoadBalancerSelection,
    owner: OwnerReference,
}

impl DestinationRuleBuilder {
    pub fn new(component: &Component, app: &Application) -> Self {
        Self {
            naming: ResourceNaming::new(component, app),
            selection: LoadBalancerSelection::from_traits(&component.load_balance_traits()),
            owner: owner_reference(app),
        }
    }

    pub fn selection(&self) -> &LoadBalancerSelection {
        &self.selection
    }

    pub fn build(&self) -> DestinationRule {
        let metadata = ObjectMeta {
            name: Some(self.naming.destination_rule_name()),
            namespace: Some(self.naming.namespace().to_string()),
            owner_references: Some(vec![self.owner.clone()]),
            ..Default::default()
        };

        tracing::debug!(
            destination_rule = %self.naming.destination_rule_name(),
            load_balancer = %self.selection.describe(),
            "Built destination rule"
        );

        DestinationRule {
            api_version: ISTIO_API_VERSION.to_string(),
            kind: KIND_DESTINATION_RULE.to_string(),
            metadata,
            spec: DestinationRuleSpec {
                host: self.naming.service_address(),
                traffic_policy: Some(TrafficPolicy {
                    load_balancer: self.selection.settings(),
                }),
            },
        }
    }
}
