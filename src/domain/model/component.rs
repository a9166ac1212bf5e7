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

use serde::{Deserialize, Serialize};

/// A deployable unit of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressTraits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balance: Option<LoadBalanceTraits>,
}

/// Mesh-facing exposure of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTraits {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub server_port: i32,
}

/// Load balancing preferences of a component.
///
/// A non-empty `consistent_hash_key` always wins over `strategy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalanceTraits {
    #[serde(default)]
    pub consistent_hash_key: String,
    #[serde(default)]
    pub strategy: String,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingress: None,
            load_balance: None,
        }
    }

    pub fn with_ingress(mut self, host: impl Into<String>, server_port: i32) -> Self {
        self.ingress = Some(IngressTraits {
            host: host.into(),
            server_port,
        });
        self
    }

    pub fn with_load_balance(
        mut self,
        consistent_hash_key: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Self {
        self.load_balance = Some(LoadBalanceTraits {
            consistent_hash_key: consistent_hash_key.into(),
            strategy: strategy.into(),
        });
        self
    }

    /// Ingress traits, or empty ones when the component declares none.
    pub fn ingress_traits(&self) -> IngressTraits {
        self.ingress.clone().unwrap_or_default()
    }

    pub fn load_balance_traits(&self) -> LoadBalanceTraits {
        self.load_balance.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_traits_default_to_empty() {
        let component = Component::new("api");
        assert_eq!(component.ingress_traits(), IngressTraits::default());
        assert_eq!(component.load_balance_traits(), LoadBalanceTraits::default());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let yaml = r#"
name: api
ingress:
  host: api.example.com
  serverPort: 8080
loadBalance:
  strategy: random
"#;
        let component: Component = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(component.name, "api");
        assert_eq!(component.ingress_traits().server_port, 8080);
        assert_eq!(component.load_balance_traits().strategy, "random");
        assert!(component.load_balance_traits().consistent_hash_key.is_empty());
    }
}
