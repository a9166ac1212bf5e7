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

use super::{Application, Component};
use crate::shared::error::MeshError;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// One application and the components it owns, as read from a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationManifest {
    pub application: Application,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl ApplicationManifest {
    /// Load a manifest from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            MeshError::ConfigError(format!(
                "Failed to read manifest {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, MeshError> {
        let manifest: Self = serde_yaml::from_str(content)?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"
application:
  name: shop
  namespace: prod
  uid: 9d7c1b2e-0000-4000-8000-000000000001
components:
  - name: api
    ingress:
      host: api.example.com
      serverPort: 8080
  - name: cart
    ingress:
      host: cart.example.com
      serverPort: 9090
    loadBalance:
      consistentHashKey: x-user
"#;

    #[test]
    fn test_from_yaml() {
        let manifest = ApplicationManifest::from_yaml(MANIFEST).unwrap();
        assert_eq!(manifest.application.name, "shop");
        assert_eq!(manifest.application.namespace, "prod");
        assert_eq!(manifest.components.len(), 2);
        assert_eq!(
            manifest.components[1]
                .load_balance_traits()
                .consistent_hash_key,
            "x-user"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let manifest = ApplicationManifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.components[0].name, "api");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ApplicationManifest::from_file("/nonexistent/manifest.yaml").unwrap_err();
        assert!(matches!(err, MeshError::ConfigError(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = ApplicationManifest::from_yaml("application: [").unwrap_err();
        assert!(matches!(err, MeshError::YamlParse(_)));
    }
}
