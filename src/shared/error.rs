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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, MeshError>;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    #[error("Kubernetes API temporarily unavailable: {0}")]
    Transient(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Resource not found: {resource_type} '{name}' in namespace '{namespace}'")]
    NotFound {
        resource_type: String,
        name: String,
        namespace: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<kube::Error> for MeshError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ae) if ae.code == 409 || ae.code == 429 || ae.code >= 500 => {
                MeshError::Transient(format!("{} ({})", ae.message, ae.code))
            }
            kube::Error::HyperError(e) => MeshError::Transient(e.to_string()),
            kube::Error::Service(e) => MeshError::Transient(e.to_string()),
            e => MeshError::KubeError(e.to_string()),
        }
    }
}

impl MeshError {
    pub fn not_found(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Joins a list of findings into one validation error.
    pub fn validation(findings: &[String]) -> Self {
        Self::ValidationError(
            findings
                .iter()
                .map(|f| format!("\n  - {}", f))
                .collect::<String>(),
        )
    }

    /// Whether the platform may accept the same request on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, MeshError::Transient(_) | MeshError::Io(_))
    }
}
