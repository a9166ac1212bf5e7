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

use crate::infrastructure::constants::DEFAULT_FIELD_MANAGER;
use crate::shared::error::MeshError;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::time::Duration;

/// Tool configuration, usually read from `mesh.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub validation: ValidationMode,
    pub field_manager: String,
    pub retry: RetrySettings,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            retry: RetrySettings::default(),
        }
    }
}

impl MeshConfig {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self, MeshError> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            MeshError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let conf: Self = toml::from_str(&content)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.field_manager.trim().is_empty() {
            return Err(MeshError::ConfigError(
                "field_manager must not be empty".to_string(),
            ));
        }

        if self.retry.min_delay_ms > self.retry.max_delay_ms {
            return Err(MeshError::ConfigError(format!(
                "retry.min_delay_ms ({}) must not exceed retry.max_delay_ms ({})",
                self.retry.min_delay_ms, self.retry.max_delay_ms
            )));
        }

        Ok(())
    }
}

/// Whether inputs are checked before resources are built.
///
/// `Permissive` passes malformed ports, hosts and strategy names straight
/// into the resources and leaves rejection to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Strict,
    Permissive,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Permissive => "permissive",
        }
    }
}

impl std::str::FromStr for ValidationMode {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(ValidationMode::Strict),
            "permissive" => Ok(ValidationMode::Permissive),
            _ => Err(MeshError::ConfigError(format!(
                "Invalid validation mode: {}",
                s
            ))),
        }
    }
}

/// Backoff for transient API failures while applying resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            min_delay_ms: 200,
            max_delay_ms: 10_000,
        }
    }
}

impl RetrySettings {
    /// Retries after the first attempt; `max_attempts` counts the first one too.
    pub fn retries(&self) -> usize {
        self.max_attempts.saturating_sub(1)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}
