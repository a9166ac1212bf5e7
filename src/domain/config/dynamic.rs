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

use super::mesh::{MeshConfig, ValidationMode};
use std::collections::HashMap;

/// Applies `-D key=value` overrides. Unparseable values are ignored.
pub fn apply_to_mesh_config(configs: &HashMap<String, String>, mesh_config: &mut MeshConfig) {
    if let Some(mode) = configs.get("mesh.validation") {
        if let Ok(mode) = mode.parse::<ValidationMode>() {
            mesh_config.validation = mode;
        }
    }

    if let Some(manager) = configs.get("mesh.field-manager") {
        if !manager.is_empty() {
            mesh_config.field_manager = manager.clone();
        }
    }

    if let Some(attempts_str) = configs.get("mesh.retry.max-attempts") {
        if let Ok(attempts) = attempts_str.parse::<usize>() {
            mesh_config.retry.max_attempts = attempts;
        }
    }

    if let Some(delay_str) = configs.get("mesh.retry.min-delay-ms") {
        if let Ok(delay) = delay_str.parse::<u64>() {
            mesh_config.retry.min_delay_ms = delay;
        }
    }

    if let Some(delay_str) = configs.get("mesh.retry.max-delay-ms") {
        if let Ok(delay) = delay_str.parse::<u64>() {
            mesh_config.retry.max_delay_ms = delay;
        }
    }
}
