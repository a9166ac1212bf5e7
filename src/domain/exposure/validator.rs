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

use crate::domain::model::{Application, ApplicationManifest, Component};
use crate::infrastructure::constants::{MAX_PORT, MIN_PORT};
use crate::infrastructure::kubernetes::resources::{ResourceNaming, SimpleLb};
use crate::shared::error::MeshError;
use regex::Regex;
use std::collections::HashSet;

const MAX_LABEL_LEN: usize = 63;
const MAX_HOST_LEN: usize = 253;

/// Checks manifests before resources are built.
///
/// The builders accept anything; this is the layer that rejects inputs the
/// platform would refuse later. All findings are collected and reported
/// together.
pub struct ComponentValidator {
    label: Regex,
    host: Regex,
}

impl ComponentValidator {
    pub fn new() -> Result<Self, MeshError> {
        let label = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$")
            .map_err(|e| MeshError::ConfigError(e.to_string()))?;
        let host = Regex::new(
            r"^(\*\.)?[a-zA-Z0-9]([-a-zA-Z0-9]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([-a-zA-Z0-9]*[a-zA-Z0-9])?)*$",
        )
        .map_err(|e| MeshError::ConfigError(e.to_string()))?;

        Ok(Self { label, host })
    }

    pub fn validate_manifest(&self, manifest: &ApplicationManifest) -> Result<(), MeshError> {
        let findings = self.findings(manifest);
        if findings.is_empty() {
            Ok(())
        } else {
            Err(MeshError::validation(&findings))
        }
    }

    pub fn findings(&self, manifest: &ApplicationManifest) -> Vec<String> {
        let mut findings = self.application_findings(&manifest.application);

        let mut seen = HashSet::new();
        for component in &manifest.components {
            if !seen.insert(component.name.as_str()) {
                findings.push(format!(
                    "component '{}' is declared more than once",
                    component.name
                ));
            }
            findings.extend(self.component_findings(component, &manifest.application));
        }

        findings
    }

    pub fn application_findings(&self, app: &Application) -> Vec<String> {
        let mut findings = Vec::new();
        self.check_label("application name", &app.name, &mut findings);
        self.check_label("application namespace", &app.namespace, &mut findings);
        findings
    }

    /// Owner references with an empty uid are refused by the API server, so
    /// this only matters for resources that are actually submitted.
    pub fn ownership_findings(&self, app: &Application) -> Vec<String> {
        if app.uid.trim().is_empty() {
            vec![format!("application '{}': uid is empty", app.name)]
        } else {
            Vec::new()
        }
    }

    pub fn component_findings(&self, component: &Component, app: &Application) -> Vec<String> {
        let mut findings = Vec::new();
        let context = format!("component '{}'", component.name);

        self.check_label("component name", &component.name, &mut findings);

        let service_name = ResourceNaming::new(component, app).service_name();
        if service_name.len() > MAX_LABEL_LEN {
            findings.push(format!(
                "{}: derived service name '{}' exceeds {} characters",
                context, service_name, MAX_LABEL_LEN
            ));
        }
        if !service_name
            .chars()
            .next()
            .map(|c| c.is_ascii_lowercase())
            .unwrap_or(false)
        {
            findings.push(format!(
                "{}: derived service name '{}' must start with a lowercase letter",
                context, service_name
            ));
        }

        match &component.ingress {
            None => findings.push(format!("{}: ingress traits are required", context)),
            Some(ingress) => {
                if ingress.host.is_empty() {
                    findings.push(format!("{}: ingress host is empty", context));
                } else if ingress.host.len() > MAX_HOST_LEN || !self.host.is_match(&ingress.host)
                {
                    findings.push(format!(
                        "{}: ingress host '{}' is not a valid DNS name",
                        context, ingress.host
                    ));
                }

                if !(MIN_PORT..=MAX_PORT).contains(&ingress.server_port) {
                    findings.push(format!(
                        "{}: server port {} is outside {}-{}",
                        context, ingress.server_port, MIN_PORT, MAX_PORT
                    ));
                }
            }
        }

        let lb = component.load_balance_traits();
        if lb.consistent_hash_key.is_empty()
            && !lb.strategy.is_empty()
            && SimpleLb::from_strategy(&lb.strategy).is_none()
        {
            findings.push(format!(
                "{}: unknown load balance strategy '{}' (expected round-robin, least-connection or random)",
                context, lb.strategy
            ));
        }

        findings
    }

    fn check_label(&self, what: &str, value: &str, findings: &mut Vec<String>) {
        if value.is_empty() {
            findings.push(format!("{} is empty", what));
        } else if value.len() > MAX_LABEL_LEN || !self.label.is_match(value) {
            findings.push(format!(
                "{} '{}' is not a valid RFC 1123 label",
                what, value
            ));
        }
    }
}
