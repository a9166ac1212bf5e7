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

use crate::cli::display::TableRenderer;
use crate::domain::config::{apply_to_mesh_config, MeshConfig};
use crate::domain::exposure::{plan, ComponentValidator, ExposureDescriptor};
use crate::domain::model::ApplicationManifest;
use crate::infrastructure::kubernetes::resources::{to_yaml_stream, ComponentResources};
use clap::{Args, Parser, ValueEnum};
use std::collections::HashMap;

const CONF_FILE_ENV: &str = "MESH_EXPOSE_CONF_FILE";

#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Path to the application manifest (YAML)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    /// Path to the mesh-expose configuration file (TOML)
    /// If not provided, MESH_EXPOSE_CONF_FILE is used when set, otherwise defaults apply
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Dynamic configuration properties (-D key=value)
    ///
    /// Keys: mesh.validation (strict|permissive), mesh.field-manager,
    /// mesh.retry.max-attempts, mesh.retry.min-delay-ms, mesh.retry.max-delay-ms
    ///
    /// Example: -Dmesh.validation=permissive -Dmesh.retry.max-attempts=3
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl ManifestArgs {
    fn load(&self) -> anyhow::Result<(ApplicationManifest, MeshConfig)> {
        let config_path = self
            .config
            .clone()
            .or_else(|| std::env::var(CONF_FILE_ENV).ok());

        let mut config = match config_path {
            Some(path) => {
                let conf = MeshConfig::from(&path).map_err(|e| {
                    anyhow::anyhow!("Failed to load configuration from {}: {}", path, e)
                })?;
                tracing::debug!(path = %path, "Loaded configuration");
                conf
            }
            None => MeshConfig::default(),
        };

        if !self.properties.is_empty() {
            let configs = parse_dynamic_configs(&self.properties)
                .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
            apply_to_mesh_config(&configs, &mut config);
            config.validate()?;
        }

        let manifest = ApplicationManifest::from_file(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to load manifest {}: {}", self.file, e))?;

        Ok((manifest, config))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Yaml,
    Json,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "yaml")]
    pub output: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ApplyCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Build and print the resources without submitting them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    #[arg(long)]
    pub kubeconfig: Option<String>,

    #[arg(long)]
    pub context: Option<String>,
}

impl RenderCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let (manifest, config) = self.manifest.load()?;
        let planned = plan(&manifest, &config)?;

        let output = render_output(&planned, self.output)?;
        println!("{}", output);
        Ok(())
    }
}

impl ValidateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let (manifest, _) = self.manifest.load()?;
        let validator = ComponentValidator::new()?;
        let findings = validator.findings(&manifest);

        let renderer = TableRenderer::new();
        println!(
            "{}",
            renderer.render_findings(&manifest.application.name, &findings)
        );

        if !findings.is_empty() {
            anyhow::bail!("{} problem(s) found in {}", findings.len(), self.manifest.file);
        }
        Ok(())
    }
}

impl ApplyCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let (manifest, config) = self.manifest.load()?;
        let renderer = TableRenderer::new();

        if self.dry_run {
            let planned = plan(&manifest, &config)?;
            println!("{}", renderer.render_resources(&planned));
            println!("Dry run: nothing was submitted.");
            return Ok(());
        }

        let descriptor = ExposureDescriptor::new_with_config(
            manifest.application.namespace.clone(),
            self.kubeconfig.clone(),
            self.context.clone(),
            config,
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create exposure descriptor: {}", e))?;

        let applied = descriptor
            .apply(&manifest)
            .await
            .map_err(|e| anyhow::anyhow!("Apply failed: {}", e))?;

        println!("{}", renderer.render_resources(&applied));
        println!(
            "Application {} applied successfully ({} component(s))",
            manifest.application.name,
            applied.len()
        );
        Ok(())
    }
}

impl StatusCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let (manifest, config) = self.manifest.load()?;

        let descriptor = ExposureDescriptor::new_with_config(
            manifest.application.namespace.clone(),
            self.kubeconfig.clone(),
            self.context.clone(),
            config,
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create exposure descriptor: {}", e))?;

        let statuses = descriptor
            .service_status(&manifest)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get service status: {}", e))?;

        let renderer = TableRenderer::new();
        println!(
            "{}",
            renderer.render_service_status(
                &manifest.application.name,
                &manifest.application.namespace,
                &statuses
            )
        );
        Ok(())
    }
}

fn render_output(planned: &[ComponentResources], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(TableRenderer::new().render_resources(planned)),
        OutputFormat::Yaml | OutputFormat::Json => {
            let mut documents = Vec::with_capacity(planned.len() * 3);
            for resources in planned {
                documents.extend(resources.to_documents()?);
            }

            if format == OutputFormat::Yaml {
                Ok(to_yaml_stream(&documents)?)
            } else {
                Ok(serde_json::to_string_pretty(&documents)?)
            }
        }
    }
}

/// Parse dynamic configuration properties from -D key=value format
fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>, String> {
    let mut map = HashMap::new();

    for config in configs {
        let parts: Vec<&str> = config.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            ));
        }

        let key = parts[0].trim();
        let value = parts[1].trim();

        if key.is_empty() {
            return Err(format!("Empty key in config: '{}'", config));
        }

        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}
