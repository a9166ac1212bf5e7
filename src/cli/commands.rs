// CLI command definitions

use super::mesh::{ApplyCommand, RenderCommand, StatusCommand, ValidateCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mesh-expose",
    version,
    about = "Expose application components through an Istio mesh",
    long_about = "Derives Kubernetes Services, Istio VirtualServices and DestinationRules from application component descriptions"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the resources derived from a manifest
    Render(RenderCommand),

    /// Check a manifest without building anything
    Validate(ValidateCommand),

    /// Build and server-side apply the resources of a manifest
    Apply(ApplyCommand),

    /// Show which component Services exist in the cluster
    Status(StatusCommand),
}
