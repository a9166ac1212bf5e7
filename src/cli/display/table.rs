//! Table rendering for CLI output

use super::colors::table_color_to_colored_str;
use super::{ColorTheme, StatusIcon};
use crate::domain::exposure::ServiceStatus;
use crate::infrastructure::kubernetes::resources::{ComponentResources, LoadBalancerSelection};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// One line of the exposure summary
#[derive(Debug, Clone)]
pub struct ResourceRow {
    pub component: String,
    pub service: String,
    pub route: String,
    pub gateways: String,
    pub load_balancer: LoadBalancerSelection,
}

impl ResourceRow {
    pub fn from_resources(resources: &ComponentResources) -> Self {
        let vs = &resources.virtual_service.spec;
        let host = vs.hosts.first().map(String::as_str).unwrap_or("-");
        let destination = vs
            .http
            .first()
            .and_then(|http| http.route.first())
            .map(|route| &route.destination);

        let route = match destination {
            Some(dest) => match &dest.port {
                Some(port) => format!("{} → {}:{}", host, dest.host, port.number),
                None => format!("{} → {}", host, dest.host),
            },
            None => format!("{} → -", host),
        };

        Self {
            component: resources.component.clone(),
            service: resources.service.metadata.name.clone().unwrap_or_default(),
            route,
            gateways: vs.gateways.join(", "),
            load_balancer: LoadBalancerSelection::from_rule(&resources.destination_rule),
        }
    }
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the derived resources of every component
    pub fn render_resources(&self, resources: &[ComponentResources]) -> String {
        if resources.is_empty() {
            return "No components to expose".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("COMPONENT").set_alignment(CellAlignment::Left),
                Cell::new("SERVICE").set_alignment(CellAlignment::Left),
                Cell::new("ROUTE").set_alignment(CellAlignment::Left),
                Cell::new("GATEWAY").set_alignment(CellAlignment::Left),
                Cell::new("LOAD BALANCER").set_alignment(CellAlignment::Center),
            ]);

        for row in resources.iter().map(ResourceRow::from_resources) {
            let lb_icon = StatusIcon::get_selection_icon(&row.load_balancer);
            let lb_color = self.theme.get_selection_color(&row.load_balancer);

            table.add_row(vec![
                Cell::new(&row.component),
                Cell::new(&row.service),
                Cell::new(&row.route),
                Cell::new(&row.gateways).fg(self.theme.info),
                Cell::new(format!("{} {}", lb_icon, row.load_balancer.describe())).fg(lb_color),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Exposed Components {} ─╮\n",
            format!("[{} components]", resources.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Configured  {} Unrecognized strategy  {} Platform default\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::WARNING.yellow(),
            StatusIcon::UNKNOWN.bright_black()
        ));

        output
    }

    /// Render validation findings for an application
    pub fn render_findings(&self, application: &str, findings: &[String]) -> String {
        if findings.is_empty() {
            return format!(
                "{} Application {} is valid",
                StatusIcon::SUCCESS.green(),
                application
            );
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("#").set_alignment(CellAlignment::Right),
                Cell::new("PROBLEM").set_alignment(CellAlignment::Left),
            ]);

        for (i, finding) in findings.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1).set_alignment(CellAlignment::Right),
                Cell::new(format!("{} {}", StatusIcon::ERROR, finding)).fg(self.theme.error),
            ]);
        }

        format!(
            "{} Application {} has {} problem(s)\n{}",
            StatusIcon::ERROR.red(),
            application,
            findings.len(),
            table
        )
    }

    /// Render the observed Service of every component
    pub fn render_service_status(
        &self,
        application: &str,
        namespace: &str,
        statuses: &[ServiceStatus],
    ) -> String {
        let missing = statuses.iter().filter(|s| !s.found).count();
        let (overall, overall_color) = if statuses.is_empty() {
            (format!("{} No components", StatusIcon::UNKNOWN), self.theme.muted)
        } else if missing == 0 {
            (format!("{} Exposed", StatusIcon::SUCCESS), Color::Green)
        } else if missing < statuses.len() {
            (format!("{} Partial", StatusIcon::WARNING), Color::Yellow)
        } else {
            (format!("{} Not exposed", StatusIcon::ERROR), Color::Red)
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("COMPONENT").set_alignment(CellAlignment::Left),
                Cell::new("SERVICE").set_alignment(CellAlignment::Left),
                Cell::new("CLUSTER IP").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
            ]);

        for status in statuses {
            table.add_row(vec![
                Cell::new(&status.component),
                Cell::new(&status.service),
                Cell::new(status.cluster_ip.as_deref().unwrap_or("-")),
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_found_icon(status.found),
                    StatusIcon::get_found_text(status.found)
                ))
                .fg(self.theme.get_found_color(status.found)),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Application: {} | Namespace: {}\n",
            application, namespace
        ));
        output.push_str(&format!(
            "Status: {}\n",
            overall.color(table_color_to_colored_str(overall_color))
        ));
        output.push_str(&table.to_string());
        output
    }
}
