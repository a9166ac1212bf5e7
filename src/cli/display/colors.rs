//! Color theme for CLI output

use crate::infrastructure::kubernetes::resources::LoadBalancerSelection;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color for a load balancer selection
    pub fn get_selection_color(&self, selection: &LoadBalancerSelection) -> TableColor {
        match selection {
            LoadBalancerSelection::ConsistentHash => self.info,
            LoadBalancerSelection::Simple(Some(_)) => self.success,
            LoadBalancerSelection::Simple(None) => self.warning,
            LoadBalancerSelection::Default => self.muted,
        }
    }

    /// Get color based on whether a resource exists in the cluster
    pub fn get_found_color(&self, found: bool) -> TableColor {
        if found {
            self.success
        } else {
            self.error
        }
    }
}

/// Convert comfy_table::Color to colored::Color string representation
pub fn table_color_to_colored_str(color: TableColor) -> &'static str {
    match color {
        TableColor::Green => "green",
        TableColor::Yellow => "yellow",
        TableColor::Red => "red",
        TableColor::Cyan => "cyan",
        TableColor::DarkGrey => "bright black",
        _ => "white",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kubernetes::resources::SimpleLb;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.warning, TableColor::Yellow);
        assert_eq!(theme.error, TableColor::Red);
    }

    #[test]
    fn test_get_selection_color() {
        let theme = ColorTheme::default();
        assert_eq!(
            theme.get_selection_color(&LoadBalancerSelection::ConsistentHash),
            TableColor::Cyan
        );
        assert_eq!(
            theme.get_selection_color(&LoadBalancerSelection::Simple(Some(SimpleLb::Random))),
            TableColor::Green
        );
        assert_eq!(
            theme.get_selection_color(&LoadBalancerSelection::Simple(None)),
            TableColor::Yellow
        );
        assert_eq!(
            theme.get_selection_color(&LoadBalancerSelection::Default),
            TableColor::DarkGrey
        );
    }

    #[test]
    fn test_get_found_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_found_color(true), TableColor::Green);
        assert_eq!(theme.get_found_color(false), TableColor::Red);
    }
}
