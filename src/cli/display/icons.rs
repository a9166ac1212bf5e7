//! Status icons for CLI output

use crate::infrastructure::kubernetes::resources::LoadBalancerSelection;

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (valid, present)
    pub const SUCCESS: &'static str = "✓";

    /// Warning icon (accepted but suspicious)
    pub const WARNING: &'static str = "⚠";

    /// Error icon (invalid, missing)
    pub const ERROR: &'static str = "✗";

    /// Unknown icon
    pub const UNKNOWN: &'static str = "?";

    /// Get status icon based on whether a resource exists
    pub fn get_found_icon(found: bool) -> &'static str {
        if found {
            Self::SUCCESS
        } else {
            Self::ERROR
        }
    }

    /// Get status text based on whether a resource exists
    pub fn get_found_text(found: bool) -> &'static str {
        if found {
            "Present"
        } else {
            "Missing"
        }
    }

    /// An unrecognized strategy is flagged; everything else is fine.
    pub fn get_selection_icon(selection: &LoadBalancerSelection) -> &'static str {
        match selection {
            LoadBalancerSelection::Simple(None) => Self::WARNING,
            LoadBalancerSelection::Default => Self::UNKNOWN,
            _ => Self::SUCCESS,
        }
    }
}
