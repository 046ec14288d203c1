//! Canonical category roles and their dataset label bindings
//!
//! The dataset keys categories by free-form label strings, and the labels in
//! the trend map and the distribution list are not guaranteed to line up.
//! The engine therefore never computes from raw strings: each role below is
//! bound to exactly one dataset label, and that binding is the only place a
//! label appears.

use serde::Deserialize;
use std::fmt;

/// The four category roles the engine computes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryRole {
    /// Top-line revenue series; denominator for every revenue share
    Revenue,
    /// Staff wage cost
    StaffCost,
    /// Material purchase cost
    MaterialCost,
    /// Aggregate operating expense; includes staff wages within it
    GeneralExpense,
}

impl CategoryRole {
    /// All roles, in decomposition order
    pub const ALL: [CategoryRole; 4] = [
        CategoryRole::Revenue,
        CategoryRole::StaffCost,
        CategoryRole::MaterialCost,
        CategoryRole::GeneralExpense,
    ];
}

impl fmt::Display for CategoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryRole::Revenue => write!(f, "Revenue"),
            CategoryRole::StaffCost => write!(f, "Staff Cost"),
            CategoryRole::MaterialCost => write!(f, "Material Cost"),
            CategoryRole::GeneralExpense => write!(f, "General Expense"),
        }
    }
}

fn default_revenue_label() -> String {
    "Total Operating Revenue".to_string()
}

fn default_staff_label() -> String {
    "Staff Wages".to_string()
}

fn default_material_label() -> String {
    "Material Cost Total".to_string()
}

fn default_general_label() -> String {
    "Operating Expense Total".to_string()
}

/// Role -> dataset label table.
///
/// Loaded from the reporter's config file; every field has a default so a
/// missing file or an empty `[categories]` section still works.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleLabels {
    #[serde(default = "default_revenue_label")]
    pub revenue: String,
    #[serde(default = "default_staff_label")]
    pub staff_cost: String,
    #[serde(default = "default_material_label")]
    pub material_cost: String,
    #[serde(default = "default_general_label")]
    pub general_expense: String,
}

impl Default for RoleLabels {
    fn default() -> Self {
        Self {
            revenue: default_revenue_label(),
            staff_cost: default_staff_label(),
            material_cost: default_material_label(),
            general_expense: default_general_label(),
        }
    }
}

impl RoleLabels {
    /// The dataset label bound to `role`
    pub fn label(&self, role: CategoryRole) -> &str {
        match role {
            CategoryRole::Revenue => &self.revenue,
            CategoryRole::StaffCost => &self.staff_cost,
            CategoryRole::MaterialCost => &self.material_cost,
            CategoryRole::GeneralExpense => &self.general_expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_role() {
        let labels = RoleLabels::default();
        for role in CategoryRole::ALL {
            assert!(!labels.label(role).is_empty());
        }
    }

    #[test]
    fn test_partial_section_falls_back_per_field() {
        let labels: RoleLabels = serde_json::from_str(r#"{"revenue": "Gross Takings"}"#).unwrap();
        assert_eq!(labels.label(CategoryRole::Revenue), "Gross Takings");
        assert_eq!(labels.label(CategoryRole::StaffCost), "Staff Wages");
    }
}
