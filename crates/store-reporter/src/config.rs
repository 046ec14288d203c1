//! Configuration for the store reporter

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use store_metrics::RoleLabels;

/// Configuration loaded from config.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Category role -> dataset label bindings
    #[serde(default)]
    pub categories: RoleLabels,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| {
            "Failed to parse config.toml. Check for:\n\
             - Misspelled keys under [categories] (revenue, staff_cost, material_cost, general_expense)\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\n\
             See config.toml.example for the expected format."
        })
    }

    /// Load from `path` when it exists, otherwise use the built-in labels
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_metrics::CategoryRole;

    #[test]
    fn test_partial_categories_section() {
        let config: FileConfig = toml::from_str(
            "[categories]\n\
             revenue = \"Gross Takings\"\n",
        )
        .unwrap();

        assert_eq!(config.categories.label(CategoryRole::Revenue), "Gross Takings");
        assert_eq!(config.categories.label(CategoryRole::StaffCost), "Staff Wages");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(
            config.categories.label(CategoryRole::GeneralExpense),
            "Operating Expense Total"
        );
    }
}
