//! Read-only category store over one dataset
//!
//! Every lookup has a defined default: a missing category is an all-zero
//! series, a short series is zero-padded to the period count, and an absent
//! distribution entry totals 0. Missing data is normal here (seasonal
//! categories are legitimately empty for parts of the year), so none of
//! these lookups can fail.

use crate::dataset::Dataset;
use crate::roles::{CategoryRole, RoleLabels};

/// Read-only view over a dataset for one computation pass
#[derive(Debug, Clone, Copy)]
pub struct CategoryStore<'a> {
    dataset: &'a Dataset,
    labels: &'a RoleLabels,
}

impl<'a> CategoryStore<'a> {
    pub fn new(dataset: &'a Dataset, labels: &'a RoleLabels) -> Self {
        Self { dataset, labels }
    }

    /// Number of periods in the dataset
    pub fn period_count(&self) -> usize {
        self.dataset.months.len()
    }

    /// Period labels in chronological order
    pub fn months(&self) -> &[String] {
        &self.dataset.months
    }

    /// Trend series for a raw category label, zero-filled to the period count
    pub fn series_for_label(&self, label: &str) -> Vec<f64> {
        let raw = self.dataset.category_trend.get(label);

        (0..self.period_count())
            .map(|i| raw.and_then(|s| s.get(i)).copied().unwrap_or(0.0))
            .collect()
    }

    /// Distribution total for a raw category label, 0 if absent
    pub fn total_for_label(&self, label: &str) -> f64 {
        self.dataset
            .category_distribution
            .iter()
            .find(|entry| entry.category == label)
            .map(|entry| entry.total)
            .unwrap_or(0.0)
    }

    fn has_distribution_entry(&self, label: &str) -> bool {
        self.dataset
            .category_distribution
            .iter()
            .any(|entry| entry.category == label)
    }

    /// Trend series for a role, zero-filled to the period count
    pub fn series(&self, role: CategoryRole) -> Vec<f64> {
        self.series_for_label(self.labels.label(role))
    }

    /// Single series value for a role, 0 when the category or index is missing
    pub fn value_at(&self, role: CategoryRole, index: usize) -> f64 {
        self.dataset
            .category_trend
            .get(self.labels.label(role))
            .and_then(|s| s.get(index))
            .copied()
            .unwrap_or(0.0)
    }

    /// Full-period distribution total for a role, 0 if absent
    pub fn total(&self, role: CategoryRole) -> f64 {
        self.total_for_label(self.labels.label(role))
    }

    /// Distribution total where an entry exists, otherwise the summed series.
    ///
    /// The distribution and the trend map do not always carry the same
    /// categories; summary totals prefer the externally supplied aggregate
    /// and fall back to summing the monthly values.
    pub fn total_or_series_sum(&self, role: CategoryRole) -> f64 {
        let label = self.labels.label(role);

        if self.has_distribution_entry(label) {
            self.total_for_label(label)
        } else {
            self.series_for_label(label).iter().sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CategoryTotal;
    use std::collections::HashMap;

    fn dataset() -> Dataset {
        let mut trend = HashMap::new();
        trend.insert("Staff Wages".to_string(), vec![300.0, 300.0]);
        trend.insert("Short Series".to_string(), vec![7.0]);

        Dataset {
            months: vec!["2024-01".to_string(), "2024-02".to_string()],
            category_trend: trend,
            category_distribution: vec![CategoryTotal {
                category: "Staff Wages".to_string(),
                total: 600.0,
            }],
        }
    }

    #[test]
    fn test_missing_category_is_all_zeros() {
        let data = dataset();
        let labels = RoleLabels::default();
        let store = CategoryStore::new(&data, &labels);

        assert_eq!(store.series(CategoryRole::MaterialCost), vec![0.0, 0.0]);
        assert_eq!(store.value_at(CategoryRole::MaterialCost, 1), 0.0);
        assert_eq!(store.total(CategoryRole::MaterialCost), 0.0);
    }

    #[test]
    fn test_short_series_is_zero_padded() {
        let data = dataset();
        let labels = RoleLabels::default();
        let store = CategoryStore::new(&data, &labels);

        assert_eq!(store.series_for_label("Short Series"), vec![7.0, 0.0]);
    }

    #[test]
    fn test_total_prefers_distribution_entry() {
        let data = dataset();
        let labels = RoleLabels::default();
        let store = CategoryStore::new(&data, &labels);

        assert_eq!(store.total_or_series_sum(CategoryRole::StaffCost), 600.0);
    }

    #[test]
    fn test_total_falls_back_to_series_sum() {
        let mut data = dataset();
        data.category_distribution.clear();
        let labels = RoleLabels::default();
        let store = CategoryStore::new(&data, &labels);

        assert_eq!(store.total_or_series_sum(CategoryRole::StaffCost), 600.0);
        assert_eq!(store.total(CategoryRole::StaffCost), 0.0);
    }
}
