//! Dataset input model and validation boundary
//!
//! One dataset document arrives per refresh cycle from the external data
//! retrieval job and is immutable once accepted. Validation rejects wrong
//! container shapes here, before any computation runs; individually missing
//! categories are normal data and are handled by the store, not here.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::MetricsError;

/// Full-period total for one category
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// One refresh cycle's raw data.
///
/// `months` carries the period labels in chronological order; the index
/// position defines the order everywhere else. A trend series, when present,
/// has one value per entry in `months`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    /// Ordered period labels (calendar months in the observed domain)
    pub months: Vec<String>,
    /// Category name -> one value per entry in `months`
    #[serde(default)]
    pub category_trend: HashMap<String, Vec<f64>>,
    /// Category name + full-period total pairs
    #[serde(default)]
    pub category_distribution: Vec<CategoryTotal>,
}

impl Dataset {
    /// Validate and deserialize a raw JSON document.
    ///
    /// Rejects documents whose containers have the wrong shape so the
    /// engine never computes against a partially valid dataset. Extra
    /// fields in the document are ignored.
    pub fn from_value(value: Value) -> Result<Self, MetricsError> {
        let Some(doc) = value.as_object() else {
            return Err(MetricsError::MalformedDataset(
                "document is not an object".into(),
            ));
        };

        match doc.get("months") {
            Some(v) if v.is_array() => {}
            Some(_) => {
                return Err(MetricsError::MalformedDataset(
                    "`months` is not a sequence".into(),
                ));
            }
            None => {
                return Err(MetricsError::MalformedDataset("`months` is missing".into()));
            }
        }

        match doc.get("category_trend") {
            Some(v) if v.is_object() => {}
            Some(_) => {
                return Err(MetricsError::MalformedDataset(
                    "`category_trend` is not a mapping".into(),
                ));
            }
            None => {
                return Err(MetricsError::MalformedDataset(
                    "`category_trend` is missing".into(),
                ));
            }
        }

        if let Some(v) = doc.get("category_distribution") {
            if !v.is_array() {
                return Err(MetricsError::MalformedDataset(
                    "`category_distribution` is not a sequence".into(),
                ));
            }
        }

        serde_json::from_value(value).map_err(|e| MetricsError::MalformedDataset(e.to_string()))
    }

    /// Validate and deserialize a JSON string
    pub fn from_json_str(raw: &str) -> Result<Self, MetricsError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| MetricsError::MalformedDataset(e.to_string()))?;
        Self::from_value(value)
    }

    /// Number of periods covered by this dataset
    pub fn period_count(&self) -> usize {
        self.months.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;

    #[test]
    fn test_valid_document_parses() {
        let raw = r#"{
            "months": ["2024-01", "2024-02"],
            "category_trend": {"Staff Wages": [300.0, 300.0]},
            "category_distribution": [{"category": "Staff Wages", "total": 600.0}],
            "monthly_summary": []
        }"#;

        let dataset = Dataset::from_json_str(raw).unwrap();
        assert_eq!(dataset.period_count(), 2);
        assert_eq!(dataset.category_trend["Staff Wages"], vec![300.0, 300.0]);
        assert_eq!(dataset.category_distribution[0].total, 600.0);
    }

    #[test]
    fn test_missing_distribution_defaults_to_empty() {
        let raw = r#"{"months": [], "category_trend": {}}"#;
        let dataset = Dataset::from_json_str(raw).unwrap();
        assert!(dataset.category_distribution.is_empty());
    }

    #[test]
    fn test_wrong_container_shapes_are_rejected() {
        let cases = [
            r#"{"category_trend": {}}"#,
            r#"{"months": "2024", "category_trend": {}}"#,
            r#"{"months": []}"#,
            r#"{"months": [], "category_trend": []}"#,
            r#"{"months": [], "category_trend": {}, "category_distribution": {}}"#,
            r#"[1, 2, 3]"#,
        ];

        for raw in cases {
            let err = Dataset::from_json_str(raw).unwrap_err();
            assert!(matches!(err, MetricsError::MalformedDataset(_)), "{raw}");
        }
    }

    #[test]
    fn test_non_numeric_series_value_is_rejected() {
        let raw = r#"{"months": ["2024-01"], "category_trend": {"x": ["oops"]}}"#;
        let err = Dataset::from_json_str(raw).unwrap_err();
        assert!(matches!(err, MetricsError::MalformedDataset(_)));
    }
}
