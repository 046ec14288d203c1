//! Period-over-period growth calculation

use serde::Serialize;

use crate::ratio::change_percent;

/// Percentage change of a series between two adjacent periods, labeled with
/// the later period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub period: String,
    pub rate_percent: f64,
}

/// One growth point per adjacent period pair.
///
/// Pure function: works for any named series paired with the period labels.
/// Returns an empty sequence for fewer than two periods, and a rate of 0
/// wherever the previous value is 0.
pub fn growth_points(months: &[String], series: &[f64]) -> Vec<GrowthPoint> {
    let count = months.len().min(series.len());

    (1..count)
        .map(|i| GrowthPoint {
            period: months[i].clone(),
            rate_percent: change_percent(series[i], series[i - 1]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_point_per_transition() {
        let points = growth_points(
            &months(&["2024-01", "2024-02", "2024-03"]),
            &[1000.0, 1200.0, 900.0],
        );

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].period, "2024-02");
        assert_eq!(points[0].rate_percent, 20.0);
        assert_eq!(points[1].period, "2024-03");
        assert_eq!(points[1].rate_percent, -25.0);
    }

    #[test]
    fn test_zero_previous_yields_zero_rate() {
        let points = growth_points(&months(&["2024-01", "2024-02"]), &[0.0, 500.0]);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].rate_percent, 0.0);
        assert!(points[0].rate_percent.is_finite());
    }

    #[test]
    fn test_fewer_than_two_periods_is_empty() {
        assert!(growth_points(&months(&["2024-01"]), &[1000.0]).is_empty());
        assert!(growth_points(&[], &[]).is_empty());
    }
}
