//! Metrics engine: headline KPIs, cost decomposition and the summary table
//!
//! All derived state is recomputed from scratch on every refresh and swapped
//! in as one snapshot; consumers never observe partial results. The cost
//! decomposition carries two deliberate asymmetries inherited from the
//! accounting scheme:
//!
//! - the general expense bucket already contains staff wages, which are
//!   subtracted back out of per-period profit to avoid double counting;
//! - "other" cost exists only as a full-period total, so it enters the
//!   current/previous period cost as a flat per-period average.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::MetricsError;
use crate::growth::{GrowthPoint, growth_points};
use crate::ratio::{change_percent, safe_ratio, share_percent};
use crate::roles::{CategoryRole, RoleLabels};
use crate::store::CategoryStore;

// =============================================================================
// Derived entities
// =============================================================================

/// Headline KPI card: current-period value plus its month-over-month trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStat {
    pub title: &'static str,
    pub value: f64,
    pub trend_percent: f64,
}

/// KeyStat card titles, in display order
pub const KEY_STAT_TITLES: [&str; 4] = [
    "Monthly Revenue",
    "Monthly Cost",
    "Monthly Profit/Loss",
    "Revenue Growth MoM",
];

/// One line of the tabular summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: &'static str,
    pub total: f64,
    pub average: f64,
    pub percentage_of_revenue: f64,
    /// Revenue and profit rows are emphasized by the rendering layer
    pub highlight: bool,
    /// Static explanation shown alongside the row
    pub note: Option<&'static str>,
}

/// Static metadata for the five summary rows, in display order
struct RowMeta {
    name: &'static str,
    highlight: bool,
    note: Option<&'static str>,
}

const SUMMARY_ROW_META: [RowMeta; 5] = [
    RowMeta {
        name: "Operating Revenue",
        highlight: true,
        note: None,
    },
    RowMeta {
        name: "Staff Cost",
        highlight: false,
        note: Some("Wages, social insurance and other personnel outlays"),
    },
    RowMeta {
        name: "Material Cost",
        highlight: false,
        note: Some("Brand materials, replenishment and logistics purchases"),
    },
    RowMeta {
        name: "Other Cost",
        highlight: false,
        note: Some("General expense total minus staff wages"),
    },
    RowMeta {
        name: "Profit / Loss",
        highlight: true,
        note: Some("Revenue minus staff, material and other cost"),
    },
];

/// All derived state for one refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub key_stats: [KeyStat; 4],
    pub summary_rows: Vec<SummaryRow>,
    pub growth_points: Vec<GrowthPoint>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            key_stats: KEY_STAT_TITLES.map(|title| KeyStat {
                title,
                value: 0.0,
                trend_percent: 0.0,
            }),
            summary_rows: SUMMARY_ROW_META
                .iter()
                .map(|meta| SummaryRow {
                    name: meta.name,
                    total: 0.0,
                    average: 0.0,
                    percentage_of_revenue: 0.0,
                    highlight: meta.highlight,
                    note: meta.note,
                })
                .collect(),
            growth_points: Vec::new(),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Holds the current dataset and the latest derived snapshot.
///
/// Single-threaded and synchronous: `refresh` runs to completion and
/// replaces the snapshot before any consumer reads it. Overlapping refreshes
/// are the caller's concern; the last write wins.
#[derive(Debug, Default)]
pub struct MetricsEngine {
    labels: RoleLabels,
    dataset: Option<Dataset>,
    snapshot: Snapshot,
}

impl MetricsEngine {
    pub fn new(labels: RoleLabels) -> Self {
        Self {
            labels,
            dataset: None,
            snapshot: Snapshot::default(),
        }
    }

    /// Accept a validated dataset and recompute all derived state.
    ///
    /// An empty dataset leaves the previous snapshot in place. A
    /// single-period dataset recomputes the summary and growth (growth is
    /// empty) but keeps the last successfully computed key stats, since
    /// there is no previous period to compare against.
    pub fn refresh(&mut self, dataset: Dataset) {
        let next = {
            let store = CategoryStore::new(&dataset, &self.labels);
            match store.period_count() {
                0 => None,
                count => {
                    let key_stats = if count >= 2 {
                        compute_key_stats(&store)
                    } else {
                        self.snapshot.key_stats.clone()
                    };
                    let revenue = store.series(CategoryRole::Revenue);

                    Some(Snapshot {
                        key_stats,
                        summary_rows: compute_summary_rows(&store),
                        growth_points: growth_points(store.months(), &revenue),
                    })
                }
            }
        };

        self.dataset = Some(dataset);
        if let Some(snapshot) = next {
            self.snapshot = snapshot;
        }
    }

    /// Read-only store over the current dataset
    pub fn store(&self) -> Result<CategoryStore<'_>, MetricsError> {
        self.dataset
            .as_ref()
            .map(|dataset| CategoryStore::new(dataset, &self.labels))
            .ok_or(MetricsError::DataNotLoaded)
    }

    /// Latest derived snapshot
    pub fn snapshot(&self) -> Result<&Snapshot, MetricsError> {
        if self.dataset.is_none() {
            return Err(MetricsError::DataNotLoaded);
        }
        Ok(&self.snapshot)
    }

    /// The four headline KPI cards
    pub fn key_stats(&self) -> Result<&[KeyStat; 4], MetricsError> {
        Ok(&self.snapshot()?.key_stats)
    }

    /// The five summary table rows
    pub fn summary_rows(&self) -> Result<&[SummaryRow], MetricsError> {
        Ok(&self.snapshot()?.summary_rows)
    }

    /// Revenue growth per period transition
    pub fn growth_points(&self) -> Result<&[GrowthPoint], MetricsError> {
        Ok(&self.snapshot()?.growth_points)
    }

    /// Per-period profit series under the engine's cost decomposition
    pub fn profit_series(&self) -> Result<Vec<f64>, MetricsError> {
        Ok(compute_profit_series(&self.store()?))
    }
}

// =============================================================================
// Computation (pure functions over the store)
// =============================================================================

/// Full-period cost decomposition drawn from the distribution totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub total_staff: f64,
    pub total_general: f64,
    pub total_other: f64,
    /// `total_other` smeared evenly across the periods
    pub avg_other_per_period: f64,
}

/// Decompose full-period cost from the distribution totals (not summed
/// series): "other" is the general expense total with staff wages removed,
/// carried as a flat per-period average rather than per-period data.
pub fn compute_cost_breakdown(store: &CategoryStore<'_>) -> CostBreakdown {
    let total_staff = store.total(CategoryRole::StaffCost);
    let total_general = store.total(CategoryRole::GeneralExpense);
    let total_other = total_general - total_staff;

    CostBreakdown {
        total_staff,
        total_general,
        total_other,
        avg_other_per_period: safe_ratio(total_other, store.period_count() as f64),
    }
}

/// Per-period profit: `revenue - staff - material - (general - staff)`.
/// General expense contains staff wages, subtracted back out here.
pub fn compute_profit_series(store: &CategoryStore<'_>) -> Vec<f64> {
    let revenue = store.series(CategoryRole::Revenue);
    let staff = store.series(CategoryRole::StaffCost);
    let material = store.series(CategoryRole::MaterialCost);
    let general = store.series(CategoryRole::GeneralExpense);

    (0..store.period_count())
        .map(|i| revenue[i] - staff[i] - material[i] - (general[i] - staff[i]))
        .collect()
}

/// The four headline cards. Requires at least two periods.
fn compute_key_stats(store: &CategoryStore<'_>) -> [KeyStat; 4] {
    let last = store.period_count() - 1;
    let previous = last - 1;

    let breakdown = compute_cost_breakdown(store);
    let period_cost = |index: usize| {
        store.value_at(CategoryRole::StaffCost, index)
            + store.value_at(CategoryRole::MaterialCost, index)
            + breakdown.avg_other_per_period
    };

    let current_revenue = store.value_at(CategoryRole::Revenue, last);
    let previous_revenue = store.value_at(CategoryRole::Revenue, previous);
    let current_cost = period_cost(last);
    let previous_cost = period_cost(previous);
    let current_profit = current_revenue - current_cost;
    let previous_profit = previous_revenue - previous_cost;

    let revenue_trend = change_percent(current_revenue, previous_revenue);

    [
        KeyStat {
            title: KEY_STAT_TITLES[0],
            value: current_revenue,
            trend_percent: revenue_trend,
        },
        KeyStat {
            title: KEY_STAT_TITLES[1],
            value: current_cost,
            trend_percent: change_percent(current_cost, previous_cost),
        },
        KeyStat {
            title: KEY_STAT_TITLES[2],
            value: current_profit,
            trend_percent: change_percent(current_profit, previous_profit),
        },
        KeyStat {
            title: KEY_STAT_TITLES[3],
            value: revenue_trend,
            trend_percent: revenue_trend,
        },
    ]
}

/// The five summary rows. Requires at least one period.
///
/// Totals prefer the distribution aggregate and fall back to summing the
/// series; the shares do not balance to 100% by construction (other-cost
/// smearing and the staff double-subtraction are part of the scheme).
fn compute_summary_rows(store: &CategoryStore<'_>) -> Vec<SummaryRow> {
    let periods = store.period_count() as f64;

    let revenue_total = store.total_or_series_sum(CategoryRole::Revenue);
    let staff_total = store.total_or_series_sum(CategoryRole::StaffCost);
    let material_total = store.total_or_series_sum(CategoryRole::MaterialCost);
    let general_total = store.total_or_series_sum(CategoryRole::GeneralExpense);
    let other_total = general_total - staff_total;
    let profit_total = revenue_total - staff_total - material_total - other_total;

    let totals = [
        revenue_total,
        staff_total,
        material_total,
        other_total,
        profit_total,
    ];

    SUMMARY_ROW_META
        .iter()
        .zip(totals)
        .map(|(meta, total)| SummaryRow {
            name: meta.name,
            total,
            average: safe_ratio(total, periods),
            percentage_of_revenue: share_percent(total, revenue_total),
            highlight: meta.highlight,
            note: meta.note,
        })
        .collect()
}
