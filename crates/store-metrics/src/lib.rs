//! Metrics aggregation engine for the store operations dashboard
//!
//! Reduces raw per-category monthly series into headline KPI cards, a
//! cost/profit decomposition and a tabular summary with totals, monthly
//! averages and percentage-of-revenue shares. Chart rendering, data
//! retrieval and persistence all live in the consumers of this crate; the
//! engine receives a fully materialized [`Dataset`] and produces plain
//! numeric outputs.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod growth;
pub mod ratio;
pub mod roles;
pub mod store;

pub use dataset::{CategoryTotal, Dataset};
pub use engine::{KeyStat, MetricsEngine, Snapshot, SummaryRow};
pub use error::MetricsError;
pub use growth::{GrowthPoint, growth_points};
pub use roles::{CategoryRole, RoleLabels};
pub use store::CategoryStore;
