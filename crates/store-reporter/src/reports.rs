//! Report generation (CSV outputs and console summary)

use anyhow::Result;
use chrono::Utc;
use csv::Writer;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

use store_metrics::ratio::change_percent;
use store_metrics::{CategoryRole, GrowthPoint, MetricsEngine, SummaryRow};

use crate::constants;

/// One row of the monthly P&L ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub period: String,
    pub revenue: f64,
    pub staff_cost: f64,
    pub material_cost: f64,
    /// Per-period general expense with staff wages removed
    pub other_cost: f64,
    pub total_cost: f64,
    pub profit: f64,
    pub revenue_mom_percent: f64,
    pub ytd_profit: f64,
}

/// Build the per-period ledger rows from the engine's current dataset.
///
/// Unlike the headline cards, the ledger shows the genuine per-period other
/// cost (`general - staff`) rather than the smeared average; YTD profit
/// resets at each year boundary.
pub fn build_ledger_rows(engine: &MetricsEngine) -> Result<Vec<LedgerRow>> {
    let store = engine.store()?;
    let revenue = store.series(CategoryRole::Revenue);
    let staff = store.series(CategoryRole::StaffCost);
    let material = store.series(CategoryRole::MaterialCost);
    let general = store.series(CategoryRole::GeneralExpense);
    let profit = engine.profit_series()?;

    let mut rows = Vec::with_capacity(store.period_count());
    let mut ytd = 0.0;
    let mut current_year: Option<String> = None;

    for (i, period) in store.months().iter().enumerate() {
        let year = year_of(period);
        if current_year.as_deref() != Some(year) {
            current_year = Some(year.to_string());
            ytd = 0.0;
        }
        ytd += profit[i];

        let other = general[i] - staff[i];
        rows.push(LedgerRow {
            period: period.clone(),
            revenue: revenue[i],
            staff_cost: staff[i],
            material_cost: material[i],
            other_cost: other,
            total_cost: staff[i] + material[i] + other,
            profit: profit[i],
            revenue_mom_percent: if i == 0 {
                0.0
            } else {
                change_percent(revenue[i], revenue[i - 1])
            },
            ytd_profit: ytd,
        });
    }

    Ok(rows)
}

/// Year prefix of a period label ("2024-05" -> "2024")
fn year_of(period: &str) -> &str {
    period.split('-').next().unwrap_or(period)
}

/// Check whether a period label falls in the filter year
fn matches_year(period: &str, year_filter: Option<i32>) -> bool {
    match year_filter {
        Some(year) => period.starts_with(&format!("{}-", year)),
        None => true,
    }
}

/// Generate all CSV reports
pub fn generate_all_reports(
    output_dir: &Path,
    engine: &MetricsEngine,
    year_filter: Option<i32>,
) -> Result<()> {
    generate_summary_csv(output_dir, engine.summary_rows()?)?;
    generate_monthly_ledger(output_dir, engine, year_filter)?;
    generate_growth_csv(output_dir, engine.growth_points()?, year_filter)?;

    Ok(())
}

/// Generate summary.csv (the five-bucket summary table)
fn generate_summary_csv(output_dir: &Path, rows: &[SummaryRow]) -> Result<()> {
    let path = output_dir.join(constants::SUMMARY_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Bucket", "Total", "Monthly_Avg", "Pct_Of_Revenue", "Note"])?;

    for row in rows {
        wtr.write_record([
            row.name,
            &format!("{:.2}", row.total),
            &format!("{:.2}", row.average),
            &format!("{:.2}", row.percentage_of_revenue),
            row.note.unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Generate monthly_ledger.csv (per-period P&L with MoM and YTD columns)
fn generate_monthly_ledger(
    output_dir: &Path,
    engine: &MetricsEngine,
    year_filter: Option<i32>,
) -> Result<()> {
    let path = output_dir.join(constants::MONTHLY_LEDGER_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record([
        "Period",
        "Revenue",
        "Staff_Cost",
        "Material_Cost",
        "Other_Cost",
        "Total_Cost",
        "Profit",
        "Revenue_MoM_Pct",
        "YTD_Profit",
    ])?;

    for row in build_ledger_rows(engine)? {
        if !matches_year(&row.period, year_filter) {
            continue;
        }

        wtr.write_record([
            row.period.as_str(),
            &format!("{:.2}", row.revenue),
            &format!("{:.2}", row.staff_cost),
            &format!("{:.2}", row.material_cost),
            &format!("{:.2}", row.other_cost),
            &format!("{:.2}", row.total_cost),
            &format!("{:.2}", row.profit),
            &format!("{:.2}", row.revenue_mom_percent),
            &format!("{:.2}", row.ytd_profit),
        ])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Generate growth.csv (revenue growth per period transition)
fn generate_growth_csv(
    output_dir: &Path,
    points: &[GrowthPoint],
    year_filter: Option<i32>,
) -> Result<()> {
    let path = output_dir.join(constants::GROWTH_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Period", "Growth_Pct"])?;

    for point in points {
        if !matches_year(&point.period, year_filter) {
            continue;
        }

        wtr.write_record([
            point.period.as_str(),
            &format!("{:.2}", point.rate_percent),
        ])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Console display row for the summary table
#[derive(Tabled)]
struct SummaryDisplay {
    #[tabled(rename = "Bucket")]
    name: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Monthly Avg")]
    average: String,
    #[tabled(rename = "% of Revenue")]
    share: String,
}

impl SummaryDisplay {
    fn from_row(row: &SummaryRow) -> Self {
        // Marker instead of color so the table survives plain log capture
        let name = if row.highlight {
            format!("* {}", row.name)
        } else {
            format!("  {}", row.name)
        };

        Self {
            name,
            total: format!("{:.2}", row.total),
            average: format!("{:.2}", row.average),
            share: format!("{:.2}%", row.percentage_of_revenue),
        }
    }
}

/// Print summary to console
pub fn print_summary(engine: &MetricsEngine) -> Result<()> {
    let stats = engine.key_stats()?;
    let rows = engine.summary_rows()?;
    let growth = engine.growth_points()?;
    let store = engine.store()?;

    println!("\n============================================================");
    println!("                 STORE OPERATIONS SUMMARY");
    println!("            generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    println!("============================================================\n");

    if let Some(latest) = store.months().last() {
        println!(
            "Latest period: {} ({} periods loaded)\n",
            latest,
            store.period_count()
        );
    }

    println!("KEY INDICATORS:");
    for stat in stats {
        println!(
            "  {:<20} {:>12.2}  ({:+.2}% MoM)",
            stat.title, stat.value, stat.trend_percent
        );
    }

    println!("\nSUMMARY TABLE:");
    let display_rows: Vec<SummaryDisplay> = rows.iter().map(SummaryDisplay::from_row).collect();
    let mut table = Table::new(display_rows);
    table.with(Style::sharp());
    println!("{table}");

    if !growth.is_empty() {
        println!("\nREVENUE GROWTH (MoM):");
        let tail = &growth[growth.len().saturating_sub(constants::CONSOLE_GROWTH_TAIL)..];
        for point in tail {
            println!("  {:<12} {:>+8.2}%", point.period, point.rate_percent);
        }
    }

    println!("============================================================");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use store_metrics::{CategoryTotal, Dataset, MetricsEngine, RoleLabels};

    const EPS: f64 = 1e-9;

    fn engine_with(months: Vec<&str>, revenue: Vec<f64>) -> MetricsEngine {
        let labels = RoleLabels::default();
        let count = months.len();
        let mut trend = HashMap::new();
        trend.insert(labels.revenue.clone(), revenue);
        trend.insert(labels.staff_cost.clone(), vec![300.0; count]);
        trend.insert(labels.material_cost.clone(), vec![100.0; count]);
        trend.insert(labels.general_expense.clone(), vec![500.0; count]);

        let dataset = Dataset {
            months: months.into_iter().map(String::from).collect(),
            category_trend: trend,
            category_distribution: vec![CategoryTotal {
                category: labels.staff_cost.clone(),
                total: 300.0 * count as f64,
            }],
        };

        let mut engine = MetricsEngine::new(labels);
        engine.refresh(dataset);
        engine
    }

    #[test]
    fn test_ledger_rows_use_per_period_other_cost() {
        let engine = engine_with(vec!["2024-01", "2024-02"], vec![1000.0, 1200.0]);
        let rows = build_ledger_rows(&engine).unwrap();

        assert_eq!(rows.len(), 2);
        assert!((rows[0].other_cost - 200.0).abs() < EPS);
        assert!((rows[0].total_cost - 600.0).abs() < EPS);
        assert!((rows[0].profit - 400.0).abs() < EPS);
        assert_eq!(rows[0].revenue_mom_percent, 0.0);
        assert!((rows[1].revenue_mom_percent - 20.0).abs() < EPS);
    }

    #[test]
    fn test_ytd_profit_resets_at_year_boundary() {
        let engine = engine_with(
            vec!["2023-11", "2023-12", "2024-01"],
            vec![1000.0, 1000.0, 1000.0],
        );
        let rows = build_ledger_rows(&engine).unwrap();

        // profit is 400 per period with these series
        assert!((rows[0].ytd_profit - 400.0).abs() < EPS);
        assert!((rows[1].ytd_profit - 800.0).abs() < EPS);
        assert!((rows[2].ytd_profit - 400.0).abs() < EPS);
    }

    #[test]
    fn test_matches_year() {
        assert!(matches_year("2024-05", Some(2024)));
        assert!(!matches_year("2023-12", Some(2024)));
        assert!(matches_year("anything", None));
    }

    #[test]
    fn test_year_of_handles_plain_labels() {
        assert_eq!(year_of("2024-05"), "2024");
        assert_eq!(year_of("week-9"), "week");
        assert_eq!(year_of("Q3"), "Q3");
    }
}
