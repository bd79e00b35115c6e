//! Chart-ready series
//!
//! Plain labelled values derived from the category breakdown and the monthly
//! trend. Rendering is left to whatever reads the JSON.

use serde::{Deserialize, Serialize};

use super::breakdown::CategoryTotal;
use super::trend::MonthlyTotal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    /// Unit of `value`, usually the currency symbol
    pub unit: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// One point per category, in breakdown order
    pub fn from_breakdown(
        title: impl Into<String>,
        kind: ChartKind,
        unit: impl Into<String>,
        rows: &[CategoryTotal],
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            unit: unit.into(),
            points: rows
                .iter()
                .map(|row| ChartPoint {
                    label: row.category.name().to_string(),
                    value: row.total.as_f64(),
                })
                .collect(),
        }
    }

    /// One point per month, oldest first
    pub fn from_trend(
        title: impl Into<String>,
        kind: ChartKind,
        unit: impl Into<String>,
        months: &[MonthlyTotal],
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            unit: unit.into(),
            points: months
                .iter()
                .map(|m| ChartPoint {
                    label: m.month.to_string(),
                    value: m.total.as_f64(),
                })
                .collect(),
        }
    }
}

/// The four series of the spending dashboard
pub fn dashboard_series(
    breakdown: &[CategoryTotal],
    trend: &[MonthlyTotal],
    unit: &str,
) -> Vec<ChartSeries> {
    vec![
        ChartSeries::from_breakdown("Spending by Category", ChartKind::Pie, unit, breakdown),
        ChartSeries::from_breakdown("Category-wise Spending", ChartKind::Bar, unit, breakdown),
        ChartSeries::from_trend("Monthly Spending Trend", ChartKind::Line, unit, trend),
        ChartSeries::from_trend("Monthly Spending Distribution", ChartKind::Bar, unit, trend),
    ]
}
