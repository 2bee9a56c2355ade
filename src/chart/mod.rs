//! Chart descriptors for the dashboard
//!
//! Plain data describing the four dashboard charts, ready to be serialised
//! and handed to whatever plotting layer renders them. Empty age groups
//! contribute `null` points to line traces.

use serde::Serialize;

use crate::algorithm::summary::{SummaryRow, SummaryTable};
use crate::models::AgeGroup;

/// How a trace is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Bars
    Bar,
    /// Line with markers
    Line,
}

/// Which y-axis a trace is plotted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    /// Left axis
    Primary,
    /// Right axis, overlaying the primary one
    Secondary,
}

/// How multiple bar traces share a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// Bars side by side
    Group,
    /// Bars stacked on each other
    Stack,
}

/// A y-axis definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title
    pub title: String,
    /// Axis colour, when styled
    pub color: Option<String>,
    /// Fixed range, otherwise automatic
    pub range: Option<[f64; 2]>,
}

impl Axis {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            color: None,
            range: None,
        }
    }

    fn colored(title: &str, color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Self::new(title)
        }
    }
}

/// One data series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// Legend name
    pub name: String,
    /// Drawing style
    pub kind: TraceKind,
    /// Axis the values are read against
    pub axis: AxisSide,
    /// Marker colour, when styled
    pub color: Option<String>,
    /// Age-group labels
    pub x: Vec<String>,
    /// Values, `None` where the group has no data
    pub y: Vec<Option<f64>>,
}

impl Trace {
    fn from_rows(
        name: &str,
        kind: TraceKind,
        rows: &[SummaryRow],
        value: impl Fn(&SummaryRow) -> Option<f64>,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            axis: AxisSide::Primary,
            color: None,
            x: rows.iter().map(|row| row.age_group.label().to_string()).collect(),
            y: rows.iter().map(value).collect(),
        }
    }

    fn on_secondary(mut self) -> Self {
        self.axis = AxisSide::Secondary;
        self
    }

    fn colored(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

/// A complete chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Chart title
    pub title: String,
    /// Category axis title
    pub x_title: String,
    /// Left axis
    pub y_axis: Axis,
    /// Right axis, for dual-axis charts
    pub y2_axis: Option<Axis>,
    /// Bar layout, for charts with several bar traces
    pub bar_mode: Option<BarMode>,
    /// Data series
    pub traces: Vec<Trace>,
}

const X_TITLE: &str = "AgeGroup";

fn count(value: usize) -> Option<f64> {
    Some(value as f64)
}

/// Survival count bars with mean serum creatinine on a second axis
#[must_use]
pub fn survival_vs_creatinine(summary: &SummaryTable) -> ChartSpec {
    ChartSpec {
        title: "Survival Count & Avg Serum Creatinine by Age Group".to_string(),
        x_title: X_TITLE.to_string(),
        y_axis: Axis::colored("Survival Count", "red"),
        y2_axis: Some(Axis::colored("Avg Serum Creatinine", "orange")),
        bar_mode: None,
        traces: vec![
            Trace::from_rows("Survival Count", TraceKind::Bar, &summary.rows, |row| {
                count(row.survival_count)
            })
            .colored("red"),
            Trace::from_rows("Avg Serum Creatinine", TraceKind::Line, &summary.rows, |row| {
                row.avg_serum_creatinine
            })
            .colored("orange")
            .on_secondary(),
        ],
    }
}

/// Survival count bars with mean ejection fraction on a second axis
#[must_use]
pub fn survival_vs_ejection_fraction(summary: &SummaryTable) -> ChartSpec {
    ChartSpec {
        title: "Survival Count & Avg Ejection Fraction by Age Group".to_string(),
        x_title: X_TITLE.to_string(),
        y_axis: Axis::colored("Survival Count", "purple"),
        y2_axis: Some(Axis::colored("Avg Ejection Fraction (%)", "green")),
        bar_mode: None,
        traces: vec![
            Trace::from_rows("Survival Count", TraceKind::Bar, &summary.rows, |row| {
                count(row.survival_count)
            })
            .colored("purple"),
            Trace::from_rows("Avg Ejection Fraction", TraceKind::Line, &summary.rows, |row| {
                row.avg_ejection_fraction
            })
            .colored("green")
            .on_secondary(),
        ],
    }
}

/// Survival rate per group on a fixed 0-100 axis
#[must_use]
pub fn survival_rate_line(summary: &SummaryTable) -> ChartSpec {
    ChartSpec {
        title: "Survival Rate by Age Group (%)".to_string(),
        x_title: X_TITLE.to_string(),
        y_axis: Axis {
            range: Some([0.0, 100.0]),
            ..Axis::new("Survival_Rate")
        },
        y2_axis: None,
        bar_mode: None,
        traces: vec![Trace::from_rows(
            "Survival Rate",
            TraceKind::Line,
            &summary.rows,
            |row| Some(row.survival_rate),
        )],
    }
}

/// Stacked risk-factor counts per group
#[must_use]
pub fn risk_factor_stack(summary: &SummaryTable) -> ChartSpec {
    let rows = &summary.rows;
    ChartSpec {
        title: "Impact of Smoking, High Blood Pressure, Anaemia & Diabetes by Age Group"
            .to_string(),
        x_title: X_TITLE.to_string(),
        y_axis: Axis::new("Count"),
        y2_axis: None,
        bar_mode: Some(BarMode::Stack),
        traces: vec![
            Trace::from_rows("Smoking", TraceKind::Bar, rows, |row| count(row.smoking)),
            Trace::from_rows("High Blood Pressure", TraceKind::Bar, rows, |row| {
                count(row.high_blood_pressure)
            }),
            Trace::from_rows("Anaemia", TraceKind::Bar, rows, |row| count(row.anaemia)),
            Trace::from_rows("Diabetes", TraceKind::Bar, rows, |row| count(row.diabetes)),
        ],
    }
}

/// All four dashboard charts, in page order
#[must_use]
pub fn dashboard_charts(summary: &SummaryTable) -> Vec<ChartSpec> {
    vec![
        survival_vs_creatinine(summary),
        survival_vs_ejection_fraction(summary),
        survival_rate_line(summary),
        risk_factor_stack(summary),
    ]
}

/// Category labels every chart uses, youngest first
#[must_use]
pub fn categories() -> Vec<&'static str> {
    AgeGroup::ALL.iter().map(|group| group.label()).collect()
}
