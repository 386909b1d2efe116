use crate::api::results::{ExperimentResults, GoalResult, DEFAULT_VARIANT_ID};
use chrono::{Datelike, NaiveDate};

/// Line colors for chart series; the fill is the same color at 10% alpha.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartColor {
    pub line: &'static str,
    pub fill: &'static str,
}

/// Series colors are assigned by rotating through this palette.
pub const CHART_PALETTE: [ChartColor; 3] = [
    // primary
    ChartColor {
        line: "rgb(66,107,240)",
        fill: "rgba(66,107,240,0.1)",
    },
    // secondary
    ChartColor {
        line: "rgb(177,117,255)",
        fill: "rgba(177,117,255,0.1)",
    },
    // accent
    ChartColor {
        line: "rgb(65,219,247)",
        fill: "rgba(65,219,247,0.1)",
    },
];

const DAYS_OF_THE_WEEK: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One x-axis label; display layers pick either half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabel {
    pub weekday: &'static str,
    pub date: String,
}

#[derive(Debug, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<u64>,
    pub color: &'static ChartColor,
}

#[derive(Debug, PartialEq)]
pub struct ChartData {
    pub labels: Vec<DayLabel>,
    pub series: Vec<ChartSeries>,
}

/// Variant ids in display order: baseline first, the rest by id.
pub fn order_variants(breakdown: &GoalResult) -> Vec<&str> {
    let mut ordered: Vec<&str> = Vec::with_capacity(breakdown.variants.len());
    if breakdown.variants.contains_key(DEFAULT_VARIANT_ID) {
        ordered.push(DEFAULT_VARIANT_ID);
    }
    ordered.extend(
        breakdown
            .variants
            .keys()
            .map(String::as_str)
            .filter(|id| *id != DEFAULT_VARIANT_ID),
    );
    ordered
}

/// Derive the chart structure for the primary goal.
///
/// Returns `None` when results are absent so callers can tell "no data yet"
/// apart from "loaded with zero points".
pub fn chart_data(results: Option<&ExperimentResults>) -> Option<ChartData> {
    let results = results?;
    let breakdown = &results.goals.primary;

    let series = order_variants(breakdown)
        .into_iter()
        .enumerate()
        .map(|(position, id)| {
            let variant = &breakdown.variants[id];
            ChartSeries {
                label: variant.variant_description.clone(),
                data: variant
                    .details
                    .values()
                    .map(|day| day.unique_by_session)
                    .collect(),
                color: &CHART_PALETTE[position % CHART_PALETTE.len()],
            }
        })
        .collect();

    let labels = breakdown
        .variants
        .get(DEFAULT_VARIANT_ID)
        .map(|baseline| {
            baseline
                .details
                .keys()
                .map(|date| DayLabel {
                    weekday: weekday_of(date),
                    date: date.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(ChartData { labels, series })
}

fn weekday_of(date: &str) -> &'static str {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|day| DAYS_OF_THE_WEEK[day.weekday().num_days_from_sunday() as usize])
        .unwrap_or("")
}
