//! Line chart descriptions shared by the HTML and terminal renderers

use chrono::NaiveDate;
use serde::Serialize;

use crate::common::math;
use crate::models::moving_average::MovingAverage;
use crate::models::run::AnalysisReport;

pub const CLOSE_COLOR: &str = "#1f77b4";
pub const FAST_SMA_COLOR: &str = "green";
pub const SLOW_SMA_COLOR: &str = "red";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub color: &'static str,
    pub style: LineStyle,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_points(
        label: String,
        color: &'static str,
        style: LineStyle,
        points: impl IntoIterator<Item = (NaiveDate, Option<f64>)>,
    ) -> Self {
        let points = points
            .into_iter()
            .map(|(date, value)| ChartPoint { date, value })
            .collect();
        Self {
            label,
            color,
            style,
            points,
        }
    }

    fn closing(report: &AnalysisReport) -> Self {
        Self::from_points(
            "Closing Price".to_string(),
            CLOSE_COLOR,
            LineStyle::Solid,
            report.series.bars().iter().map(|bar| (bar.date, Some(bar.close))),
        )
    }

    fn from_average(sma: &MovingAverage, color: &'static str, dates: &[NaiveDate]) -> Self {
        Self::from_points(
            format!("{}-Day SMA", sma.window),
            color,
            LineStyle::Dashed,
            sma.points(dates),
        )
    }

    /// Runs of consecutive defined points; gaps split the line
    pub fn segments(&self) -> Vec<Vec<(NaiveDate, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.value {
                Some(value) => current.push((point.date, value)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub heading: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: bool,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Closing price over the full fetched range
    pub fn closing_price(report: &AnalysisReport) -> Self {
        let symbol = &report.inputs.symbol;
        let close = ChartSeries::closing(report);

        Self {
            heading: format!("Closing Price of {}", symbol),
            title: format!("{} Closing Price", symbol),
            x_label: "Date".to_string(),
            y_label: "Closing Price".to_string(),
            legend: false,
            series: vec![close],
        }
    }

    /// Close with both moving averages on a shared date axis
    pub fn moving_averages(report: &AnalysisReport) -> Self {
        let symbol = &report.inputs.symbol;
        let dates = report.series.dates();
        let close = ChartSeries::closing(report);

        Self {
            heading: format!(
                "{} - {} Day & {} Day Simple Moving Average (SMA)",
                symbol, report.fast_sma.window, report.slow_sma.window
            ),
            title: format!("{} - Moving Averages", symbol),
            x_label: "Date".to_string(),
            y_label: "Price".to_string(),
            legend: true,
            series: vec![
                close,
                ChartSeries::from_average(&report.fast_sma, FAST_SMA_COLOR, &dates),
                ChartSeries::from_average(&report.slow_sma, SLOW_SMA_COLOR, &dates),
            ],
        }
    }

    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        math::finite_bounds(
            self.series
                .iter()
                .flat_map(|s| s.points.iter().filter_map(|p| p.value)),
        )
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.date));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}
