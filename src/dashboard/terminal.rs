//! Plain-text rendering for the CLI

use colored::Colorize;
use tabled::{Table, Tabled};

use super::chart::{ChartSpec, LineStyle};
use super::view::{BannerLevel, DashboardView, TableView};

const PLOT_WIDTH: usize = 72;
const PLOT_HEIGHT: usize = 16;

#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Adj Close")]
    adj_close: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

pub fn render_report(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(PLOT_WIDTH + 12).blue()));
    out.push_str(&format!("{}\n", view.title.bold().blue()));
    out.push_str(&format!("{}\n", "=".repeat(PLOT_WIDTH + 12).blue()));
    out.push_str(&format!("{}\n\n", view.description));
    out.push_str(&format!(
        "{} {}  {} {}  {} {}\n",
        "Symbol:".cyan(),
        view.inputs.symbol,
        "Start:".cyan(),
        view.inputs.start_date,
        "End:".cyan(),
        view.inputs.end_date
    ));

    if let Some(table) = &view.table {
        out.push('\n');
        out.push_str(&render_table(table));
    }

    for chart in [&view.closing_chart, &view.overlay_chart].into_iter().flatten() {
        out.push('\n');
        out.push_str(&format!("{}\n", chart.heading.bold()));
        out.push_str(&"-".repeat(PLOT_WIDTH + 12));
        out.push('\n');
        out.push_str(&plot_text(chart, PLOT_WIDTH, PLOT_HEIGHT));
    }

    if !view.averages.is_empty() {
        out.push('\n');
        for average in &view.averages {
            let value = average
                .value
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "n/a".to_string());
            out.push_str(&format!("{:<8} {}\n", average.label, value));
        }
    }

    out.push('\n');
    out.push_str(&format!("{}\n", banner_text(view)));
    out.push_str(&format!("{}\n{}\n", "---".dimmed(), view.footer.dimmed()));
    out
}

fn render_table(table: &TableView) -> String {
    let rows: Vec<BarRow> = table
        .rows
        .iter()
        .map(|bar| BarRow {
            date: bar.date.to_string(),
            open: format!("{:.2}", bar.open),
            high: format!("{:.2}", bar.high),
            low: format!("{:.2}", bar.low),
            close: format!("{:.2}", bar.close),
            adj_close: format!("{:.2}", bar.adj_close),
            volume: bar.volume.to_string(),
        })
        .collect();

    format!("{}\n{}\n", table.heading.bold(), Table::new(rows))
}

fn banner_text(view: &DashboardView) -> String {
    let message = view.banner.message.as_str();
    match view.banner.level {
        BannerLevel::Success => message.green().bold().to_string(),
        BannerLevel::Warning => message.yellow().bold().to_string(),
        BannerLevel::Error => message.red().bold().to_string(),
    }
}

/// Character-grid line chart, one glyph per series
pub fn plot_text(chart: &ChartSpec, width: usize, height: usize) -> String {
    let (Some((first, last)), Some((lo, hi))) = (chart.date_bounds(), chart.y_bounds()) else {
        return "(no data)\n".to_string();
    };
    let width = width.max(2);
    let height = height.max(2);
    let day_span = ((last - first).num_days() as f64).max(1.0);
    let value_span = if hi > lo { hi - lo } else { 1.0 };

    let mut grid = vec![vec![' '; width]; height];
    for (idx, series) in chart.series.iter().enumerate() {
        let glyph = glyph_for(idx, series.style);
        for point in &series.points {
            let Some(value) = point.value else { continue };
            let col = ((point.date - first).num_days() as f64 / day_span * (width - 1) as f64)
                .round() as usize;
            let row = ((hi - value) / value_span * (height - 1) as f64).round() as usize;
            grid[row.min(height - 1)][col.min(width - 1)] = glyph;
        }
    }

    let mut out = String::new();
    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{:>10.2}", hi)
        } else if i == height - 1 {
            format!("{:>10.2}", lo)
        } else {
            " ".repeat(10)
        };
        out.push_str(&format!("{} |{}\n", label, row.iter().collect::<String>()));
    }
    out.push_str(&format!("{} +{}\n", " ".repeat(10), "-".repeat(width)));
    let first_label = first.to_string();
    let gap = (width + 2).saturating_sub(first_label.len() * 2);
    out.push_str(&format!("{}{}{}{}\n", " ".repeat(11), first_label, " ".repeat(gap), last));

    if chart.legend {
        let legend: Vec<String> = chart
            .series
            .iter()
            .enumerate()
            .map(|(idx, s)| format!("{} {}", glyph_for(idx, s.style), s.label))
            .collect();
        out.push_str(&format!("{}{}\n", " ".repeat(11), legend.join("   ")));
    }
    out
}

fn glyph_for(idx: usize, style: LineStyle) -> char {
    match (style, idx) {
        (LineStyle::Solid, _) => '*',
        (LineStyle::Dashed, 1) => '+',
        (LineStyle::Dashed, _) => '-',
    }
}
