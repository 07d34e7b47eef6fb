//! Server-rendered HTML page with inline SVG charts

use chrono::NaiveDate;
use std::fmt::Write;

use super::chart::{ChartSpec, LineStyle};
use super::view::{BannerLevel, DashboardView, TableView};

const CHART_WIDTH: f64 = 960.0;
const CHART_HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 70.0;

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:260px;padding:1.5rem;background:#f0f2f6;min-height:100vh}\
aside label{display:block;margin-top:1rem;font-size:.9rem}\
aside input{width:100%;padding:.4rem;box-sizing:border-box}\
main{flex:1;padding:1.5rem 3rem}\
table{border-collapse:collapse}td,th{padding:.3rem .8rem;border-bottom:1px solid #ddd;text-align:right}\
.banner{padding:1rem;border-radius:.4rem;margin:1.5rem 0}\
.success{background:#d4edda;color:#155724}.error{background:#f8d7da;color:#721c24}\
.warning{background:#fff3cd;color:#856404}footer{color:#666;margin-top:2rem}";

/// Full page: sidebar inputs, then title, table, charts, banner, footer
pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>Stock Analysis App</title><style>{}</style></head><body>",
        STYLE
    );

    render_inputs(&mut html, view);

    html.push_str("<main>");
    let _ = write!(
        html,
        "<h1>{}</h1><p>{}</p>",
        escape(view.title),
        escape(view.description)
    );

    if let Some(table) = &view.table {
        render_table(&mut html, table);
    }
    for chart in [&view.closing_chart, &view.overlay_chart].into_iter().flatten() {
        let _ = write!(html, "<h3>{}</h3>", escape(&chart.heading));
        html.push_str(&render_svg(chart));
    }

    let _ = write!(
        html,
        "<div class=\"banner {}\">{}</div>",
        banner_class(view.banner.level),
        escape(&view.banner.message)
    );
    let _ = write!(html, "<hr><footer>{}</footer></main></body></html>", escape(view.footer));
    html
}

fn render_inputs(html: &mut String, view: &DashboardView) {
    let inputs = &view.inputs;
    let _ = write!(
        html,
        "<aside><h2>Stock Input</h2><form method=\"get\" action=\"/\">\
<label>Enter Stock Symbol (e.g., AAPL, TSLA)<input type=\"text\" name=\"symbol\" value=\"{}\"></label>\
<label>Start Date<input type=\"date\" name=\"start\" value=\"{}\"></label>\
<label>End Date<input type=\"date\" name=\"end\" value=\"{}\"></label>\
<p><button type=\"submit\">Analyze</button></p></form></aside>",
        escape(&inputs.symbol),
        inputs.start_date,
        inputs.end_date
    );
}

fn render_table(html: &mut String, table: &TableView) {
    let _ = write!(
        html,
        "<h3>{}</h3><table><thead><tr><th>Date</th><th>Open</th><th>High</th><th>Low</th>\
<th>Close</th><th>Adj Close</th><th>Volume</th></tr></thead><tbody>",
        escape(&table.heading)
    );
    for bar in &table.rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td></tr>",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.adj_close, bar.volume
        );
    }
    html.push_str("</tbody></table>");
}

fn banner_class(level: BannerLevel) -> &'static str {
    match level {
        BannerLevel::Success => "success",
        BannerLevel::Warning => "warning",
        BannerLevel::Error => "error",
    }
}

/// One `<svg>` line chart; each gap-free run of a series becomes a polyline
pub fn render_svg(chart: &ChartSpec) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = CHART_WIDTH,
        h = CHART_HEIGHT
    );
    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\">{}</text>",
        CHART_WIDTH / 2.0,
        escape(&chart.title)
    );

    let plot_w = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;

    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"#999\"/>",
        MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h
    );

    if let (Some((first, last)), Some((lo, hi))) = (chart.date_bounds(), chart.y_bounds()) {
        let scale = Scale::new(first, last, lo, hi, plot_w, plot_h);

        for value in [lo, (lo + hi) / 2.0, hi] {
            let y = scale.y(value);
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{:.2}</text>",
                MARGIN_LEFT - 6.0,
                y + 4.0,
                value
            );
        }
        for date in tick_dates(first, last) {
            let x = scale.x(date);
            let _ = write!(
                svg,
                "<text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"11\" text-anchor=\"end\" \
transform=\"rotate(-45 {x:.1} {y:.1})\">{date}</text>",
                x = x,
                y = bottom + 14.0,
                date = date
            );
        }

        for series in &chart.series {
            let dash = dash_attr(series.style);
            for segment in series.segments() {
                let points: Vec<String> = segment
                    .iter()
                    .map(|&(date, value)| format!("{:.1},{:.1}", scale.x(date), scale.y(value)))
                    .collect();
                let _ = write!(
                    svg,
                    "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"{} points=\"{}\"/>",
                    series.color,
                    dash,
                    points.join(" ")
                );
            }
        }
    }

    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\">{}</text>",
        MARGIN_LEFT + plot_w / 2.0,
        CHART_HEIGHT - 6.0,
        escape(&chart.x_label)
    );
    let _ = write!(
        svg,
        "<text x=\"14\" y=\"{y}\" font-size=\"12\" text-anchor=\"middle\" transform=\"rotate(-90 14 {y})\">{}</text>",
        escape(&chart.y_label),
        y = MARGIN_TOP + plot_h / 2.0
    );

    if chart.legend {
        for (i, series) in chart.series.iter().enumerate() {
            let y = MARGIN_TOP + 14.0 + i as f64 * 16.0;
            let x = MARGIN_LEFT + 10.0;
            let dash = dash_attr(series.style);
            let _ = write!(
                svg,
                "<line x1=\"{x}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" stroke=\"{}\" stroke-width=\"1.5\"{}/>\
<text x=\"{tx}\" y=\"{ty}\" font-size=\"11\">{}</text>",
                series.color,
                dash,
                escape(&series.label),
                x = x,
                x2 = x + 24.0,
                y = y,
                tx = x + 30.0,
                ty = y + 4.0
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

fn dash_attr(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "",
        LineStyle::Dashed => " stroke-dasharray=\"6 4\"",
    }
}

struct Scale {
    first: NaiveDate,
    day_span: f64,
    lo: f64,
    value_span: f64,
    plot_w: f64,
    plot_h: f64,
}

impl Scale {
    fn new(first: NaiveDate, last: NaiveDate, lo: f64, hi: f64, plot_w: f64, plot_h: f64) -> Self {
        Self {
            first,
            day_span: ((last - first).num_days() as f64).max(1.0),
            lo,
            value_span: if hi > lo { hi - lo } else { 1.0 },
            plot_w,
            plot_h,
        }
    }

    fn x(&self, date: NaiveDate) -> f64 {
        MARGIN_LEFT + (date - self.first).num_days() as f64 / self.day_span * self.plot_w
    }

    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + self.plot_h - (value - self.lo) / self.value_span * self.plot_h
    }
}

fn tick_dates(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let span = (last - first).num_days();
    let mut ticks: Vec<NaiveDate> = (0..=4)
        .map(|i| first + chrono::Duration::days(span * i / 4))
        .collect();
    ticks.dedup();
    ticks
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
