//! One-shot CLI: run the analysis pipeline for a symbol and print the dashboard.
//!
//! ```text
//! stockdash TSLA --start 2022-01-01 --end 2024-06-30
//! ```

use chrono::NaiveDate;
use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use std::sync::Arc;

use stockdash::config::Settings;
use stockdash::core::clock::SystemClock;
use stockdash::core::pipeline::AnalysisPipeline;
use stockdash::dashboard::terminal::render_report;
use stockdash::dashboard::view::DashboardView;
use stockdash::logging;
use stockdash::models::run::RunInputs;
use stockdash::services::yahoo::YahooFinanceClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "Price history, 100/200-day SMAs and trend signal for a ticker")]
struct Args {
    /// Ticker symbol (defaults to DEFAULT_SYMBOL or AAPL)
    symbol: Option<String>,

    /// First day of the range, YYYY-MM-DD
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Day after the last bar, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    end: Option<NaiveDate>,

    /// Print the dashboard as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging_with_default("warn");

    let args = Args::parse();
    let settings = Settings::from_env()?;

    let inputs = RunInputs::resolve(
        args.symbol.as_deref(),
        args.start,
        args.end,
        &settings.inputs,
        &SystemClock,
    );

    let provider = Arc::new(YahooFinanceClient::with_base_url(settings.yahoo_base_url.clone()));
    let pipeline = AnalysisPipeline::new(provider, settings.analysis.clone());
    let result = pipeline.run(&inputs).await;
    let view = DashboardView::from_result(&inputs, &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_report(&view));
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
