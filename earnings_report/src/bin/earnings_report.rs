use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use earnings_reaction::Horizon;
use earnings_report::{
    cache::SnapshotCache,
    chart::render_candles,
    config::AppConfig,
    providers::{build_earnings_provider, build_price_provider},
    render::{RenderOptions, render_text},
    service::{GeneratedReport, ReportService},
    session::parse_request_line,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(version, about = "Historical price reaction to earnings announcements")]
struct Cli {
    /// TOML config; defaults to ./earnings_report.toml when present.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print one report.
    Report(ReportArgs),
    /// Read `TICKER [YEARS]` lines from stdin and print a report for each.
    Interactive {
        #[arg(long, allow_negative_numbers = true)]
        years: Option<i64>,
    },
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    ticker: String,
    #[arg(long, allow_negative_numbers = true)]
    years: Option<i64>,
    /// Leave out the +7D block and column.
    #[arg(long)]
    no_7d: bool,
    /// Write a PNG candlestick chart here.
    #[arg(long, value_name = "PATH")]
    chart: Option<PathBuf>,
    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn build_service(config: &AppConfig) -> Result<ReportService> {
    let prices = build_price_provider(&config.alpaca).context("building Alpaca provider")?;
    let earnings =
        build_earnings_provider(&config.alpha_vantage).context("building Alpha Vantage provider")?;
    Ok(ReportService::new(
        prices,
        earnings,
        SnapshotCache::new(config.cache.ttl()),
    ))
}

fn write_chart(
    path: &Path,
    generated: &GeneratedReport,
    config: &AppConfig,
    horizons: &[Horizon],
) -> Result<()> {
    let levels: Vec<_> = horizons
        .iter()
        .filter_map(|&h| generated.reaction.summary(h).range.map(|range| (h, range)))
        .collect();
    let bars = generated.snapshot.series.tail(config.report.chart_bars);
    render_candles(path, &generated.reaction.ticker, bars, &levels)
        .with_context(|| format!("writing chart to {}", path.display()))?;
    info!(path = %path.display(), bars = bars.len(), "wrote chart");
    Ok(())
}

async fn run_report(
    service: &ReportService,
    config: &AppConfig,
    args: ReportArgs,
    today: NaiveDate,
) -> Result<()> {
    let years = args.years.unwrap_or(config.report.default_years);
    let generated = service.report(&args.ticker, years, today).await?;

    let options = RenderOptions {
        generated_on: today,
        include_7d: config.report.include_7d && !args.no_7d,
        table_rows: config.report.table_rows,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&generated.reaction)?);
    } else {
        print!("{}", render_text(&generated.reaction, &options));
    }

    if let Some(path) = &args.chart {
        write_chart(path, &generated, config, options.horizons())?;
    }
    Ok(())
}

async fn run_interactive(
    service: &ReportService,
    config: &AppConfig,
    years: Option<i64>,
) -> Result<()> {
    let default_years = years.unwrap_or(config.report.default_years);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let request = match parse_request_line(&line, default_years) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(err) => {
                warn!(%err, "ignoring input line");
                continue;
            }
        };

        // Recomputed per line so a session left open past midnight stays current.
        let today = Utc::now().date_naive();
        match service
            .report(&request.ticker, request.lookback_years, today)
            .await
        {
            Ok(generated) => {
                let options = RenderOptions {
                    generated_on: today,
                    include_7d: config.report.include_7d,
                    table_rows: config.report.table_rows,
                };
                println!("{}", render_text(&generated.reaction, &options));
            }
            Err(err) => warn!(ticker = %request.ticker, %err, "report failed"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading config")?;
    let service = build_service(&config)?;

    match cli.cmd {
        Cmd::Report(args) => run_report(&service, &config, args, Utc::now().date_naive()).await,
        Cmd::Interactive { years } => run_interactive(&service, &config, years).await,
    }
}
