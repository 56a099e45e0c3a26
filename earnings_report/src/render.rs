//! Plain-text rendering of a [`ReactionReport`].

use std::fmt::Write;

use chrono::NaiveDate;
use earnings_reaction::{Horizon, HorizonSummary, ReactionReport};

/// What to render and how much of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Date printed in the header line.
    pub generated_on: NaiveDate,
    pub include_7d: bool,
    pub table_rows: usize,
}

impl RenderOptions {
    /// Horizons shown with these options, shortest first.
    pub fn horizons(&self) -> &'static [Horizon] {
        if self.include_7d {
            &Horizon::ALL
        } else {
            &[Horizon::OneDay]
        }
    }
}

pub fn render_text(report: &ReactionReport, options: &RenderOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report, options);
    out
}

fn write_report(
    out: &mut String,
    report: &ReactionReport,
    options: &RenderOptions,
) -> std::fmt::Result {
    writeln!(
        out,
        "The following data has been generated on {}",
        options.generated_on
    )?;
    writeln!(
        out,
        "Latest close ${:.2} on {}",
        report.latest_close, report.as_of
    )?;

    for &horizon in options.horizons() {
        writeln!(out)?;
        write_horizon(out, &report.ticker, report.summary(horizon))?;
    }

    writeln!(out)?;
    write_table(out, report, options)?;

    if report.skipped > 0 {
        writeln!(
            out,
            "{} announcement(s) skipped for missing price data",
            report.skipped
        )?;
    }
    Ok(())
}

fn write_horizon(out: &mut String, ticker: &str, summary: &HorizonSummary) -> std::fmt::Result {
    let label = summary.horizon.label();
    writeln!(out, "${ticker} Expected Move ({label})")?;
    match &summary.range {
        Some(range) => {
            writeln!(out, "σ({label} after earnings) = ±{:.2}%", range.sigma_pct)?;
            writeln!(out, "${:.2} through ${:.2}", range.low, range.high)?;
            if let Some(mean) = summary.mean {
                writeln!(
                    out,
                    "mean {label} change {mean:.2}% over {} announcement(s)",
                    summary.samples
                )?;
            }
        }
        None => {
            writeln!(
                out,
                "σ({label} after earnings) unavailable: {} announcement(s) with data, \
                 need at least 2",
                summary.samples
            )?;
        }
    }
    Ok(())
}

fn write_table(
    out: &mut String,
    report: &ReactionReport,
    options: &RenderOptions,
) -> std::fmt::Result {
    let rows = report.recent(options.table_rows);
    if rows.is_empty() {
        return writeln!(out, "No announcements with usable price data");
    }

    write!(out, "{:<12}", "Announced")?;
    for horizon in options.horizons() {
        write!(out, "{:>14}", format!("{} %Change", horizon.label()))?;
    }
    writeln!(out)?;

    for record in rows {
        write!(out, "{:<12}", record.announcement_date.to_string())?;
        for &horizon in options.horizons() {
            match record.change(horizon) {
                Some(change) => write!(out, "{change:>14.2}")?,
                None => write!(out, "{:>14}", "n/a")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
