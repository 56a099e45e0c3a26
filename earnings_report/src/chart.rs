//! Candlestick chart of recent sessions with the expected-move levels drawn
//! across it.
//!
//! The x-axis is the bar position, so weekends and holidays leave no gaps.

use std::path::Path;

use earnings_reaction::{ExpectedRange, Horizon};
use market_data_ingestor::models::bar::DailyBar;
use plotters::{
    chart::ChartBuilder,
    element::PathElement,
    prelude::{BitMapBackend, CandleStick, IntoDrawingArea},
    series::LineSeries,
    style::{BLACK, Color, GREEN, RED, WHITE, full_palette::TEAL},
};
use thiserror::Error;

const DIMENSIONS: (u32, u32) = (1280, 480);

/// Fraction of the price span added above and below the plotted data.
const Y_PADDING: f64 = 0.05;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no bars to chart")]
    NoBars,
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

fn draw_err(err: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// Price bounds covering every bar and every level, padded.
///
/// `None` for an empty slice. A flat series still gets a non-empty span.
pub fn y_bounds(bars: &[DailyBar], levels: &[(Horizon, ExpectedRange)]) -> Option<(f64, f64)> {
    if bars.is_empty() {
        return None;
    }
    let lows = bars
        .iter()
        .map(|bar| bar.low)
        .chain(levels.iter().map(|(_, range)| range.low));
    let highs = bars
        .iter()
        .map(|bar| bar.high)
        .chain(levels.iter().map(|(_, range)| range.high));

    let min = lows.fold(f64::INFINITY, f64::min);
    let max = highs.fold(f64::NEG_INFINITY, f64::max);

    let span = max - min;
    let pad = if span > 0.0 {
        span * Y_PADDING
    } else {
        (max.abs() * Y_PADDING).max(1.0)
    };
    Some((min - pad, max + pad))
}

/// The +7D levels share the +1D hues and are drawn thinner.
fn level_width(horizon: Horizon) -> u32 {
    match horizon {
        Horizon::OneDay => 2,
        Horizon::SevenDay => 1,
    }
}

/// Writes a PNG candlestick chart of `bars` to `path`.
///
/// Each entry in `levels` adds a horizontal line at its range low (red) and
/// high (teal), labelled with the price.
pub fn render_candles(
    path: &Path,
    ticker: &str,
    bars: &[DailyBar],
    levels: &[(Horizon, ExpectedRange)],
) -> Result<(), ChartError> {
    let (y_min, y_max) = y_bounds(bars, levels).ok_or(ChartError::NoBars)?;
    let x_max = bars.len() as u32;

    let root = BitMapBackend::new(path, DIMENSIONS).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("${ticker} last {} sessions", bars.len()), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Session")
        .y_desc("Price")
        .draw()
        .map_err(draw_err)?;

    let candle_width = (DIMENSIONS.0 / x_max.max(1)).saturating_sub(4).max(1);
    chart
        .draw_series(bars.iter().enumerate().map(|(index, bar)| {
            CandleStick::new(
                index as u32,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                GREEN.filled(),
                RED.filled(),
                candle_width,
            )
        }))
        .map_err(draw_err)?;

    for (horizon, range) in levels {
        let width = level_width(*horizon);
        for (price, color) in [(range.low, RED), (range.high, TEAL)] {
            chart
                .draw_series(LineSeries::new(
                    [(0, price), (x_max, price)],
                    color.mix(0.7).stroke_width(width),
                ))
                .map_err(draw_err)?
                .label(format!("{horizon} ${price:.2}"))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
                });
        }
    }

    if !levels.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, low: f64, high: f64) -> DailyBar {
        DailyBar::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            low,
            high,
            low,
            high,
        )
    }

    #[test]
    fn bounds_cover_bars_and_levels() {
        let bars = [bar(2, 95.0, 105.0), bar(3, 98.0, 110.0)];
        let levels = [(Horizon::OneDay, ExpectedRange::from_sigma(100.0, 20.0))];

        let (min, max) = y_bounds(&bars, &levels).unwrap();
        // Data spans 80..120, padded by 5% of 40.
        assert!((min - 78.0).abs() < 1e-9);
        assert!((max - 122.0).abs() < 1e-9);
    }

    #[test]
    fn flat_series_gets_a_span() {
        let (min, max) = y_bounds(&[bar(2, 50.0, 50.0)], &[]).unwrap();
        assert!(min < 50.0 && max > 50.0);
    }

    #[test]
    fn empty_series_has_no_bounds() {
        assert_eq!(y_bounds(&[], &[]), None);
    }
}
