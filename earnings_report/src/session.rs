//! Line parsing for the interactive session.

use thiserror::Error;

/// One `TICKER [YEARS]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub ticker: String,
    pub lookback_years: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestLineError {
    #[error("expected `TICKER [YEARS]`, got {0} fields")]
    FieldCount(usize),
    #[error("years must be an integer, got `{0}`")]
    Years(String),
}

/// Parses `TICKER [YEARS]`.
///
/// Blank lines yield `Ok(None)`. The ticker is passed through as typed;
/// normalization and range checks happen in the service.
pub fn parse_request_line(
    line: &str,
    default_years: i64,
) -> Result<Option<ReportRequest>, RequestLineError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [] => Ok(None),
        [ticker] => Ok(Some(ReportRequest {
            ticker: (*ticker).to_string(),
            lookback_years: default_years,
        })),
        [ticker, years] => {
            let lookback_years = years
                .parse()
                .map_err(|_| RequestLineError::Years((*years).to_string()))?;
            Ok(Some(ReportRequest {
                ticker: (*ticker).to_string(),
                lookback_years,
            }))
        }
        more => Err(RequestLineError::FieldCount(more.len())),
    }
}
