use std::{fs, io::Read};

use serde_json::Value;

use crate::{
    Error, Result, TourOptions,
    geo::coord::{CoordinateError, RawWaypoint},
};

/// Reads waypoints from `--input` or stdin.
pub fn read_waypoints(options: &TourOptions) -> Result<Vec<RawWaypoint>> {
    let text = match options.input_path() {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::other(format!("failed to read input file {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_waypoints(&text)
}

/// Parses either a JSON array of pairs or whitespace-separated `a,b` tokens.
/// Input opening with `[` or `{` is treated as JSON and must be an array.
///
/// Entries that are not a numeric pair become [`RawWaypoint::Malformed`] so
/// the remaining indices stay aligned with the caller's list.
pub fn parse_waypoints(input: &str) -> Result<Vec<RawWaypoint>> {
    let trimmed = input.trim_start();
    let waypoints = if trimmed.starts_with(['[', '{']) {
        parse_json(trimmed)?
    } else {
        parse_tokens(trimmed)
    };

    if waypoints.is_empty() {
        return Err(Error::invalid_input("No waypoints provided."));
    }
    log::debug!("input: parsed waypoints={}", waypoints.len());
    Ok(waypoints)
}

fn parse_tokens(input: &str) -> Vec<RawWaypoint> {
    input
        .split_whitespace()
        .map(|tok| {
            let parsed: std::result::Result<Vec<f64>, CoordinateError> =
                tok.split(',').map(parse_number).collect();
            match parsed {
                Ok(values) => RawWaypoint::from_values(&values),
                Err(err) => RawWaypoint::Malformed(err),
            }
        })
        .collect()
}

fn parse_json(input: &str) -> Result<Vec<RawWaypoint>> {
    let root: Value = serde_json::from_str(input)?;
    let Value::Array(entries) = root else {
        return Err(Error::invalid_input("Expected a JSON array of coordinate pairs."));
    };
    Ok(entries.iter().map(json_waypoint).collect())
}

fn json_waypoint(entry: &Value) -> RawWaypoint {
    let Value::Array(values) = entry else {
        return RawWaypoint::Malformed(CoordinateError::NotNumeric {
            value: entry.to_string(),
        });
    };
    let parsed: std::result::Result<Vec<f64>, CoordinateError> = values
        .iter()
        .map(|v| match v {
            Value::Number(n) => n.as_f64().ok_or_else(|| CoordinateError::NotNumeric {
                value: n.to_string(),
            }),
            Value::String(s) => parse_number(s),
            other => Err(CoordinateError::NotNumeric {
                value: other.to_string(),
            }),
        })
        .collect();
    match parsed {
        Ok(values) => RawWaypoint::from_values(&values),
        Err(err) => RawWaypoint::Malformed(err),
    }
}

fn parse_number(raw: &str) -> std::result::Result<f64, CoordinateError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoordinateError::NotNumeric {
            value: raw.to_string(),
        })
}
