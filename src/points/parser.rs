//! Parser for `latitude longitude name...` point records

use super::{Point, PointStore};
use crate::error::{DistError, Result};

/// Parse point records, one per line
///
/// Blank lines and `#` comments are skipped. The name consumes every token
/// after the longitude and is rejoined with single spaces.
pub fn parse_points(text: &str) -> Result<PointStore> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(idx, line)| parse_record(idx + 1, line))
        .collect()
}

fn parse_record(line_no: usize, line: &str) -> Result<Point> {
    let mut fields = line.split_whitespace();

    let latitude = parse_coordinate(line_no, "latitude", fields.next(), 90.0)?;
    let longitude = parse_coordinate(line_no, "longitude", fields.next(), 180.0)?;
    let name = fields.collect::<Vec<_>>().join(" ");

    Ok(Point::new(name, latitude, longitude))
}

fn parse_coordinate(line: usize, field: &str, token: Option<&str>, limit: f64) -> Result<f64> {
    let token = token.ok_or_else(|| DistError::MalformedRecord {
        line,
        reason: format!("missing {}", field),
    })?;

    let value: f64 = token.parse().map_err(|_| DistError::MalformedRecord {
        line,
        reason: format!("{} '{}' is not a number", field, token),
    })?;

    if !value.is_finite() || value.abs() > limit {
        return Err(DistError::MalformedRecord {
            line,
            reason: format!("{} {} outside [-{}, {}]", field, value, limit, limit),
        });
    }

    Ok(value)
}
