//! Population curve table: a CSV with `Age` and `AgeFactor` columns.

use std::io::Read;

use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{DataError, ResourceLocation};
use super::Loaded;
use crate::domain::{AgingCurve, AgingCurvePoint, MAX_AGE_FACTOR};

const AGE_COLUMN: &str = "Age";
const FACTOR_COLUMN: &str = "AgeFactor";

#[derive(Debug, Deserialize)]
struct RawCurveRow {
    #[serde(rename = "Age", default, deserialize_with = "csv::invalid_option")]
    age: Option<f64>,
    #[serde(rename = "AgeFactor", default, deserialize_with = "csv::invalid_option")]
    age_factor: Option<f64>,
}

/// Fetch and parse the curve table.
pub fn load_curve(location: &ResourceLocation) -> Result<Loaded<AgingCurve>, DataError> {
    let text = location.fetch_text()?;
    parse_curve(text.as_bytes(), &location.to_string())
}

/// Parse a curve table from any reader.
///
/// Rows with an empty or non-numeric age are dropped, as are rows whose factor
/// is missing or outside `[0, MAX_AGE_FACTOR]`. Duplicate ages keep the first
/// row. Only a missing header column fails the whole table.
pub fn parse_curve<R: Read>(rdr: R, location: &str) -> Result<Loaded<AgingCurve>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    let headers = reader
        .headers()
        .map_err(|e| DataError::Malformed {
            location: location.to_string(),
            reason: e.to_string(),
        })?
        .clone();
    for column in [AGE_COLUMN, FACTOR_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::Malformed {
                location: location.to_string(),
                reason: format!("missing column '{column}'"),
            });
        }
    }

    let mut points: Vec<AgingCurvePoint> = Vec::new();
    let mut warnings = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warnings.push(format!("{location}: unreadable row: {e}"));
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());
        let raw: RawCurveRow = match record.deserialize(Some(&headers)) {
            Ok(raw) => raw,
            Err(e) => {
                warnings.push(format!("{location}:{line}: unreadable row: {e}"));
                continue;
            }
        };

        // Rows without an age are the trailing blank lines of most exports.
        let Some(age) = raw.age else {
            debug!("{location}:{line}: dropping row without age");
            continue;
        };
        if !age.is_finite() || age < 0.0 || age.fract() != 0.0 {
            warnings.push(format!("{location}:{line}: non-integer age {age}"));
            continue;
        }
        let age = age as u32;

        let Some(age_factor) = raw.age_factor else {
            warnings.push(format!("{location}:{line}: age {age} has no factor"));
            continue;
        };
        let point = AgingCurvePoint { age, age_factor };
        if !point.is_valid() {
            warnings.push(format!(
                "{location}:{line}: factor {age_factor} outside [0, {MAX_AGE_FACTOR}]"
            ));
            continue;
        }
        if points.iter().any(|p| p.age == age) {
            warnings.push(format!("{location}:{line}: duplicate age {age}, keeping first"));
            continue;
        }
        points.push(point);
    }

    for w in &warnings {
        warn!("{w}");
    }

    Ok(Loaded {
        data: AgingCurve::from_points(points),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Loaded<AgingCurve> {
        parse_curve(text.as_bytes(), "test.csv").unwrap()
    }

    #[test]
    fn parses_and_sorts_rows() {
        let loaded = parse("Age,AgeFactor\n27,1.0\n21,0.82\n24,0.93\n");
        let ages: Vec<u32> = loaded.data.points().iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![21, 24, 27]);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn drops_missing_and_non_numeric_ages_silently() {
        let loaded = parse("Age,AgeFactor\n,0.9\nabc,0.8\n25,0.97\n\n");
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data.factor_at(25), Some(0.97));
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn drops_out_of_range_factors_with_warning() {
        let loaded = parse("Age,AgeFactor\n25,1.5\n26,-0.1\n27,1.1\n");
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.warnings.len(), 2);
    }

    #[test]
    fn accepts_integral_float_ages_and_extra_columns() {
        let loaded = parse("Age,AgeFactor,Notes\n27.0,1.0,peak\n 28 , 0.99 ,\n");
        assert_eq!(loaded.data.age_domain(), Some((27, 28)));
    }

    #[test]
    fn rejects_fractional_age() {
        let loaded = parse("Age,AgeFactor\n27.5,1.0\n");
        assert!(loaded.data.is_empty());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn missing_column_is_malformed() {
        let err = parse_curve("Years,Factor\n27,1.0\n".as_bytes(), "bad.csv").unwrap_err();
        assert!(matches!(err, DataError::Malformed { .. }));
    }

    #[test]
    fn duplicate_age_keeps_first() {
        let loaded = parse("Age,AgeFactor\n27,1.0\n27,0.5\n");
        assert_eq!(loaded.data.factor_at(27), Some(1.0));
        assert_eq!(loaded.warnings.len(), 1);
    }
}
