//! Tolerant decoding of interpreter text results
//!
//! The automation interpreter only returns text, so nested results are
//! flattened with delimiters on the script side (see [`crate::scripts`]) and
//! split back apart here. Every decoder drops empty or malformed pieces
//! instead of failing the whole result.

use worksnap_domain::constants::{ERROR_TAG, TUPLE_DELIMITER};
use worksnap_domain::{Result, WindowRect, WorksnapError};

/// Decode a sequence of sequences (e.g. windows of tabs).
///
/// Items are trimmed; empty items and empty groups are dropped. Group and
/// item order is preserved.
pub fn decode_sequences(raw: &str, outer: &str, inner: &str) -> Vec<Vec<String>> {
    raw.split(outer)
        .map(|group| {
            group
                .split(inner)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|group| !group.is_empty())
        .collect()
}

/// Decode a sequence of positional records (e.g. `name:::path` documents).
///
/// Fields keep their position, so an empty middle field stays as `""`.
/// Records whose first field is empty are dropped.
pub fn decode_records(raw: &str, outer: &str, inner: &str) -> Vec<Vec<String>> {
    raw.split(outer)
        .filter(|record| !record.trim().is_empty())
        .map(|record| record.split(inner).map(|field| field.trim().to_string()).collect::<Vec<_>>())
        .filter(|fields| fields.first().is_some_and(|key| !key.is_empty()))
        .collect()
}

/// Decode the interpreter's rendering of a flat list of strings.
///
/// Accepts `a, b, c` as well as `{"a", "b", "c"}`.
pub fn decode_list(raw: &str) -> Vec<String> {
    let stripped = raw.trim().trim_start_matches('{').trim_end_matches('}');
    stripped
        .split(", ")
        .map(|item| item.trim().trim_matches('"').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a non-negative count such as a window count.
pub fn parse_count(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WorksnapError::ParseFailure("empty count".to_string()));
    }
    trimmed
        .parse::<usize>()
        .map_err(|e| WorksnapError::ParseFailure(format!("invalid count {trimmed:?}: {e}")))
}

/// Parse a `(x, y, width, height)` tuple reported for one window.
///
/// Runs of delimiters and whitespace collapse to a single delimiter before
/// splitting, so `0, ,, 25, ,, 800, ,, 600` parses like `0,25,800,600`.
/// Exactly four numeric fields are required; fractional values truncate
/// toward zero; negative width or height is rejected.
pub fn parse_window_tuple(raw: &str) -> Result<WindowRect> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WorksnapError::ParseFailure("empty window tuple".to_string()));
    }
    if let Some(message) = trimmed.strip_prefix(ERROR_TAG) {
        return Err(WorksnapError::ParseFailure(format!("window query failed: {}", message.trim())));
    }

    let normalized: String = trimmed
        .chars()
        .map(|c| if c.is_whitespace() || c == '(' || c == ')' { TUPLE_DELIMITER } else { c })
        .collect();
    let fields: Vec<&str> =
        normalized.split(TUPLE_DELIMITER).filter(|field| !field.is_empty()).collect();

    let [x, y, width, height] = fields.as_slice() else {
        return Err(WorksnapError::ParseFailure(format!(
            "expected 4 fields, got {} in {trimmed:?}",
            fields.len()
        )));
    };

    let rect = WindowRect::new(
        parse_coordinate(x)?,
        parse_coordinate(y)?,
        parse_coordinate(width)?,
        parse_coordinate(height)?,
    );
    if rect.width < 0 || rect.height < 0 {
        return Err(WorksnapError::ParseFailure(format!("negative window size in {trimmed:?}")));
    }
    Ok(rect)
}

#[allow(clippy::cast_possible_truncation)]
fn parse_coordinate(field: &str) -> Result<i32> {
    let value = field
        .parse::<f64>()
        .map_err(|e| WorksnapError::ParseFailure(format!("invalid coordinate {field:?}: {e}")))?;
    if !value.is_finite() || value.abs() > f64::from(i32::MAX) {
        return Err(WorksnapError::ParseFailure(format!("coordinate out of range: {field:?}")));
    }
    Ok(value.trunc() as i32)
}
