use tracing::{info, warn};

use super::columns::{ColumnKind, ColumnMapping, FacultyValue, Field, ROW_CELLS, classify_faculty};
use super::{PortalSettings, Result, selectors};
use crate::browser::{BrowsingContext, Frame, Presence};
use crate::model::attendance::AttendanceRecord;

/// What the attendance table held once the wait for rows ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRows {
    /// Cell texts of each populated row, in table order.
    Found(Vec<Vec<String>>),
    /// No populated row appeared in time; the portal's way of saying "no data".
    Empty,
}

/// Waits for populated rows. Running out of time here is not an error.
pub async fn wait_for_rows(
    ctx: &dyn BrowsingContext,
    frame: &Frame,
    settings: &PortalSettings,
) -> Result<TableRows> {
    let presence = ctx
        .wait_for_selector(frame, selectors::DATA_ROWS, settings.rows_timeout)
        .await?;
    if presence == Presence::TimedOut {
        return Ok(TableRows::Empty);
    }

    let rows = ctx.row_cells(frame, selectors::DATA_ROWS).await?;
    Ok(TableRows::Found(rows))
}

/// Converts one row of cell texts through `mapping`.
///
/// Rows that do not have exactly [`ROW_CELLS`] cells yield nothing.
pub fn to_record(mapping: &ColumnMapping, cells: &[String]) -> Option<AttendanceRecord> {
    if cells.len() != ROW_CELLS {
        return None;
    }

    let mut record = AttendanceRecord::default();
    let mut faculty_name = None;
    let mut faculty_code = None;

    for (position, kind) in mapping.columns() {
        let value = &cells[position];
        match kind {
            ColumnKind::Direct(field) => set_field(&mut record, field, value),
            ColumnKind::Faculty => {
                let slot = match classify_faculty(value) {
                    FacultyValue::Name => &mut faculty_name,
                    FacultyValue::Code => &mut faculty_code,
                };
                slot.get_or_insert_with(|| value.clone());
            }
        }
    }

    record.faculty_name = faculty_name.unwrap_or_default();
    record.faculty_code = faculty_code.unwrap_or_default();
    Some(record)
}

fn set_field(record: &mut AttendanceRecord, field: Field, value: &str) {
    match field {
        Field::Subject => record.subject = value.to_string(),
        Field::Presents => record.presents = parse_integer(value),
        Field::Absents => record.absents = parse_integer(value),
        Field::Excuses => record.excuses = parse_integer(value),
        Field::TotalClasses => record.total_classes = parse_integer(value),
        Field::Percentage => record.percentage = parse_float(value),
        Field::PercentageWithExcuses => record.percentage_with_excuses = parse_float(value),
    }
}

/// Reads the leading integer of a cell, ignoring whatever follows it (`"18.0"` is 18).
fn parse_integer(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let end = sign + digits(&bytes[sign..]);
    let number: i64 = value[..end].parse().ok()?;
    u32::try_from(number).ok()
}

/// Reads the leading decimal number of a cell, ignoring whatever follows it
/// (`"90.00 %"` is 90.0).
fn parse_float(value: &str) -> Option<f64> {
    let value = value.trim_start();
    value[..float_prefix(value.as_bytes())]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the `[+-]digits[.digits][e[+-]digits]` prefix of `bytes`.
fn float_prefix(bytes: &[u8]) -> usize {
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    end += digits(&bytes[end..]);
    if bytes.get(end) == Some(&b'.') {
        end += 1 + digits(&bytes[end + 1..]);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let count = digits(&bytes[exponent..]);
        if count > 0 {
            end = exponent + count;
        }
    }
    end
}

/// Scrapes every populated row of the attendance table, keeping table order.
pub async fn extract_records(
    ctx: &dyn BrowsingContext,
    frame: &Frame,
    mapping: &ColumnMapping,
    settings: &PortalSettings,
) -> Result<Vec<AttendanceRecord>> {
    info!("extracting attendance details");

    let rows = match wait_for_rows(ctx, frame, settings).await? {
        TableRows::Found(rows) => rows,
        TableRows::Empty => {
            warn!("no attendance details found");
            return Ok(Vec::new());
        }
    };
    info!(subjects = rows.len(), "attendance rows found");

    let records: Vec<_> = rows
        .iter()
        .filter_map(|cells| {
            let record = to_record(mapping, cells);
            if record.is_none() {
                warn!(cells = cells.len(), "skipping malformed attendance row");
            }
            record
        })
        .collect();
    Ok(records)
}
