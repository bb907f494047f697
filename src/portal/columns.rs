//! Column mapping for the attendance table.
//!
//! The portal does not keep its column order stable, so the table's header row is read on
//! every run and each position is resolved through the closed [`HEADERS`] table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::{PortalError, PortalSettings, Result, require, selectors};
use crate::browser::{BrowsingContext, Frame};

/// Cells per table row: the row marker plus nine data columns.
pub const ROW_CELLS: usize = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Field {
    Subject,
    Presents,
    Absents,
    Excuses,
    TotalClasses,
    Percentage,
    PercentageWithExcuses,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Subject,
        Field::Presents,
        Field::Absents,
        Field::Excuses,
        Field::TotalClasses,
        Field::Percentage,
        Field::PercentageWithExcuses,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Subject => "subject",
            Field::Presents => "presents",
            Field::Absents => "absents",
            Field::Excuses => "excuses",
            Field::TotalClasses => "totalClasses",
            Field::Percentage => "percentage",
            Field::PercentageWithExcuses => "percentageWithExcuses",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColumnKind {
    /// The column always carries this field.
    Direct(Field),
    /// "Faculty Name" columns hold either the faculty's name or its numeric code,
    /// decided per cell by [`classify_faculty`].
    Faculty,
}

impl ColumnKind {
    pub fn field_name(self) -> &'static str {
        match self {
            ColumnKind::Direct(field) => field.name(),
            ColumnKind::Faculty => "facultyName|facultyCode",
        }
    }
}

static HEADERS: Lazy<HashMap<&'static str, ColumnKind>> = Lazy::new(|| {
    HashMap::from([
        ("Subject", ColumnKind::Direct(Field::Subject)),
        ("No.of Present", ColumnKind::Direct(Field::Presents)),
        ("No.of Absent", ColumnKind::Direct(Field::Absents)),
        ("No. of Excuses", ColumnKind::Direct(Field::Excuses)),
        ("Total No. of Days", ColumnKind::Direct(Field::TotalClasses)),
        ("Total Percentage", ColumnKind::Direct(Field::Percentage)),
        (
            "Total Percentage with Excuses",
            ColumnKind::Direct(Field::PercentageWithExcuses),
        ),
        ("Faculty Name", ColumnKind::Faculty),
    ])
});

/// Looks up a header cell's text, ignoring surrounding whitespace and non-breaking spaces.
pub fn lookup_header(text: &str) -> Option<ColumnKind> {
    HEADERS.get(text.trim_matches(|c: char| c.is_whitespace())).copied()
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FacultyValue {
    Name,
    Code,
}

/// A trimmed, finite decimal number is a faculty code; anything else is a name.
pub fn classify_faculty(value: &str) -> FacultyValue {
    let value = value.trim();
    let numeric = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        && value.parse::<f64>().is_ok_and(f64::is_finite);
    if numeric {
        FacultyValue::Code
    } else {
        FacultyValue::Name
    }
}

/// Position (1-based, row marker excluded) to column kind, for one run's table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    columns: Vec<ColumnKind>,
}

impl ColumnMapping {
    /// Builds the mapping from a header row whose first cell is the row-marker column.
    pub fn from_header(header: &[String]) -> Result<Self> {
        if header.len() < ROW_CELLS {
            return Err(PortalError::HeaderTooShort {
                found: header.len(),
            });
        }

        let mut columns = Vec::with_capacity(ROW_CELLS - 1);
        for (position, text) in header.iter().enumerate().take(ROW_CELLS).skip(1) {
            let kind = lookup_header(text).ok_or_else(|| PortalError::UnknownColumn {
                position,
                header: text.clone(),
            })?;
            columns.push(kind);
        }

        for field in Field::ALL {
            let count = columns
                .iter()
                .filter(|kind| **kind == ColumnKind::Direct(field))
                .count();
            match count {
                0 => return Err(PortalError::MissingColumn { field: field.name() }),
                1 => {}
                _ => return Err(PortalError::DuplicateColumn { field: field.name() }),
            }
        }

        Ok(Self { columns })
    }

    /// `(position, kind)` pairs in column order, positions starting at 1.
    pub fn columns(&self) -> impl Iterator<Item = (usize, ColumnKind)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, kind)| (i + 1, *kind))
    }
}

/// Reads the live header row of the attendance table and maps its columns.
pub async fn resolve_columns(
    ctx: &dyn BrowsingContext,
    frame: &Frame,
    settings: &PortalSettings,
) -> Result<ColumnMapping> {
    require(ctx, frame, selectors::HEADER_ROW, settings.selector_timeout).await?;

    let rows = ctx.row_cells(frame, selectors::HEADER_ROW).await?;
    let header = rows.into_iter().next().unwrap_or_default();
    debug!(?header, "attendance header");

    let mapping = ColumnMapping::from_header(&header)?;
    let fields: Vec<_> = mapping.columns().map(|(_, kind)| kind.field_name()).collect();
    info!(?fields, "attendance columns mapped");
    Ok(mapping)
}
