//! Reprojection of keyed data onto a membership grid.

use crate::{
    columns::{DATE_COLUMN, Selection, payload_columns, require_columns},
    dates::to_calendar_dates,
    duplicates::{DuplicatePolicy, enforce_unique},
    grid::MembershipGrid,
};
use padron_traits::Result;
use polars::prelude::*;

/// Data aligned to a grid: one row per grid key, in grid order.
#[derive(Debug, Clone)]
pub struct ReindexedTable {
    frame: DataFrame,
    id_column: String,
}

impl ReindexedTable {
    /// The aligned frame, keys first.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consumes the table, returning its frame.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of rows, equal to the grid length.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Non-key columns, in input order.
    pub fn payload_columns(&self) -> Vec<String> {
        payload_columns(&self.frame, &[DATE_COLUMN, &self.id_column])
    }

    /// The payload as a single series, when there is exactly one payload column.
    pub fn as_series(&self) -> Option<&Series> {
        match self.payload_columns().as_slice() {
            [only] => self
                .frame
                .column(only)
                .ok()
                .map(Column::as_materialized_series),
            _ => None,
        }
    }
}

/// Left-joins `data` onto `grid` over `(date, id)`.
///
/// `data` must carry `date` and the grid's id column; other columns are
/// payload. Dates are coerced with `date_format` when they are text, ids are
/// cast to strings, and rows repeating an earlier key are dropped with a
/// warning. The grid drives the join: every grid key appears exactly once,
/// with null payload where `data` has no row, and data rows outside the grid
/// are discarded.
pub fn reindex(
    grid: &MembershipGrid,
    data: &DataFrame,
    date_format: Option<&str>,
) -> Result<ReindexedTable> {
    let id_column = grid.id_column();
    let keys = [DATE_COLUMN, id_column];

    let data = require_columns(data, &keys, Selection::All)?;
    let data = to_calendar_dates(data, DATE_COLUMN, date_format)?
        .lazy()
        .with_columns([
            col(DATE_COLUMN).cast(grid.date_mode().dtype()),
            col(id_column).cast(DataType::String),
        ])
        .collect()?;
    let data = enforce_unique(data, &keys, DuplicatePolicy::WarnAndDrop, "Data")?;
    let rows_in = data.height();

    let frame = grid
        .frame()
        .clone()
        .lazy()
        .join(
            data.lazy(),
            [col(DATE_COLUMN), col(id_column)],
            [col(DATE_COLUMN), col(id_column)],
            JoinArgs::new(JoinType::Left),
        )
        .sort(
            keys,
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    tracing::debug!(
        grid = grid.len(),
        data = rows_in,
        columns = frame.width(),
        "reindexed data onto grid"
    );

    Ok(ReindexedTable {
        frame,
        id_column: id_column.to_string(),
    })
}
