//! # Table View Adapter
//!
//! Filter, sort and paginate an admin table without touching its rows.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     visible_rows() pipeline                             │
//! │                                                                         │
//! │  source rows (never mutated, never replaced by a derived view)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. filter    column filter  AND  global filter (any filterable col)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. sort      one column, asc | desc | none, stable                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. paginate  page_index × page_size window                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<&R> + TablePage metadata                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read runs the whole pipeline from the source rows, so changing the
//! filter or sort can never compound on a previous result.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::contains_ignore_case;
use crate::error::{TableError, TableResult};
use crate::money::Money;

/// Rows per page when none is chosen.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// =============================================================================
// Cell Values
// =============================================================================

/// The value a column reads out of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Money(Money),
    Date(NaiveDate),
    Bool(bool),
}

impl CellValue {
    /// Text used for substring filtering.
    ///
    /// Money is matched without the currency symbol and grouping so that
    /// typing `1599` finds `$1,599.99`.
    pub fn filter_text(&self) -> String {
        match self {
            CellValue::Money(m) => {
                let sign = if m.is_negative() { "-" } else { "" };
                format!("{}{}.{:02}", sign, m.dollars().abs(), m.cents_part())
            }
            other => other.to_string(),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Natural ordering of two non-empty values.
    fn cmp_natural(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Text(a), Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Number(a), Number(b)) => a.total_cmp(b),
            (Integer(a), Number(b)) => (*a as f64).total_cmp(b),
            (Number(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (Money(a), Money(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Bool(a), Bool(b)) => a.cmp(b),
            // Mixed kinds in one column: fall back to their text
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Money(m) => write!(f, "{}", m),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Integer(i64::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<Money> for CellValue {
    fn from(m: Money) -> Self {
        CellValue::Money(m)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

// =============================================================================
// Columns
// =============================================================================

type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;
type Renderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Describes one table column.
///
/// Columns are sortable by default and take part in filtering only when
/// marked [`Column::filterable`].
pub struct Column<R> {
    key: String,
    header: String,
    accessor: Accessor<R>,
    render: Option<Renderer<R>>,
    sortable: bool,
    filterable: bool,
}

impl<R> Column<R> {
    /// Creates a sortable, non-filterable column.
    pub fn new<F>(key: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Column {
            key: key.into(),
            header: header.into(),
            accessor: Arc::new(accessor),
            render: None,
            sortable: true,
            filterable: false,
        }
    }

    /// Lets the column take part in text filtering.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Excludes the column from sorting.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Uses `render` instead of the value's display form.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Reads this column's value out of `row`.
    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text for this column in `row`.
    pub fn render(&self, row: &R) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Column {
            key: self.key.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .finish()
    }
}

/// Header metadata for serializing a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColumnInfo {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    pub filterable: bool,
}

impl<R> From<&Column<R>> for ColumnInfo {
    fn from(column: &Column<R>) -> Self {
        ColumnInfo {
            key: column.key.clone(),
            header: column.header.clone(),
            sortable: column.sortable,
            filterable: column.filterable,
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
    #[default]
    #[serde(rename = "none")]
    Unsorted,
}

impl SortDirection {
    /// Next state when the header of the already-sorted column is clicked.
    pub fn cycle(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Unsorted,
            SortDirection::Unsorted => SortDirection::Ascending,
        }
    }
}

/// The single active sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

// =============================================================================
// Page
// =============================================================================

/// One page of visible rows plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct TablePage<'a, R> {
    pub rows: Vec<&'a R>,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Rows left after filtering, across all pages.
    pub total_rows: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

// =============================================================================
// Table View
// =============================================================================

#[derive(Debug, Clone)]
struct ColumnFilter {
    column: String,
    text: String,
}

/// Filter/sort/paginate state over an owned, immutable row collection.
///
/// ## Example
/// ```rust
/// use storefront_core::table::{CellValue, Column, SortDirection, TableView};
///
/// struct Row { name: &'static str, stock: i64 }
///
/// let rows = vec![Row { name: "Lamp", stock: 3 }, Row { name: "Desk", stock: 12 }];
/// let mut view = TableView::new(rows, vec![
///     Column::new("name", "Name", |r: &Row| CellValue::from(r.name)).filterable(),
///     Column::new("stock", "Stock", |r: &Row| CellValue::from(r.stock)),
/// ]).unwrap();
///
/// view.set_sort("stock", SortDirection::Descending).unwrap();
/// assert_eq!(view.visible_rows()[0].name, "Desk");
/// ```
#[derive(Debug, Clone)]
pub struct TableView<R> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    column_filter: Option<ColumnFilter>,
    global_filter: String,
    sort: Option<SortState>,
    page_index: usize,
    page_size: usize,
}

impl<R> TableView<R> {
    /// Creates a view over `rows`.
    ///
    /// Fails with [`TableError::DuplicateColumn`] if two columns share a key.
    pub fn new(rows: Vec<R>, columns: Vec<Column<R>>) -> TableResult<Self> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.key == column.key) {
                return Err(TableError::DuplicateColumn(column.key.clone()));
            }
        }

        Ok(TableView {
            rows,
            columns,
            column_filter: None,
            global_filter: String::new(),
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// The untouched source rows.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Header metadata for every column, in display order.
    pub fn column_info(&self) -> Vec<ColumnInfo> {
        self.columns.iter().map(ColumnInfo::from).collect()
    }

    fn column(&self, key: &str) -> TableResult<&Column<R>> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Shows only rows whose `column` contains `text`, ignoring case.
    ///
    /// Empty text clears the column filter. Resets to the first page.
    pub fn set_filter(&mut self, text: &str, column: &str) -> TableResult<()> {
        let col = self.column(column)?;
        if !col.filterable {
            return Err(TableError::NotFilterable(column.to_string()));
        }

        self.column_filter = if text.is_empty() {
            None
        } else {
            Some(ColumnFilter {
                column: column.to_string(),
                text: text.to_string(),
            })
        };
        self.page_index = 0;
        Ok(())
    }

    /// Removes the column filter.
    pub fn clear_filter(&mut self) {
        self.column_filter = None;
        self.page_index = 0;
    }

    /// Shows only rows where any filterable column contains `text`.
    ///
    /// Combines with the column filter (both must match). Resets to the
    /// first page.
    pub fn set_global_filter(&mut self, text: &str) {
        self.global_filter = text.to_string();
        self.page_index = 0;
    }

    fn passes_filters(&self, row: &R) -> bool {
        if let Some(filter) = &self.column_filter {
            let matched = self
                .columns
                .iter()
                .find(|c| c.key == filter.column)
                .map(|c| contains_ignore_case(&c.value(row).filter_text(), &filter.text))
                .unwrap_or(false);
            if !matched {
                return false;
            }
        }

        if !self.global_filter.is_empty() {
            return self
                .columns
                .iter()
                .filter(|c| c.filterable)
                .any(|c| contains_ignore_case(&c.value(row).filter_text(), &self.global_filter));
        }

        true
    }

    /// Rows that pass the filters, in source order.
    pub fn filtered_rows(&self) -> Vec<&R> {
        self.rows.iter().filter(|row| self.passes_filters(row)).collect()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sorts by `column` in `direction`; `Unsorted` restores source order.
    pub fn set_sort(&mut self, column: &str, direction: SortDirection) -> TableResult<()> {
        let col = self.column(column)?;
        if !col.sortable {
            return Err(TableError::NotSortable(column.to_string()));
        }

        self.sort = match direction {
            SortDirection::Unsorted => None,
            direction => Some(SortState {
                column: column.to_string(),
                direction,
            }),
        };
        Ok(())
    }

    /// Header click: cycles asc → desc → none on the sorted column, or
    /// starts ascending on a different one. Returns the new direction.
    pub fn toggle_sort(&mut self, column: &str) -> TableResult<SortDirection> {
        let next = match &self.sort {
            Some(state) if state.column == column => state.direction.cycle(),
            _ => SortDirection::Ascending,
        };
        self.set_sort(column, next)?;
        Ok(next)
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Filtered rows in sort order.
    ///
    /// Stable: rows with equal keys keep their source order. Empty cells go
    /// last in both directions.
    pub fn sorted_rows(&self) -> Vec<&R> {
        let mut rows = self.filtered_rows();

        let Some(state) = &self.sort else {
            return rows;
        };
        let Some(column) = self.columns.iter().find(|c| c.key == state.column) else {
            return rows;
        };

        let descending = state.direction == SortDirection::Descending;
        rows.sort_by(|a, b| {
            let (va, vb) = (column.value(a), column.value(b));
            match (va.is_empty(), vb.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) if descending => vb.cmp_natural(&va),
                (false, false) => va.cmp_natural(&vb),
            }
        });
        rows
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Moves to page `index` (0-based) with `page_size` rows per page.
    ///
    /// An index past the last page is clamped to the last page (page 0 when
    /// nothing is visible). Returns the page index actually selected.
    pub fn set_page(&mut self, index: usize, page_size: usize) -> TableResult<usize> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }

        self.page_size = page_size;
        self.page_index = index.min(self.last_page_index());
        Ok(self.page_index)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(filtered rows / page size)`; zero when nothing is visible.
    pub fn page_count(&self) -> usize {
        self.filtered_rows().len().div_ceil(self.page_size)
    }

    fn last_page_index(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Filter → sort → paginate.
    pub fn visible_rows(&self) -> Vec<&R> {
        self.page().rows
    }

    /// The current page with its metadata.
    pub fn page(&self) -> TablePage<'_, R> {
        let sorted = self.sorted_rows();
        let total_rows = sorted.len();
        let page_count = total_rows.div_ceil(self.page_size);
        let page_index = self.page_index.min(page_count.saturating_sub(1));

        let rows = sorted
            .into_iter()
            .skip(page_index * self.page_size)
            .take(self.page_size)
            .collect();

        TablePage {
            rows,
            page_index,
            page_size: self.page_size,
            page_count,
            total_rows,
            has_previous: page_index > 0,
            has_next: page_index + 1 < page_count,
        }
    }

    /// Display text of `column` for `row`.
    pub fn render_cell(&self, row: &R, column: &str) -> TableResult<String> {
        Ok(self.column(column)?.render(row))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
