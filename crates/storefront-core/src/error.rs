//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Cart / admin collection errors                 │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── TableError       - Table view adapter misuse                      │
//! │                                                                         │
//! │  gateway errors (app crate)                                            │
//! │  └── GatewayError     - What HTTP clients see (JSON)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → GatewayError → HTTP response      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, column key, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and admin collection errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No entry with this id exists in the collection.
    ///
    /// ## When This Occurs
    /// - Quantity edit for an item that was already removed
    /// - Deleting or suspending an admin row that is gone
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// A quantity below zero was requested.
    ///
    /// Zero means "remove"; anything lower is rejected instead of clamped.
    #[error("Quantity {requested} for {id} is negative")]
    NegativeQuantity { id: String, requested: i64 },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A cart amount does not fit in the money representation.
    #[error("Cart amount overflows at {at}")]
    AmountOverflow { at: String },

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Table Error
// =============================================================================

/// Errors raised by [`crate::table::TableView`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The column key is not part of this table.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The column exists but does not take part in filtering.
    #[error("Column {0} is not filterable")]
    NotFilterable(String),

    /// The column exists but does not take part in sorting.
    #[error("Column {0} is not sortable")]
    NotSortable(String),

    /// Two column descriptors share a key.
    #[error("Duplicate column key: {0}")]
    DuplicateColumn(String),

    /// Page size must be at least one row.
    #[error("Page size must be positive")]
    InvalidPageSize,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with TableError.
pub type TableResult<T> = Result<T, TableError>;

// =============================================================================
// Unit Tests
// =============================================================================
