#![forbid(unsafe_code)]

//! Cell coordinates and query roles.

/// Columns of the storage table.
///
/// Column numbers are plain `i32` at the [`Model`](crate::Model) boundary so a
/// renderer can address any model; this enum names the two the storage model
/// understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Column {
    Key = 0,
    Value = 1,
}

impl Column {
    /// Number of columns (the sentinel one past the last column).
    pub const COUNT: i32 = 2;

    /// Map a raw column number to a known column.
    #[must_use]
    pub const fn from_index(column: i32) -> Option<Self> {
        match column {
            0 => Some(Self::Key),
            1 => Some(Self::Value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_index(self) -> i32 {
        self as i32
    }

    /// Header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Key => "Key",
            Self::Value => "Value",
        }
    }
}

/// A `(row, column)` coordinate identifying one cell.
///
/// Indices are plain values with no tie to the model that produced them. They
/// are only meaningful until the model's contents are next replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    row: i32,
    column: i32,
}

impl ModelIndex {
    /// The invalid index returned for out-of-range lookups.
    pub const INVALID: Self = Self {
        row: -1,
        column: -1,
    };

    /// Create an index for a cell. Negative coordinates produce
    /// [`ModelIndex::INVALID`].
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        if row < 0 || column < 0 {
            return Self::INVALID;
        }
        Self { row, column }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.row >= 0 && self.column >= 0
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }
}

impl Default for ModelIndex {
    fn default() -> Self {
        Self::INVALID
    }
}

/// What a caller wants from a cell.
///
/// The storage model answers [`ModelRole::Display`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelRole {
    /// Human-readable representation.
    #[default]
    Display,
    Edit,
    Tooltip,
    Sort,
    Search,
    TextAlignment,
}
