//! Table cell types.
//!
//! The TRA itinerary table shares one leg between several transfer options
//! by giving its cells a `rowspan`. A [`Cell`] keeps the text and that span
//! so the reconstructor can replay it into the rows it covers.

/// One cell of the itinerary table.
///
/// `content` has already had its markup stripped and is trimmed. The span is
/// always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    content: String,
    span: u32,
}

impl Cell {
    /// Create a cell. A span of 0 is treated as 1.
    pub fn new(content: impl Into<String>, span: u32) -> Self {
        Self {
            content: content.into(),
            span: span.max(1),
        }
    }

    /// Create a cell covering a single row.
    pub fn single(content: impl Into<String>) -> Self {
        Self::new(content, 1)
    }

    /// The cell's text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of rows this cell covers (≥ 1).
    pub fn span(&self) -> u32 {
        self.span
    }

    /// Whether this cell covers more than its own row.
    pub fn is_spanning(&self) -> bool {
        self.span > 1
    }
}

/// One source table row, cells in document order.
pub type RawRow = Vec<Cell>;

/// One reconstructed leg pair with carried fields re-inserted.
pub type FlatRow = Vec<String>;
