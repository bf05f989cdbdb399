//! Record type moved through the pipeline
//!
//! A record is one parsed data row: an ordered list of field strings plus
//! its 1-based position in the source file. Field count is untrusted input
//! and consumers must handle out-of-range access explicitly.

/// One parsed data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<String>,
    /// 1-based ordinal of this data row in its source file (header excluded)
    pub position: u64,
}

impl Record {
    pub fn new(fields: Vec<String>, position: u64) -> Self {
        Self { fields, position }
    }

    /// Field at `index`, or None when the row is too short
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|s| s.as_str())
    }

    /// Field at `index`, falling back to `sentinel` when the row is too short
    pub fn field_or<'a>(&'a self, index: usize, sentinel: &'a str) -> &'a str {
        self.field(index).unwrap_or(sentinel)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[allow(dead_code)] // Library surface; the binary never constructs empty records
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
