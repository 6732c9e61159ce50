// ============================================================
// CSV DOCUMENT
// ============================================================
// Immutable text value produced by the encoder, plus the derived
// metadata channels need (byte form, checksum, MIME type)

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// MIME type handed to download-style consumers.
pub const CSV_MIME: &str = "text/csv;charset=utf-8;";

/// Filename suffix for saved documents.
pub const CSV_EXTENSION: &str = "csv";

/// An encoded CSV document.
///
/// Has no identity beyond its content; constructed fresh on every
/// encode, never cached or mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvDocument {
    text: String,
}

impl CsvDocument {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// An empty document means "no usable data"; callers must produce
    /// no artifact for it.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of data rows (lines after the header).
    pub fn row_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        count_rows(&self.text).saturating_sub(1)
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        match self.text.lines().next() {
            Some(header) => count_header_columns(header),
            None => 0,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// UTF-8 byte form of the document.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (bytes, _, _) = encoding_rs::UTF_8.encode(&self.text);
        bytes.into_owned()
    }

    /// Hex SHA-256 of the UTF-8 bytes, recorded in delivery receipts.
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Count physical CSV rows, treating newlines inside quoted cells as
/// cell content rather than row separators.
fn count_rows(text: &str) -> usize {
    let mut rows = 1usize;
    let mut in_quotes = false;
    for c in text.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => rows += 1,
            _ => {}
        }
    }
    rows
}

/// Count columns in the header line. Headers are always quoted, so a
/// comma at quote depth zero is a separator.
fn count_header_columns(header: &str) -> usize {
    if header.is_empty() {
        return 0;
    }
    let mut columns = 1usize;
    let mut in_quotes = false;
    for c in header.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => columns += 1,
            _ => {}
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = CsvDocument::new(String::new());
        assert!(doc.is_empty());
        assert_eq!(doc.row_count(), 0);
        assert_eq!(doc.column_count(), 0);
    }

    #[test]
    fn test_row_and_column_counts() {
        let doc = CsvDocument::new("\"a\",\"b\"\n1,2\n3,".to_string());
        assert!(!doc.is_empty());
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.column_count(), 2);
    }

    #[test]
    fn test_quoted_newlines_do_not_split_rows() {
        let doc = CsvDocument::new("\"note\"\n\"line one\nline two\"".to_string());
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.column_count(), 1);
    }

    #[test]
    fn test_quoted_commas_do_not_split_header_columns() {
        let doc = CsvDocument::new("\"a,b\",\"c\"\nx,y".to_string());
        assert_eq!(doc.column_count(), 2);
    }

    #[test]
    fn test_bytes_are_utf8() {
        let doc = CsvDocument::new("\"näme\"\nvälue".to_string());
        assert_eq!(doc.to_bytes(), "\"näme\"\nvälue".as_bytes());
    }

    #[test]
    fn test_checksum_is_stable() {
        let a = CsvDocument::new("\"a\"\n1".to_string());
        let b = CsvDocument::new("\"a\"\n1".to_string());
        assert_eq!(a.checksum(), b.checksum());
        assert_eq!(a.checksum().len(), 64);
    }
}
