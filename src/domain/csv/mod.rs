// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// The pure encoder and the document value it produces
// No I/O, no async, no external state

mod document;
mod encoder;

pub use document::{CsvDocument, CSV_EXTENSION, CSV_MIME};
pub use encoder::{encode, encode_value};
