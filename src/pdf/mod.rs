//! PDF outline extraction and writing on top of `lopdf`.
//!
//! The extractor walks the catalog's `/Outlines` tree; the writer builds a
//! fresh outline object graph and installs it in a copy of the document.
//! Page indices are zero-based throughout, matching the XML schema's
//! `PAGE` attribute.

mod extract;
mod outline;
mod text;

pub use extract::{extract_from_document, extract_outline, extract_outline_from_bytes};
pub use outline::{add_outline_to_bytes, add_outline_to_document, write_with_outline};
pub use text::{decode_text_string, encode_text_string};
