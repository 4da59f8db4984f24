//! XML import/export in the bookmark-editor `ITEM` schema.
//!
//! The schema puts everything in attributes: `INDENT` (nesting level,
//! starting at 1), `PAGE` (zero-based page index), `NAME` (title), plus
//! optional pass-through attributes such as `OPEN`, `FONTSTYLE`, `COLOR`,
//! `ZOOMMODE`, and `PARMA`. The historical flat form lists all `ITEM`s as
//! siblings and relies on `INDENT` alone for hierarchy; this module writes
//! nested elements but reads both forms.

mod parser;
mod writer;

pub use parser::{from_xml_string, read_xml_file};
pub use writer::{to_xml_string, write_xml_file};

/// Root element of a bookmark XML document.
pub const ROOT_TAG: &str = "BOOKMARKS";
/// Header element carrying the producer attribute.
pub const INFO_TAG: &str = "INFO";
/// Per-bookmark element.
pub const ITEM_TAG: &str = "ITEM";

/// Value written to the `INFO` element's `PRODUCER` attribute.
pub const PRODUCER: &str = concat!("lesezeichen ", env!("CARGO_PKG_VERSION"));
