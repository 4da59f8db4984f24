//! # lesezeichen
//!
//! PDF outline (bookmark) toolkit: extract a document's outline to XML,
//! edit it, and write it back into the PDF.
//!
//! The XML format is the bookmark-editor `ITEM` schema — one element per
//! bookmark with `INDENT`/`PAGE`/`NAME` attributes plus optional
//! pass-through fields (`OPEN`, `FONTSTYLE`, `COLOR`, `ZOOMMODE`,
//! `PARMA`), which survive a round-trip verbatim. PDF container handling
//! is delegated to [`lopdf`], XML handling to `quick-xml`; this crate only
//! maps between the three tree shapes.
//!
//! ## Quick Start
//!
//! ```rust
//! use lesezeichen::core::Bookmark;
//!
//! let mut chapter = Bookmark::new("Einleitung", Some(0), 1);
//! chapter.children.push(Bookmark::new("Motivation", Some(2), 2));
//!
//! let xml = lesezeichen::xml::to_xml_string(&[chapter]).unwrap();
//! assert!(xml.contains(r#"<ITEM INDENT="1" PAGE="0" NAME="Einleitung">"#));
//!
//! let forest = lesezeichen::xml::from_xml_string(&xml).unwrap();
//! assert_eq!(forest[0].children[0].title, "Motivation");
//! ```

pub mod core;
pub mod pdf;
pub mod xml;

// Re-export core types at crate root for convenience
pub use crate::core::*;
