use std::io::Cursor;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::{INFO_TAG, ITEM_TAG, PRODUCER, ROOT_TAG};
use crate::core::{Bookmark, BookmarkError, write_atomic};

fn xml_io(e: std::io::Error) -> BookmarkError {
    BookmarkError::Format(format!("XML write error: {e}"))
}

struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    fn new() -> Result<Self, BookmarkError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    fn into_string(self) -> Result<String, BookmarkError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| BookmarkError::Format(format!("XML UTF-8 error: {e}")))
    }

    fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, BookmarkError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn empty_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, BookmarkError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Empty(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn end_element(&mut self, name: &str) -> Result<&mut Self, BookmarkError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }
}

/// Serialize a bookmark forest to an XML document in the `ITEM` schema.
///
/// Each bookmark becomes an `ITEM` element carrying `INDENT` (= level),
/// `PAGE` (omitted when the page is unresolved), `NAME` (= title), and
/// every pass-through attribute verbatim. Children nest in original order.
pub fn to_xml_string(forest: &[Bookmark]) -> Result<String, BookmarkError> {
    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs(ROOT_TAG, &[])?;
    w.empty_element_with_attrs(INFO_TAG, &[("PRODUCER", PRODUCER)])?;
    for bookmark in forest {
        write_item(&mut w, bookmark)?;
    }
    w.end_element(ROOT_TAG)?;
    w.into_string()
}

/// Serialize a forest and write it to `path` atomically.
pub fn write_xml_file(forest: &[Bookmark], path: &Path) -> Result<(), BookmarkError> {
    let xml = to_xml_string(forest)?;
    write_atomic(path, xml.as_bytes())?;
    tracing::debug!(
        path = %path.display(),
        top_level = forest.len(),
        total = crate::core::total_count(forest),
        "wrote bookmark XML"
    );
    Ok(())
}

fn write_item(w: &mut XmlWriter, bookmark: &Bookmark) -> Result<(), BookmarkError> {
    let indent = bookmark.level.to_string();
    let page = bookmark.page.map(|p| p.to_string());

    let mut attrs: Vec<(&str, &str)> = vec![("INDENT", indent.as_str())];
    if let Some(page) = page.as_deref() {
        attrs.push(("PAGE", page));
    }
    attrs.push(("NAME", bookmark.title.as_str()));
    for (k, v) in &bookmark.attributes {
        // The three semantic fields live on the struct itself; a stale copy
        // in the pass-through map must not produce duplicate attributes.
        if matches!(k.as_str(), "INDENT" | "PAGE" | "NAME") {
            continue;
        }
        attrs.push((k.as_str(), v.as_str()));
    }

    if bookmark.children.is_empty() {
        w.empty_element_with_attrs(ITEM_TAG, &attrs)?;
    } else {
        w.start_element_with_attrs(ITEM_TAG, &attrs)?;
        for child in &bookmark.children {
            write_item(w, child)?;
        }
        w.end_element(ITEM_TAG)?;
    }
    Ok(())
}
