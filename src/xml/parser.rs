use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::ITEM_TAG;
use crate::core::{Bookmark, BookmarkError};

/// Parse an `ITEM`-schema XML document into a bookmark forest.
///
/// Both source shapes are accepted: nested `ITEM` elements, and the
/// reference schema's historical flat sibling list where hierarchy is
/// encoded solely by the `INDENT` attribute. Parent/child relationships
/// are reconstructed from the effective level via an ancestor stack;
/// levels that skip or decrease inconsistently are clamped to the nearest
/// valid parent rather than rejected.
pub fn from_xml_string(xml: &str) -> Result<Vec<Bookmark>, BookmarkError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut forest: Vec<Bookmark> = Vec::new();
    // stack[i] is the most recently seen open bookmark at level i + 1.
    let mut stack: Vec<Bookmark> = Vec::new();
    let mut item_depth: u32 = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == ITEM_TAG.as_bytes() {
                    let node = parse_item(e, item_depth)?;
                    push_item(node, &mut stack, &mut forest);
                    item_depth += 1;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == ITEM_TAG.as_bytes() {
                    let node = parse_item(e, item_depth)?;
                    push_item(node, &mut stack, &mut forest);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == ITEM_TAG.as_bytes() {
                    item_depth = item_depth.saturating_sub(1);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(BookmarkError::Format(format!("malformed XML: {e}"))),
        }
    }

    while let Some(done) = stack.pop() {
        attach(done, &mut stack, &mut forest);
    }

    tracing::debug!(
        top_level = forest.len(),
        total = crate::core::total_count(&forest),
        "parsed bookmark XML"
    );
    Ok(forest)
}

/// Read and parse an `ITEM`-schema XML file.
pub fn read_xml_file(path: &Path) -> Result<Vec<Bookmark>, BookmarkError> {
    let xml =
        std::fs::read_to_string(path).map_err(|e| BookmarkError::file_access(path, e))?;
    from_xml_string(&xml)
}

/// Build a bookmark from one `ITEM` element's attributes.
///
/// `NAME` defaults to an empty string, an unparseable `PAGE` is treated as
/// unresolved, and everything outside the three semantic attributes is
/// captured verbatim into the pass-through map.
fn parse_item(e: &BytesStart, item_depth: u32) -> Result<Bookmark, BookmarkError> {
    let mut node = Bookmark::default();
    let mut declared: Option<u32> = None;

    for attr in e.attributes() {
        let attr =
            attr.map_err(|e| BookmarkError::Format(format!("malformed XML attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| BookmarkError::Format(format!("malformed XML attribute value: {e}")))?
            .into_owned();

        match key.as_str() {
            "INDENT" => match value.parse::<i64>() {
                Ok(v) => declared = Some(v.clamp(1, i64::from(u32::MAX)) as u32),
                Err(_) => {
                    tracing::warn!(%value, "unparseable INDENT attribute, using nesting depth");
                }
            },
            "PAGE" => match value.parse::<u32>() {
                Ok(p) => node.page = Some(p),
                Err(_) => {
                    tracing::warn!(%value, "unparseable PAGE attribute, page left unresolved");
                }
            },
            "NAME" => node.title = value,
            _ => {
                node.attributes.insert(key, value);
            }
        }
    }

    node.level = declared.unwrap_or(item_depth + 1);
    Ok(node)
}

/// Place a new bookmark relative to the ancestor stack.
///
/// Bookmarks still on the stack at a level >= the new one are complete and
/// get attached to their parents first; the new bookmark then becomes the
/// open node at its (clamped) level.
fn push_item(mut node: Bookmark, stack: &mut Vec<Bookmark>, forest: &mut Vec<Bookmark>) {
    let level = node.level.clamp(1, stack.len() as u32 + 1);
    while stack.len() as u32 >= level {
        match stack.pop() {
            Some(done) => attach(done, stack, forest),
            None => break,
        }
    }
    node.level = level;
    stack.push(node);
}

fn attach(done: Bookmark, stack: &mut Vec<Bookmark>, forest: &mut Vec<Bookmark>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(done),
        None => forest.push(done),
    }
}
