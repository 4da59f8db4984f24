use std::collections::{HashMap, HashSet};
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use super::text::decode_text_string;
use crate::core::{Bookmark, BookmarkError};

/// Depth cap for outline recursion and named-destination chasing.
const MAX_DEPTH: u32 = 64;

/// Extract a PDF's outline as a bookmark forest.
///
/// A document without an outline (or with an empty one) yields an empty
/// forest, not an error. Entries whose destination cannot be mapped to a
/// page are kept with `page: None` and a warning.
pub fn extract_outline(path: &Path) -> Result<Vec<Bookmark>, BookmarkError> {
    let bytes = std::fs::read(path).map_err(|e| BookmarkError::file_access(path, e))?;
    extract_outline_from_bytes(&bytes)
}

/// Extract the outline from in-memory PDF bytes.
pub fn extract_outline_from_bytes(bytes: &[u8]) -> Result<Vec<Bookmark>, BookmarkError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| BookmarkError::Format(format!("failed to load PDF: {e}")))?;
    extract_from_document(&doc)
}

/// Extract the outline from an already loaded document.
pub fn extract_from_document(doc: &Document) -> Result<Vec<Bookmark>, BookmarkError> {
    let catalog = doc
        .catalog()
        .map_err(|e| BookmarkError::Format(format!("PDF has no catalog: {e}")))?;

    let Some(outlines) = catalog.get(b"Outlines").ok().and_then(|o| resolve_dict(doc, o))
    else {
        return Ok(Vec::new());
    };
    let first = match outlines.get(b"First") {
        Ok(Object::Reference(id)) => *id,
        _ => return Ok(Vec::new()),
    };

    // Page object id → zero-based page index.
    let page_index: HashMap<ObjectId, u32> = doc
        .get_pages()
        .iter()
        .map(|(&number, &id)| (id, number - 1))
        .collect();

    let mut visited = HashSet::new();
    let forest = walk_siblings(doc, first, 1, &page_index, &mut visited);

    tracing::debug!(
        top_level = forest.len(),
        total = crate::core::total_count(&forest),
        "extracted outline"
    );
    Ok(forest)
}

/// Walk one sibling chain (`/Next` links), recursing into `/First` children.
fn walk_siblings(
    doc: &Document,
    first: ObjectId,
    level: u32,
    page_index: &HashMap<ObjectId, u32>,
    visited: &mut HashSet<ObjectId>,
) -> Vec<Bookmark> {
    let mut out = Vec::new();
    if level > MAX_DEPTH {
        return out;
    }

    let mut current = Some(first);
    while let Some(id) = current {
        if !visited.insert(id) {
            tracing::warn!(?id, "circular outline reference, stopping this chain");
            break;
        }
        let Ok(entry) = doc.get_dictionary(id) else {
            tracing::warn!(?id, "outline entry is not a dictionary, skipping rest of chain");
            break;
        };

        let title = entry
            .get(b"Title")
            .ok()
            .and_then(|o| resolve_obj(doc, o))
            .and_then(|o| match o {
                Object::String(bytes, _) => Some(decode_text_string(bytes)),
                _ => None,
            })
            .unwrap_or_default();

        let page = resolve_entry_page(doc, entry, page_index);
        if page.is_none() {
            tracing::warn!(title = %title, "bookmark destination does not resolve to a page");
        }

        let mut bookmark = Bookmark::new(title, page, level);
        if let Ok(Object::Reference(child)) = entry.get(b"First") {
            bookmark.children = walk_siblings(doc, *child, level + 1, page_index, visited);
        }
        out.push(bookmark);

        current = match entry.get(b"Next") {
            Ok(Object::Reference(next)) => Some(*next),
            _ => None,
        };
    }
    out
}

/// Resolve an outline entry's target page: `/Dest` first, then `/A` GoTo.
fn resolve_entry_page(
    doc: &Document,
    entry: &Dictionary,
    page_index: &HashMap<ObjectId, u32>,
) -> Option<u32> {
    if let Ok(dest) = entry.get(b"Dest") {
        if let Some(page) = resolve_dest(doc, dest, page_index, 0) {
            return Some(page);
        }
    }

    let action = entry.get(b"A").ok().and_then(|o| resolve_dict(doc, o))?;
    let is_goto = matches!(
        action.get(b"S"),
        Ok(Object::Name(s)) if s.as_slice() == b"GoTo".as_slice()
    );
    if !is_goto {
        return None;
    }
    resolve_dest(doc, action.get(b"D").ok()?, page_index, 0)
}

/// Resolve a destination object to a zero-based page index.
///
/// Handles explicit arrays `[page /XYZ …]`, named destinations (looked up
/// in the old-style `/Dests` dictionary or the `/Names` tree), and
/// dictionary destinations with a `/D` entry.
fn resolve_dest(
    doc: &Document,
    dest: &Object,
    page_index: &HashMap<ObjectId, u32>,
    depth: u32,
) -> Option<u32> {
    if depth > 4 {
        return None;
    }
    match resolve_obj(doc, dest)? {
        Object::Array(arr) => match arr.first() {
            Some(Object::Reference(page_id)) => page_index.get(page_id).copied(),
            _ => None,
        },
        Object::String(name, _) => {
            let value = lookup_named_dest(doc, name)?;
            resolve_dest(doc, value, page_index, depth + 1)
        }
        Object::Name(name) => {
            let value = lookup_named_dest(doc, name)?;
            resolve_dest(doc, value, page_index, depth + 1)
        }
        Object::Dictionary(d) => resolve_dest(doc, d.get(b"D").ok()?, page_index, depth + 1),
        _ => None,
    }
}

/// Look up a named destination in the catalog.
fn lookup_named_dest<'a>(doc: &'a Document, name: &[u8]) -> Option<&'a Object> {
    let catalog = doc.catalog().ok()?;

    // Old-style /Dests dictionary keyed directly by name.
    if let Some(dests) = catalog.get(b"Dests").ok().and_then(|o| resolve_dict(doc, o)) {
        if let Ok(value) = dests.get(name) {
            return Some(value);
        }
    }

    let names = resolve_dict(doc, catalog.get(b"Names").ok()?)?;
    let tree = resolve_dict(doc, names.get(b"Dests").ok()?)?;
    search_name_tree(doc, tree, name, 0)
}

/// Search a name-tree node: leaf `/Names` arrays are `[key1, val1, …]`,
/// interior nodes carry `/Kids`.
fn search_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    name: &[u8],
    depth: u32,
) -> Option<&'a Object> {
    if depth > MAX_DEPTH {
        return None;
    }

    if let Some(entries) = node
        .get(b"Names")
        .ok()
        .and_then(|o| resolve_obj(doc, o))
        .and_then(|o| o.as_array().ok())
    {
        for pair in entries.chunks(2) {
            if let [Object::String(key, _), value] = pair {
                if key.as_slice() == name {
                    return Some(value);
                }
            }
        }
    }

    if let Some(kids) = node
        .get(b"Kids")
        .ok()
        .and_then(|o| resolve_obj(doc, o))
        .and_then(|o| o.as_array().ok())
    {
        for kid in kids {
            if let Some(kid_dict) = resolve_dict(doc, kid) {
                if let Some(value) = search_name_tree(doc, kid_dict, name, depth + 1) {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn resolve_obj<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match resolve_obj(doc, obj)? {
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}
