use std::path::Path;

use lopdf::{Document, Object, ObjectId, dictionary};

use super::text::encode_text_string;
use crate::core::{Bookmark, BookmarkError, write_atomic};

/// Write a copy of `input` to `output` with the forest as its outline.
///
/// Page content is untouched and the input file is never mutated. The
/// whole forest is validated against the page count before anything is
/// written, and the output lands atomically, so a failure leaves no
/// half-written file behind.
pub fn write_with_outline(
    input: &Path,
    forest: &[Bookmark],
    output: &Path,
) -> Result<(), BookmarkError> {
    let bytes = std::fs::read(input).map_err(|e| BookmarkError::file_access(input, e))?;
    let out_bytes = add_outline_to_bytes(&bytes, forest)?;
    write_atomic(output, &out_bytes)?;
    tracing::debug!(
        output = %output.display(),
        top_level = forest.len(),
        total = crate::core::total_count(forest),
        "wrote PDF with outline"
    );
    Ok(())
}

/// Add the forest as the outline of in-memory PDF bytes.
pub fn add_outline_to_bytes(bytes: &[u8], forest: &[Bookmark]) -> Result<Vec<u8>, BookmarkError> {
    let mut doc = Document::load_mem(bytes)
        .map_err(|e| BookmarkError::Format(format!("failed to load PDF: {e}")))?;
    add_outline_to_document(&mut doc, forest)?;

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| BookmarkError::Format(format!("failed to save PDF: {e}")))?;
    Ok(out)
}

/// Build the outline object graph and install it in the catalog,
/// replacing any existing `/Outlines` entry.
pub fn add_outline_to_document(
    doc: &mut Document,
    forest: &[Bookmark],
) -> Result<(), BookmarkError> {
    let pages: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    validate_pages(forest, pages.len() as u32)?;

    // Empty forest: leave the document as-is.
    if forest.is_empty() {
        return Ok(());
    }
    let Some(root_id) = build_outline(doc, forest, &pages) else {
        return Ok(());
    };

    let catalog = doc
        .catalog_mut()
        .map_err(|e| BookmarkError::Format(format!("PDF has no catalog: {e}")))?;
    catalog.set("Outlines", Object::Reference(root_id));
    Ok(())
}

/// Every bookmark must target an existing page before any object is built.
fn validate_pages(forest: &[Bookmark], page_count: u32) -> Result<(), BookmarkError> {
    for item in forest {
        match item.page {
            None => {
                return Err(BookmarkError::PageResolution(format!(
                    "bookmark {:?} has no resolved page",
                    item.title
                )));
            }
            Some(p) if p >= page_count => {
                return Err(BookmarkError::PageResolution(format!(
                    "bookmark {:?} targets page {p}, but the document has {page_count} pages",
                    item.title
                )));
            }
            _ => {}
        }
        validate_pages(&item.children, page_count)?;
    }
    Ok(())
}

fn build_outline(doc: &mut Document, forest: &[Bookmark], pages: &[ObjectId]) -> Option<ObjectId> {
    let root_id = doc.new_object_id();
    let (first, last, count) = build_level(doc, forest, root_id, pages)?;
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => count,
        }),
    );
    Some(root_id)
}

/// Build one sibling chain. Ids are preallocated so `/Prev`/`/Next` links
/// can point forward; returns `(first, last, visible_count)` for the
/// parent's `/First`/`/Last`/`/Count` entries.
fn build_level(
    doc: &mut Document,
    items: &[Bookmark],
    parent: ObjectId,
    pages: &[ObjectId],
) -> Option<(ObjectId, ObjectId, i64)> {
    if items.is_empty() {
        return None;
    }
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();
    let mut visible = items.len() as i64;

    for (i, item) in items.iter().enumerate() {
        let mut entry = dictionary! {
            "Title" => encode_text_string(&item.title),
            "Parent" => parent,
        };
        if let Some(&page_id) = item.page.and_then(|p| pages.get(p as usize)) {
            entry.set(
                "Dest",
                Object::Array(vec![
                    Object::Reference(page_id),
                    Object::Name(b"XYZ".to_vec()),
                    Object::Null,
                    Object::Null,
                    Object::Null,
                ]),
            );
        }
        if i > 0 {
            entry.set("Prev", Object::Reference(ids[i - 1]));
        }
        if i + 1 < ids.len() {
            entry.set("Next", Object::Reference(ids[i + 1]));
        }
        if let Some((child_first, child_last, child_visible)) =
            build_level(doc, &item.children, ids[i], pages)
        {
            entry.set("First", Object::Reference(child_first));
            entry.set("Last", Object::Reference(child_last));
            // OPEN="0" from the XML schema maps to a collapsed
            // entry, i.e. a negative /Count.
            let open = item.attributes.get("OPEN").is_none_or(|v| v.as_str() != "0");
            if open {
                entry.set("Count", Object::Integer(child_visible));
                visible += child_visible;
            } else {
                entry.set("Count", Object::Integer(-child_visible));
            }
        }
        doc.objects.insert(ids[i], Object::Dictionary(entry));
    }

    Some((ids[0], ids[ids.len() - 1], visible))
}
