//! Round-trip and schema tests for the `ITEM` XML format.

use lesezeichen::core::{Bookmark, BookmarkError, total_count};
use lesezeichen::xml::{from_xml_string, read_xml_file, to_xml_string, write_xml_file};

fn sample_forest() -> Vec<Bookmark> {
    let mut ch1 = Bookmark::new("Einleitung", Some(0), 1);
    let mut sec = Bookmark::new("Motivation", Some(1), 2);
    sec.children.push(Bookmark::new("Historie", Some(2), 3));
    ch1.children.push(sec);
    ch1.children.push(Bookmark::new("Aufbau", Some(4), 2));
    ch1.attributes.insert("OPEN".into(), "1".into());
    ch1.attributes
        .insert("COLOR".into(), "4278190080".into());

    let mut ch2 = Bookmark::new("Grundlagen", Some(7), 1);
    ch2.attributes
        .insert("PARMA".into(), "0.000000,0.000000,0.000000,0.000000".into());

    vec![ch1, ch2]
}

#[test]
fn serialize_parse_round_trip_is_identity() {
    let forest = sample_forest();
    let xml = to_xml_string(&forest).unwrap();
    let back = from_xml_string(&xml).unwrap();
    assert_eq!(back, forest);
}

#[test]
fn double_round_trip_is_stable() {
    let forest = sample_forest();
    let once = to_xml_string(&forest).unwrap();
    let twice = to_xml_string(&from_xml_string(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn sibling_order_is_preserved() {
    let forest: Vec<Bookmark> = (0..8)
        .map(|i| Bookmark::new(format!("Kapitel {i}"), Some(i), 1))
        .collect();
    let back = from_xml_string(&to_xml_string(&forest).unwrap()).unwrap();
    let titles: Vec<&str> = back.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(
        titles,
        (0..8).map(|i| format!("Kapitel {i}")).collect::<Vec<_>>()
    );
}

#[test]
fn unknown_attribute_survives_parse_serialize_cycle() {
    let xml = r#"<BOOKMARKS>
        <ITEM INDENT="1" PAGE="0" NAME="Ch1" ZOOMMODE="0" FUTUREFIELD="x y"/>
    </BOOKMARKS>"#;

    let forest = from_xml_string(xml).unwrap();
    let reserialized = to_xml_string(&forest).unwrap();
    assert!(reserialized.contains(r#"ZOOMMODE="0""#));
    assert!(reserialized.contains(r#"FUTUREFIELD="x y""#));

    let again = from_xml_string(&reserialized).unwrap();
    assert_eq!(again, forest);
}

#[test]
fn absent_optional_attributes_are_not_synthesized() {
    let xml = r#"<BOOKMARKS><ITEM INDENT="1" PAGE="0" NAME="Ch1"/></BOOKMARKS>"#;
    let reserialized = to_xml_string(&from_xml_string(xml).unwrap()).unwrap();
    for key in ["OPEN", "FONTSTYLE", "COLOR", "ZOOMMODE", "PARMA"] {
        assert!(!reserialized.contains(key), "synthesized {key}");
    }
}

#[test]
fn flat_and_nested_forms_parse_to_the_same_forest() {
    let flat = r#"<BOOKMARKS>
        <ITEM INDENT="1" PAGE="0" NAME="Ch1"/>
        <ITEM INDENT="2" PAGE="1" NAME="1.1"/>
        <ITEM INDENT="1" PAGE="2" NAME="Ch2"/>
    </BOOKMARKS>"#;
    let nested = r#"<BOOKMARKS>
        <ITEM INDENT="1" PAGE="0" NAME="Ch1">
            <ITEM INDENT="2" PAGE="1" NAME="1.1"/>
        </ITEM>
        <ITEM INDENT="1" PAGE="2" NAME="Ch2"/>
    </BOOKMARKS>"#;

    assert_eq!(from_xml_string(flat).unwrap(), from_xml_string(nested).unwrap());
}

#[test]
fn indent_jump_back_to_top_level_recovers() {
    let xml = r#"<BOOKMARKS>
        <ITEM INDENT="1" PAGE="0" NAME="Ch1"/>
        <ITEM INDENT="2" PAGE="1" NAME="1.1"/>
        <ITEM INDENT="3" PAGE="2" NAME="1.1.1"/>
        <ITEM INDENT="1" PAGE="3" NAME="Ch2"/>
    </BOOKMARKS>"#;

    let forest = from_xml_string(xml).unwrap();
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[1].title, "Ch2");
    assert_eq!(forest[1].level, 1);
    assert_eq!(total_count(&forest), 4);
}

#[test]
fn special_characters_round_trip() {
    let forest = vec![
        Bookmark::new("Q&A <\"quoted\">", Some(0), 1),
        Bookmark::new("第1章 绪论", Some(1), 1),
    ];
    let back = from_xml_string(&to_xml_string(&forest).unwrap()).unwrap();
    assert_eq!(back, forest);
}

#[test]
fn file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.xml");

    let forest = sample_forest();
    write_xml_file(&forest, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));

    assert_eq!(read_xml_file(&path).unwrap(), forest);
}

#[test]
fn missing_xml_file_is_a_file_access_error() {
    let err = read_xml_file(std::path::Path::new("/no/such/file.xml")).unwrap_err();
    assert!(matches!(err, BookmarkError::FileAccess { .. }));
}

#[test]
fn empty_forest_serializes_to_header_only_document() {
    let xml = to_xml_string(&[]).unwrap();
    assert!(xml.contains("<BOOKMARKS>"));
    assert!(xml.contains("<INFO"));
    assert!(!xml.contains("<ITEM"));
    assert!(from_xml_string(&xml).unwrap().is_empty());
}
