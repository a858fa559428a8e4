use std::io::Write;

use chrono::NaiveDate;
use spellbook_catalog::*;

const SAMPLE: &str = r#"{
    "NEW": {
        "name": "Newer Set",
        "releaseDate": "2020-02-01",
        "block": "Shared",
        "cards": []
    },
    "OLD": {
        "name": "Older Set",
        "releaseDate": "2020-01-01",
        "block": "Shared",
        "magicCardsInfoCode": "old",
        "cards": [
            {
                "name": "Numbered Bear",
                "manaCost": "{1}{G}",
                "cmc": 2,
                "colors": ["Green"],
                "colorIdentity": ["G"],
                "types": ["Creature"],
                "subtypes": ["Bear"],
                "power": "2",
                "toughness": 2,
                "number": "12a",
                "artist": "Someone",
                "rarity": "Common",
                "multiverseid": 1234,
                "unknownField": {"ignored": true},
                "foreignNames": [
                    {"language": "German", "name": "Nummerierter Bär", "multiverseid": 5678},
                    {"language": "French", "name": "Ours numéroté"}
                ],
                "rulings": [
                    {"date": "2019-12-01", "text": "It's a bear."}
                ]
            },
            {
                "name": "Planeswalker",
                "loyalty": 4,
                "artist": "Someone Else",
                "rarity": "Mythic Rare"
            }
        ]
    }
}"#;

#[test]
fn parses_sets_and_cards() {
    let doc = SourceDocument::from_json(SAMPLE).unwrap();
    assert_eq!(doc.sets.len(), 2);
    assert_eq!(doc.card_count(), 2);

    let old = &doc.sets["OLD"];
    assert_eq!(old.name, "Older Set");
    assert_eq!(old.release_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(old.block.as_deref(), Some("Shared"));
    assert_eq!(old.magic_cards_info_code.as_deref(), Some("old"));
    assert!(doc.sets["NEW"].magic_cards_info_code.is_none());
}

#[test]
fn parses_card_fields() {
    let doc = SourceDocument::from_json(SAMPLE).unwrap();
    let bear = &doc.sets["OLD"].cards[0];
    assert_eq!(bear.name, "Numbered Bear");
    assert_eq!(bear.cmc, Some(2.0));
    assert_eq!(bear.power.as_deref(), Some("2"));
    assert_eq!(bear.toughness.as_deref(), Some("2"));
    assert_eq!(bear.number.as_deref(), Some("12a"));
    assert_eq!(bear.multiverse_id, Some(1234));
    assert_eq!(bear.foreign_names.len(), 2);
    assert_eq!(bear.foreign_names[0].multiverse_id, Some(5678));
    assert_eq!(bear.foreign_names[1].multiverse_id, None);
    assert_eq!(bear.rulings.len(), 1);
    assert!(!bear.timeshifted);
}

#[test]
fn numeric_loyalty_becomes_text() {
    let doc = SourceDocument::from_json(SAMPLE).unwrap();
    let walker = &doc.sets["OLD"].cards[1];
    assert_eq!(walker.loyalty.as_deref(), Some("4"));
    assert!(walker.names.is_empty());
    assert!(walker.layout.is_none());
}

#[test]
fn sorted_sets_follow_release_date() {
    let doc = SourceDocument::from_json(SAMPLE).unwrap();
    let codes: Vec<&str> = doc.sorted_sets().iter().map(|(c, _)| *c).collect();
    assert_eq!(codes, vec!["OLD", "NEW"]);
}

#[test]
fn sorted_sets_break_ties_by_code() {
    let json = r#"{
        "ZZZ": {"name": "Z", "releaseDate": "2001-01-01"},
        "AAA": {"name": "A", "releaseDate": "2001-01-01"},
        "MMM": {"name": "M", "releaseDate": "2000-01-01"}
    }"#;
    let doc = SourceDocument::from_json(json).unwrap();
    let codes: Vec<&str> = doc.sorted_sets().iter().map(|(c, _)| *c).collect();
    assert_eq!(codes, vec!["MMM", "AAA", "ZZZ"]);
}

#[test]
fn malformed_date_is_rejected() {
    let json = r#"{"BAD": {"name": "Bad", "releaseDate": "sometime"}}"#;
    assert!(matches!(
        SourceDocument::from_json(json),
        Err(SourceError::Json(_))
    ));
}

#[test]
fn load_document_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let doc = load_document(file.path()).unwrap();
    assert_eq!(doc.sets.len(), 2);
}

#[test]
fn load_document_missing_file() {
    let err = load_document(std::path::Path::new("/nonexistent/AllSets.json")).unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
}
