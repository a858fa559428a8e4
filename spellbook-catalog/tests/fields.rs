use spellbook_catalog::*;

fn record(name: &str) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        artist: Some("Rebecca Guay".to_string()),
        rarity: Some("Common".to_string()),
        ..Default::default()
    }
}

// ── Colors ──────────────────────────────────────────────────────────────────

#[test]
fn color_mask_single_colors() {
    assert_eq!(color_mask(&["White"]).unwrap(), 1);
    assert_eq!(color_mask(&["Blue"]).unwrap(), 2);
    assert_eq!(color_mask(&["Black"]).unwrap(), 4);
    assert_eq!(color_mask(&["Red"]).unwrap(), 8);
    assert_eq!(color_mask(&["Green"]).unwrap(), 16);
}

#[test]
fn color_mask_ignores_order() {
    assert_eq!(color_mask(&["red", "white"]).unwrap(), 9);
    assert_eq!(color_mask(&["white", "red"]).unwrap(), 9);
}

#[test]
fn color_mask_is_case_insensitive() {
    assert_eq!(color_mask(&["GREEN", "bLuE"]).unwrap(), 18);
}

#[test]
fn color_mask_accepts_identity_symbols() {
    assert_eq!(color_mask(&["W", "U", "B", "R", "G"]).unwrap(), 31);
}

#[test]
fn color_mask_empty_is_colorless() {
    let none: [&str; 0] = [];
    assert_eq!(color_mask(&none).unwrap(), 0);
}

#[test]
fn color_mask_rejects_unknown_color() {
    let err = color_mask(&["White", "Purple"]).unwrap_err();
    assert_eq!(err, FieldError::UnknownColor("Purple".to_string()));
}

#[test]
fn color_count_is_popcount() {
    assert_eq!(color_count(0), 0);
    assert_eq!(color_count(9), 2);
    assert_eq!(color_count(31), 5);
}

// ── Numbers ─────────────────────────────────────────────────────────────────

#[test]
fn leading_number_plain() {
    assert_eq!(parse_leading_number(Some("3")), 3.0);
    assert_eq!(parse_leading_number(Some("12")), 12.0);
}

#[test]
fn leading_number_takes_prefix() {
    assert_eq!(parse_leading_number(Some("1+*")), 1.0);
    assert_eq!(parse_leading_number(Some("2.5")), 2.5);
}

#[test]
fn leading_number_unparsable_is_zero() {
    assert_eq!(parse_leading_number(Some("*")), 0.0);
    assert_eq!(parse_leading_number(Some("X")), 0.0);
    assert_eq!(parse_leading_number(Some("1.2.3")), 0.0);
    assert_eq!(parse_leading_number(None), 0.0);
}

// ── Collector numbers ───────────────────────────────────────────────────────

#[test]
fn collector_number_suffix_letter() {
    let c = split_collector_number(Some("10a"), 99);
    assert_eq!(c.number, 10);
    assert_eq!(c.letter.as_deref(), Some("a"));
}

#[test]
fn collector_number_prefix_letter() {
    let c = split_collector_number(Some("a10"), 99);
    assert_eq!(c.number, 10);
    assert_eq!(c.letter.as_deref(), Some("a"));
}

#[test]
fn collector_number_without_letter() {
    let c = split_collector_number(Some("10"), 99);
    assert_eq!(c.number, 10);
    assert_eq!(c.letter, None);
}

#[test]
fn collector_number_prefix_wins_over_suffix() {
    let c = split_collector_number(Some("p12b"), 99);
    assert_eq!(c.number, 12);
    assert_eq!(c.letter.as_deref(), Some("p"));
}

#[test]
fn collector_number_falls_back_to_counter() {
    assert_eq!(
        split_collector_number(None, 3),
        CollectorNumber {
            number: 3,
            letter: None
        }
    );
    assert_eq!(split_collector_number(Some("★"), 7).number, 7);
    assert_eq!(split_collector_number(Some("10-a"), 4).number, 4);
    assert_eq!(split_collector_number(Some(""), 5).number, 5);
}

// ── Rarity ──────────────────────────────────────────────────────────────────

#[test]
fn timeshifted_overrides_rarity() {
    assert_eq!(resolve_rarity("Rare", true), "Timeshifted");
    assert_eq!(resolve_rarity("Rare", false), "Rare");
}

// ── Layout ──────────────────────────────────────────────────────────────────

fn meld(name: &str) -> CardRecord {
    CardRecord {
        layout: Some("meld".to_string()),
        names: vec![
            "Bruna, the Fading Light".to_string(),
            "Gisela, the Broken Blade".to_string(),
            "Brisela, Voice of Nightmares".to_string(),
        ],
        ..record(name)
    }
}

#[test]
fn meld_roles() {
    assert_eq!(meld_role(&meld("Bruna, the Fading Light")), Some(MeldRole::Front));
    assert_eq!(meld_role(&meld("Gisela, the Broken Blade")), Some(MeldRole::Front));
    assert_eq!(
        meld_role(&meld("Brisela, Voice of Nightmares")),
        Some(MeldRole::Back)
    );
    assert_eq!(meld_role(&record("Shock")), None);
}

#[test]
fn meld_back_gets_distinct_layout() {
    assert_eq!(effective_layout(&meld("Brisela, Voice of Nightmares")), "meld-back");
    assert_eq!(effective_layout(&meld("Bruna, the Fading Light")), "meld");
}

#[test]
fn two_name_meld_is_not_special() {
    let mut r = meld("Bruna, the Fading Light");
    r.names.truncate(2);
    assert_eq!(meld_role(&r), None);
    assert_eq!(effective_layout(&r), "meld");
}

#[test]
fn layout_defaults_to_normal() {
    assert_eq!(effective_layout(&record("Shock")), "normal");
}

// ── Bundles ─────────────────────────────────────────────────────────────────

#[test]
fn extract_card_derives_all_attributes() {
    let r = CardRecord {
        mana_cost: Some("{2}{R}{W}".to_string()),
        cmc: Some(4.0),
        colors: vec!["Red".to_string(), "White".to_string()],
        color_identity: vec!["R".to_string(), "W".to_string()],
        types: vec!["Artifact".to_string(), "Creature".to_string()],
        subtypes: vec!["Human".to_string(), "Soldier".to_string()],
        power: Some("2".to_string()),
        toughness: Some("1+*".to_string()),
        text: Some("First strike".to_string()),
        ..record("Test Soldier")
    };

    let attrs = extract_card(&r).unwrap();
    assert_eq!(attrs.name, "Test Soldier");
    assert_eq!(attrs.cmc, 4.0);
    assert_eq!(attrs.colors, 9);
    assert_eq!(attrs.color_identity, 9);
    assert_eq!(attrs.num_colors, 2);
    assert_eq!(attrs.type_line, "Artifact Creature");
    assert_eq!(attrs.subtype, "Human Soldier");
    assert_eq!(attrs.num_power, 2.0);
    assert_eq!(attrs.num_toughness, 1.0);
    assert_eq!(attrs.loyalty, None);
    assert_eq!(attrs.num_loyalty, 0.0);
    assert_eq!(attrs.layout, "normal");
}

#[test]
fn extract_card_defaults_cmc_to_zero() {
    let attrs = extract_card(&record("Land")).unwrap();
    assert_eq!(attrs.cmc, 0.0);
    assert_eq!(attrs.colors, 0);
}

#[test]
fn extract_card_fails_on_unknown_color() {
    let r = CardRecord {
        colors: vec!["Pink".to_string()],
        ..record("Odd")
    };
    assert_eq!(
        extract_card(&r).unwrap_err(),
        FieldError::UnknownColor("Pink".to_string())
    );
}

#[test]
fn extract_printing_requires_artist() {
    let r = CardRecord {
        artist: None,
        ..record("Anonymous")
    };
    assert_eq!(
        extract_printing(&r, 1).unwrap_err(),
        FieldError::MissingField("artist")
    );
}

#[test]
fn extract_printing_applies_overrides() {
    let r = CardRecord {
        number: Some("21b".to_string()),
        rarity: Some("Rare".to_string()),
        timeshifted: true,
        flavor: Some("Some flavor.".to_string()),
        ..record("Shifted")
    };
    let p = extract_printing(&r, 8).unwrap();
    assert_eq!(p.collector.number, 21);
    assert_eq!(p.collector.letter.as_deref(), Some("b"));
    assert_eq!(p.rarity, "Timeshifted");
    assert_eq!(p.artist, "Rebecca Guay");
    assert_eq!(p.flavor_text.as_deref(), Some("Some flavor."));
}
