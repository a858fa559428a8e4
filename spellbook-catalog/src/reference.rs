//! Static reference tables seeded into every database.

/// Rarity name forced onto every printing flagged as timeshifted.
pub const TIMESHIFTED: &str = "Timeshifted";

/// Language every printing is created in, using the record's primary name.
pub const ENGLISH: &str = "English";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rarity {
    pub symbol: &'static str,
    pub name: &'static str,
    pub display_order: i32,
}

pub const RARITIES: &[Rarity] = &[
    Rarity { symbol: "L", name: "Basic Land", display_order: 10 },
    Rarity { symbol: "C", name: "Common", display_order: 20 },
    Rarity { symbol: "U", name: "Uncommon", display_order: 30 },
    Rarity { symbol: "R", name: "Rare", display_order: 40 },
    Rarity { symbol: "M", name: "Mythic Rare", display_order: 50 },
    Rarity { symbol: "T", name: TIMESHIFTED, display_order: 60 },
    Rarity { symbol: "S", name: "Special", display_order: 70 },
];

/// A language name as it appears in the source, and the short code the
/// external card catalog uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { name: ENGLISH, code: "en" },
    Language { name: "French", code: "fr" },
    Language { name: "German", code: "de" },
    Language { name: "Italian", code: "it" },
    Language { name: "Spanish", code: "es" },
    Language { name: "Portuguese", code: "pt" },
    Language { name: "Portuguese (Brazil)", code: "pt" },
    Language { name: "Japanese", code: "jp" },
    Language { name: "Korean", code: "ko" },
    Language { name: "Russian", code: "ru" },
    Language { name: "Chinese Simplified", code: "cn" },
    Language { name: "Chinese Traditional", code: "tw" },
];
