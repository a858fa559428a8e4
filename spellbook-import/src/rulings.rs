//! Ruling rebuild.
//!
//! Nothing references a ruling, so instead of reconciling them the table is
//! emptied and refilled from the source on every run.

use rusqlite::Connection;
use spellbook_catalog::SourceSet;
use spellbook_db::operations;

use crate::driver::ImportStats;
use crate::error::ImportError;

/// Empty the rulings table and reinsert every ruling in `sets`.
///
/// Identical (date, text, card) rulings, which repeat across every printing
/// of a card, collapse to one row.
pub fn rebuild_rulings(
    conn: &Connection,
    sets: &[(&str, &SourceSet)],
    stats: &mut ImportStats,
) -> Result<(), ImportError> {
    stats.rulings_cleared = operations::clear_rulings(conn)? as u64;

    for (_, set) in sets {
        for record in set.cards.iter().filter(|r| !r.rulings.is_empty()) {
            let card_id = operations::find_card(conn, &record.name)?
                .ok_or_else(|| ImportError::missing("card", &record.name))?;

            for ruling in &record.rulings {
                if operations::insert_ruling(conn, card_id, ruling.date, &ruling.text)? {
                    stats.rulings_inserted += 1;
                } else {
                    stats.rulings_duplicate += 1;
                }
            }
        }
    }

    Ok(())
}
