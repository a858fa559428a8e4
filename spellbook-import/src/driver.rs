//! Batch driver: run every reconciliation phase over a source document.
//!
//! Phases run in a fixed order, each in its own transaction:
//!
//! 1. reference data (rarities, languages)
//! 2. blocks and sets, in release-date order
//! 3. cards, printings, and localized printings, record by record
//! 4. physical cards, for the localized printings recorded in phase 3
//! 5. rulings, truncated and rebuilt
//!
//! Phase 4 only starts once phase 3 has committed for the whole document.
//! Nothing is rolled back across phases; a failed run is fixed and re-run,
//! and the idempotent steps converge.

use rusqlite::Connection;
use spellbook_catalog::types::ImportLog;
use spellbook_catalog::{SourceDocument, SourceSet};
use spellbook_db::operations;

use crate::card_import::{SetContext, import_card};
use crate::error::ImportError;
use crate::physical::link_physical_cards;
use crate::progress::{ImportPhase, ImportProgress};
use crate::rulings::rebuild_rulings;

/// Options controlling an import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Restrict the run to these set codes, or empty for all.
    ///
    /// The ruling rebuild only sees the selected sets, so a filtered run
    /// leaves rulings for just those sets' cards.
    pub set_codes: Vec<String>,
    pub link_physical_cards: bool,
    pub rebuild_rulings: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            set_codes: Vec::new(),
            link_physical_cards: true,
            rebuild_rulings: true,
        }
    }
}

/// Statistics from one import run.
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub total_records: u64,
    pub sets_imported: u64,
    pub blocks_seen: u64,
    pub cards_created: u64,
    pub cards_updated: u64,
    pub printings_created: u64,
    pub printings_updated: u64,
    pub languages_created: u64,
    pub languages_existing: u64,
    pub physical_cards_created: u64,
    pub physical_links_created: u64,
    pub physical_existing: u64,
    pub meld_backs_deferred: u64,
    pub links_skipped: u64,
    pub rulings_cleared: u64,
    pub rulings_inserted: u64,
    pub rulings_duplicate: u64,
}

impl ImportStats {
    pub fn records_created(&self) -> u64 {
        self.cards_created
            + self.printings_created
            + self.languages_created
            + self.physical_cards_created
    }

    pub fn records_updated(&self) -> u64 {
        self.cards_updated + self.printings_updated
    }
}

/// Import a parsed source document into the catalog database.
///
/// The optional `progress` callback hears about each phase, each set, and
/// each localized printing the physical-card pass considers.
pub fn import_document(
    conn: &Connection,
    document: &SourceDocument,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats::default();

    let sets: Vec<(&str, &SourceSet)> = document
        .sorted_sets()
        .into_iter()
        .filter(|(code, _)| {
            options.set_codes.is_empty() || options.set_codes.iter().any(|c| c == code)
        })
        .collect();
    stats.total_records = sets.iter().map(|(_, s)| s.cards.len() as u64).sum();

    let tx = conn.unchecked_transaction()?;
    let seeded = operations::seed_reference_data(&tx)?;
    tx.commit()?;
    if seeded.rarities + seeded.languages > 0 {
        log::debug!(
            "Seeded {} rarities and {} languages",
            seeded.rarities,
            seeded.languages
        );
    }

    report_start(progress, ImportPhase::Sets, sets.len());
    let tx = conn.unchecked_transaction()?;
    let contexts = import_sets(&tx, &sets, &mut stats)?;
    tx.commit()?;
    report_done(progress, ImportPhase::Sets, &stats);

    report_start(progress, ImportPhase::Cards, stats.total_records as usize);
    let mut candidates = Vec::new();
    for (set_index, ((code, set), context)) in sets.iter().zip(&contexts).enumerate() {
        if let Some(p) = progress {
            p.on_set(set_index + 1, sets.len(), code, &set.name, set.cards.len());
        }
        let tx = conn.unchecked_transaction()?;
        // The counter counts every record, numbered or not.
        for (index, record) in set.cards.iter().enumerate() {
            let fallback_number = index as u32 + 1;
            candidates.extend(import_card(&tx, context, record, fallback_number, &mut stats)?);
        }
        tx.commit()?;
    }
    report_done(progress, ImportPhase::Cards, &stats);

    if options.link_physical_cards {
        report_start(progress, ImportPhase::PhysicalCards, candidates.len());
        let tx = conn.unchecked_transaction()?;
        link_physical_cards(&tx, &candidates, &mut stats, progress)?;
        tx.commit()?;
        report_done(progress, ImportPhase::PhysicalCards, &stats);
    }

    if options.rebuild_rulings {
        report_start(progress, ImportPhase::Rulings, sets.len());
        let tx = conn.unchecked_transaction()?;
        rebuild_rulings(&tx, &sets, &mut stats)?;
        tx.commit()?;
        report_done(progress, ImportPhase::Rulings, &stats);
    }

    Ok(stats)
}

/// Upsert every block and set, returning each set's stored id in order.
pub fn import_sets(
    conn: &Connection,
    sets: &[(&str, &SourceSet)],
    stats: &mut ImportStats,
) -> Result<Vec<SetContext>, ImportError> {
    let mut contexts = Vec::with_capacity(sets.len());

    for (code, set) in sets {
        let block_id = match &set.block {
            Some(block) => {
                stats.blocks_seen += 1;
                Some(operations::upsert_block(conn, block, set.release_date)?)
            }
            None => None,
        };

        let id = operations::upsert_set(
            conn,
            code,
            &set.name,
            set.release_date,
            block_id,
            set.magic_cards_info_code.as_deref(),
        )?;
        stats.sets_imported += 1;

        contexts.push(SetContext {
            id,
            code: code.to_string(),
        });
    }

    Ok(contexts)
}

/// Record an import run in the import_log table.
pub fn log_import(
    conn: &Connection,
    source_name: &str,
    stats: &ImportStats,
) -> Result<i64, ImportError> {
    let entry = ImportLog {
        id: 0,
        source_name: source_name.to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        records_created: stats.records_created() as i64,
        records_updated: stats.records_updated() as i64,
        records_unchanged: (stats.languages_existing + stats.physical_existing) as i64,
        links_skipped: stats.links_skipped as i64,
    };
    Ok(operations::insert_import_log(conn, &entry)?)
}

fn report_start(progress: Option<&dyn ImportProgress>, phase: ImportPhase, total: usize) {
    if let Some(p) = progress {
        p.on_phase_start(phase, total);
    }
}

fn report_done(progress: Option<&dyn ImportProgress>, phase: ImportPhase, stats: &ImportStats) {
    if let Some(p) = progress {
        p.on_phase_done(phase, stats);
    }
}
