//! Import progress reporting.
//!
//! The driver reports the start and end of each phase, every set as its card
//! records are reconciled, and a running count while physical cards are
//! linked.

use std::fmt;

use crate::driver::ImportStats;

/// The phases of an import run, in the order they execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Sets,
    Cards,
    PhysicalCards,
    Rulings,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sets => "sets",
            Self::Cards => "card records",
            Self::PhysicalCards => "physical cards",
            Self::Rulings => "rulings",
        })
    }
}

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a phase starts. `total` counts what the phase will walk:
    /// sets, card records, localized printings, or sets again for rulings.
    fn on_phase_start(&self, phase: ImportPhase, total: usize);

    /// Called before a set's card records are reconciled.
    fn on_set(&self, current: usize, total: usize, code: &str, name: &str, records: usize);

    /// Called after each localized printing is considered for a physical card.
    fn on_linked(&self, current: usize, total: usize);

    /// Called when a phase has committed, with the counters so far.
    fn on_phase_done(&self, phase: ImportPhase, stats: &ImportStats);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase_start(&self, _phase: ImportPhase, _total: usize) {}
    fn on_set(&self, _current: usize, _total: usize, _code: &str, _name: &str, _records: usize) {}
    fn on_linked(&self, _current: usize, _total: usize) {}
    fn on_phase_done(&self, _phase: ImportPhase, _stats: &ImportStats) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_phase_start(&self, phase: ImportPhase, total: usize) {
        match phase {
            ImportPhase::PhysicalCards => {
                log::info!("Linking {} localized printings into physical cards", total)
            }
            ImportPhase::Rulings => log::info!("Rebuilding rulings for {} sets", total),
            _ => log::info!("Importing {} {}", total, phase),
        }
    }

    fn on_set(&self, current: usize, total: usize, code: &str, name: &str, records: usize) {
        log::info!("  [{}/{}] {} {} ({} cards)", current, total, code, name, records);
    }

    fn on_linked(&self, current: usize, total: usize) {
        if current % 5000 == 0 || current == total {
            log::info!("  [{}/{}] localized printings linked", current, total);
        }
    }

    fn on_phase_done(&self, phase: ImportPhase, stats: &ImportStats) {
        match phase {
            ImportPhase::Sets => log::debug!(
                "{} sets stored, {} with a block",
                stats.sets_imported,
                stats.blocks_seen
            ),
            ImportPhase::Cards => log::debug!(
                "{} cards, {} printings, {} localized printings created",
                stats.cards_created,
                stats.printings_created,
                stats.languages_created
            ),
            ImportPhase::PhysicalCards => log::debug!(
                "{} physical cards created, {} alternate names skipped",
                stats.physical_cards_created,
                stats.links_skipped
            ),
            ImportPhase::Rulings => log::debug!(
                "{} rulings cleared, {} inserted",
                stats.rulings_cleared,
                stats.rulings_inserted
            ),
        }
    }
}
