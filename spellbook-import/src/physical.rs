//! Group localized printings into physical cards.
//!
//! Runs after every card, printing, and localized printing in the document
//! is stored, since a card's link group refers to other cards by name.
//!
//! - A localized printing that already has a link is left alone, so a
//!   second run creates nothing and the second half of a split card skips
//!   the group its first half already built.
//! - Alternate names are resolved in the same set and language. One that
//!   can't be found, or can't be told apart from another printing of the
//!   same name, is logged and left out of the group.
//! - The back of a three-part meld never starts a group. Each front links
//!   itself to the back instead, so the back ends up on both fronts'
//!   physical cards.

use rusqlite::Connection;
use spellbook_catalog::MeldRole;
use spellbook_db::{operations, queries};

use crate::card_import::PhysicalCandidate;
use crate::driver::ImportStats;
use crate::error::ImportError;
use crate::progress::ImportProgress;

/// Create physical cards for every candidate, in order.
pub fn link_physical_cards(
    conn: &Connection,
    candidates: &[PhysicalCandidate],
    stats: &mut ImportStats,
    progress: Option<&dyn ImportProgress>,
) -> Result<(), ImportError> {
    for (index, candidate) in candidates.iter().enumerate() {
        link_physical_card(conn, candidate, stats)?;
        if let Some(p) = progress {
            p.on_linked(index + 1, candidates.len());
        }
    }
    Ok(())
}

/// Create the physical card for one localized printing, unless it has one.
pub fn link_physical_card(
    conn: &Connection,
    candidate: &PhysicalCandidate,
    stats: &mut ImportStats,
) -> Result<(), ImportError> {
    if candidate.meld == Some(MeldRole::Back) {
        stats.meld_backs_deferred += 1;
        return Ok(());
    }

    if operations::printing_language_has_link(conn, candidate.card_printing_language_id)? {
        stats.physical_existing += 1;
        return Ok(());
    }

    let mut members = vec![candidate.card_printing_language_id];
    for alternate in link_group(candidate) {
        match resolve_alternate(conn, candidate, alternate)? {
            Alternate::Found(id) => {
                if !members.contains(&id) {
                    members.push(id);
                }
            }
            Alternate::Missing => {
                log::warn!(
                    "No {} printing of '{}' in {} to link with '{}'; leaving it out",
                    candidate.language,
                    alternate,
                    candidate.set_code,
                    candidate.card_name,
                );
                stats.links_skipped += 1;
            }
            Alternate::Ambiguous(count) => {
                log::warn!(
                    "{} {} printings of '{}' in {} could pair with '{}' #{}; leaving it out",
                    count,
                    candidate.language,
                    alternate,
                    candidate.set_code,
                    candidate.card_name,
                    candidate.collector.number,
                );
                stats.links_skipped += 1;
            }
        }
    }

    let physical_card_id = operations::insert_physical_card(conn, &candidate.layout)?;
    stats.physical_cards_created += 1;

    for id in members {
        if operations::insert_physical_card_link(conn, physical_card_id, id)? {
            stats.physical_links_created += 1;
        }
    }

    Ok(())
}

/// Names, other than the candidate's own, that share its physical card.
fn link_group(candidate: &PhysicalCandidate) -> Vec<&str> {
    if candidate.meld == Some(MeldRole::Front) {
        // names = [front, front, back]; the other front is a separate card.
        return candidate.names.get(2).map(String::as_str).into_iter().collect();
    }

    let mut group: Vec<&str> = Vec::new();
    for name in &candidate.names {
        if name != &candidate.card_name && !group.contains(&name.as_str()) {
            group.push(name);
        }
    }
    group
}

/// How an alternate name resolved against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alternate {
    Found(i64),
    Missing,
    /// Several printings matched and none could be preferred.
    Ambiguous(usize),
}

/// Find the localized printing of `name` in the candidate's set and language.
///
/// A set may hold several printings of the alternate. The one sharing the
/// candidate's collector number wins; failing that, the only one not yet on
/// a physical card.
fn resolve_alternate(
    conn: &Connection,
    candidate: &PhysicalCandidate,
    name: &str,
) -> Result<Alternate, ImportError> {
    let found = queries::printing_language_candidates(
        conn,
        name,
        candidate.set_id,
        candidate.language_id,
    )?;

    match found.as_slice() {
        [] => return Ok(Alternate::Missing),
        [only] => return Ok(Alternate::Found(only.card_printing_language_id)),
        _ => {}
    }

    let same_number: Vec<_> = found
        .iter()
        .filter(|c| c.collector_number == candidate.collector.number)
        .collect();
    if let [only] = same_number.as_slice() {
        return Ok(Alternate::Found(only.card_printing_language_id));
    }

    // Several share the number, or none do; narrow whichever pool is left.
    let pool = if same_number.is_empty() {
        found.iter().collect()
    } else {
        same_number
    };
    let mut unlinked = Vec::new();
    for c in &pool {
        if !operations::printing_language_has_link(conn, c.card_printing_language_id)? {
            unlinked.push(c.card_printing_language_id);
        }
    }
    match unlinked.as_slice() {
        [only] => Ok(Alternate::Found(*only)),
        _ => Ok(Alternate::Ambiguous(pool.len())),
    }
}
