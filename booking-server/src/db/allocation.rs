//! Table allocation
//!
//! First-fit over tables in id order: the first table whose capacity covers
//! the party and whose status is AVAILABLE wins. There is no slot model, a
//! held table is unavailable for every date until it is released.
//!
//! All functions take the table map by reference and are meant to be called
//! while the store lock is held, so a read-then-write sequence is atomic.

use std::collections::BTreeMap;

use shared::models::{DiningTable, TableId, TableStatus};
use thiserror::Error;

pub type Tables = BTreeMap<TableId, DiningTable>;

/// Allocation failures; messages are shown to users as-is
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("No tables available for this time/size.")]
    NoTableForBooking,

    #[error("No tables available for these new requirements.")]
    NoTableForChange,

    #[error("Selected table not found.")]
    TableNotFound,

    #[error("Selected table capacity is not enough.")]
    InsufficientCapacity,

    #[error("Selected table is not available.")]
    TableUnavailable,
}

/// First available table that seats `party_size`
pub fn first_fit(tables: &Tables, party_size: u32) -> Option<TableId> {
    tables
        .values()
        .find(|t| t.fits(party_size) && t.is_available())
        .map(|t| t.id)
}

/// Validate an explicitly requested table
///
/// `own` is the table the reservation already holds; it stays selectable
/// even if its status says otherwise.
pub fn choose_explicit(
    tables: &Tables,
    desired: TableId,
    party_size: u32,
    own: Option<TableId>,
) -> Result<TableId, AllocationError> {
    let table = tables.get(&desired).ok_or(AllocationError::TableNotFound)?;
    if !table.fits(party_size) {
        return Err(AllocationError::InsufficientCapacity);
    }
    if !table.is_available() && own != Some(desired) {
        return Err(AllocationError::TableUnavailable);
    }
    Ok(desired)
}

/// Mark a table RESERVED
pub fn hold(tables: &mut Tables, id: TableId) {
    if let Some(table) = tables.get_mut(&id) {
        table.status = TableStatus::Reserved;
    }
}

/// Return a table to AVAILABLE
pub fn release(tables: &mut Tables, id: TableId) {
    if let Some(table) = tables.get_mut(&id) {
        table.status = TableStatus::Available;
    }
}

/// Move a reservation's hold to a freshly chosen table
///
/// The current table is released first so `choose` can pick it again (a
/// same-size edit keeps its table). When `choose` fails the current table
/// gets its previous status back and nothing else changes.
pub fn reallocate<F>(
    tables: &mut Tables,
    current: Option<TableId>,
    choose: F,
) -> Result<TableId, AllocationError>
where
    F: FnOnce(&Tables) -> Result<TableId, AllocationError>,
{
    let previous = current.and_then(|id| tables.get(&id).map(|t| (id, t.status)));
    if let Some((id, _)) = previous {
        release(tables, id);
    }

    match choose(tables) {
        Ok(chosen) => {
            hold(tables, chosen);
            Ok(chosen)
        }
        Err(e) => {
            if let Some((id, status)) = previous {
                if let Some(table) = tables.get_mut(&id) {
                    table.status = status;
                }
            }
            Err(e)
        }
    }
}

/// Capacity of seed table `T-<index>`
///
/// Every fifth table seats 8, every third 6, every second 2, the rest 4.
pub fn seed_capacity(index: u64) -> u32 {
    if index % 5 == 0 {
        8
    } else if index % 3 == 0 {
        6
    } else if index % 2 == 0 {
        2
    } else {
        4
    }
}

/// Build the seed floor plan `T-1..=T-<count>`
pub fn seed_tables(count: u64) -> Tables {
    (1..=count)
        .map(|i| (TableId(i), DiningTable::new(TableId(i), seed_capacity(i))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(tables: &Tables, id: u64) -> TableStatus {
        tables[&TableId(id)].status
    }

    #[test]
    fn seed_layout_matches_floor_plan() {
        let tables = seed_tables(20);
        assert_eq!(tables.len(), 20);
        let caps: Vec<u32> = tables.values().map(|t| t.capacity).collect();
        assert_eq!(
            caps,
            vec![4, 2, 6, 2, 8, 6, 4, 2, 6, 8, 4, 6, 4, 2, 8, 2, 4, 6, 4, 8]
        );
        assert!(tables.values().all(|t| t.is_available()));
    }

    #[test]
    fn first_fit_picks_lowest_id_that_fits() {
        let tables = seed_tables(20);
        assert_eq!(first_fit(&tables, 1), Some(TableId(1)));
        assert_eq!(first_fit(&tables, 5), Some(TableId(3)));
        assert_eq!(first_fit(&tables, 7), Some(TableId(5)));
        assert_eq!(first_fit(&tables, 9), None);
    }

    #[test]
    fn first_fit_skips_held_tables() {
        let mut tables = seed_tables(20);
        hold(&mut tables, TableId(1));
        assert_eq!(first_fit(&tables, 4), Some(TableId(3)));
        tables.get_mut(&TableId(3)).unwrap().status = TableStatus::Cleaning;
        assert_eq!(first_fit(&tables, 4), Some(TableId(5)));
    }

    #[test]
    fn hold_and_release_flip_status() {
        let mut tables = seed_tables(3);
        hold(&mut tables, TableId(2));
        assert_eq!(status(&tables, 2), TableStatus::Reserved);
        release(&mut tables, TableId(2));
        assert_eq!(status(&tables, 2), TableStatus::Available);
        // unknown ids are ignored
        hold(&mut tables, TableId(99));
        release(&mut tables, TableId(99));
    }

    #[test]
    fn reallocate_same_size_keeps_own_table() {
        let mut tables = seed_tables(20);
        hold(&mut tables, TableId(1));
        let chosen = reallocate(&mut tables, Some(TableId(1)), |t| {
            first_fit(t, 4).ok_or(AllocationError::NoTableForChange)
        })
        .unwrap();
        assert_eq!(chosen, TableId(1));
        assert_eq!(status(&tables, 1), TableStatus::Reserved);
    }

    #[test]
    fn reallocate_moves_hold_when_party_grows() {
        let mut tables = seed_tables(20);
        hold(&mut tables, TableId(1));
        let chosen = reallocate(&mut tables, Some(TableId(1)), |t| {
            first_fit(t, 8).ok_or(AllocationError::NoTableForChange)
        })
        .unwrap();
        assert_eq!(chosen, TableId(5));
        assert_eq!(status(&tables, 1), TableStatus::Available);
        assert_eq!(status(&tables, 5), TableStatus::Reserved);
    }

    #[test]
    fn reallocate_failure_restores_previous_status() {
        let mut tables = seed_tables(20);
        tables.get_mut(&TableId(1)).unwrap().status = TableStatus::Occupied;
        let err = reallocate(&mut tables, Some(TableId(1)), |t| {
            first_fit(t, 12).ok_or(AllocationError::NoTableForChange)
        })
        .unwrap_err();
        assert_eq!(err, AllocationError::NoTableForChange);
        assert_eq!(status(&tables, 1), TableStatus::Occupied);
    }

    #[test]
    fn explicit_choice_is_validated() {
        let mut tables = seed_tables(20);
        hold(&mut tables, TableId(3));
        assert_eq!(
            choose_explicit(&tables, TableId(42), 2, None),
            Err(AllocationError::TableNotFound)
        );
        assert_eq!(
            choose_explicit(&tables, TableId(2), 4, None),
            Err(AllocationError::InsufficientCapacity)
        );
        assert_eq!(
            choose_explicit(&tables, TableId(3), 4, None),
            Err(AllocationError::TableUnavailable)
        );
        assert_eq!(choose_explicit(&tables, TableId(3), 4, Some(TableId(3))), Ok(TableId(3)));
        assert_eq!(choose_explicit(&tables, TableId(5), 8, None), Ok(TableId(5)));
    }
}
