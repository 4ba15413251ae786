//! Seat map and seat selection stage.
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::storage::BookingStore;

pub const ROWS: u8 = 6;
pub const COLUMNS: u8 = 9;
/// Columns replaced by a narrow aisle (staircase) spacer.
pub const AISLE_COLUMNS: [u8; 2] = [3, 6];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatCell {
    Seat { label: String, index: usize },
    Aisle,
}

/// Row-major seat grid with aisle spacers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    rows: Vec<Vec<SeatCell>>,
}

impl Default for SeatMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl SeatMap {
    /// The auditorium layout: 6 rows × 9 columns, aisles at columns 3 and 6.
    #[must_use]
    pub fn standard() -> Self {
        let rows = (0..ROWS)
            .map(|r| {
                (0..COLUMNS)
                    .map(|c| {
                        if AISLE_COLUMNS.contains(&c) {
                            SeatCell::Aisle
                        } else {
                            SeatCell::Seat {
                                label: seat_label(r, c),
                                index: usize::from(r) * usize::from(COLUMNS) + usize::from(c),
                            }
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<SeatCell>] {
        &self.rows
    }

    /// Grid position of a seat label, if it is a real seat.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.rows.iter().flatten().find_map(|cell| match cell {
            SeatCell::Seat { label: l, index } if l == label => Some(*index),
            _ => None,
        })
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, SeatCell::Seat { .. }))
            .count()
    }
}

/// `1A`, `3F`, ... from zero-based row and column.
#[must_use]
pub fn seat_label(row: u8, column: u8) -> String {
    format!("{}{}", row + 1, char::from(b'A' + column))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Selecting would exceed the ticket count.
    Blocked,
}

/// Interactive seat selection for a fixed number of tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSelection {
    map: SeatMap,
    desired: u32,
    selected: Vec<usize>,
}

impl SeatSelection {
    #[must_use]
    pub fn new(map: SeatMap, desired: u32) -> Self {
        Self {
            map,
            desired,
            selected: Vec::new(),
        }
    }

    /// Desired count comes from the quantity stage; 1 when nothing was stored.
    #[must_use]
    pub fn load(store: BookingStore<'_>) -> Self {
        let desired = match store.ticket_qty() {
            0 => 1,
            n => n,
        };
        Self::new(SeatMap::standard(), desired)
    }

    #[must_use]
    pub const fn desired(&self) -> u32 {
        self.desired
    }

    #[must_use]
    pub const fn map(&self) -> &SeatMap {
        &self.map
    }

    #[must_use]
    pub fn is_selected(&self, label: &str) -> bool {
        self.map
            .index_of(label)
            .is_some_and(|idx| self.selected.contains(&idx))
    }

    #[must_use]
    pub fn selected_count(&self) -> u32 {
        u32::try_from(self.selected.len()).unwrap_or(u32::MAX)
    }

    /// Toggle a seat. Deselection always succeeds; selection is blocked once
    /// the desired count is reached.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownSeat`] for labels not on the map.
    pub fn toggle(&mut self, label: &str) -> Result<ToggleOutcome, BookingError> {
        let idx = self
            .map
            .index_of(label)
            .ok_or_else(|| BookingError::UnknownSeat(label.to_string()))?;
        if let Some(pos) = self.selected.iter().position(|&s| s == idx) {
            self.selected.remove(pos);
            return Ok(ToggleOutcome::Deselected);
        }
        if self.selected_count() >= self.desired {
            return Ok(ToggleOutcome::Blocked);
        }
        self.selected.push(idx);
        Ok(ToggleOutcome::Selected)
    }

    /// Selected labels in seat-map order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut ordered = self.selected.clone();
        ordered.sort_unstable();
        ordered
            .into_iter()
            .filter_map(|idx| {
                self.map.rows.iter().flatten().find_map(|cell| match cell {
                    SeatCell::Seat { label, index } if *index == idx => Some(label.clone()),
                    _ => None,
                })
            })
            .collect()
    }

    /// Confirm the selection and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::SeatCountMismatch`] unless exactly the desired
    /// number of seats is selected; nothing is persisted in that case.
    pub fn confirm(&self, store: BookingStore<'_>) -> Result<Vec<String>, BookingError> {
        let selected = self.selected_count();
        if selected != self.desired {
            return Err(BookingError::SeatCountMismatch {
                expected: self.desired,
                selected,
            });
        }
        let labels = self.labels();
        store.set_seats(&labels);
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    #[test]
    fn standard_map_replaces_aisle_columns() {
        let map = SeatMap::standard();
        assert_eq!(map.rows().len(), 6);
        assert_eq!(map.seat_count(), 42);
        assert!(map.index_of("1A").is_some());
        assert!(map.index_of("1D").is_none());
        assert!(map.index_of("6I").is_some());
        assert!(map.index_of("7A").is_none());
        assert_eq!(map.rows()[0][3], SeatCell::Aisle);
    }

    #[test]
    fn selection_is_capped_but_deselection_always_allowed() {
        let mut sel = SeatSelection::new(SeatMap::standard(), 2);
        assert_eq!(sel.toggle("1A"), Ok(ToggleOutcome::Selected));
        assert_eq!(sel.toggle("1B"), Ok(ToggleOutcome::Selected));
        assert_eq!(sel.toggle("1C"), Ok(ToggleOutcome::Blocked));
        assert_eq!(sel.toggle("1A"), Ok(ToggleOutcome::Deselected));
        assert_eq!(sel.toggle("1C"), Ok(ToggleOutcome::Selected));
        assert_eq!(sel.selected_count(), 2);
        assert!(matches!(sel.toggle("1D"), Err(BookingError::UnknownSeat(_))));
    }

    #[test]
    fn confirm_rejects_wrong_count_without_persisting() {
        let kv = MemoryStore::with_entries([(keys::TICKET_QTY, "2")]);
        let mut sel = SeatSelection::load(BookingStore::new(&kv));
        sel.toggle("2E").unwrap();
        let err = sel.confirm(BookingStore::new(&kv)).unwrap_err();
        assert_eq!(
            err,
            BookingError::SeatCountMismatch {
                expected: 2,
                selected: 1
            }
        );
        assert!(kv.get_item(keys::SELECTED_SEATS).is_none());
    }

    #[test]
    fn confirm_persists_labels_in_map_order() {
        let kv = MemoryStore::with_entries([(keys::TICKET_QTY, "3")]);
        let mut sel = SeatSelection::load(BookingStore::new(&kv));
        for label in ["3B", "1I", "1A"] {
            sel.toggle(label).unwrap();
        }
        let labels = sel.confirm(BookingStore::new(&kv)).unwrap();
        assert_eq!(labels, vec!["1A", "1I", "3B"]);
        assert_eq!(BookingStore::new(&kv).seats(), labels);
    }

    #[test]
    fn missing_quantity_means_one_seat() {
        let kv = MemoryStore::new();
        let sel = SeatSelection::load(BookingStore::new(&kv));
        assert_eq!(sel.desired(), 1);
    }
}
