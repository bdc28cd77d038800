//! Section ordering: stable sort by position and splice-and-renumber moves.
//!
//! Positions are not required to be contiguous. Sorting breaks ties on
//! `created_at`, then `id`, so two sections sharing a position still render in
//! a deterministic order. A move always renumbers the whole list to `0..n`.

use thiserror::Error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::section::SectionRow;

#[derive(Debug, Error, PartialEq)]
pub enum OrderingError {
    #[error("index {index} is out of range for {len} sections")]
    IndexOutOfRange { index: i64, len: usize },
}

impl From<OrderingError> for AppError {
    fn from(e: OrderingError) -> Self {
        AppError::Validation(e.to_string())
    }
}

pub fn sort_sections(sections: &mut [SectionRow]) {
    sections.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}

/// Removes the element at `from` and re-inserts it at `to`.
pub fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), OrderingError> {
    let len = items.len();
    if from >= len {
        return Err(OrderingError::IndexOutOfRange {
            index: from as i64,
            len,
        });
    }
    if to >= len {
        return Err(OrderingError::IndexOutOfRange {
            index: to as i64,
            len,
        });
    }
    let moved = items.remove(from);
    items.insert(to, moved);
    Ok(())
}

/// Index into a list of `len` items; negative or too-large values are rejected.
fn checked_index(index: i64, len: usize) -> Result<usize, OrderingError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(OrderingError::IndexOutOfRange { index, len })
}

/// Moves the section at `from` to `to` within an already-ordered id list and
/// returns the full renumbering as `(section_id, position)` pairs. Indices
/// arrive straight from request bodies, so negatives are range errors too.
pub fn move_section(
    ordered_ids: &[Uuid],
    from: i64,
    to: i64,
) -> Result<Vec<(Uuid, i32)>, OrderingError> {
    let from = checked_index(from, ordered_ids.len())?;
    let to = checked_index(to, ordered_ids.len())?;
    let mut ids = ordered_ids.to_vec();
    splice_move(&mut ids, from, to)?;
    Ok(renumber(&ids))
}

pub fn renumber(ordered_ids: &[Uuid]) -> Vec<(Uuid, i32)> {
    ordered_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index as i32))
        .collect()
}

/// Position for a section appended to the end of the list.
pub fn next_position(sections: &[SectionRow]) -> i32 {
    sections.len() as i32
}
