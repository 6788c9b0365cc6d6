//! Write-once sender slot.

use std::sync::OnceLock;

use crate::error::RelayError;
use crate::RelayResult;

/// Single-assignment cell holding the authoritative sender handle.
///
/// Set exactly once, read many times. Reads before assignment fail instead
/// of observing a partial value.
pub(crate) struct SenderSlot<C> {
    cell: OnceLock<C>,
}

impl<C> SenderSlot<C> {
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Binds the sender. Fails if a sender is already bound.
    pub fn bind(&self, sender: C) -> RelayResult<()> {
        self.cell
            .set(sender)
            .map_err(|_| RelayError::SenderAlreadyBound)
    }

    pub fn get(&self) -> Option<&C> {
        self.cell.get()
    }

    pub fn is_bound(&self) -> bool {
        self.cell.get().is_some()
    }
}
