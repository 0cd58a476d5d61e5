//! Growable byte tape with a cursor
//!
//! The tape starts at a fixed length (30000 cells by default) and doubles
//! whenever the cursor moves past its end. The cursor never goes below 0:
//! moving left from cell 0 is a [`RuntimeError::CursorUnderflow`].

use crate::interpreter::errors::{Resource, RuntimeError};
use tracing::debug;

/// Byte cells plus the index of the active cell
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
    /// Highest index the cursor has reached
    high_water: usize,
    max_len: Option<usize>,
}

impl Tape {
    /// Create a zeroed tape of `initial_len` cells (at least one)
    ///
    /// Fails with [`RuntimeError::ResourceExhausted`] if the cells cannot be allocated.
    pub fn new(initial_len: usize) -> Result<Self, RuntimeError> {
        let len = initial_len.max(1);
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| RuntimeError::ResourceExhausted {
                resource: Resource::Tape,
                requested: len,
            })?;
        cells.resize(len, 0);

        Ok(Tape {
            cells,
            cursor: 0,
            high_water: 0,
            max_len: None,
        })
    }

    /// Cap growth at `max_len` cells
    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn high_water(&self) -> usize {
        self.high_water
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Value at `index`; cells past the end read as 0
    pub fn read(&self, index: usize) -> u8 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Store `value` at `index`, growing the tape first if needed
    pub fn write(&mut self, index: usize, value: u8) -> Result<(), RuntimeError> {
        self.grow_to_cover(index)?;
        self.cells[index] = value;
        self.high_water = self.high_water.max(index);
        Ok(())
    }

    /// Value under the cursor
    pub fn current(&self) -> u8 {
        self.cells[self.cursor]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn increment(&mut self, amount: u8) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(amount);
    }

    pub fn decrement(&mut self, amount: u8) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(amount);
    }

    /// Move the cursor right by `distance`, growing the tape to cover it
    pub fn move_right(&mut self, distance: usize) -> Result<(), RuntimeError> {
        let target = self
            .cursor
            .checked_add(distance)
            .ok_or(RuntimeError::ResourceExhausted {
                resource: Resource::Tape,
                requested: usize::MAX,
            })?;
        self.grow_to_cover(target)?;
        self.cursor = target;
        self.high_water = self.high_water.max(target);
        Ok(())
    }

    /// Move the cursor left by `distance`
    ///
    /// `position` is the source position reported if the move would pass cell 0.
    /// The cursor is unchanged on error.
    pub fn move_left(&mut self, distance: usize, position: usize) -> Result<(), RuntimeError> {
        self.cursor = self
            .cursor
            .checked_sub(distance)
            .ok_or(RuntimeError::CursorUnderflow { position })?;
        Ok(())
    }

    /// Double the tape until `index` is in range
    ///
    /// New cells are zero and existing cells keep their indices. With a
    /// maximum length set, the final doubling is clamped to that maximum.
    pub fn grow_to_cover(&mut self, index: usize) -> Result<(), RuntimeError> {
        let old_len = self.cells.len();
        if index < old_len {
            return Ok(());
        }

        let mut new_len = old_len;
        while index >= new_len {
            new_len = new_len
                .checked_mul(2)
                .ok_or(RuntimeError::ResourceExhausted {
                    resource: Resource::Tape,
                    requested: usize::MAX,
                })?;
        }

        if let Some(max) = self.max_len {
            if index >= max {
                return Err(RuntimeError::ResourceExhausted {
                    resource: Resource::Tape,
                    requested: new_len,
                });
            }
            new_len = new_len.min(max);
        }

        self.cells
            .try_reserve_exact(new_len - old_len)
            .map_err(|_| RuntimeError::ResourceExhausted {
                resource: Resource::Tape,
                requested: new_len,
            })?;
        self.cells.resize(new_len, 0);

        debug!(from = old_len, to = new_len, "tape grown");
        Ok(())
    }

    /// Non-zero cells as `(index, value)`, in index order
    pub fn non_zero_cells(&self) -> Vec<(usize, u8)> {
        let end = (self.high_water + 1).min(self.cells.len());
        self.cells[..end]
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| (i, v))
            .collect()
    }
}
