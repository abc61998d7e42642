// Author: Dustin Pilgrim
// License: MIT

use crate::pen::Pen;

/// Committed annotations, oldest first. Undo pops the newest.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Pen>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries are owned clones; resetting the live pen afterwards
    /// never reaches into history.
    pub fn push(&mut self, pen: Pen) {
        self.entries.push(pen);
    }

    pub fn undo(&mut self) -> Option<Pen> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Pen> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pen> {
        self.entries.iter()
    }
}
