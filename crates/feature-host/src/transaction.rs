use lumber_types::PropertyValue;

use crate::object::ObjectId;

/// A committed property edit, including every derived write it caused.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub object: ObjectId,
    /// The property the user wrote.
    pub trigger: String,
    /// Values before the edit, one entry per property written.
    pub before: Vec<(String, PropertyValue)>,
    /// Values after the edit, same properties as `before`.
    pub after: Vec<(String, PropertyValue)>,
}

/// Two-stack undo/redo history with a size bound.
#[derive(Debug)]
pub struct UndoStack {
    undo: Vec<Transaction>,
    redo: Vec<Transaction>,
    limit: usize,
}

impl UndoStack {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Push a transaction onto the undo stack, clearing the redo stack.
    /// The oldest entry is dropped once the limit is reached.
    pub fn push(&mut self, tx: Transaction) {
        self.redo.clear();
        if self.limit == 0 {
            return;
        }
        if self.undo.len() == self.limit {
            self.undo.remove(0);
        }
        self.undo.push(tx);
    }

    /// Push onto the undo stack without clearing redo.
    /// Used by redo to re-populate the undo stack.
    pub fn push_undo_only(&mut self, tx: Transaction) {
        self.undo.push(tx);
    }

    pub fn pop_undo(&mut self) -> Option<Transaction> {
        self.undo.pop()
    }

    pub fn push_redo(&mut self, tx: Transaction) {
        self.redo.push(tx);
    }

    pub fn pop_redo(&mut self) -> Option<Transaction> {
        self.redo.pop()
    }

    /// Forget every entry that touches `object`.
    pub fn forget(&mut self, object: ObjectId) {
        self.undo.retain(|t| t.object != object);
        self.redo.retain(|t| t.object != object);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}
