//! Commit/undo/redo discipline over bounded stacks

use crate::bounded::BoundedStack;
use crate::error::{HistoryError, HistoryResult};

/// A bounded edit timeline: the current state plus undo and redo stacks.
///
/// Committing a new state pushes the previous current state onto the undo stack
/// (evicting the oldest entry when full) and clears the redo stack. Undo and redo
/// move the current state between the two stacks; once a state has been committed
/// the timeline never becomes empty again.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    current: Option<T>,
    undo: BoundedStack<T>,
    redo: BoundedStack<T>,
}

impl<T: Clone> Timeline<T> {
    /// Create an empty timeline keeping at most `max_history` past states
    pub fn new(max_history: usize) -> Self {
        Timeline {
            current: None,
            undo: BoundedStack::new(max_history),
            redo: BoundedStack::new(max_history),
        }
    }

    /// Record a new current state
    ///
    /// Returns the evicted oldest undo entry when the history window overflows.
    pub fn commit(&mut self, state: T) -> Option<T> {
        let evicted = match self.current.take() {
            Some(previous) => self.undo.push(previous),
            None => None,
        };
        self.current = Some(state);
        self.redo.clear();
        evicted
    }

    /// Step back to the previous state, returning the new current state
    pub fn undo(&mut self) -> HistoryResult<T> {
        let previous = self.undo.pop().ok_or(HistoryError::NoMoreUndos)?;
        if let Some(current) = self.current.take() {
            self.redo.push(current);
        }
        self.current = Some(previous.clone());
        Ok(previous)
    }

    /// Step forward to the next state, returning the new current state
    pub fn redo(&mut self) -> HistoryResult<T> {
        let next = self.redo.pop().ok_or(HistoryError::NoMoreRedos)?;
        if let Some(current) = self.current.take() {
            self.undo.push(current);
        }
        self.current = Some(next.clone());
        Ok(next)
    }

    /// The current state, if anything has been committed
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Whether an undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of states that can be undone
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of states that can be redone
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// The history window size this timeline was created with
    pub fn max_history(&self) -> usize {
        self.undo.capacity()
    }
}
