//! Linear undo/redo over immutable snapshots.

use std::collections::VecDeque;

use log::debug;

use super::types::error::Result;

/// Past and future stacks around a current value.
///
/// Applying a transition discards any pending redo states. The past stack is
/// unbounded unless a limit is given, in which case the oldest entries are
/// dropped first.
#[derive(Debug, Clone)]
pub struct History<S> {
    past: VecDeque<S>,
    current: S,
    future: Vec<S>,
    limit: Option<usize>,
}

impl<S> History<S> {
    pub fn new(initial: S) -> Self {
        Self::with_limit(initial, None)
    }

    pub fn with_limit(initial: S, limit: Option<usize>) -> Self {
        Self {
            past: VecDeque::new(),
            current: initial,
            future: Vec::new(),
            limit,
        }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    /// Runs `transition` on the current value and makes its result current.
    ///
    /// A failed transition leaves the history exactly as it was.
    pub fn apply<F>(&mut self, transition: F) -> Result<&S>
    where
        F: FnOnce(&S) -> Result<S>,
    {
        let next = transition(&self.current)?;
        self.push(next);
        Ok(&self.current)
    }

    /// Makes `next` current, recording the old value as undoable.
    pub fn push(&mut self, next: S) {
        let previous = std::mem::replace(&mut self.current, next);
        self.past.push_back(previous);
        self.future.clear();
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
        debug!("History: {} undoable, redo cleared", self.past.len());
    }

    /// Steps back one state. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.future.push(undone);
        debug!("Undo: {} undoable, {} redoable", self.past.len(), self.future.len());
        true
    }

    /// Steps forward one state. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let redone = std::mem::replace(&mut self.current, next);
        self.past.push_back(redone);
        debug!("Redo: {} undoable, {} redoable", self.past.len(), self.future.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Starts over from `state` with both stacks empty.
    pub fn reset(&mut self, state: S) {
        self.past.clear();
        self.future.clear();
        self.current = state;
    }
}
