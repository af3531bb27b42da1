//! Bounded undo/redo log.
//!
//! Actions replay captured data against a context `C` (for the editor, the
//! `Canvas`). They never hold the context themselves, so the log can outlive
//! any particular buffer.

mod action;

pub use action::{CompositeAction, FnAction, InverseAction};

use std::collections::VecDeque;

use tracing::debug;

/// Default number of undo steps kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// A reversible operation.
pub trait Action<C> {
    /// Apply the effect.
    fn forward(&self, ctx: &mut C);

    /// Revert the effect.
    fn backward(&self, ctx: &mut C);

    /// Short label for history lists ("Pencil", "Fill", ...).
    fn describe(&self) -> String;

    /// Approximate bytes of captured data.
    fn memory_size(&self) -> usize {
        0
    }
}

/// Undo stack bounded to `capacity` entries (oldest evicted first) plus a
/// redo stack cleared by every new entry.
pub struct ActionHistory<C> {
    undo_stack: VecDeque<Box<dyn Action<C>>>,
    redo_stack: Vec<Box<dyn Action<C>>>,
    capacity: usize,
}

impl<C> Default for ActionHistory<C> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<C> ActionHistory<C> {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Run `action` forward and record it.
    pub fn execute(&mut self, ctx: &mut C, action: Box<dyn Action<C>>) {
        debug!(action = %action.describe(), "execute");
        action.forward(ctx);
        self.record(action);
    }

    /// Record an action whose effect has already been applied.
    pub fn push(&mut self, action: Box<dyn Action<C>>) {
        debug!(action = %action.describe(), "push");
        self.record(action);
    }

    /// Run `action` forward and forget all history, e.g. when the buffer is replaced.
    pub fn execute_no_undo(&mut self, ctx: &mut C, action: Box<dyn Action<C>>) {
        debug!(action = %action.describe(), "execute without undo");
        action.forward(ctx);
        self.clear();
    }

    fn record(&mut self, action: Box<dyn Action<C>>) {
        self.redo_stack.clear();
        self.undo_stack.push_back(action);
        self.prune();
    }

    fn prune(&mut self) {
        while self.undo_stack.len() > self.capacity {
            if let Some(evicted) = self.undo_stack.pop_front() {
                debug!(action = %evicted.describe(), "evicted from history");
            }
        }
    }

    /// Revert the most recent action. Returns its label.
    pub fn undo(&mut self, ctx: &mut C) -> Option<String> {
        let action = self.undo_stack.pop_back()?;
        let label = action.describe();
        debug!(action = %label, "undo");
        action.backward(ctx);
        self.redo_stack.push(action);
        Some(label)
    }

    /// Re-apply the most recently undone action. Returns its label.
    pub fn redo(&mut self, ctx: &mut C) -> Option<String> {
        let action = self.redo_stack.pop()?;
        let label = action.describe();
        debug!(action = %label, "redo");
        action.forward(ctx);
        self.undo_stack.push_back(action);
        Some(label)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Labels on the undo stack, oldest first.
    pub fn undo_descriptions(&self) -> Vec<String> {
        self.undo_stack.iter().map(|a| a.describe()).collect()
    }

    /// Labels on the redo stack, next-to-redo first.
    pub fn redo_descriptions(&self) -> Vec<String> {
        self.redo_stack.iter().rev().map(|a| a.describe()).collect()
    }

    pub fn memory_usage(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(|a| a.memory_size())
            .sum()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adds `n` to the context; backward subtracts.
    struct Add(i32);

    impl Action<i32> for Add {
        fn forward(&self, ctx: &mut i32) {
            *ctx += self.0;
        }

        fn backward(&self, ctx: &mut i32) {
            *ctx -= self.0;
        }

        fn describe(&self) -> String {
            format!("Add {}", self.0)
        }
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut value = 0;
        let mut history = ActionHistory::new(10);
        history.execute(&mut value, Box::new(Add(3)));
        history.execute(&mut value, Box::new(Add(4)));
        assert_eq!(value, 7);

        assert_eq!(history.undo(&mut value).as_deref(), Some("Add 4"));
        assert_eq!(value, 3);
        assert_eq!(history.redo(&mut value).as_deref(), Some("Add 4"));
        assert_eq!(value, 7);
        assert!(history.redo(&mut value).is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut value = 0;
        let mut history = ActionHistory::new(3);
        for n in 1..=4 {
            history.execute(&mut value, Box::new(Add(n)));
        }
        assert_eq!(history.undo_count(), 3);
        while history.undo(&mut value).is_some() {}
        // the first action can no longer be reverted
        assert_eq!(value, 1);
    }

    #[test]
    fn test_new_action_clears_redo() {
        let mut value = 0;
        let mut history = ActionHistory::new(5);
        history.execute(&mut value, Box::new(Add(1)));
        history.execute(&mut value, Box::new(Add(2)));
        history.undo(&mut value);
        assert!(history.can_redo());
        history.execute(&mut value, Box::new(Add(10)));
        assert!(!history.can_redo());
        assert_eq!(value, 11);
    }

    #[test]
    fn test_push_does_not_reapply() {
        let mut value = 5;
        let mut history = ActionHistory::new(5);
        history.push(Box::new(Add(5)));
        assert_eq!(value, 5);
        history.undo(&mut value);
        assert_eq!(value, 0);
    }

    #[test]
    fn test_execute_no_undo_forgets_everything() {
        let mut value = 0;
        let mut history = ActionHistory::new(5);
        history.execute(&mut value, Box::new(Add(1)));
        history.execute(&mut value, Box::new(Add(2)));
        history.undo(&mut value);
        history.execute_no_undo(&mut value, Box::new(Add(100)));
        assert_eq!(value, 101);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut value = 0;
        let mut history = ActionHistory::new(0);
        history.execute(&mut value, Box::new(Add(1)));
        assert_eq!(value, 1);
        assert!(history.undo(&mut value).is_none());
    }

    #[test]
    fn test_descriptions() {
        let mut value = 0;
        let mut history = ActionHistory::default();
        for n in 1..=3 {
            history.execute(&mut value, Box::new(Add(n)));
        }
        history.undo(&mut value);
        history.undo(&mut value);
        assert_eq!(history.undo_descriptions(), vec!["Add 1"]);
        assert_eq!(history.redo_descriptions(), vec!["Add 2", "Add 3"]);
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
    }
}
