//! Undo/redo history.
//!
//! Snapshot based: before each recorded edit the full store state is
//! captured, and undo swaps the live state for the newest capture. The
//! stack starts with one base entry holding the initial state; that floor
//! is never undone past.
//!
//! Drag gestures run inside an interactive bracket: one snapshot is taken
//! when the gesture starts and every update until it ends applies live, so
//! the whole gesture undoes in a single step.

use crate::store::{CanvasMutation, CanvasSnapshot, CanvasStore, MutationError, MutationOutcome};

/// Label of the base entry.
const BASE_LABEL: &str = "Start";

/// A captured state plus the name of the action it precedes.
#[derive(Debug, Clone)]
struct Checkpoint {
    label: String,
    state: CanvasSnapshot,
}

/// Bounded undo/redo stacks with interactive-gesture coalescing.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Checkpoint>,
    redo_stack: Vec<Checkpoint>,
    /// Maximum undo depth, base entry included.
    max_depth: usize,
    /// Interactive nesting depth (0 = idle).
    interactive_depth: usize,
}

impl History {
    /// Create a history whose base entry is `base`. `max_depth` counts the
    /// base entry and is raised to 2 if lower, so one step stays undoable.
    pub fn new(max_depth: usize, base: CanvasSnapshot) -> Self {
        // The limit comes from host config; the stack grows on demand.
        let max_depth = max_depth.max(2);
        Self {
            undo_stack: vec![Checkpoint {
                label: BASE_LABEL.to_string(),
                state: base,
            }],
            redo_stack: Vec::new(),
            max_depth,
            interactive_depth: 0,
        }
    }

    /// Drop every entry and start over from `base`. Ends any open gesture.
    pub fn reset(&mut self, base: CanvasSnapshot) {
        *self = Self::new(self.max_depth, base);
    }

    /// Apply a mutation to `store`, recording an undo step when idle and
    /// the mutation changed something. Inside a gesture it applies live.
    pub fn execute(
        &mut self,
        store: &mut CanvasStore,
        mutation: CanvasMutation,
    ) -> Result<MutationOutcome, MutationError> {
        if self.is_interactive() {
            return store.apply(mutation);
        }

        let label = mutation.label();
        let before = store.snapshot();
        let outcome = store.apply(mutation)?;
        if outcome.changed() {
            self.push(label, before);
        } else {
            log::debug!("{label}: nothing changed, no undo step");
        }
        Ok(outcome)
    }

    /// Open an interactive bracket. The outermost start records the
    /// pre-gesture state; nested starts only deepen the bracket.
    pub fn begin_interactive(&mut self, store: &CanvasStore, label: &str) {
        if self.interactive_depth == 0 {
            self.push(label.to_string(), store.snapshot());
        }
        self.interactive_depth += 1;
    }

    /// Close one bracket level. No-op when idle.
    pub fn end_interactive(&mut self) {
        if self.interactive_depth == 0 {
            log::debug!("end_interactive while idle");
            return;
        }
        self.interactive_depth -= 1;
    }

    /// Restore the newest undo entry. Returns its label.
    pub fn undo(&mut self, store: &mut CanvasStore) -> Option<String> {
        if !self.can_undo() {
            log::debug!("undo ignored (interactive: {})", self.is_interactive());
            return None;
        }
        let checkpoint = self.undo_stack.pop()?;
        self.redo_stack.push(Checkpoint {
            label: checkpoint.label.clone(),
            state: store.snapshot(),
        });
        store.restore(checkpoint.state);
        Some(checkpoint.label)
    }

    /// Re-apply the newest undone entry. Returns its label.
    pub fn redo(&mut self, store: &mut CanvasStore) -> Option<String> {
        if !self.can_redo() {
            log::debug!("redo ignored (interactive: {})", self.is_interactive());
            return None;
        }
        let checkpoint = self.redo_stack.pop()?;
        self.undo_stack.push(Checkpoint {
            label: checkpoint.label.clone(),
            state: store.snapshot(),
        });
        self.trim();
        store.restore(checkpoint.state);
        Some(checkpoint.label)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1 && !self.is_interactive()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty() && !self.is_interactive()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive_depth > 0
    }

    /// Undo entries including the base entry.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Labels of the undoable actions, newest first.
    pub fn undo_labels(&self) -> Vec<&str> {
        self.undo_stack
            .iter()
            .skip(1)
            .rev()
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Labels of the redoable actions, next redo first.
    pub fn redo_labels(&self) -> Vec<&str> {
        self.redo_stack
            .iter()
            .rev()
            .map(|c| c.label.as_str())
            .collect()
    }

    fn push(&mut self, label: String, state: CanvasSnapshot) {
        log::trace!("history: push `{label}` (depth {})", self.undo_stack.len() + 1);
        self.undo_stack.push(Checkpoint { label, state });
        self.trim();
        self.redo_stack.clear();
    }

    fn trim(&mut self) {
        while self.undo_stack.len() > self.max_depth {
            let dropped = self.undo_stack.remove(0);
            log::trace!("history: dropped oldest entry `{}`", dropped.label);
        }
    }
}
