//! Partial-state container with shallow-merge updates.
//!
//! [`MergeState`] owns a record and hands out [`Setter`]s. A setter never
//! touches the record directly: it queues either a patch or a function that
//! computes a patch from the latest state. [`MergeState::flush`] drains the
//! queue in call order, which is the "next redraw" of the owning container.
//!
//! Merges are shallow. Every field present in a patch replaces the field in
//! the record wholesale; nested values are never merged into.
//!
//! ```
//! use repodeck_table::{Merge, MergeState};
//!
//! #[derive(Merge, Debug, PartialEq)]
//! struct Search {
//!     input: String,
//!     touched: bool,
//! }
//!
//! let mut state = MergeState::new(Search { input: String::new(), touched: false });
//! let set = state.setter();
//!
//! set.set(SearchPatch::default().input("ru".to_string()).touched(true));
//! set.update(|cur| SearchPatch::default().input(format!("{}st", cur.input)));
//!
//! assert!(state.flush());
//! assert_eq!(state.state(), &Search { input: "rust".into(), touched: true });
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

/// A record that can absorb a partial update.
///
/// Usually derived with `#[derive(Merge)]`, which generates a `<Name>Patch`
/// struct with one `Option` per field and a builder setter per field.
pub trait Merge {
    /// Partial form of the record.
    type Patch;

    /// Overwrites every field present in `patch`.
    fn merge(&mut self, patch: Self::Patch);
}

/// A queued state change.
pub enum Update<T: Merge> {
    /// Merge this patch as is.
    Patch(T::Patch),
    /// Compute the patch from the state as it is when the update is applied.
    With(Box<dyn FnOnce(&T) -> T::Patch>),
}

type Queue<T> = Rc<RefCell<VecDeque<Update<T>>>>;

/// Owner of a mergeable record and its update queue.
pub struct MergeState<T: Merge> {
    state: T,
    queue: Queue<T>,
    revision: u64,
}

impl<T: Merge> MergeState<T> {
    pub fn new(initial: T) -> Self {
        MergeState {
            state: initial,
            queue: Rc::new(RefCell::new(VecDeque::new())),
            revision: 0,
        }
    }

    /// The state as of the last flush.
    pub fn state(&self) -> &T {
        &self.state
    }

    /// A handle for queueing updates. Cheap to clone.
    pub fn setter(&self) -> Setter<T> {
        Setter {
            queue: Rc::clone(&self.queue),
        }
    }

    /// Number of flushes that applied at least one update.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// `true` when updates are waiting for the next flush.
    pub fn is_dirty(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    /// Applies every queued update in order.
    ///
    /// Functional updates run against the state left by the updates before
    /// them, including ones queued during this flush. Returns `true` when
    /// anything was applied.
    pub fn flush(&mut self) -> bool {
        let mut applied = 0usize;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(update) = next else { break };
            let patch = match update {
                Update::Patch(patch) => patch,
                Update::With(compute) => compute(&self.state),
            };
            self.state.merge(patch);
            applied += 1;
        }
        if applied > 0 {
            self.revision += 1;
            trace!(applied, revision = self.revision, "merged state updates");
        }
        applied > 0
    }

    /// Consumes the container, discarding pending updates.
    pub fn into_inner(self) -> T {
        self.state
    }
}

impl<T: Merge + fmt::Debug> fmt::Debug for MergeState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeState")
            .field("state", &self.state)
            .field("pending", &self.queue.borrow().len())
            .field("revision", &self.revision)
            .finish()
    }
}

/// Queues updates for a [`MergeState`].
pub struct Setter<T: Merge> {
    queue: Queue<T>,
}

impl<T: Merge> Setter<T> {
    /// Queues a patch.
    pub fn set(&self, patch: T::Patch) {
        self.queue.borrow_mut().push_back(Update::Patch(patch));
    }

    /// Queues a function computing a patch from the latest state.
    pub fn update<F>(&self, compute: F)
    where
        F: FnOnce(&T) -> T::Patch + 'static,
    {
        self.queue
            .borrow_mut()
            .push_back(Update::With(Box::new(compute)));
    }

    /// Number of queued updates.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl<T: Merge> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Setter {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<T: Merge> fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter")
            .field("pending", &self.pending())
            .finish()
    }
}
