//! Per-call traversal state.
//!
//! Everything here lives for exactly one top-level validation call and is
//! discarded afterwards: the in-progress path, the identity-keyed visited
//! set, and the violation collector. Nothing is shared between calls, which
//! is what makes the engine itself freely shareable across threads.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use verdict_value::{Object, Value};

use crate::groups::Group;
use crate::metadata::ConstraintDescriptor;
use crate::path::{Path, PathSegment};
use crate::violation::{Violation, Violations};

/// Identity-keyed cycle detection.
///
/// Each distinct `Arc<Object>` allocation gets a stable integer id the
/// first time it is seen; "already visited" is then a set membership check
/// on (id, sheet index). Identity, never value equality: two equal-valued
/// instances validate independently, while the same instance revisited
/// under the same sheet is skipped.
#[derive(Debug, Default)]
struct VisitedSet {
    ids: HashMap<usize, u32>,
    seen: HashSet<(u32, usize)>,
}

impl VisitedSet {
    fn id_of(&mut self, object: &Arc<Object>) -> u32 {
        let next = u32::try_from(self.ids.len()).unwrap_or(u32::MAX);
        *self.ids.entry(Arc::as_ptr(object) as usize).or_insert(next)
    }

    /// Marks (object, sheet) visited. Returns `false` if it already was.
    fn enter(&mut self, object: &Arc<Object>, sheet: usize) -> bool {
        let id = self.id_of(object);
        self.seen.insert((id, sheet))
    }
}

/// Mutable state of one validation call.
#[derive(Debug)]
pub(crate) struct ValidationContext {
    root: Value,
    path: Path,
    visited: VisitedSet,
    violations: Violations,
    sheet_index: usize,
    halted: bool,
}

impl ValidationContext {
    pub(crate) fn new(root: Value) -> Self {
        Self {
            root,
            path: Path::root(),
            visited: VisitedSet::default(),
            violations: Violations::default(),
            sheet_index: 0,
            halted: false,
        }
    }

    /// Starts a call at a fixed path prefix (`validate_property`,
    /// `validate_value`).
    pub(crate) fn with_base_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    pub(crate) fn begin_sheet(&mut self, index: usize) {
        self.sheet_index = index;
    }

    /// Marks the current object visited under the current sheet; `false`
    /// means it was already processed and must be skipped.
    pub(crate) fn enter(&mut self, object: &Arc<Object>) -> bool {
        self.visited.enter(object, self.sheet_index)
    }

    pub(crate) fn push_segment(&mut self, segment: PathSegment) {
        self.path.push(segment);
    }

    pub(crate) fn pop_segment(&mut self) {
        self.path.pop();
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Records a violation at the current path. `halt` ends the whole run
    /// (global fail-fast).
    pub(crate) fn record(
        &mut self,
        constraint: Arc<ConstraintDescriptor>,
        invalid_value: Value,
        group: Group,
        halt: bool,
    ) {
        self.violations.push(Violation::new(
            self.root.clone(),
            invalid_value,
            self.path.snapshot(),
            constraint,
            group,
        ));
        if halt {
            self.halted = true;
        }
    }

    pub(crate) fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub(crate) fn halted(&self) -> bool {
        self.halted
    }

    pub(crate) fn into_violations(self) -> Violations {
        self.violations
    }
}
