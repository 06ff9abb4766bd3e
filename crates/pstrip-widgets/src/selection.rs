#![forbid(unsafe_code)]

//! Drag-to-select state machine and selection operations.
//!
//! # State Machine
//!
//! ```text
//!            begin(p)                 update(q)
//!   Idle ─────────────▶ Selecting{p,p} ─────────▶ Selecting{p,q}
//!    ▲                        │
//!    └────── finish / cancel ─┘
//! ```
//!
//! `finish` resolves the inclusive index range between the two endpoints,
//! decides a [`SelectionOp`] from the Shift state and the owner's current
//! selection, and returns the proposed new selection. The selection itself is
//! never stored here; the owner decides whether to adopt it.

use std::fmt;
use std::ops::RangeInclusive;

use ahash::AHashSet;

/// How a completed drag combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionOp {
    /// New selection is exactly the dragged range.
    Replace,
    /// Dragged range is appended to the selection, duplicates removed.
    Add,
    /// Dragged range is removed from the selection.
    Subtract,
}

impl SelectionOp {
    /// Decide the operation for a release.
    ///
    /// Without Shift the range replaces the selection. With Shift, a range
    /// that is already fully selected is subtracted, anything else is added.
    pub fn decide<R, S>(range: &[R], selected: &[S], shift: bool) -> Self
    where
        R: AsRef<str>,
        S: AsRef<str>,
    {
        if !shift {
            return Self::Replace;
        }
        let current: AHashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
        if range.iter().all(|name| current.contains(name.as_ref())) {
            Self::Subtract
        } else {
            Self::Add
        }
    }

    /// Compute the new selection.
    pub fn apply<R, S>(self, selected: &[S], range: &[R]) -> Vec<String>
    where
        R: AsRef<str>,
        S: AsRef<str>,
    {
        match self {
            Self::Replace => range.iter().map(|n| n.as_ref().to_owned()).collect(),
            Self::Subtract => {
                let removed: AHashSet<&str> = range.iter().map(AsRef::as_ref).collect();
                selected
                    .iter()
                    .map(AsRef::as_ref)
                    .filter(|name| !removed.contains(name))
                    .map(str::to_owned)
                    .collect()
            }
            Self::Add => {
                let mut seen: AHashSet<&str> = AHashSet::with_capacity(selected.len() + range.len());
                selected
                    .iter()
                    .map(AsRef::as_ref)
                    .chain(range.iter().map(AsRef::as_ref))
                    .filter(|name| seen.insert(name))
                    .map(str::to_owned)
                    .collect()
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }
}

impl fmt::Display for SelectionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proposed selection produced by one completed drag or click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub op: SelectionOp,
    /// Partitions covered by the drag, in sequence order.
    pub range: Vec<String>,
    /// The full new selection.
    pub selection: Vec<String>,
}

/// Endpoints of an in-progress drag, as partition names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: String,
    pub end: String,
}

impl SelectionRange {
    /// Inclusive index range between the endpoints, in ascending order.
    ///
    /// `None` if either endpoint is no longer in `names`.
    pub fn indices<N: AsRef<str>>(&self, names: &[N]) -> Option<RangeInclusive<usize>> {
        let position = |target: &str| names.iter().position(|n| n.as_ref() == target);
        let a = position(&self.start)?;
        let b = position(&self.end)?;
        Some(a.min(b)..=a.max(b))
    }

    /// Names covered by the range, in sequence order.
    pub fn members<N: AsRef<str>>(&self, names: &[N]) -> Option<Vec<String>> {
        let range = self.indices(names)?;
        Some(
            names[range]
                .iter()
                .map(|n| n.as_ref().to_owned())
                .collect(),
        )
    }
}

/// Drag selection phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragSelection {
    #[default]
    Idle,
    Selecting(SelectionRange),
}

impl DragSelection {
    /// Start a drag anchored at `name`.
    pub fn begin(&mut self, name: impl Into<String>) {
        let name = name.into();
        *self = Self::Selecting(SelectionRange {
            start: name.clone(),
            end: name,
        });
    }

    /// Move the free end. `None` (pointer off the strip) keeps the old end.
    ///
    /// Returns `true` if the end changed.
    pub fn update(&mut self, name: Option<&str>) -> bool {
        match (self, name) {
            (Self::Selecting(range), Some(name)) if range.end != name => {
                range.end = name.to_owned();
                true
            }
            _ => false,
        }
    }

    pub fn range(&self) -> Option<&SelectionRange> {
        match self {
            Self::Idle => None,
            Self::Selecting(range) => Some(range),
        }
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, Self::Selecting(_))
    }

    /// Complete the drag and return to `Idle`.
    ///
    /// Returns `None` when idle or when an endpoint vanished from `names`.
    pub fn finish<N, S>(&mut self, names: &[N], selected: &[S], shift: bool) -> Option<SelectionChange>
    where
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let Self::Selecting(range) = std::mem::take(self) else {
            return None;
        };
        let members = range.members(names)?;
        let op = SelectionOp::decide(&members, selected, shift);
        let selection = op.apply(selected, &members);
        Some(SelectionChange {
            op,
            range: members,
            selection,
        })
    }

    /// Abandon the drag without reporting anything.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 4] = ["p1", "p2", "p3", "p4"];
    const SELECTED: [&str; 2] = ["p2", "p3"];

    fn drag(from: &str, to: &str, shift: bool) -> SelectionChange {
        let mut machine = DragSelection::default();
        machine.begin(from);
        machine.update(Some(to));
        let change = machine.finish(&NAMES, &SELECTED, shift).expect("change");
        assert!(!machine.is_selecting());
        change
    }

    #[test]
    fn drag_without_shift_replaces() {
        let change = drag("p3", "p4", false);
        assert_eq!(change.op, SelectionOp::Replace);
        assert_eq!(change.selection, vec!["p3", "p4"]);
    }

    #[test]
    fn shift_drag_over_unselected_adds() {
        let change = drag("p3", "p4", true);
        assert_eq!(change.op, SelectionOp::Add);
        assert_eq!(change.selection, vec!["p2", "p3", "p4"]);
    }

    #[test]
    fn shift_drag_over_selected_subtracts() {
        let change = drag("p2", "p3", true);
        assert_eq!(change.op, SelectionOp::Subtract);
        assert!(change.selection.is_empty());
    }

    #[test]
    fn backwards_drag_is_normalized() {
        let change = drag("p4", "p2", false);
        assert_eq!(change.range, vec!["p2", "p3", "p4"]);
    }

    #[test]
    fn update_off_strip_keeps_end() {
        let mut machine = DragSelection::default();
        machine.begin("p1");
        assert!(machine.update(Some("p3")));
        assert!(!machine.update(None));
        assert!(!machine.update(Some("p3")));
        assert_eq!(machine.range().map(|r| r.end.as_str()), Some("p3"));
    }

    #[test]
    fn update_while_idle_is_ignored() {
        let mut machine = DragSelection::default();
        assert!(!machine.update(Some("p1")));
        assert_eq!(machine, DragSelection::Idle);
    }

    #[test]
    fn vanished_endpoint_yields_nothing() {
        let mut machine = DragSelection::default();
        machine.begin("p9");
        assert_eq!(machine.finish(&NAMES, &SELECTED, false), None);
        assert_eq!(machine, DragSelection::Idle);
    }

    #[test]
    fn finish_when_idle_is_none() {
        let mut machine = DragSelection::default();
        assert_eq!(machine.finish(&NAMES, &SELECTED, true), None);
    }

    #[test]
    fn add_preserves_order_and_dedups() {
        let out = SelectionOp::Add.apply(&["b", "a"], &["a", "c", "c"]);
        assert_eq!(out, vec!["b", "a", "c"]);
    }

    #[test]
    fn subtract_keeps_untouched_members() {
        let out = SelectionOp::Subtract.apply(&["a", "b", "c"], &["b"]);
        assert_eq!(out, vec!["a", "c"]);
    }

    #[test]
    fn decide_is_independent_of_order() {
        assert_eq!(
            SelectionOp::decide(&["p3", "p2"], &SELECTED, true),
            SelectionOp::Subtract
        );
        assert_eq!(
            SelectionOp::decide(&["p1"], &SELECTED, false),
            SelectionOp::Replace
        );
    }
}
