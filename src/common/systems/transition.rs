//! Click transition
//!
//! Decides, without touching any state, what a click on a cell does to the
//! anchor and to the selection flags. The session applies the result.

use crate::common::resources::config::SelectionMode;

/// Selection flag change for one cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlagEffect<C> {
    /// Becomes selected, opaque and current
    Promote(C),
    /// Loses current status, stays selected
    Demote(C),
    /// Loses every selection flag
    Release(C),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition<C> {
    pub anchor: Option<C>,
    pub effects: Vec<FlagEffect<C>>,
}

/// Outcome of clicking `clicked` given the current anchor
///
/// A selected cell is deselected; the anchor only goes away when it is the cell
/// clicked. Any other cell becomes the new anchor, and the previous one is
/// released or demoted depending on `mode`.
pub fn click_transition<C>(anchor: Option<C>, clicked: C, was_selected: bool, mode: SelectionMode) -> Transition<C>
where C: Copy + Eq {
    if was_selected {
        return Transition {
            anchor: anchor.filter(|&a| a != clicked),
            effects: vec![FlagEffect::Release(clicked)],
        };
    }

    let mut effects = Vec::with_capacity(2);
    if let Some(previous) = anchor.filter(|&a| a != clicked) {
        effects.push(match mode {
            SelectionMode::Single => FlagEffect::Release(previous),
            SelectionMode::Multi => FlagEffect::Demote(previous),
        });
    }
    effects.push(FlagEffect::Promote(clicked));
    Transition { anchor: Some(clicked), effects }
}
