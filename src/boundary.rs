use ndarray::ArrayViewMut1;
use serde::{Deserialize, Serialize};

use crate::state::State;

/// Fills the ghost cells `0` and `ncells + 1` from the interior. Interior
/// cells are never modified.
pub trait BoundaryCondition {
    fn apply(&self, qs: ArrayViewMut1<State>);
    fn name(&self) -> &'static str;
}

impl<B: BoundaryCondition + ?Sized> BoundaryCondition for Box<B> {
    fn apply(&self, qs: ArrayViewMut1<State>) {
        (**self).apply(qs)
    }
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryPosition {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryType {
    /// Zero gradient: the ghost copies the nearest interior cell.
    Outflow,
    /// The ghost copies the interior cell at the opposite end.
    Periodic,
    /// Solid wall: depth copied, momentum mirrored.
    Reflecting,
}

impl BoundaryType {
    pub fn ghost_state(&self, qs: &ArrayViewMut1<State>, position: BoundaryPosition) -> State {
        let ncells = qs.len() - 2;
        let (nearest, opposite) = match position {
            BoundaryPosition::Left => (qs[1], qs[ncells]),
            BoundaryPosition::Right => (qs[ncells], qs[1]),
        };
        match self {
            BoundaryType::Outflow => nearest,
            BoundaryType::Periodic => opposite,
            BoundaryType::Reflecting => State::new(nearest.h, -nearest.hu),
        }
    }
    pub fn apply_side(&self, mut qs: ArrayViewMut1<State>, position: BoundaryPosition) {
        let ghost = self.ghost_state(&qs, position);
        let ighost = match position {
            BoundaryPosition::Left => 0,
            BoundaryPosition::Right => qs.len() - 1,
        };
        qs[ighost] = ghost;
    }
}

impl BoundaryCondition for BoundaryType {
    fn apply(&self, mut qs: ArrayViewMut1<State>) {
        self.apply_side(qs.view_mut(), BoundaryPosition::Left);
        self.apply_side(qs, BoundaryPosition::Right);
    }
    fn name(&self) -> &'static str {
        match self {
            BoundaryType::Outflow => "outflow",
            BoundaryType::Periodic => "periodic",
            BoundaryType::Reflecting => "reflecting",
        }
    }
}

/// Independent boundary types at the two ends of the domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryConditions {
    pub left: BoundaryType,
    pub right: BoundaryType,
}

impl BoundaryConditions {
    pub fn new(left: BoundaryType, right: BoundaryType) -> Self {
        Self { left, right }
    }
    pub fn uniform(boundary_type: BoundaryType) -> Self {
        Self::new(boundary_type, boundary_type)
    }
}

impl BoundaryCondition for BoundaryConditions {
    fn apply(&self, mut qs: ArrayViewMut1<State>) {
        // both ghosts are read from the interior only, so the order is irrelevant
        self.left.apply_side(qs.view_mut(), BoundaryPosition::Left);
        self.right.apply_side(qs, BoundaryPosition::Right);
    }
    fn name(&self) -> &'static str {
        if self.left == self.right {
            self.left.name()
        } else {
            "mixed"
        }
    }
}
