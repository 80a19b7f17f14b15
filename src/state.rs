//! Conserved variables of the 1D shallow water equations.
//!
//! A cell holds `(h, hu)`: water depth and depth-averaged momentum. State
//! arrays carry one ghost cell at each end, index `0` and `ncells + 1`, with
//! the interior at `1..=ncells`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use ndarray::{Array1, ArrayView1, s};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct State {
    /// Water depth, expected to stay positive.
    pub h: f64,
    /// Momentum `h * u`.
    pub hu: f64,
}

/// Ghost-inclusive array of `ncells + 2` cell states.
pub type StateArray = Array1<State>;

impl State {
    pub fn new(h: f64, hu: f64) -> Self {
        Self { h, hu }
    }
    pub fn zero() -> Self {
        Self { h: 0.0, hu: 0.0 }
    }
    pub fn scale(self, k: f64) -> Self {
        Self {
            h: k * self.h,
            hu: k * self.hu,
        }
    }
    /// `hu / h`, undefined for dry cells.
    pub fn velocity(&self) -> f64 {
        self.hu / self.h
    }
}

impl Add for State {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            h: self.h + other.h,
            hu: self.hu + other.hu,
        }
    }
}

impl Sub for State {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            h: self.h - other.h,
            hu: self.hu - other.hu,
        }
    }
}

impl Mul<f64> for State {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl Mul<State> for f64 {
    type Output = State;

    fn mul(self, state: State) -> State {
        state.scale(self)
    }
}

impl Neg for State {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            h: -self.h,
            hu: -self.hu,
        }
    }
}

impl AddAssign for State {
    fn add_assign(&mut self, other: Self) {
        self.h += other.h;
        self.hu += other.hu;
    }
}

impl SubAssign for State {
    fn sub_assign(&mut self, other: Self) {
        self.h -= other.h;
        self.hu -= other.hu;
    }
}

/// Number of interior cells of a ghost-inclusive array.
pub fn interior_len(qs: ArrayView1<State>) -> usize {
    qs.len().saturating_sub(2)
}

pub fn interior(qs: ArrayView1<State>) -> ArrayView1<State> {
    let ncells = interior_len(qs.view());
    qs.slice_move(s![1..ncells + 1])
}

/// Integral of `h` over the interior cells.
pub fn total_mass(qs: ArrayView1<State>, dx: f64) -> f64 {
    interior(qs).iter().map(|q| q.h).sum::<f64>() * dx
}

/// Integral of `hu` over the interior cells.
pub fn total_momentum(qs: ArrayView1<State>, dx: f64) -> f64 {
    interior(qs).iter().map(|q| q.hu).sum::<f64>() * dx
}

pub fn heights(qs: ArrayView1<State>) -> Array1<f64> {
    interior(qs).mapv(|q| q.h)
}
