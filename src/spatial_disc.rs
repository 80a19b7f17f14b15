pub mod riemann_solver;

use ndarray::{ArrayView1, ArrayViewMut1};
use serde::{Deserialize, Serialize};

use crate::{physics::ShallowWater, state::State};
use riemann_solver::{lax_friedrichs_split, local_wavespeed};

/// Interface flux computation over a ghost-inclusive state array.
///
/// `fl[j]` and `fr[j]` belong to the interface between cells `j` and `j + 1`
/// for `j` in `0..=ncells`. Cell `x` is updated with
/// `q[x] -= dt / dx * (fr[x] + fl[x - 1])`. Ghost cells are read, never
/// written.
pub trait FluxKernel {
    fn compute_fluxes(
        &self,
        qs: ArrayView1<State>,
        dt: f64,
        dx: f64,
        ncells: usize,
        fl: ArrayViewMut1<State>,
        fr: ArrayViewMut1<State>,
    );
    fn name(&self) -> &'static str;
}

impl<K: FluxKernel + ?Sized> FluxKernel for Box<K> {
    fn compute_fluxes(
        &self,
        qs: ArrayView1<State>,
        dt: f64,
        dx: f64,
        ncells: usize,
        fl: ArrayViewMut1<State>,
        fr: ArrayViewMut1<State>,
    ) {
        (**self).compute_fluxes(qs, dt, dx, ncells, fl, fr)
    }
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Lax-Friedrichs with one domain-wide dissipation `a = dx / dt`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalLaxFriedrichs {
    pub physics: ShallowWater,
}

/// Lax-Friedrichs with `a` taken from the two states at each interface.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalLaxFriedrichs {
    pub physics: ShallowWater,
}

impl GlobalLaxFriedrichs {
    pub fn new(physics: ShallowWater) -> Self {
        Self { physics }
    }
}

impl LocalLaxFriedrichs {
    pub fn new(physics: ShallowWater) -> Self {
        Self { physics }
    }
}

fn sweep_interfaces(
    qs: ArrayView1<State>,
    ncells: usize,
    mut fl: ArrayViewMut1<State>,
    mut fr: ArrayViewMut1<State>,
    physics: &ShallowWater,
    dissipation: impl Fn(State, State) -> f64,
) {
    debug_assert_eq!(qs.len(), ncells + 2);
    debug_assert_eq!(fl.len(), qs.len());
    debug_assert_eq!(fr.len(), qs.len());
    for j in 0..=ncells {
        let ql = qs[j];
        let qr = qs[j + 1];
        let (left_going, right_going) = lax_friedrichs_split(ql, qr, dissipation(ql, qr), physics);
        fl[j] = left_going;
        fr[j] = right_going;
    }
}

impl FluxKernel for GlobalLaxFriedrichs {
    fn compute_fluxes(
        &self,
        qs: ArrayView1<State>,
        dt: f64,
        dx: f64,
        ncells: usize,
        fl: ArrayViewMut1<State>,
        fr: ArrayViewMut1<State>,
    ) {
        let a = dx / dt;
        sweep_interfaces(qs, ncells, fl, fr, &self.physics, |_, _| a);
    }
    fn name(&self) -> &'static str {
        "global Lax-Friedrichs"
    }
}

impl FluxKernel for LocalLaxFriedrichs {
    fn compute_fluxes(
        &self,
        qs: ArrayView1<State>,
        _dt: f64,
        _dx: f64,
        ncells: usize,
        fl: ArrayViewMut1<State>,
        fr: ArrayViewMut1<State>,
    ) {
        let physics = self.physics;
        sweep_interfaces(qs, ncells, fl, fr, &physics, |ql, qr| {
            local_wavespeed(ql, qr, &physics)
        });
    }
    fn name(&self) -> &'static str {
        "local Lax-Friedrichs"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxScheme {
    GlobalLaxFriedrichs,
    LocalLaxFriedrichs,
}

impl FluxScheme {
    pub fn build(self, physics: ShallowWater) -> Box<dyn FluxKernel> {
        match self {
            FluxScheme::GlobalLaxFriedrichs => Box::new(GlobalLaxFriedrichs::new(physics)),
            FluxScheme::LocalLaxFriedrichs => Box::new(LocalLaxFriedrichs::new(physics)),
        }
    }
}
