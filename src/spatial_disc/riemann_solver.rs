use crate::{physics::ShallowWater, state::State};

/// Lax-Friedrichs split of the flux across one interface.
///
/// Returns `(fl, fr)`: the contribution charged to the cell right of the
/// interface and the one charged to the cell left of it. Their sum is the
/// physical flux jump `f(qr) - f(ql)`, so the dissipation `a * (qr - ql)`
/// cancels whenever both sides of an interface are summed.
pub fn lax_friedrichs_split(ql: State, qr: State, a: f64, physics: &ShallowWater) -> (State, State) {
    let flux_jump = physics.flux(qr) - physics.flux(ql);
    let dissipation = a * (qr - ql);
    let fl = 0.5 * (flux_jump + dissipation);
    let fr = 0.5 * (flux_jump - dissipation);
    (fl, fr)
}

/// Local dissipation coefficient of the Rusanov form. NaN on either side
/// wins, unlike `f64::max`.
pub fn local_wavespeed(ql: State, qr: State, physics: &ShallowWater) -> f64 {
    let (sl, sr) = (physics.wavespeed(ql), physics.wavespeed(qr));
    if sl > sr || sl.is_nan() { sl } else { sr }
}
