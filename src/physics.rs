use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::state::State;

pub const DEFAULT_GRAVITY: f64 = 9.8;

/// Pointwise physics of the shallow water system.
///
/// Both `flux` and `wavespeed` assume `h > 0`. A dry or negative cell yields
/// NaN or Inf, which is left to propagate through the scheme.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShallowWater {
    pub g: f64,
}

impl Default for ShallowWater {
    fn default() -> Self {
        Self { g: DEFAULT_GRAVITY }
    }
}

impl ShallowWater {
    pub fn new(g: f64) -> Self {
        Self { g }
    }
    /// Physical flux `(hu, hu^2/h + g h^2 / 2)`.
    pub fn flux(&self, q: State) -> State {
        State {
            h: q.hu,
            hu: q.hu * q.hu / q.h + 0.5 * self.g * q.h * q.h,
        }
    }
    /// Largest characteristic speed `max(|u - c|, |u + c|)`.
    pub fn wavespeed(&self, q: State) -> f64 {
        let u = q.hu / q.h;
        let c = (self.g * q.h).sqrt();
        (u - c).abs().max((u + c).abs())
    }
    /// Maximum wavespeed over every cell, ghosts included. A NaN cell makes
    /// the result NaN instead of being skipped.
    pub fn max_wavespeed(&self, qs: ArrayView1<State>) -> f64 {
        qs.iter().fold(0.0, |max_speed, &q| {
            let speed = self.wavespeed(q);
            if speed.is_nan() || speed > max_speed {
                speed
            } else {
                max_speed
            }
        })
    }
}
