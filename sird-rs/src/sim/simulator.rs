use super::Trajectory;
use crate::{
    epidemic::{ModelState, SirdParams},
    error::{Result, SirdError},
    prelude::Real,
};
use getset::CopyGetters;
use log::debug;
use serde::{Deserialize, Serialize};

/// What to do when an Euler step would drain a compartment below zero.
///
/// Large time steps or extreme rates make the explicit Euler scheme
/// overshoot. `Allow` applies the plain Euler update and lets values become
/// negative. `Clamp` caps each flow by the stock it is drawn from, so that
/// new infections never exceed S and removals never exceed I. Population is
/// conserved in both cases and both produce identical results whenever no
/// cap is reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativePolicy {
    Allow,
    Clamp,
}

impl Default for NegativePolicy {
    fn default() -> Self {
        NegativePolicy::Clamp
    }
}

/// Time derivatives (dS, dI, dR, dD) of the SIRD system at the given state.
#[inline]
pub fn derivatives(state: &ModelState, params: &SirdParams) -> ModelState {
    let (beta, gamma, mu) = (params.beta(), params.gamma(), params.mu());
    let (s, i) = (state.s, state.i);
    ModelState {
        s: -beta * s * i,
        i: beta * s * i - gamma * i - mu * i,
        r: gamma * i,
        d: mu * i,
    }
}

/// Upper bound on the number of Euler steps per simulated day.
pub const MAX_STEPS_PER_DAY: usize = 10_000_000;

/// Forward Euler integrator for the SIRD model.
///
/// The simulator may take several sub-steps per day (`dt < 1`), but always
/// records one state per day, so a run over `horizon` days produces
/// `horizon + 1` states including the initial one.
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Simulator {
    dt: Real,
    horizon: usize,
    policy: NegativePolicy,
    steps_per_day: usize,
}

impl Simulator {
    /// Create a simulator with time step `dt` (in days) that runs for
    /// `horizon` days.
    ///
    /// `dt` must split a day into a whole number of steps (1, 0.5, 0.001, ...).
    pub fn new(dt: Real, horizon: usize) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SirdError::invalid("dt", dt, "must be positive and finite"));
        }
        let steps = (1.0 / dt).round();
        if steps > MAX_STEPS_PER_DAY as Real {
            return Err(SirdError::invalid("dt", dt, "too many steps per day"));
        }
        if steps < 1.0 || (steps * dt - 1.0).abs() > 1e-9 {
            return Err(SirdError::invalid(
                "dt",
                dt,
                "must divide one day into a whole number of steps",
            ));
        }
        Ok(Simulator {
            dt,
            horizon,
            policy: NegativePolicy::default(),
            steps_per_day: steps as usize,
        })
    }

    /// Simulator with one step per day.
    pub fn daily(horizon: usize) -> Self {
        Simulator {
            dt: 1.0,
            horizon,
            policy: NegativePolicy::default(),
            steps_per_day: 1,
        }
    }

    pub fn with_policy(mut self, policy: NegativePolicy) -> Self {
        self.policy = policy;
        return self;
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        return self;
    }

    /// Advance state by a single Euler step.
    pub fn step(&self, state: &ModelState, params: &SirdParams) -> ModelState {
        self.advance(state, params).0
    }

    /// Advance state by a single step and report whether a flow had to be
    /// capped.
    fn advance(&self, state: &ModelState, params: &SirdParams) -> (ModelState, bool) {
        let dt = self.dt;
        let delta = derivatives(state, params);
        let euler = ModelState {
            s: state.s + dt * delta.s,
            i: state.i + dt * delta.i,
            r: state.r + dt * delta.r,
            d: state.d + dt * delta.d,
        };

        if self.policy == NegativePolicy::Allow {
            return (euler, false);
        }

        let infections = -delta.s * dt;
        let removals = params.removal_rate() * state.i * dt;
        if infections <= state.s && removals <= state.i {
            return (floor_at_zero(euler), false);
        }

        // Limited flows, still computed from the pre-step values.
        let infections = infections.min(state.s);
        let scale = if removals > state.i {
            state.i / removals
        } else {
            1.0
        };
        let recovered = delta.r * dt * scale;
        let dead = delta.d * dt * scale;
        let next = ModelState {
            s: state.s - infections,
            i: state.i + infections - recovered - dead,
            r: state.r + recovered,
            d: state.d + dead,
        };
        (floor_at_zero(next), true)
    }

    /// Integrate the model from `initial` and return the daily trajectory.
    ///
    /// Fails if the rates or the initial state are outside the model domain
    /// or if the integration overflows.
    pub fn run(&self, initial: &ModelState, params: &SirdParams) -> Result<Trajectory> {
        params.validate()?;
        initial.validate()?;

        let mut trajectory = Trajectory::zeros(self.horizon + 1);
        let mut state = *initial;
        let mut capped = 0usize;
        trajectory.set_state(0, &state);

        for day in 1..=self.horizon {
            for _ in 0..self.steps_per_day {
                let (next, limited) = self.advance(&state, params);
                state = next;
                capped += limited as usize;
            }
            if !state.is_finite() {
                return Err(SirdError::NonFinite("simulated trajectory"));
            }
            trajectory.set_state(day, &state);
        }

        if capped > 0 {
            debug!("{}: {} steps had flows capped to keep counts non-negative", params, capped);
        }
        Ok(trajectory)
    }
}

#[inline]
fn floor_at_zero(state: ModelState) -> ModelState {
    ModelState {
        s: state.s.max(0.0),
        i: state.i.max(0.0),
        r: state.r.max(0.0),
        d: state.d.max(0.0),
    }
}
