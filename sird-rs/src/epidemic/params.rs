use crate::{
    error::{Result, SirdError},
    prelude::{Real, INF},
};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rates of the SIRD model.
///
/// `beta` is the transmission rate (new infections per S-I contact per day),
/// `gamma` the recovery rate and `mu` the death rate of infectious agents.
/// All rates are per day and must be non-negative.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SirdParams {
    beta: Real,
    gamma: Real,
    mu: Real,
}

impl SirdParams {
    /// Create a new parameter set without validation.
    pub fn new(beta: Real, gamma: Real, mu: Real) -> Self {
        SirdParams { beta, gamma, mu }
    }

    /// Create a new parameter set, failing if any rate is outside the model
    /// domain.
    pub fn checked(beta: Real, gamma: Real, mu: Real) -> Result<Self> {
        let params = SirdParams::new(beta, gamma, mu);
        params.validate()?;
        Ok(params)
    }

    /// Rates must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for &(name, value) in [("beta", self.beta), ("gamma", self.gamma), ("mu", self.mu)].iter() {
            if !value.is_finite() {
                return Err(SirdError::invalid(name, value, "rate must be finite"));
            }
            if value < 0.0 {
                return Err(SirdError::invalid(name, value, "rate must be non-negative"));
            }
        }
        Ok(())
    }

    /// Rate at which agents leave the infectious compartment, gamma + mu.
    pub fn removal_rate(&self) -> Real {
        self.gamma + self.mu
    }

    /// Reproduction number for a given susceptible population.
    ///
    /// This is the expected number of secondary infections caused by a single
    /// infectious agent, beta * s0 / (gamma + mu). It is infinite if agents
    /// never leave the infectious compartment.
    pub fn reproduction_number(&self, s0: Real) -> Real {
        let removal = self.removal_rate();
        if removal == 0.0 {
            return if self.beta * s0 > 0.0 { INF } else { 0.0 };
        }
        self.beta * s0 / removal
    }

    /// Infection fatality ratio implied by the rates, mu / (gamma + mu).
    pub fn fatality_ratio(&self) -> Real {
        let removal = self.removal_rate();
        if removal == 0.0 {
            return 0.0;
        }
        self.mu / removal
    }
}

impl fmt::Display for SirdParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "beta={} gamma={} mu={}", self.beta, self.gamma, self.mu)
    }
}
