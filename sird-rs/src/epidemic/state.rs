use crate::{
    error::{Result, SirdError},
    prelude::Real,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four compartments of the SIRD model, in their canonical column order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Compartment {
    S,
    I,
    R,
    D,
}

impl Compartment {
    /// Number of compartments.
    pub const CARDINALITY: usize = 4;

    /// Header used when rendering compartments as CSV columns.
    pub const CSV_HEADER: &'static str = "S,I,R,D";

    /// All compartments in index order.
    pub const ALL: [Compartment; 4] = [Compartment::S, Compartment::I, Compartment::R, Compartment::D];

    /// Column index of the compartment: S => 0, I => 1, R => 2, D => 3.
    pub fn index(self) -> usize {
        match self {
            Compartment::S => 0,
            Compartment::I => 1,
            Compartment::R => 2,
            Compartment::D => 3,
        }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Compartment::S => "Susceptible",
            Compartment::I => "Infectious",
            Compartment::R => "Recovered",
            Compartment::D => "Dead",
        }
    }

    /// Short symbol, as used in CSV headers.
    pub fn symbol(self) -> &'static str {
        match self {
            Compartment::S => "S",
            Compartment::I => "I",
            Compartment::R => "R",
            Compartment::D => "D",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Population counts in each compartment at a given instant.
///
/// Counts are reals rather than integers: the model is a continuous
/// approximation and the data may be given either as counts or as fractions
/// of the population.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelState {
    pub s: Real,
    pub i: Real,
    pub r: Real,
    pub d: Real,
}

impl ModelState {
    pub fn new(s: Real, i: Real, r: Real, d: Real) -> Self {
        ModelState { s, i, r, d }
    }

    /// Build state from an array in the canonical S, I, R, D order.
    pub fn from_array(data: [Real; 4]) -> Self {
        ModelState::new(data[0], data[1], data[2], data[3])
    }

    /// Return components in the canonical S, I, R, D order.
    pub fn as_array(&self) -> [Real; 4] {
        [self.s, self.i, self.r, self.d]
    }

    pub fn get(&self, compartment: Compartment) -> Real {
        match compartment {
            Compartment::S => self.s,
            Compartment::I => self.i,
            Compartment::R => self.r,
            Compartment::D => self.d,
        }
    }

    /// Total population, S + I + R + D.
    pub fn total(&self) -> Real {
        self.s + self.i + self.r + self.d
    }

    pub fn is_non_negative(&self) -> bool {
        self.as_array().iter().all(|&x| x >= 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|x| x.is_finite())
    }

    /// Check that the state can seed a simulation: every component must be a
    /// finite non-negative number.
    pub fn validate(&self) -> Result<()> {
        for c in Compartment::ALL.iter() {
            let x = self.get(*c);
            if !x.is_finite() {
                return Err(SirdError::invalid(state_name(*c), x, "must be finite"));
            }
            if x < 0.0 {
                return Err(SirdError::invalid(state_name(*c), x, "must be non-negative"));
            }
        }
        Ok(())
    }
}

fn state_name(compartment: Compartment) -> &'static str {
    match compartment {
        Compartment::S => "S0",
        Compartment::I => "I0",
        Compartment::R => "R0",
        Compartment::D => "D0",
    }
}

impl From<[Real; 4]> for ModelState {
    fn from(data: [Real; 4]) -> Self {
        ModelState::from_array(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compartment_order() {
        let names: Vec<_> = Compartment::ALL.iter().map(|c| c.symbol()).collect();
        assert_eq!(names.join(","), Compartment::CSV_HEADER);
        for (k, c) in Compartment::ALL.iter().enumerate() {
            assert_eq!(c.index(), k);
        }
    }

    #[test]
    fn state_accessors() {
        let st = ModelState::new(990.0, 8.0, 1.5, 0.5);
        assert_eq!(st.total(), 1000.0);
        assert_eq!(st.get(Compartment::I), 8.0);
        assert_eq!(ModelState::from(st.as_array()), st);
    }

    #[test]
    fn validate_rejects_negative_and_nan() {
        assert!(ModelState::new(1.0, 0.0, 0.0, 0.0).validate().is_ok());
        let err = ModelState::new(1.0, -1.0, 0.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, SirdError::InvalidParameter { name: "I0", .. }));
        assert!(ModelState::new(Real::NAN, 0.0, 0.0, 0.0).validate().is_err());
    }
}
