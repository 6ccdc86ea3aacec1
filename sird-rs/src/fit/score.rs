use crate::{
    data::Observations,
    epidemic::Compartment,
    error::{Result, SirdError},
    prelude::Real,
    sim::Trajectory,
    utils::sqr,
};
use serde::{Deserialize, Serialize};

/// Root mean square error between two sequences of the same length.
///
/// Sequences of different lengths are never truncated: the mismatch is
/// reported as an error. A NaN or infinite result is also an error.
pub fn rmse(simulated: &[Real], observed: &[Real]) -> Result<Real> {
    if simulated.len() != observed.len() {
        return Err(SirdError::LengthMismatch {
            expected: observed.len(),
            found: simulated.len(),
        });
    }
    if observed.is_empty() {
        return Err(SirdError::LengthMismatch {
            expected: 1,
            found: 0,
        });
    }

    let total: Real = simulated
        .iter()
        .zip(observed)
        .map(|(x, y)| sqr(x - y))
        .sum();
    let value = (total / observed.len() as Real).sqrt();
    if !value.is_finite() {
        return Err(SirdError::NonFinite("rmse"));
    }
    Ok(value)
}

/// Objective minimized by a calibration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// RMSE of the infectious series alone.
    Infectious,
    /// Sum of the RMSEs of the four compartments.
    Compartments,
}

impl Default for ScoreMode {
    fn default() -> Self {
        ScoreMode::Compartments
    }
}

impl ScoreMode {
    /// Compartments that contribute to the score.
    pub fn compartments(&self) -> &'static [Compartment] {
        match self {
            ScoreMode::Infectious => &[Compartment::I],
            ScoreMode::Compartments => &Compartment::ALL,
        }
    }

    /// Score a simulated trajectory against observations. Lower is better.
    pub fn score(&self, trajectory: &Trajectory, observations: &Observations) -> Result<Real> {
        let mut total = 0.0;
        for &c in self.compartments() {
            total += rmse(&trajectory.series(c), &observations.series(c))?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epidemic::ModelState;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn rmse_values() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0, 5.0];
        assert_approx_eq!(rmse(&a, &b).unwrap(), (4.0 / 3.0 as Real).sqrt(), 1e-12);
        assert_eq!(rmse(&[2.0], &[2.0]).unwrap(), 0.0);
    }

    #[test]
    fn rmse_self_is_zero_and_symmetric() {
        let a = [999.0, 998.5005, 997.806791777625, 0.0, 1e-3];
        let b = [990.0, 1000.0, 0.25, 3.0, 7.5];
        assert_eq!(rmse(&a, &a).unwrap(), 0.0);
        assert_eq!(rmse(&a, &b).unwrap(), rmse(&b, &a).unwrap());
    }

    #[test]
    fn rmse_errors() {
        let err = rmse(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            SirdError::LengthMismatch {
                expected: 3,
                found: 2
            }
        ));
        assert!(matches!(rmse(&[], &[]), Err(SirdError::LengthMismatch { .. })));
        assert!(matches!(
            rmse(&[Real::NAN, 1.0], &[1.0, 1.0]),
            Err(SirdError::NonFinite(_))
        ));
    }

    #[test]
    fn score_modes() {
        let tr = Trajectory::from_states(&[
            ModelState::new(99.0, 1.0, 0.0, 0.0),
            ModelState::new(98.0, 1.5, 0.4, 0.1),
        ]);
        let obs = Observations::from_trajectory(&Trajectory::from_states(&[
            ModelState::new(99.0, 1.0, 0.0, 0.0),
            ModelState::new(97.0, 2.5, 0.4, 0.1),
        ]));

        let infectious = ScoreMode::Infectious.score(&tr, &obs).unwrap();
        assert_approx_eq!(infectious, (0.5 as Real).sqrt(), 1e-12);

        let all = ScoreMode::Compartments.score(&tr, &obs).unwrap();
        assert_approx_eq!(all, 2.0 * (0.5 as Real).sqrt(), 1e-12);
        assert_eq!(ScoreMode::default(), ScoreMode::Compartments);
    }
}
