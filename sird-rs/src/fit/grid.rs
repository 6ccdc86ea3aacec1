use crate::{
    epidemic::SirdParams,
    error::{Result, SirdError},
    prelude::Real,
    utils::linspace,
};
use serde::{Deserialize, Serialize};

/// Largest number of values a single axis may hold.
pub const MAX_AXIS_LEN: usize = 1_000_000;

/// Discretization of a single rate.
///
/// In configuration files, a range is written either as a number, a list of
/// numbers, `{ start, stop, num }` for evenly spaced values including both
/// ends or `{ start, stop, step }` for values spaced by a fixed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamRange {
    Value(Real),
    List(Vec<Real>),
    Linspace { start: Real, stop: Real, num: usize },
    Step { start: Real, stop: Real, step: Real },
}

impl ParamRange {
    /// Values of the range in enumeration order.
    ///
    /// `name` identifies the rate in error messages. Values must be finite and
    /// non-negative and ranges cannot be empty.
    pub fn values(&self, name: &'static str) -> Result<Vec<Real>> {
        let values = match self {
            &ParamRange::Value(x) => vec![x],
            ParamRange::List(xs) => xs.clone(),
            &ParamRange::Linspace { start, stop, num } => {
                if num == 0 {
                    return Err(SirdError::invalid(name, 0.0, "linspace requires num >= 1"));
                }
                if num > MAX_AXIS_LEN {
                    return Err(SirdError::invalid(name, num as Real, "too many values"));
                }
                linspace(start, stop, num)
            }
            &ParamRange::Step { start, stop, step } => {
                if !step.is_finite() || step <= 0.0 {
                    return Err(SirdError::invalid(name, step, "step must be positive"));
                }
                for &x in [start, stop].iter() {
                    if !x.is_finite() || x < 0.0 {
                        return Err(SirdError::invalid(
                            name,
                            x,
                            "range bounds must be finite and non-negative",
                        ));
                    }
                }
                if stop < start {
                    return Err(SirdError::invalid(name, stop, "stop is lower than start"));
                }
                let count = ((stop - start) / step + 1e-9).floor();
                let n = if count.is_finite() && count < MAX_AXIS_LEN as Real {
                    (count as usize).checked_add(1)
                } else {
                    None
                };
                let n = match n {
                    Some(n) if n <= MAX_AXIS_LEN => n,
                    _ => {
                        return Err(SirdError::invalid(
                            name,
                            step,
                            "step is too small for the range",
                        ))
                    }
                };
                (0..n).map(|k| start + k as Real * step).collect()
            }
        };

        if values.is_empty() {
            return Err(SirdError::invalid(name, 0.0, "empty range"));
        }
        for &x in &values {
            if !x.is_finite() || x < 0.0 {
                return Err(SirdError::invalid(name, x, "rate must be finite and non-negative"));
            }
        }
        Ok(values)
    }
}

impl From<Real> for ParamRange {
    fn from(x: Real) -> Self {
        ParamRange::Value(x)
    }
}

impl From<Vec<Real>> for ParamRange {
    fn from(xs: Vec<Real>) -> Self {
        ParamRange::List(xs)
    }
}

/// Cartesian grid of candidate rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub beta: ParamRange,
    pub gamma: ParamRange,
    pub mu: ParamRange,
}

impl Default for Grid {
    /// 20 x 4 x 4 candidates. Mortality is usually much smaller than the other
    /// rates.
    fn default() -> Self {
        Grid {
            beta: ParamRange::Linspace {
                start: 0.1,
                stop: 1.0,
                num: 20,
            },
            gamma: ParamRange::Linspace {
                start: 0.1,
                stop: 1.0,
                num: 4,
            },
            mu: ParamRange::Linspace {
                start: 0.01,
                stop: 0.5,
                num: 4,
            },
        }
    }
}

impl Grid {
    pub fn new(
        beta: impl Into<ParamRange>,
        gamma: impl Into<ParamRange>,
        mu: impl Into<ParamRange>,
    ) -> Self {
        Grid {
            beta: beta.into(),
            gamma: gamma.into(),
            mu: mu.into(),
        }
    }

    /// A grid with a single candidate.
    pub fn single(params: SirdParams) -> Self {
        Grid::new(params.beta(), params.gamma(), params.mu())
    }

    /// Values of each axis.
    pub fn axes(&self) -> Result<[Vec<Real>; 3]> {
        Ok([
            self.beta.values("beta")?,
            self.gamma.values("gamma")?,
            self.mu.values("mu")?,
        ])
    }

    /// Number of candidates.
    pub fn len(&self) -> Result<usize> {
        let [betas, gammas, mus] = self.axes()?;
        Ok(betas.len() * gammas.len() * mus.len())
    }

    /// All candidates, with beta varying slowest and mu fastest.
    pub fn candidates(&self) -> Result<Vec<SirdParams>> {
        let [betas, gammas, mus] = self.axes()?;
        let mut out = Vec::with_capacity(betas.len() * gammas.len() * mus.len());
        for &beta in &betas {
            for &gamma in &gammas {
                for &mu in &mus {
                    out.push(SirdParams::new(beta, gamma, mu));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn range_forms() {
        assert_eq!(ParamRange::Value(0.5).values("beta").unwrap(), vec![0.5]);
        assert_eq!(
            ParamRange::List(vec![0.3, 0.1]).values("beta").unwrap(),
            vec![0.3, 0.1]
        );

        let xs = ParamRange::Linspace {
            start: 0.1,
            stop: 1.0,
            num: 4,
        }
        .values("gamma")
        .unwrap();
        assert_eq!(xs.len(), 4);
        assert_approx_eq!(xs[1], 0.4, 1e-12);
        assert_eq!(xs[3], 1.0);

        let xs = ParamRange::Step {
            start: 0.0,
            stop: 0.3,
            step: 0.1,
        }
        .values("mu")
        .unwrap();
        assert_eq!(xs.len(), 4);
        assert_approx_eq!(xs[3], 0.3, 1e-12);

        let xs = ParamRange::Step {
            start: 0.0,
            stop: 0.35,
            step: 0.1,
        }
        .values("mu")
        .unwrap();
        assert_eq!(xs.len(), 4);
    }

    #[test]
    fn invalid_ranges() {
        assert!(ParamRange::List(vec![]).values("beta").is_err());
        assert!(ParamRange::Value(-0.1).values("beta").is_err());
        assert!(ParamRange::List(vec![0.1, Real::NAN]).values("beta").is_err());
        let bad = [
            ParamRange::Linspace {
                start: 0.1,
                stop: 1.0,
                num: 0,
            },
            ParamRange::Step {
                start: 0.1,
                stop: 1.0,
                step: 0.0,
            },
            ParamRange::Step {
                start: 1.0,
                stop: 0.1,
                step: 0.1,
            },
            ParamRange::Step {
                start: 0.0,
                stop: Real::INFINITY,
                step: 0.1,
            },
            ParamRange::Step {
                start: Real::NAN,
                stop: 1.0,
                step: 0.1,
            },
            ParamRange::Step {
                start: 0.0,
                stop: 1.0,
                step: 1e-300,
            },
            ParamRange::Linspace {
                start: 0.1,
                stop: 1.0,
                num: MAX_AXIS_LEN + 1,
            },
        ];
        for r in bad.iter() {
            assert!(
                matches!(r.values("beta"), Err(SirdError::InvalidParameter { name: "beta", .. })),
                "{:?}",
                r
            );
        }

        let grid: Grid = toml::from_str("beta = { start = 0.1, stop = inf, step = 0.1 }").unwrap();
        assert!(matches!(
            grid.candidates(),
            Err(SirdError::InvalidParameter { name: "beta", .. })
        ));
    }

    #[test]
    fn enumeration_order() {
        let grid = Grid::new(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]);
        let c = grid.candidates().unwrap();
        assert_eq!(grid.len().unwrap(), 8);
        assert_eq!(c[0], SirdParams::new(1.0, 3.0, 5.0));
        assert_eq!(c[1], SirdParams::new(1.0, 3.0, 6.0));
        assert_eq!(c[2], SirdParams::new(1.0, 4.0, 5.0));
        assert_eq!(c[4], SirdParams::new(2.0, 3.0, 5.0));
        assert_eq!(c[7], SirdParams::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn default_grid() {
        let grid = Grid::default();
        assert_eq!(grid.len().unwrap(), 320);
        let c = grid.candidates().unwrap();
        assert_eq!(c[0], SirdParams::new(0.1, 0.1, 0.01));
        assert_eq!(c[319], SirdParams::new(1.0, 1.0, 0.5));
    }

    #[test]
    fn single_candidate() {
        let p = SirdParams::new(0.2, 0.1, 0.01);
        assert_eq!(Grid::single(p).candidates().unwrap(), vec![p]);
    }

    #[test]
    fn ranges_from_toml() {
        let grid: Grid = toml::from_str(
            r#"
            beta = { start = 0.1, stop = 1.0, num = 10 }
            gamma = [0.1, 0.2]
            mu = 0.01
            "#,
        )
        .unwrap();
        assert_eq!(grid.len().unwrap(), 20);
        assert_eq!(grid.mu, ParamRange::Value(0.01));

        let grid: Grid = toml::from_str("beta = { start = 0.1, stop = 0.5, step = 0.1 }").unwrap();
        assert_eq!(grid.beta.values("beta").unwrap().len(), 5);
        assert_eq!(grid.gamma, Grid::default().gamma);
    }
}
