use super::{Grid, ScoreMode};
use crate::{
    data::Observations,
    epidemic::{ModelState, SirdParams},
    error::{Result, SirdError},
    prelude::{Real, INF},
    sim::{Simulator, Trajectory},
};
use getset::{CopyGetters, Getters};
use log::{debug, info};
use rayon::prelude::*;

/// Result of a calibration: the best candidate, its score and trajectory.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct BestFit {
    #[getset(get_copy = "pub")]
    params: SirdParams,
    #[getset(get_copy = "pub")]
    score: Real,
    #[getset(get = "pub")]
    trajectory: Trajectory,
    /// Number of candidates evaluated.
    #[getset(get_copy = "pub")]
    evaluated: usize,
}

/// Exhaustive search of the rates that best reproduce observed data.
///
/// Every candidate is simulated from the same initial state over the same
/// horizon. The candidate with the lowest score wins and ties go to the
/// candidate enumerated first, so results do not depend on whether the
/// search runs in parallel.
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct GridSearch {
    simulator: Simulator,
    initial: ModelState,
    mode: ScoreMode,
    parallel: bool,
}

impl GridSearch {
    pub fn new(simulator: Simulator, initial: ModelState) -> Self {
        GridSearch {
            simulator,
            initial,
            mode: ScoreMode::default(),
            parallel: false,
        }
    }

    pub fn with_mode(mut self, mode: ScoreMode) -> Self {
        self.mode = mode;
        return self;
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        return self;
    }

    /// Simulate a single candidate and score it against observations.
    pub fn evaluate(
        &self,
        params: &SirdParams,
        observations: &Observations,
    ) -> Result<(Real, Trajectory)> {
        self.check_length(observations)?;
        let trajectory = self.simulator.run(&self.initial, params)?;
        let score = self.mode.score(&trajectory, observations)?;
        Ok((score, trajectory))
    }

    /// Evaluate all candidates of the grid and return the best one.
    ///
    /// Observations must cover exactly the simulated days (horizon + 1) and
    /// any candidate that fails to simulate or score aborts the search.
    pub fn search(&self, grid: &Grid, observations: &Observations) -> Result<BestFit> {
        self.check_length(observations)?;
        let candidates = grid.candidates()?;
        if candidates.is_empty() {
            return Err(SirdError::LengthMismatch {
                expected: 1,
                found: 0,
            });
        }

        info!(
            "searching {} candidates over {} days ({:?} score)",
            candidates.len(),
            self.simulator.horizon(),
            self.mode
        );
        let best = if self.parallel {
            self.search_parallel(&candidates, observations)?
        } else {
            self.search_sequential(&candidates, observations)?
        };
        info!("best fit: {} (score={})", best.params, best.score);
        Ok(best)
    }

    fn search_sequential(
        &self,
        candidates: &[SirdParams],
        observations: &Observations,
    ) -> Result<BestFit> {
        let n = candidates.len();
        let report_every = (n / 10).max(1);
        let mut best: Option<BestFit> = None;
        let mut best_score = INF;

        for (k, params) in candidates.iter().enumerate() {
            let (score, trajectory) = self
                .evaluate(params, observations)
                .map_err(|err| err.for_candidate(*params))?;
            if best.is_none() || score < best_score {
                debug!("new best at candidate {}: {} (score={})", k, params, score);
                best_score = score;
                best = Some(BestFit {
                    params: *params,
                    score,
                    trajectory,
                    evaluated: 0,
                });
            }
            if (k + 1) % report_every == 0 {
                info!("{}/{} candidates, best score {}", k + 1, n, best_score);
            }
        }

        let mut best = best.ok_or(SirdError::LengthMismatch {
            expected: 1,
            found: 0,
        })?;
        best.evaluated = n;
        Ok(best)
    }

    fn search_parallel(
        &self,
        candidates: &[SirdParams],
        observations: &Observations,
    ) -> Result<BestFit> {
        debug!("parallel search on {} threads", rayon::current_num_threads());
        let results: Vec<Result<Real>> = candidates
            .par_iter()
            .map(|params| {
                self.evaluate(params, observations)
                    .map(|(score, _)| score)
                    .map_err(|err| err.for_candidate(*params))
            })
            .collect();

        // Report the first failure in enumeration order, like the sequential search.
        let mut scores = Vec::with_capacity(results.len());
        for res in results {
            scores.push(res?);
        }

        // Scanning in enumeration order keeps the first of tied candidates.
        let mut best_idx = 0;
        for (k, &score) in scores.iter().enumerate() {
            if score < scores[best_idx] {
                best_idx = k;
            }
        }

        let params = candidates[best_idx];
        let (score, trajectory) = self.evaluate(&params, observations)?;
        Ok(BestFit {
            params,
            score,
            trajectory,
            evaluated: candidates.len(),
        })
    }

    fn check_length(&self, observations: &Observations) -> Result<()> {
        let expected = self.simulator.horizon() + 1;
        if observations.len() != expected {
            return Err(SirdError::LengthMismatch {
                expected,
                found: observations.len(),
            });
        }
        Ok(())
    }
}
