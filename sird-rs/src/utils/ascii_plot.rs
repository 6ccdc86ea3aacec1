//! Text rendering of simulated and observed epidemic curves.
use crate::{
    data::Observations,
    epidemic::Compartment,
    error::{Result, SirdError},
    prelude::{Real, INF},
    sim::Trajectory,
};

const SIMULATED: char = '*';
const OBSERVED: char = 'o';
const BOTH: char = '@';

/// ASCII chart comparing the simulated and observed curves of a compartment.
///
/// Days are spread over `width` columns and values over `height` rows, from
/// zero to the largest value of both curves. Simulated points are drawn as
/// '*', observed points as 'o' and coinciding points as '@'.
pub fn render_comparison(
    trajectory: &Trajectory,
    observations: &Observations,
    compartment: Compartment,
    width: usize,
    height: usize,
) -> Result<String> {
    if trajectory.len() != observations.len() {
        return Err(SirdError::LengthMismatch {
            expected: observations.len(),
            found: trajectory.len(),
        });
    }
    if width < 2 || height < 2 {
        return Err(SirdError::invalid(
            "plot size",
            width.min(height) as Real,
            "charts need at least 2 rows and columns",
        ));
    }

    let simulated = trajectory.series(compartment);
    let observed = observations.series(compartment);
    let max = simulated
        .iter()
        .chain(observed.iter())
        .cloned()
        .fold(-INF, Real::max);
    let top = if max > 0.0 { max } else { 1.0 };

    let mut canvas = vec![vec![' '; width]; height];
    let ndays = simulated.len();
    let mut draw = |values: &[Real], mark: char| {
        for (day, &y) in values.iter().enumerate() {
            let col = if ndays > 1 {
                day * (width - 1) / (ndays - 1)
            } else {
                0
            };
            let level = ((y / top).max(0.0).min(1.0) * (height - 1) as Real).round() as usize;
            let cell = &mut canvas[height - 1 - level][col];
            *cell = match *cell {
                ' ' => mark,
                c if c == mark => mark,
                _ => BOTH,
            };
        }
    };
    draw(&simulated, SIMULATED);
    draw(&observed, OBSERVED);

    let mut out = format!(
        "{} ({} observed, {} simulated)\n",
        compartment, OBSERVED, SIMULATED
    );
    for (i, row) in canvas.iter().enumerate() {
        let label = match i {
            0 => format!("{:>10.3e}", top),
            _ if i == height - 1 => format!("{:>10}", 0),
            _ => " ".repeat(10),
        };
        out.push_str(&label);
        out.push_str(" |");
        out.extend(row.iter());
        out.push('\n');
    }
    out.push_str(&" ".repeat(11));
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');
    out.push_str(&format!(
        "{:>12}{:>w$}\n",
        observations.first_day(),
        observations.first_day() as usize + ndays.saturating_sub(1),
        w = width - 1
    ));
    Ok(out)
}

/// Charts for all four compartments, one below the other.
pub fn render_all(
    trajectory: &Trajectory,
    observations: &Observations,
    width: usize,
    height: usize,
) -> Result<String> {
    let mut out = String::new();
    for &c in Compartment::ALL.iter() {
        out.push_str(&render_comparison(trajectory, observations, c, width, height)?);
        out.push('\n');
    }
    Ok(out)
}

/// Side by side CSV table of simulated and observed values, for plotting
/// with external tools.
pub fn comparison_csv(trajectory: &Trajectory, observations: &Observations) -> Result<String> {
    if trajectory.len() != observations.len() {
        return Err(SirdError::LengthMismatch {
            expected: observations.len(),
            found: trajectory.len(),
        });
    }

    let mut data = String::from("day");
    for c in Compartment::ALL.iter() {
        data.push_str(&format!(",{0}_sim,{0}_obs", c.symbol()));
    }
    for (rec, st) in observations.records().iter().zip(trajectory.states()) {
        data.push('\n');
        data.push_str(&rec.day.to_string());
        for &c in Compartment::ALL.iter() {
            data.push_str(&format!(",{},{}", st.get(c), rec.state().get(c)));
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epidemic::ModelState;

    fn sample() -> (Trajectory, Observations) {
        let tr = Trajectory::from_states(&[
            ModelState::new(10.0, 0.0, 0.0, 0.0),
            ModelState::new(5.0, 5.0, 0.0, 0.0),
            ModelState::new(0.0, 10.0, 0.0, 0.0),
        ]);
        let obs = Observations::from_trajectory(&Trajectory::from_states(&[
            ModelState::new(10.0, 0.0, 0.0, 0.0),
            ModelState::new(6.0, 4.0, 0.0, 0.0),
            ModelState::new(0.0, 10.0, 0.0, 0.0),
        ]));
        (tr, obs)
    }

    #[test]
    fn chart_layout() {
        let (tr, obs) = sample();
        let chart = render_comparison(&tr, &obs, Compartment::I, 5, 3).unwrap();
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines[0], "Infectious (o observed, * simulated)");
        // Header, 3 rows, axis and day labels.
        assert_eq!(lines.len(), 6);
        assert!(lines[1].ends_with("|    @"));
        assert!(lines[2].ends_with("|  @  "));
        assert!(lines[3].ends_with("|@    "));
        assert!(lines[4].ends_with("+-----"));
    }

    #[test]
    fn distinct_marks() {
        let (tr, obs) = sample();
        let chart = render_comparison(&tr, &obs, Compartment::S, 3, 11).unwrap();
        assert!(chart.contains('*'));
        assert!(chart.contains('o'));
        assert!(chart.contains('@'));
        assert_eq!(render_all(&tr, &obs, 3, 11).unwrap().matches(" simulated)").count(), 4);
    }

    #[test]
    fn flat_zero_curve() {
        let (tr, obs) = sample();
        let chart = render_comparison(&tr, &obs, Compartment::D, 3, 2).unwrap();
        let lines: Vec<_> = chart.lines().collect();
        assert!(lines[2].ends_with("|@@@"));
    }

    #[test]
    fn invalid_inputs() {
        let (tr, obs) = sample();
        let short = Trajectory::from_states(&[ModelState::new(1.0, 0.0, 0.0, 0.0)]);
        assert!(render_comparison(&short, &obs, Compartment::I, 10, 5).is_err());
        assert!(render_comparison(&tr, &obs, Compartment::I, 1, 5).is_err());
        assert!(comparison_csv(&short, &obs).is_err());
    }

    #[test]
    fn csv_table() {
        let (tr, obs) = sample();
        let csv = comparison_csv(&tr, &obs).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "day,S_sim,S_obs,I_sim,I_obs,R_sim,R_obs,D_sim,D_obs");
        assert_eq!(lines[2], "1,5,6,5,4,0,0,0,0");
        assert_eq!(lines.len(), 4);
    }
}
