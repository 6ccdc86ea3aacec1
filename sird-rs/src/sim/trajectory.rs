use crate::{
    epidemic::{Compartment, ModelState},
    prelude::Real,
};
use ndarray::{Array2, ArrayView1, Axis};
use paste::paste;

/// Daily sequence of model states.
///
/// Stored as a table with one row per day (starting at day 0) and one column
/// per compartment in the S, I, R, D order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    data: Array2<Real>,
}

impl Trajectory {
    /// Create a zeroed trajectory with the given number of days.
    pub(crate) fn zeros(ndays: usize) -> Self {
        Trajectory {
            data: Array2::zeros((ndays, Compartment::CARDINALITY)),
        }
    }

    /// Build trajectory from a sequence of states.
    pub fn from_states(states: &[ModelState]) -> Self {
        let mut new = Trajectory::zeros(states.len());
        for (day, st) in states.iter().enumerate() {
            new.set_state(day, st);
        }
        return new;
    }

    pub(crate) fn set_state(&mut self, day: usize, state: &ModelState) {
        for (j, x) in state.as_array().iter().enumerate() {
            self.data[[day, j]] = *x;
        }
    }

    /// Number of days, including day 0.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// State at the given day, if it exists.
    pub fn state(&self, day: usize) -> Option<ModelState> {
        if day >= self.len() {
            return None;
        }
        let row = self.data.row(day);
        Some(ModelState::new(row[0], row[1], row[2], row[3]))
    }

    /// Last state of the trajectory.
    pub fn last(&self) -> Option<ModelState> {
        self.len().checked_sub(1).and_then(|day| self.state(day))
    }

    /// Iterate over all states in day order.
    pub fn states(&self) -> impl Iterator<Item = ModelState> + '_ {
        self.data
            .axis_iter(Axis(0))
            .map(|row| ModelState::new(row[0], row[1], row[2], row[3]))
    }

    /// A view over the column of a single compartment.
    pub fn column(&self, compartment: Compartment) -> ArrayView1<'_, Real> {
        self.data.column(compartment.index())
    }

    /// Copy of the values of a single compartment.
    pub fn series(&self, compartment: Compartment) -> Vec<Real> {
        self.column(compartment).to_vec()
    }

    series_accessors!();

    /// Total population at each day.
    pub fn totals(&self) -> Vec<Real> {
        self.data.sum_axis(Axis(1)).to_vec()
    }

    /// Underlying (days x compartments) table.
    pub fn as_array(&self) -> &Array2<Real> {
        &self.data
    }

    /// Render trajectory as CSV data with a leading day column.
    pub fn render_csv(&self, sep: char) -> String {
        let mut data = String::from("day");
        for c in Compartment::ALL.iter() {
            data.push(sep);
            data.push_str(c.symbol());
        }

        for (day, row) in self.data.axis_iter(Axis(0)).enumerate() {
            data.push('\n');
            data.push_str(&day.to_string());
            for x in row.iter() {
                data.push(sep);
                data.push_str(&format!("{}", x));
            }
        }
        return data;
    }
}
