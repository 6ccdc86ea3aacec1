use crate::{
    epidemic::{Compartment, ModelState},
    error::{Result, SirdError},
    prelude::{Real, Time},
    sim::Trajectory,
};
use paste::paste;
use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::Path};

/// Accepted header names for each required column. The first name of each
/// entry is the canonical one, used when writing data back.
const COLUMNS: [(&str, &[&str]); 5] = [
    ("day", &["day", "Day", "Jour", "jour"]),
    ("S", &["S", "Susceptibles", "susceptible"]),
    ("I", &["I", "Infectés", "Infectes", "infectious"]),
    ("R", &["R", "Rétablis", "Retablis", "recovered"]),
    ("D", &["D", "Décès", "Deces", "dead"]),
];

/// A single row of observed data: counts in each compartment at a given day.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpidemicRecord {
    #[serde(rename = "day", alias = "Day", alias = "Jour", alias = "jour")]
    pub day: Time,
    #[serde(rename = "S", alias = "Susceptibles", alias = "susceptible")]
    pub s: Real,
    #[serde(rename = "I", alias = "Infectés", alias = "Infectes", alias = "infectious")]
    pub i: Real,
    #[serde(rename = "R", alias = "Rétablis", alias = "Retablis", alias = "recovered")]
    pub r: Real,
    #[serde(rename = "D", alias = "Décès", alias = "Deces", alias = "dead")]
    pub d: Real,
}

impl EpidemicRecord {
    pub fn new(day: Time, state: ModelState) -> Self {
        EpidemicRecord {
            day,
            s: state.s,
            i: state.i,
            r: state.r,
            d: state.d,
        }
    }

    pub fn state(&self) -> ModelState {
        ModelState::new(self.s, self.i, self.r, self.d)
    }
}

/// How the initial state of a simulation is extracted from data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialState {
    /// Take S and I from the first observation and start with R = D = 0.
    Seeded,
    /// Take all four compartments from the first observation.
    FromData,
}

impl Default for InitialState {
    fn default() -> Self {
        InitialState::Seeded
    }
}

/// Validated sequence of daily observations.
///
/// Days are consecutive and ascending and every count is a finite
/// non-negative number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observations {
    records: Vec<EpidemicRecord>,
}

impl Observations {
    /// Create observations from records, validating them.
    pub fn new(records: Vec<EpidemicRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SirdError::Parse {
                line: 1,
                message: "no observations".into(),
            });
        }

        let first_day = records[0].day;
        for (k, rec) in records.iter().enumerate() {
            // Header sits on line 1.
            let line = k as u64 + 2;
            if rec.day as usize != first_day as usize + k {
                return Err(SirdError::Parse {
                    line,
                    message: format!(
                        "expected day {}, found day {}: days must be consecutive and ascending",
                        first_day as usize + k,
                        rec.day
                    ),
                });
            }
            for c in Compartment::ALL.iter() {
                let x = rec.state().get(*c);
                if !x.is_finite() || x < 0.0 {
                    return Err(SirdError::Parse {
                        line,
                        message: format!("column {}: {} is not a valid count", c.symbol(), x),
                    });
                }
            }
        }
        Ok(Observations { records })
    }

    /// Load observations from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load observations from any CSV source.
    ///
    /// The table must have a header with the day and the four compartment
    /// columns. Extra columns are ignored.
    pub fn from_reader<R: io::Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let headers = reader.headers()?.clone();

        for (name, aliases) in COLUMNS.iter() {
            if !headers.iter().any(|h| aliases.contains(&h)) {
                return Err(SirdError::MissingColumn(*name));
            }
        }

        let mut records = Vec::new();
        for res in reader.deserialize() {
            let row: EpidemicRecord = res.map_err(parse_error)?;
            records.push(row);
        }
        Self::new(records)
    }

    /// Create observations from a simulated trajectory, numbering days from
    /// zero.
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        let records = trajectory
            .states()
            .enumerate()
            .map(|(day, st)| EpidemicRecord::new(day as Time, st))
            .collect();
        Observations { records }
    }

    pub fn records(&self) -> &[EpidemicRecord] {
        &self.records
    }

    /// Number of observed days.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Day of the first observation.
    pub fn first_day(&self) -> Time {
        self.records.first().map(|r| r.day).unwrap_or(0)
    }

    /// Observed values of a single compartment, in day order.
    pub fn series(&self, compartment: Compartment) -> Vec<Real> {
        self.records
            .iter()
            .map(|r| r.state().get(compartment))
            .collect()
    }

    series_accessors!();

    /// Initial state of a simulation that should reproduce this data.
    pub fn initial_state(&self, mode: InitialState) -> Result<ModelState> {
        let first = self.records.first().ok_or(SirdError::LengthMismatch {
            expected: 1,
            found: 0,
        })?;
        let state = match mode {
            InitialState::Seeded => ModelState::new(first.s, first.i, 0.0, 0.0),
            InitialState::FromData => first.state(),
        };
        Ok(state)
    }

    /// Write observations as CSV using the canonical column names.
    pub fn write_csv<W: io::Write>(&self, wtr: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(wtr);
        for rec in &self.records {
            writer.serialize(rec)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write observations to a CSV file.
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_csv(File::create(path)?)
    }
}

/// Type coercion failures are reported with their line; everything else is
/// passed through.
fn parse_error(err: csv::Error) -> SirdError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.kind() {
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. } => {
            SirdError::Parse {
                line,
                message: err.to_string(),
            }
        }
        _ => SirdError::Csv(err),
    }
}
