use log::{error, warn, LevelFilter};
use simple_logger::SimpleLogger;
use sird::{config::Config, prelude::*};
use std::{env, process};

pub fn main() {
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Info).init() {
        eprintln!("logger initialization failed: {}", err);
    }
    if let Err(err) = run() {
        error!("{}", err);
        process::exit(1);
    }
}

/// Simulate the forecast parameters and print the daily trajectory as CSV.
///
/// If the observed data is available, the simulation starts from its first
/// row, covers the same days and its score is reported.
fn run() -> Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| "conf.toml".to_string());
    let cfg = Config::load_or_default(&path)?;
    let params = cfg.forecast.params;

    let observations = if cfg.data.exists() {
        Some(Observations::from_path(&cfg.data)?)
    } else {
        warn!("{} not found, starting from the synthetic initial state", cfg.data.display());
        None
    };

    let trajectory = match &observations {
        Some(obs) => {
            let search = cfg.grid_search(obs)?;
            let (score, trajectory) = search.evaluate(&params, obs)?;
            eprintln!("{} score ({:?}): {}", params, search.mode(), score);
            trajectory
        }
        None => {
            let horizon = cfg
                .horizon
                .unwrap_or_else(|| cfg.synthetic.days.saturating_sub(1));
            cfg.simulator(horizon)?.run(&cfg.synthetic.initial, &params)?
        }
    };

    println!("{}", trajectory.render_csv(','));
    Ok(())
}
