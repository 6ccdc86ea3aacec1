use log::{error, LevelFilter};
use simple_logger::SimpleLogger;
use sird::{config::Config, data::synthetic, prelude::*};
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

fn run() -> Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| "conf.toml".to_string());
    let cfg = Config::load_or_default(&path)?;
    let settings = &cfg.synthetic;

    let simulator = cfg.simulator(settings.days.saturating_sub(1))?;
    let observations = synthetic::generate(
        &simulator,
        &settings.initial,
        &settings.params,
        settings.noise,
        settings.seed,
    )?;
    observations.write_path(&settings.output)?;

    println!(
        "{} days generated with {} (noise={}) in {}",
        observations.len(),
        settings.params,
        settings.noise,
        settings.output.display()
    );
    Ok(())
}
