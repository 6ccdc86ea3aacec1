use log::{error, LevelFilter};
use simple_logger::SimpleLogger;
use sird::{config::Config, prelude::*, utils::*};
use std::{env, fs, process};

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
    if cfg.verbose {
        println!("{:#?}", cfg);
    }

    let observations = Observations::from_path(&cfg.data)?;
    let search = cfg.grid_search(&observations)?;
    let best = search.search(&cfg.grid, &observations)?;
    let params = best.params();

    println!("Best parameters found:");
    println!(
        "beta: {} gamma: {} mu: {}",
        params.beta(),
        params.gamma(),
        params.mu()
    );
    println!("score ({:?}): {}", search.mode(), best.score());
    println!(
        "reproduction number: {:.3}",
        params.reproduction_number(search.initial().s)
    );
    println!("fatality ratio: {:.4}", params.fatality_ratio());
    println!("candidates evaluated: {}", best.evaluated());

    if cfg.plot.enabled {
        println!();
        print!(
            "{}",
            render_all(best.trajectory(), &observations, cfg.plot.width, cfg.plot.height)?
        );
    }

    if let Some(output) = &cfg.output {
        fs::write(output, comparison_csv(best.trajectory(), &observations)?)?;
        println!("Best fit written to {}", output.display());
    }
    Ok(())
}
