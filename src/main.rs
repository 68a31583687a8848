use anyhow::Result;
use clap::Parser;
use intentsim_lib::model::config::AppConfig;
use intentsim_lib::model::metrics::init_logging;
use intentsim_lib::runner;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about = "Intent field particle simulation", long_about = None)]
struct Args {
    /// Batch configuration file. The four reference runs are used when it does not exist.
    #[arg(short, long, default_value = "intentsim.toml")]
    config: String,

    /// Output directory, overriding `output.data_dir`
    #[arg(short, long)]
    output: Option<String>,

    /// Only execute the named run(s)
    #[arg(short, long)]
    run: Vec<String>,

    /// Seed every selected run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the iteration count of every selected run
    #[arg(long)]
    iterations: Option<u64>,
}

fn apply_overrides(mut config: AppConfig, args: &Args) -> Result<AppConfig> {
    if let Some(dir) = &args.output {
        config.output.data_dir = dir.clone();
    }
    if !args.run.is_empty() {
        for name in &args.run {
            anyhow::ensure!(
                config.runs.iter().any(|r| &r.name == name),
                "Unknown run: {}",
                name
            );
        }
        config.runs.retain(|r| args.run.contains(&r.name));
    }
    for run in &mut config.runs {
        if let Some(seed) = args.seed {
            run.seed = Some(seed);
        }
        if let Some(iterations) = args.iterations {
            run.iterations = iterations;
        }
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = AppConfig::load(Path::new(&args.config))?;
    let config = apply_overrides(config, &args)?;

    println!("Starting intent field simulation ({} runs)...", config.runs.len());
    let outcomes = runner::run_all(&config)?;

    let mut failed = 0;
    for outcome in &outcomes {
        match (&outcome.path, &outcome.error) {
            (Some(path), _) => println!("  {}: saved {}", outcome.name, path.display()),
            (None, Some(err)) => {
                failed += 1;
                println!("  {}: FAILED ({})", outcome.name, err);
            }
            (None, None) => {}
        }
    }

    anyhow::ensure!(failed == 0, "{} of {} runs failed", failed, outcomes.len());
    println!("Data collection complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing_defaults() {
        let args = Args::parse_from(["intentsim"]);
        assert_eq!(args.config, "intentsim.toml");
        assert!(args.output.is_none());
        assert!(args.run.is_empty());
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_overrides_filter_and_seed() {
        let args = Args::parse_from([
            "intentsim",
            "-r",
            "baseline",
            "-r",
            "full_features",
            "--seed",
            "9",
            "--iterations",
            "200",
            "-o",
            "out",
        ]);
        let config = apply_overrides(AppConfig::default(), &args).unwrap();
        assert_eq!(config.output.data_dir, "out");
        let names: Vec<&str> = config.runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["baseline", "full_features"]);
        assert!(config.runs.iter().all(|r| r.seed == Some(9) && r.iterations == 200));
    }

    #[test]
    fn test_unknown_run_is_rejected() {
        let args = Args::parse_from(["intentsim", "--run", "nope"]);
        assert!(apply_overrides(AppConfig::default(), &args).is_err());
    }
}
