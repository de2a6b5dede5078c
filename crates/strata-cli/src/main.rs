use std::path::PathBuf;
use std::process;

use strata_cli::config;
use strata_cli::{run, CliError, RunOptions};

fn print_usage() {
    eprintln!("Usage: strata <world-dir> [OPTIONS]");
    eprintln!("  --cache <path>    Block cache file (default: cache.dat)");
    eprintln!("  --config <path>   Survey config RON file");
    eprintln!("  --output <path>   Text report (default: out.txt)");
    eprintln!("  --json <path>     Also write the results as JSON");
    eprintln!("  --seed <n>        Seed for start sampling (overrides config)");
    eprintln!("  --rebuild         Rebuild the block cache even if it exists");
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, CliError> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))
}

/// What the command line asks for.
#[derive(Debug)]
enum Command {
    Run(Box<RunOptions>),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut world_dir: Option<PathBuf> = None;
    let mut cache_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut json_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut rebuild = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cache" => cache_path = Some(PathBuf::from(flag_value(args, &mut i, "--cache")?)),
            "--config" => config_path = Some(PathBuf::from(flag_value(args, &mut i, "--config")?)),
            "--output" => output_path = Some(PathBuf::from(flag_value(args, &mut i, "--output")?)),
            "--json" => json_path = Some(PathBuf::from(flag_value(args, &mut i, "--json")?)),
            "--seed" => {
                let raw = flag_value(args, &mut i, "--seed")?;
                seed = Some(
                    raw.parse()
                        .map_err(|_| CliError::Usage(format!("invalid --seed value: {raw}")))?,
                );
            }
            "--rebuild" => rebuild = true,
            "--help" | "-h" => return Ok(Command::Help),
            other if other.starts_with("--") => {
                return Err(CliError::Usage(format!("Unknown argument: {other}")));
            }
            other => {
                if world_dir.is_some() {
                    return Err(CliError::Usage(format!("Unexpected argument: {other}")));
                }
                world_dir = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    let world_dir =
        world_dir.ok_or_else(|| CliError::Usage("missing <world-dir> argument".to_string()))?;
    let mut options = RunOptions::new(world_dir);
    if let Some(path) = config_path {
        options.config = config::load_config(&path)?;
    }
    if seed.is_some() {
        options.config.seed = seed;
    }
    if let Some(path) = cache_path {
        options.cache_path = path;
    }
    if let Some(path) = output_path {
        options.output_path = path;
    }
    options.json_path = json_path;
    options.rebuild = rebuild;
    Ok(Command::Run(Box::new(options)))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            process::exit(1);
        }
    };

    match run(&options) {
        Ok(results) => log::info!("Survey complete: {} depths", results.depths.len()),
        Err(err) => {
            log::error!("{err}");
            process::exit(1);
        }
    }
}
