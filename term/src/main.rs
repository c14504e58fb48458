use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use sapper_core::GameConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

mod app;
mod effects;
mod layout;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    app::run(GameConfig::default(), seed)
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let writer = match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Could not create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    // `log` records from the engine are bridged into this subscriber
    tracing_subscriber::fmt()
        .with_max_level(level_filter(args.verbose.log_level_filter()))
        .with_ansi(args.log_file.is_none())
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Error initializing logger: {err}"))
}

fn level_filter(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_and_verbosity() {
        let args = Args::try_parse_from(["sapper", "--seed", "42", "-vv"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.verbose.log_level_filter(), log::LevelFilter::Info);
        assert_eq!(level_filter(args.verbose.log_level_filter()), LevelFilter::INFO);
    }

    #[test]
    fn defaults_to_random_seed_and_errors_only() {
        let args = Args::try_parse_from(["sapper"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.log_file, None);
        assert_eq!(level_filter(args.verbose.log_level_filter()), LevelFilter::ERROR);
    }
}
