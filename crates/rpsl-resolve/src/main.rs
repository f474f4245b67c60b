//! rpsl-resolve - RPSL export policy resolver
//!
//! Resolves aut-num export policies into per-peer route tables.

use anyhow::Context;
use clap::Parser;
use rpsl_resolve::{emitter, parse_key_value, pipeline, Emitter, ResolveConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Resolve RPSL route-sets and aut-num export policies
#[derive(Parser, Debug)]
#[command(name = "rpsl-resolve")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output emitter (see --list-emitters)
    #[arg(short = 'e', long)]
    emitter: Option<String>,

    /// Emitter argument as key=value (repeatable)
    #[arg(short = 'm', long = "argument", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    arguments: Vec<(String, String)>,

    /// Input file (default: stdin)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// List available emitters and exit
    #[arg(long)]
    list_emitters: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_emitters {
        print!("{}", emitter::list());
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rpsl-resolve: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging.level, args.log_level.is_some());

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<ResolveConfig> {
    let mut config = match &args.config {
        Some(path) => ResolveConfig::load_or_default(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ResolveConfig::default(),
    };
    config.apply_overrides(
        args.emitter.clone(),
        args.arguments.iter().cloned(),
        args.log_level.clone(),
    );
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// `--log-level` wins over `RUST_LOG`, which wins over the config file.
fn init_logging(level: &str, from_cli: bool) {
    let filter = if from_cli {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

fn run(args: &Args, config: &ResolveConfig) -> anyhow::Result<()> {
    let kind = config.emitter_kind()?;
    let emitter = Emitter::configure(kind, &config.output.arguments)
        .context("configuring emitter")?;
    debug!("Using emitter {:?}", emitter);

    let text = pipeline::read_input(args.input.as_deref()).context("reading input")?;
    let resolution = pipeline::resolve_text(&text, &emitter)?;
    pipeline::write_output(args.output.as_deref(), &resolution.output)
        .context("writing output")?;

    info!(
        "Wrote {} output for {} aut-nums",
        kind.name(),
        resolution.aut_nums
    );
    Ok(())
}
