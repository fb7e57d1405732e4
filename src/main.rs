//! rankgen CLI entry point

use anyhow::{Context, Result};
use rankgen::cases::{CaseAssembler, OfflineModel};
use rankgen::config::cli::{CaseArgs, Cli, Command, RandomArgs};
use rankgen::config::{cli_convert, toml, validator};
use rankgen::distribution::geometric::GeometricDistribution;
use rankgen::distribution::sequential::{Sawtooth, Triangle};
use rankgen::distribution::uniform::UniformDistribution;
use rankgen::distribution::weighted::WeightedDistribution;
use rankgen::distribution::Distribution;
use rankgen::generator::{generate, RankSource, SampledRanks};
use rankgen::util::rng::acquire_rng;
use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    cli.validate()?;

    let result = match cli.command {
        Command::Uniform(args) => run_random(&UniformDistribution, &args),
        Command::Geometric(args) => run_random(&GeometricDistribution, &args),
        Command::Weighted(args) => {
            let weights = cli_convert::parse_weights(&args.weights)?;
            let dist = WeightedDistribution::new(weights);
            let rng = acquire_rng(args.seed.value());
            let mut source = SampledRanks::from_distribution(&dist, dist.domain_size(), rng)?;
            stream(&mut source, args.packet_count)
        }
        Command::Sawtooth(args) => stream(&mut Sawtooth::new(args.max_rank), args.packet_count),
        Command::Triangle(args) => stream(&mut Triangle::new(args.max_rank), args.packet_count),
        Command::GenerateCases(args) => run_generate_cases(&args),
        Command::Finals => run_finals(),
    };

    match result {
        // Downstream closed the pipe (e.g. `| head`): not an error
        Err(e) if is_broken_pipe(&e) => Ok(()),
        other => other,
    }
}

/// Initialize logging to stderr; stdout carries data
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "rankgen=warn".into()),
        1 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Sample `packet_count` ranks from `dist` over `[0, max_rank]`
fn run_random(dist: &dyn Distribution, args: &RandomArgs) -> Result<()> {
    let domain_size = cli_convert::domain_size(args.max_rank)?;
    let rng = acquire_rng(args.seed.value());
    let mut source = SampledRanks::from_distribution(dist, domain_size, rng)
        .with_context(|| format!("Invalid {} distribution", dist.name()))?;
    stream(&mut source, args.packet_count)
}

/// Write ranks to stdout, one per line
fn stream(source: &mut dyn RankSource, packet_count: u64) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = generate(source, packet_count, &mut out)?;
    tracing::debug!(written, packet_count, "rank stream complete");
    Ok(())
}

fn run_generate_cases(args: &CaseArgs) -> Result<()> {
    if args.help {
        print_case_usage();
        std::process::exit(1);
    }

    let config = toml::load_case_config(args)?;
    let plan = match config.into_plan() {
        Ok(plan) => plan,
        Err(missing) => {
            print_case_usage();
            eprintln!("error: {}", missing);
            std::process::exit(1);
        }
    };

    validator::validate_plan(&plan).context("Configuration validation failed")?;
    tracing::info!(%plan, "generating cases");

    let out_dir = plan.out_dir.clone();
    let model = OfflineModel::new(plan.model_path.clone());
    let written = CaseAssembler::new(plan, model).run()?;

    tracing::info!(
        files = written.len(),
        out_dir = %out_dir.display(),
        "wrote case files"
    );
    Ok(())
}

fn print_case_usage() {
    eprintln!("{}", Cli::case_usage());
}

fn run_finals() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = rankgen::finals::run(stdin.lock(), &mut out)?;
    tracing::debug!(algorithms = count, "finals complete");
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .map_or(false, |e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}
