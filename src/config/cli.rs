//! CLI argument parsing using clap

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// rankgen - synthetic rank streams and benchmark cases
#[derive(Parser, Debug)]
#[command(name = "rankgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Random ranks, every rank equally likely
    Uniform(RandomArgs),

    /// Random ranks, each rank half as likely as the one below it
    Geometric(RandomArgs),

    /// Random ranks from an explicit weight list
    Weighted(WeightedArgs),

    /// 0, 1, ..., max_rank, 0, 1, ...
    Sawtooth(RankArgs),

    /// Up-and-down sweep, turning points emitted twice
    Triangle(RankArgs),

    /// Write benchmark case files for every queue/rank combination
    #[command(disable_help_flag = true)]
    GenerateCases(CaseArgs),

    /// Reduce NDJSON simulator records to the latest per algorithm
    Finals,
}

/// `<max_rank> <packet_count>`
#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    /// Highest rank; ranks are drawn from [0, max_rank]
    pub max_rank: u64,

    /// Number of ranks to emit
    pub packet_count: u64,
}

/// `<max_rank> <packet_count> [--seed]`
#[derive(Args, Debug, Clone)]
pub struct RandomArgs {
    /// Highest rank; ranks are drawn from [0, max_rank]
    pub max_rank: u64,

    /// Number of ranks to emit
    pub packet_count: u64,

    #[command(flatten)]
    pub seed: SeedArgs,
}

/// `<weights> <packet_count> [--seed]`
#[derive(Args, Debug, Clone)]
pub struct WeightedArgs {
    /// Comma-separated integer weight per rank (e.g. 4,0,1)
    pub weights: String,

    /// Number of ranks to emit
    pub packet_count: u64,

    #[command(flatten)]
    pub seed: SeedArgs,
}

/// Seed of the random generators
///
/// Only random subcommands read it, so a stray `RNG_SEED` cannot break
/// `finals` or `generate-cases`.
#[derive(Args, Debug, Clone, Default)]
pub struct SeedArgs {
    /// Seed for a reproducible stream; any 64-bit integer, negative included
    #[arg(
        long = "seed",
        env = "RNG_SEED",
        allow_negative_numbers = true,
        value_parser = parse_seed
    )]
    seed: Option<u64>,
}

impl SeedArgs {
    pub fn value(&self) -> Option<u64> {
        self.seed
    }
}

/// Accept unsigned and signed 64-bit seeds; negatives keep their bit pattern
fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    s.parse::<u64>()
        .or_else(|_| s.parse::<i64>().map(|v| v as u64))
        .map_err(|_| format!("seed must be a 64-bit integer, got '{}'", s))
}

/// Options of `generate-cases`
///
/// Required options are checked after merging with `--config`, so they are
/// optional here.
#[derive(Args, Debug, Clone)]
pub struct CaseArgs {
    /// Weight family for the offline model
    #[arg(short = 'd', long, value_enum)]
    pub distribution: Option<DistributionType>,

    /// Directory receiving bench_<k>q-<n>r.txt files
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// TOML case configuration
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Offline model binary
    #[arg(short = 'm', long, env = "OFFLINE_MODEL")]
    pub model: Option<PathBuf>,

    /// Print usage
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    pub help: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistributionType {
    Geometric,
    Uniform,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.command {
            Command::Weighted(args) => {
                super::cli_convert::parse_weights(&args.weights)?;
            }
            Command::GenerateCases(args) => {
                if let Some(ref path) = args.config {
                    if !path.exists() {
                        anyhow::bail!("Config file not found: {}", path.display());
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Usage text of `generate-cases`
    pub fn case_usage() -> String {
        let mut command = Self::command();
        match command.find_subcommand_mut("generate-cases") {
            Some(sub) => sub.render_help().to_string(),
            None => command.render_usage().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rank_args() {
        let cli = Cli::try_parse_from(["rankgen", "sawtooth", "3", "5"]).unwrap();
        match cli.command {
            Command::Sawtooth(args) => {
                assert_eq!(args.max_rank, 3);
                assert_eq!(args.packet_count, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_weighted_args() {
        let cli = Cli::try_parse_from(["rankgen", "weighted", "4,0,1", "10"]).unwrap();
        assert!(matches!(cli.command, Command::Weighted(ref a) if a.weights == "4,0,1"));
        cli.validate().unwrap();

        let bad = Cli::try_parse_from(["rankgen", "weighted", "4,x", "10"]).unwrap();
        assert!(bad.validate().is_err());
    }

    fn seed_of(args: &[&str]) -> Option<u64> {
        match Cli::try_parse_from(args.iter().copied()).unwrap().command {
            Command::Uniform(a) | Command::Geometric(a) => a.seed.value(),
            Command::Weighted(a) => a.seed.value(),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_seed_flag() {
        assert_eq!(seed_of(&["rankgen", "uniform", "3", "5", "--seed", "11"]), Some(11));
        assert_eq!(seed_of(&["rankgen", "weighted", "1,1", "5", "--seed", "3"]), Some(3));
        assert_eq!(
            seed_of(&["rankgen", "geometric", "3", "5", "--seed", "18446744073709551615"]),
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_negative_seed_accepted() {
        assert_eq!(seed_of(&["rankgen", "uniform", "3", "5", "--seed", "-5"]), Some(-5i64 as u64));
        assert_eq!(seed_of(&["rankgen", "geometric", "3", "5", "--seed=-1"]), Some(u64::MAX));
        assert!(Cli::try_parse_from(["rankgen", "uniform", "3", "5", "--seed", "1.5"]).is_err());
    }

    #[test]
    fn test_seed_only_on_random_subcommands() {
        assert!(Cli::try_parse_from(["rankgen", "finals", "--seed", "1"]).is_err());
        assert!(Cli::try_parse_from(["rankgen", "sawtooth", "3", "5", "--seed", "1"]).is_err());
        assert!(
            Cli::try_parse_from(["rankgen", "generate-cases", "-o", "out", "--seed", "1"]).is_err()
        );
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("0"), Ok(0));
        assert_eq!(parse_seed(" 42 "), Ok(42));
        assert_eq!(parse_seed("-9223372036854775808"), Ok(1u64 << 63));
        assert!(parse_seed("abc").is_err());
        assert!(parse_seed("99999999999999999999").is_err());
    }

    #[test]
    fn test_generate_cases_short_flags() {
        let cli = Cli::try_parse_from(["rankgen", "generate-cases", "-d", "geometric", "-o", "out"])
            .unwrap();
        match cli.command {
            Command::GenerateCases(args) => {
                assert_eq!(args.distribution, Some(DistributionType::Geometric));
                assert_eq!(args.out_dir, Some(PathBuf::from("out")));
                assert!(!args.help);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_generate_cases_help_is_a_flag() {
        let cli = Cli::try_parse_from(["rankgen", "generate-cases", "-h"]).unwrap();
        assert!(matches!(cli.command, Command::GenerateCases(ref a) if a.help));
    }

    #[test]
    fn test_generate_cases_rejects_unknown_distribution() {
        assert!(Cli::try_parse_from(["rankgen", "generate-cases", "-d", "zipf", "-o", "x"]).is_err());
    }

    #[test]
    fn test_case_usage_mentions_options() {
        let usage = Cli::case_usage();
        assert!(usage.contains("--distribution"));
        assert!(usage.contains("--out-dir"));
    }
}
