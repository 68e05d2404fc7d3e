//! PSE CLI
//!
//! Command tree and dispatch for the `pse` binary. Kept in a library so the
//! commands can be driven from tests without spawning a process.
//!
//! # Example
//!
//! ```rust,no_run
//! let matches = pse_cli::cli().get_matches_from(["pse", "validate", "--config", "estimation.yaml"]);
//! let report = pse_cli::run(&matches)?;
//! println!("{report}");
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod logging;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pse_aggregate::prelude::*;
use pse_model::prelude::*;
use pse_scoring::prelude::*;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Estimation config (.json, .yaml, .yml or .toml)")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn category_arg() -> Arg {
    Arg::new("category")
        .long("category")
        .help("Item category used to pick size bands")
}

/// Build the `pse` command tree
#[must_use]
pub fn cli() -> Command {
    Command::new("pse")
        .version(VERSION)
        .about("Pre-sales estimation aggregation and normalization")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Tracing filter when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("aggregate")
                .about("Roll an assessment up into column, role, activity and Gantt views")
                .arg(
                    Arg::new("assessment")
                        .long("assessment")
                        .short('a')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Assessment document (JSON)"),
                )
                .arg(config_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("estimate")
                .about("Estimate one item from its description")
                .arg(config_arg())
                .arg(category_arg())
                .arg(
                    Arg::new("detail")
                        .long("detail")
                        .required(true)
                        .help("Item description to scan for signals"),
                )
                .arg(
                    Arg::new("median")
                        .long("median")
                        .value_parser(value_parser!(f64))
                        .help("Reference median hours for shrinkage"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("classify")
                .about("Place an hour value into an XS..XL band")
                .arg(config_arg())
                .arg(category_arg())
                .arg(
                    Arg::new("hours")
                        .long("hours")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Base hours to classify"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a config and optionally its coverage of an assessment")
                .arg(config_arg())
                .arg(
                    Arg::new("assessment")
                        .long("assessment")
                        .short('a')
                        .value_parser(value_parser!(PathBuf))
                        .help("Assessment document (JSON) to check mapping coverage against"),
                ),
        )
}

fn load_config(args: &ArgMatches) -> anyhow::Result<EstimationConfig> {
    let Some(path) = args.get_one::<PathBuf>("config") else {
        bail!("--config is required");
    };
    EstimationConfig::load(path).with_context(|| format!("loading config {}", path.display()))
}

fn load_assessment(path: &Path) -> anyhow::Result<Assessment> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading assessment {}", path.display()))?;
    Assessment::from_json(&text).with_context(|| format!("parsing assessment {}", path.display()))
}

/// Run the selected subcommand and return its report
///
/// # Errors
///
/// Returns an error if an input file cannot be read, parsed or validated.
pub fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("aggregate", args)) => {
            let config = load_config(args)?;
            let Some(path) = args.get_one::<PathBuf>("assessment") else {
                bail!("--assessment is required");
            };
            let assessment = load_assessment(path)?;
            let summary = AssessmentTaskAggregator::new(&config).summarize(&assessment)?;

            if args.get_flag("json") {
                render::json(&summary)
            } else {
                Ok(render::summary_text(&summary))
            }
        }
        Some(("estimate", args)) => {
            let config = load_config(args)?;
            let category = args.get_one::<String>("category").map(String::as_str);
            let detail = args.get_one::<String>("detail").map(String::as_str);
            let median = args.get_one::<f64>("median").copied();

            let estimate = ItemEstimator::new(&config.policy).estimate(detail, category, median);
            if args.get_flag("json") {
                render::json(&estimate)
            } else {
                Ok(render::estimate_text(&estimate))
            }
        }
        Some(("classify", args)) => {
            let config = load_config(args)?;
            let category = args.get_one::<String>("category").map(String::as_str);
            let Some(hours) = args.get_one::<f64>("hours").copied() else {
                bail!("--hours is required");
            };

            let bands = config.policy.bands_for(category);
            let size = pick_size_class(hours, &bands, config.policy.adjust_cap_applies(category));
            Ok(size.to_string())
        }
        Some(("validate", args)) => {
            let config = load_config(args)?;
            let mut report = format!(
                "Config OK: {} activity mappings, {} column mappings, {} roll-ups",
                config.item_activity_mappings.len(),
                config.column_role_mappings.len(),
                config.activity_rollups.len()
            );

            if let Some(path) = args.get_one::<PathBuf>("assessment") {
                let assessment = load_assessment(path)?;
                report.push_str(&format!("\nAssessment total: {:.2} hours", assessment.total_hours()));
                let summary = AssessmentTaskAggregator::new(&config).summarize(&assessment)?;
                if summary.is_fully_mapped() {
                    report.push_str("\nAssessment fully mapped");
                } else {
                    for column in &summary.unmapped_columns {
                        tracing::warn!(column = %column, "Column has no role mapping");
                        report.push_str(&format!("\nUnmapped column: {column}"));
                    }
                    for item in &summary.unattributed_items {
                        tracing::warn!(item = %item, "Item has no activity mapping");
                        report.push_str(&format!("\nUnattributed item: {item}"));
                    }
                }
            }
            Ok(report)
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
}
