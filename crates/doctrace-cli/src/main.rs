//! DocTrace command-line interface
//!
//! Thin wrapper over the core pipeline. Exit codes:
//! - 0: validation passed
//! - 1: errors present
//! - 2: warnings present under `--strict`
//! - 3: filesystem-level failure (missing or unreadable specs root)

use clap::{Arg, ArgAction, Command};
use doctrace_core::{ReportFormat, TraceValidator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Command::new("doctrace")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Documentation traceability validation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("validate")
                .about("Validate requirement/design/task traceability under a specs root")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .help("Specs root directory (containing requirements/, design/, tasks/)"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail when warnings are present"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("console")
                        .help("Output format: json, table, or console"),
                ),
        );

    let matches = cli.get_matches();
    let Some(("validate", sub)) = matches.subcommand() else {
        unreachable!("subcommand is required");
    };

    let path: PathBuf = sub
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_default();
    let strict = sub.get_flag("strict");
    let format = sub
        .get_one::<String>("format")
        .map(|name| ReportFormat::from_name(name))
        .unwrap_or(ReportFormat::Console);

    let validator = TraceValidator::new().with_strict(strict);
    match validator.validate_dir(&path) {
        Ok(result) => {
            println!("{}", result.render(format).trim_end());
            std::process::exit(result.exit_code);
        }
        Err(e) => {
            tracing::error!("validation aborted: {e}");
            eprintln!("doctrace: {e}");
            std::process::exit(3);
        }
    }
}
