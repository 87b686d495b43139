//! Label the configured comment dataset and exit non-zero on failure.

use std::path::PathBuf;

use sentimen::config;
use sentimen::labeling::{RunReport, SentimentLabeler, log_result};
use sentimen::logging;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool, String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        println!("{}", help_text());
        return Ok(true);
    };
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = match &options.config {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    let dataset = options.dataset.unwrap_or_else(|| settings.dataset.clone());
    let mut labeler_config = settings.into_config();
    if let Some(backup) = options.backup {
        labeler_config.backup_path = Some(backup);
    }

    let labeler = SentimentLabeler::new(labeler_config);
    let result = labeler.run(&dataset);
    if let Some(report_path) = &options.report {
        match RunReport::from_result(&dataset, &result).write_to(report_path) {
            Ok(()) => tracing::info!("Run report written to {}", report_path.display()),
            Err(err) => tracing::warn!("Run report not written: {err}"),
        }
    }
    Ok(log_result(&dataset, &result))
}

#[derive(Debug, Default)]
struct CliOptions {
    dataset: Option<PathBuf>,
    backup: Option<PathBuf>,
    config: Option<PathBuf>,
    report: Option<PathBuf>,
}

/// `Ok(None)` means help was requested.
fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        let mut value = || {
            idx += 1;
            args.get(idx)
                .map(PathBuf::from)
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag {
            "-h" | "--help" => return Ok(None),
            "--dataset" => options.dataset = Some(value()?),
            "--backup" => options.backup = Some(value()?),
            "--config" => options.config = Some(value()?),
            "--report" => options.report = Some(value()?),
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn help_text() -> String {
    [
        "sentimen",
        "",
        "Fill missing sentiment labels in a comment dataset using the rows",
        "that are already labeled. Exits with status 1 on failure; the dataset",
        "is left unchanged whenever the run fails.",
        "",
        "Usage:",
        "  sentimen [--dataset <csv>] [--backup <csv>] [--config <toml>] [--report <json>]",
        "",
        "Options:",
        "  --dataset <csv>   Dataset to label (default from labeler.toml, else data/hasil.csv)",
        "  --backup <csv>    Backup location (default <dataset>.bak)",
        "  --config <toml>   Settings file (default .sentimen/labeler.toml in the config dir)",
        "  --report <json>   Write a JSON summary of the run",
        "  -h, --help        Show this help",
    ]
    .join("\n")
}
