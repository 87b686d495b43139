//! Print sentiment counts for a comment dataset without modifying it.

use std::path::PathBuf;

use sentimen::config;
use sentimen::dataset::load_table;
use sentimen::summary::{SentimentCounts, SummaryFilter, summarize};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        println!("{}", help_text());
        return Ok(());
    };
    let settings = match &options.config {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    let dataset = options.dataset.clone().unwrap_or_else(|| settings.dataset.clone());
    let labeler_config = settings.into_config();
    let table = load_table(&dataset, &labeler_config.columns).map_err(|err| err.to_string())?;

    let sentiment = match &options.sentiment {
        Some(raw) => Some(
            labeler_config
                .labels
                .parse(raw)
                .ok_or_else(|| format!("Unknown sentiment: {raw}"))?,
        ),
        None => None,
    };
    let filter = SummaryFilter {
        platform: options.platform.clone(),
        sentiment,
    };
    let summary = summarize(&table, &labeler_config.labels, &filter);

    if options.json {
        let text = serde_json::to_string_pretty(&summary).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }
    println!("{}: {} comments", dataset.display(), summary.total);
    print_counts("all", &summary.sentiments);
    for (platform, counts) in &summary.platforms {
        print_counts(platform, counts);
    }
    Ok(())
}

fn print_counts(name: &str, counts: &SentimentCounts) {
    println!(
        "{name:<16} positive={:<6} neutral={:<6} negative={:<6} unlabeled={}",
        counts.positive, counts.neutral, counts.negative, counts.unlabeled
    );
}

#[derive(Debug, Default)]
struct CliOptions {
    dataset: Option<PathBuf>,
    config: Option<PathBuf>,
    platform: Option<String>,
    sentiment: Option<String>,
    json: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        let mut value = || {
            idx += 1;
            args.get(idx)
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag {
            "-h" | "--help" => return Ok(None),
            "--dataset" => options.dataset = Some(PathBuf::from(value()?)),
            "--config" => options.config = Some(PathBuf::from(value()?)),
            // "all" matches the dashboard's unfiltered query value.
            "--platform" => options.platform = Some(value()?).filter(|v| v != "all"),
            "--sentiment" => options.sentiment = Some(value()?).filter(|v| v != "all"),
            "--json" => options.json = true,
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn help_text() -> String {
    [
        "sentimen-summary",
        "",
        "Usage:",
        "  sentimen-summary [--dataset <csv>] [--config <toml>] [--platform <name>]",
        "                   [--sentiment <label>] [--json]",
        "",
        "Options:",
        "  --dataset <csv>      Dataset to read (default from labeler.toml)",
        "  --config <toml>      Settings file",
        "  --platform <name>    Only count rows from this platform (\"all\" for every platform)",
        "  --sentiment <label>  Only count rows with this sentiment (\"all\" for every label)",
        "  --json               Print the summary as JSON",
        "  -h, --help           Show this help",
    ]
    .join("\n")
}
