use anyhow::{Context, bail};
use hf_summary::utils::logging::print_summary_table;
use hf_summary::{DataSource, DatasetCache, DatasetConfig, Gender, dashboard_charts, summarize};
use log::info;
use serde_json::json;

struct Args {
    source: Option<String>,
    gender: Option<Gender>,
    json: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        source: None,
        gender: None,
        json: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--gender" => {
                let value = iter.next().context("--gender needs a value")?;
                args.gender = Some(value.parse()?);
            }
            "-h" | "--help" => {
                println!("Usage: hf-summary [SOURCE] [--gender male|female] [--json]");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            other => {
                if args.source.is_some() {
                    bail!("Unexpected argument: {other}");
                }
                args.source = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    let mut config = DatasetConfig::from_env();
    if let Some(source) = &args.source {
        config = config.with_source(DataSource::parse(source));
    }

    let cache = DatasetCache::new(config);
    let table = cache
        .get()
        .with_context(|| format!("Failed to prepare dataset from {}", cache.source()))?;
    info!("Dataset ready with {} patients", table.num_rows());

    let genders = args.gender.map_or_else(|| Gender::ALL.to_vec(), |gender| vec![gender]);

    if args.json {
        let output: Vec<_> = genders
            .iter()
            .map(|gender| {
                let summary = summarize(&table, *gender);
                let charts = dashboard_charts(&summary);
                json!({ "summary": summary, "charts": charts })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for gender in genders {
            print_summary_table(&summarize(&table, gender));
            println!();
        }
    }

    Ok(())
}
