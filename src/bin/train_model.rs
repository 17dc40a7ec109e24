//! Offline trainer: draws a synthetic labelled dataset, fits the random
//! forest and writes the model artifact the server loads at start-up.
//!
//! Usage: train_model [--rows N] [--out PATH] [--dataset PATH] [--config PATH]

use anyhow::{Context, Result, anyhow};
use listing_check::classifier::{ForestSettings, accuracy, generate_synthetic_dataset, train_forest};
use listing_check::config::AppConfig;
use listing_check::models::Verdict;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_ROWS: usize = 500;
const HOLDOUT_SHARE: f64 = 0.2;

struct Args {
    rows: usize,
    out: Option<PathBuf>,
    dataset: Option<PathBuf>,
    config: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        rows: DEFAULT_ROWS,
        out: None,
        dataset: None,
        config: None,
    };

    let mut iter = env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| anyhow!("Missing value for {}", flag));
        match flag.as_str() {
            "--rows" => args.rows = value()?.parse().context("--rows must be a positive integer")?,
            "--out" => args.out = Some(PathBuf::from(value()?)),
            "--dataset" => args.dataset = Some(PathBuf::from(value()?)),
            "--config" => args.config = Some(value()?),
            other => return Err(anyhow!("Unknown argument: {}", other)),
        }
    }

    if args.rows < 10 {
        return Err(anyhow!("--rows must be at least 10"));
    }
    Ok(args)
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    let config = match args.config.as_deref() {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };
    let out = args.out.unwrap_or_else(|| config.model.path.clone());
    let settings = ForestSettings::default();

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let rows = generate_synthetic_dataset(args.rows, &mut rng);

    let genuine = rows.iter().filter(|r| r.verdict == Verdict::Genuine).count();
    info!(
        "Generated {} rows ({} genuine, {} fake)",
        rows.len(),
        genuine,
        rows.len() - genuine
    );

    if let Some(ref path) = args.dataset {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create dataset file: {}", path.display()))?;
        for row in &rows {
            serde_json::to_writer(&mut file, row)?;
            file.write_all(b"\n")?;
        }
        info!("Dataset written to {}", path.display());
    }

    let holdout_len = ((rows.len() as f64) * HOLDOUT_SHARE).round() as usize;
    let (holdout, train) = rows.split_at(holdout_len);

    let model = train_forest(train, &settings)?;
    let score = accuracy(&model, holdout)?;
    info!("Holdout accuracy on {} rows: {:.3}", holdout.len(), score);

    model.save(&out)?;
    info!("✅ Model saved to {}", out.display());

    Ok(())
}
