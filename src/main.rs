mod cli;

use cardforged::card::{CardPlan, CardRecord};
use cardforged::config::{self, Config};
use cardforged::download::{BatchRunner, BatchSummary, DownloadOrchestrator};
use cardforged::fetch::HttpFetcher;
use cardforged::lists::{self, moxfield, MoxfieldClient, ScryfallClient};
use cardforged::{archive, card};

use anyhow::{Context, Result};
use clap::Parser;
use cardforged_common::ImageSource;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cardforged=debug,cardforged_common=debug".to_string()
        } else {
            "cardforged=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Query {
            terms,
            list_only,
            quiet,
        } => block_on(run_query(&terms, config_path, list_only, quiet)),
        Commands::List { file, quiet } => block_on(run_list(&file, config_path, quiet)),
        Commands::Deck {
            id,
            list_only,
            quiet,
        } => block_on(run_deck(&id, config_path, list_only, quiet)),
        Commands::Records { file, quiet } => block_on(run_records(&file, config_path, quiet)),
        Commands::Classify { file, json } => classify_file(&file, json),
        Commands::Filter { archive, file } => filter_file(&archive, &file),
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("cardforged {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn block_on<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

// ---------------------------------------------------------------------------
// Downloading commands
// ---------------------------------------------------------------------------

async fn run_query(
    terms: &str,
    config_path: Option<&Path>,
    list_only: bool,
    quiet: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let http = Arc::new(HttpFetcher::new(&config.network)?);

    tracing::info!("Searching: {}", terms);
    let records = ScryfallClient::new(http.clone(), &config).search(terms).await?;
    let records = lists::apply_archive_filter(&config, records)?;

    if list_only {
        for record in &records {
            println!("{}", record.label());
        }
        return Ok(());
    }
    download_records(config, http, &records, quiet).await
}

async fn run_list(file: &Path, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read list file: {:?}", file))?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    let http = Arc::new(HttpFetcher::new(&config.network)?);
    let client = ScryfallClient::new(http.clone(), &config);
    let records = lists::resolve_lines(&client, &lines).await;

    download_records(config, http, &records, quiet).await
}

async fn run_deck(id: &str, config_path: Option<&Path>, list_only: bool, quiet: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let http = Arc::new(HttpFetcher::new(&config.network)?);

    let cards = MoxfieldClient::new(http.clone(), &config).deck(id).await?;
    let cards = lists::apply_archive_filter(&config, cards)?;
    let lines: Vec<String> = cards.iter().map(moxfield::deck_line).collect();

    if list_only {
        for line in &lines {
            println!("{}", line);
        }
        return Ok(());
    }

    let client = ScryfallClient::new(http.clone(), &config);
    let records = lists::resolve_lines(&client, &lines).await;
    download_records(config, http, &records, quiet).await
}

async fn run_records(file: &Path, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let records = lists::load_records(file)?;
    let records = lists::apply_archive_filter(&config, records)?;
    let http = Arc::new(HttpFetcher::new(&config.network)?);

    download_records(config, http, &records, quiet).await
}

async fn download_records(
    config: Config,
    http: Arc<HttpFetcher>,
    records: &[CardRecord],
    quiet: bool,
) -> Result<()> {
    if records.is_empty() {
        println!("Nothing to download.");
        return Ok(());
    }

    let failure_log = config.paths.failure_log_path();
    let orchestrator =
        DownloadOrchestrator::new(Arc::new(config), http.clone(), http).quiet(quiet);
    let summary = BatchRunner::new(Arc::new(orchestrator)).run(records).await;

    print_summary(&summary, &failure_log);
    Ok(())
}

fn print_summary(summary: &BatchSummary, failure_log: &Path) {
    println!();
    println!(
        "Downloaded: {} ({} scraped, {} card API)",
        summary.downloaded,
        summary.from_source(ImageSource::Mtgpics),
        summary.from_source(ImageSource::Scryfall)
    );
    println!("Failed: {}", summary.failed);
    if summary.failed > 0 {
        println!("Failures logged to {}", failure_log.display());
    }
}

// ---------------------------------------------------------------------------
// Offline commands
// ---------------------------------------------------------------------------

fn classify_file(file: &Path, json: bool) -> Result<()> {
    let records = lists::load_records(file)?;

    if json {
        let plans = records
            .iter()
            .map(|record| match CardPlan::from_record(record, false) {
                Ok(plan) => serde_json::to_value(plan),
                Err(e) => Ok(serde_json::json!({ "label": record.label(), "error": e.to_string() })),
            })
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to serialize card plans")?;
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    for record in &records {
        let variant = card::classify(record);
        println!(
            "{}: {} / {} ({} face{})",
            record.label(),
            variant.kind,
            variant.template,
            variant.face_count(),
            if variant.face_count() == 1 { "" } else { "s" }
        );
        if let Err(e) = CardPlan::from_record(record, false) {
            println!("  ! {}", e);
        }
    }
    Ok(())
}

fn filter_file(archive_path: &Path, file: &Path) -> Result<()> {
    let records = lists::load_records(file)?;
    let kept = archive::filter_archive(archive_path, &records)?;
    println!("{}", serde_json::to_string_pretty(&kept)?);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("  Naming template: {}", config.naming.template);
    println!("  Output: {}", config.paths.output_dir.display());
    println!("  Failure log: {}", config.paths.failure_log_path().display());
    println!("  Card API only: {}", config.download.scryfall_only);
    println!("  Card API fallback: {}", config.download.scryfall_fallback);
    println!("  Set replacements: {}", config.sets.replace.len());
    if let Some(archive) = config.archive_path() {
        println!("  Archive: {}", archive.display());
    }
}
