use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use moodsync_core::{SyncEngine, SyncOptions, TargetStore};
use moodsync_ingest::{CsvSourceOptions, read_mood_csv};
use moodsync_notion::{StoreClient, TitleClient};

use moodsync_cli::summary::apply_table_style;
use moodsync_cli::types::SyncRunResult;

use crate::cli::SyncArgs;
use crate::config::{StoreConfig, TitleConfig};

pub fn run_sync(args: &SyncArgs) -> Result<SyncRunResult> {
    let store_config = StoreConfig::from_env()?;
    // A dry run never calls the title service, so its key is not required.
    let title_config = if args.dry_run {
        TitleConfig {
            api_key: String::new(),
            api_url: None,
        }
    } else {
        TitleConfig::from_env()?
    };

    let sync_span = info_span!("sync", source = %args.csv_file.display());
    let _sync_guard = sync_span.enter();

    let rows = read_mood_csv(
        &args.csv_file,
        CsvSourceOptions::new(args.csv_file.display().to_string()),
    )
    .with_context(|| format!("read {}", args.csv_file.display()))?;
    info!(row_count = rows.len(), "source export loaded");

    let store = build_store(&store_config);
    let titles = build_titles(&title_config, args.model.as_deref());
    let options = SyncOptions {
        max_records: args.max_records,
        dry_run: args.dry_run,
        ..SyncOptions::default()
    };
    let report = SyncEngine::new(&store, &titles)
        .with_options(options)
        .run(&rows)
        .context("synchronization run")?;

    Ok(SyncRunResult {
        source: args.csv_file.clone(),
        source_rows: rows.len(),
        report,
    })
}

pub fn run_schema() -> Result<()> {
    let config = StoreConfig::from_env()?;
    let store = build_store(&config);
    let schema = store.fetch_schema().context("fetch target schema")?;

    let mut table = Table::new();
    table.set_header(vec!["Property", "Type"]);
    apply_table_style(&mut table);
    for (name, kind) in schema {
        table.add_row(vec![name, kind]);
    }
    println!("{table}");
    Ok(())
}

fn build_store(config: &StoreConfig) -> StoreClient {
    let client = StoreClient::new(config.api_key.clone(), config.database_id.clone());
    match &config.api_url {
        Some(url) => client.with_api_base(url.clone()),
        None => client,
    }
}

fn build_titles(config: &TitleConfig, model: Option<&str>) -> TitleClient {
    let mut client = TitleClient::new(config.api_key.clone());
    if let Some(url) = &config.api_url {
        client = client.with_api_base(url.clone());
    }
    if let Some(model) = model {
        client = client.with_model(model);
    }
    client
}
