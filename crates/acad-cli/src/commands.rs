use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use acad_store::{HierarchyStore, HttpCatalogApi, StoreConfig};

use acad_cli::catalog::{build_resolver, load_catalog, options_report, reconcile_report};
use acad_cli::render::{
    load_table, options_line, path_listing, paths_table, reconcile_lines, skipped_table,
};

use crate::cli::{FetchArgs, FlattenArgs, OptionsArgs, OutputFormatArg, ReconcileArgs, ReportFormatArg};

pub fn run_flatten(args: &FlattenArgs) -> Result<()> {
    let flattened = load_catalog(&args.catalog)?;
    match args.format {
        OutputFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&flattened)?);
        }
        OutputFormatArg::Plain => println!("{}", path_listing(&flattened.paths)),
        OutputFormatArg::Table => {
            println!("{}", paths_table(&flattened));
            println!("{} paths", flattened.paths.len());
            if !flattened.skipped.is_empty() {
                println!();
                println!("Skipped branches:");
                println!("{}", skipped_table(&flattened.skipped));
            }
        }
    }
    Ok(())
}

pub fn run_options(args: &OptionsArgs) -> Result<()> {
    let selection = args.selection.to_selection().context("parse selection")?;
    let flattened = load_catalog(&args.catalog)?;
    let resolver = build_resolver(&flattened, args.selection.chain.clone())?;
    let report = options_report(&resolver, args.dimension, &selection);
    match args.format {
        ReportFormatArg::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormatArg::Plain => println!("{}", options_line(&report)),
    }
    Ok(())
}

/// Returns whether the selection was already valid.
pub fn run_reconcile(args: &ReconcileArgs) -> Result<bool> {
    let selection = args.selection.to_selection().context("parse selection")?;
    let flattened = load_catalog(&args.catalog)?;
    let resolver = build_resolver(&flattened, args.selection.chain.clone())?;
    let report = reconcile_report(&resolver, &selection);
    match args.format {
        ReportFormatArg::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormatArg::Plain => println!("{}", reconcile_lines(&report)),
    }
    Ok(report.is_unchanged())
}

/// Returns whether every list loaded.
pub fn run_fetch(args: &FetchArgs) -> Result<bool> {
    let config = StoreConfig::load(&args.config).context("load store configuration")?;
    let span = info_span!("fetch", base_url = %config.base_url);
    let _guard = span.enter();
    let api = HttpCatalogApi::new(config).context("create catalog client")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let (store, report) = runtime.block_on(HierarchyStore::load_all(&api));

    println!("{}", load_table(&store, &report));
    if report.is_complete() {
        info!("All catalog lists loaded");
    } else {
        warn!(failed = report.failures.len(), "Some catalog lists failed to load");
    }
    Ok(report.is_complete())
}
