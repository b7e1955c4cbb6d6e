//! Catalog file loading and the reports printed by the subcommands.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use acad_core::{CascadeResolver, DimensionChain, Flattened, flatten};
use acad_model::{Dimension, OptionValue, RawExamCatalog, Selection};

/// Parse a nested exam catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<RawExamCatalog>> {
    serde_json::from_str(json).context("parse exam catalog JSON")
}

/// Read and flatten a catalog file.
pub fn load_catalog(path: &Path) -> Result<Flattened> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog {}", path.display()))?;
    let catalog = parse_catalog(&contents)
        .with_context(|| format!("load catalog {}", path.display()))?;
    let flattened = flatten(&catalog);
    info!(
        exam_types = catalog.len(),
        paths = flattened.paths.len(),
        skipped = flattened.skipped.len(),
        "Flattened {}",
        path.display()
    );
    Ok(flattened)
}

pub fn build_resolver(flattened: &Flattened, chain: DimensionChain) -> Result<CascadeResolver> {
    CascadeResolver::new(flattened.paths.clone(), chain).context("build cascade resolver")
}

/// Valid options for one dimension under a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsReport {
    pub dimension: Dimension,
    pub enabled: bool,
    pub values: BTreeSet<OptionValue>,
}

pub fn options_report(
    resolver: &CascadeResolver,
    dimension: Dimension,
    selection: &Selection,
) -> OptionsReport {
    OptionsReport {
        dimension,
        enabled: resolver.is_enumerable(dimension, selection),
        values: resolver.available_values(dimension, selection),
    }
}

/// A selection before and after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub before: Selection,
    pub after: Selection,
    /// Dimensions whose value was cleared.
    pub reset: Vec<Dimension>,
}

impl ReconcileReport {
    pub fn is_unchanged(&self) -> bool {
        self.reset.is_empty()
    }
}

pub fn reconcile_report(resolver: &CascadeResolver, selection: &Selection) -> ReconcileReport {
    let after = resolver.reconcile(selection);
    let reset: Vec<Dimension> = Dimension::ALL
        .into_iter()
        .filter(|dim| selection.get(*dim) != after.get(*dim))
        .collect();
    debug!(reset = reset.len(), "Reconciled {selection} -> {after}");
    ReconcileReport {
        before: selection.clone(),
        after,
        reset,
    }
}
