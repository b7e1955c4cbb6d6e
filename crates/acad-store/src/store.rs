//! In-memory snapshot of the catalog lists for one screen session.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use acad_model::{ExamType, Level, Modality, RawExamCatalog, Region, Source, Specialty};

use crate::api::CatalogApi;
use crate::error::Result;

/// The independently fetched lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogList {
    ExamCatalog,
    Sources,
    Modalities,
    Levels,
    Specialties,
    Regions,
}

impl CatalogList {
    pub const ALL: [CatalogList; 6] = [
        Self::ExamCatalog,
        Self::Sources,
        Self::Modalities,
        Self::Levels,
        Self::Specialties,
        Self::Regions,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExamCatalog => "exam catalog",
            Self::Sources => "sources",
            Self::Modalities => "modalities",
            Self::Levels => "levels",
            Self::Specialties => "specialties",
            Self::Regions => "regions",
        }
    }
}

impl fmt::Display for CatalogList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A list that failed to load and was left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFailure {
    pub list: CatalogList,
    pub message: String,
}

/// Outcome of [`HierarchyStore::load_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub failures: Vec<ListFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, list: CatalogList) -> bool {
        self.failures.iter().any(|failure| failure.list == list)
    }

    fn accept<T>(&mut self, list: CatalogList, result: Result<Vec<T>>) -> Vec<T> {
        match result {
            Ok(items) => {
                debug!(list = %list, count = items.len(), "Loaded catalog list");
                items
            }
            Err(err) => {
                error!(list = %list, error = %err, "Failed to load catalog list, leaving it empty");
                self.failures.push(ListFailure {
                    list,
                    message: err.to_string(),
                });
                Vec::new()
            }
        }
    }
}

/// Catalog lists held for the lifetime of one screen.
///
/// Read-only apart from a full [`reload`](Self::reload).
#[derive(Debug, Clone, Default)]
pub struct HierarchyStore {
    exam_catalog: Vec<RawExamCatalog>,
    sources: Vec<Source>,
    modalities: Vec<Modality>,
    levels: Vec<Level>,
    specialties: Vec<Specialty>,
    regions: Vec<Region>,
    loaded_at: Option<DateTime<Utc>>,
}

impl HierarchyStore {
    /// Fetch every list concurrently.
    ///
    /// A failed list is logged and left empty; it never prevents the other
    /// lists from loading.
    pub async fn load_all<A: CatalogApi>(api: &A) -> (Self, LoadReport) {
        let (exam_catalog, sources, modalities, levels, specialties, regions) = tokio::join!(
            api.fetch_exam_catalog(),
            api.fetch_sources(),
            api.fetch_modalities(),
            api.fetch_levels(),
            api.fetch_specialties(),
            api.fetch_regions(),
        );

        let mut report = LoadReport::default();
        let store = Self {
            exam_catalog: report.accept(CatalogList::ExamCatalog, exam_catalog),
            sources: report.accept(CatalogList::Sources, sources),
            modalities: report.accept(CatalogList::Modalities, modalities),
            levels: report.accept(CatalogList::Levels, levels),
            specialties: report.accept(CatalogList::Specialties, specialties),
            regions: report.accept(CatalogList::Regions, regions),
            loaded_at: Some(Utc::now()),
        };

        info!(
            failed = report.failures.len(),
            exam_types = store.exam_catalog.len(),
            sources = store.sources.len(),
            levels = store.levels.len(),
            "Catalog load complete"
        );
        (store, report)
    }

    /// Replace the whole snapshot, e.g. after a catalog entity was edited.
    pub async fn reload<A: CatalogApi>(&mut self, api: &A) -> LoadReport {
        let (store, report) = Self::load_all(api).await;
        *self = store;
        report
    }

    /// Fixed exam type enumeration; never fetched.
    pub fn exam_types(&self) -> &'static [ExamType] {
        &ExamType::ALL
    }

    pub fn exam_catalog(&self) -> &[RawExamCatalog] {
        &self.exam_catalog
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn modalities(&self) -> &[Modality] {
        &self.modalities
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Levels listed under `modalidad_id` (set membership).
    pub fn levels_for_modality(&self, modalidad_id: u32) -> Vec<&Level> {
        self.levels
            .iter()
            .filter(|level| level.belongs_to(modalidad_id))
            .collect()
    }

    pub fn specialties_for_level(&self, nivel_id: u32) -> Vec<&Specialty> {
        self.specialties
            .iter()
            .filter(|specialty| specialty.belongs_to(nivel_id))
            .collect()
    }

    /// Sources that appear in the exam catalog, once each, in first-seen order.
    ///
    /// Names come from the catalog node, falling back to the flat source list.
    pub fn catalog_sources(&self) -> Vec<Source> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        let nodes = self
            .exam_catalog
            .iter()
            .flat_map(|exam| exam.fuentes.as_deref().unwrap_or(&[]));
        for node in nodes {
            let Some(id) = node.fuente_id.filter(|id| *id != 0) else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            let name = node
                .fuente_nombre
                .clone()
                .or_else(|| {
                    self.sources
                        .iter()
                        .find(|source| source.id == id)
                        .map(|source| source.name.clone())
                })
                .unwrap_or_default();
            out.push(Source { id, name });
        }
        out
    }

    /// Items per list, in [`CatalogList::ALL`] order.
    pub fn counts(&self) -> Vec<(CatalogList, usize)> {
        CatalogList::ALL
            .into_iter()
            .map(|list| {
                let count = match list {
                    CatalogList::ExamCatalog => self.exam_catalog.len(),
                    CatalogList::Sources => self.sources.len(),
                    CatalogList::Modalities => self.modalities.len(),
                    CatalogList::Levels => self.levels.len(),
                    CatalogList::Specialties => self.specialties.len(),
                    CatalogList::Regions => self.regions.len(),
                };
                (list, count)
            })
            .collect()
    }
}
