//! Flattening of the nested exam catalog into [`AcademicPath`] rows.
//!
//! The walk is depth-first in payload order. A branch whose child collection
//! is empty or absent still yields one row ending at that depth, so an
//! `(exam type, source)` pair with nothing attached remains visible to the
//! filters. Non-empty collections never yield intermediate rows.
//!
//! Exam type, source, and modality ids are required. A branch missing one of
//! them is logged and skipped; the rest of the catalog is still flattened.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use acad_model::{AcademicPath, Dimension, RawExamCatalog};

/// Why a catalog branch produced no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The node at `depth` carried no id (or a zero id).
    MissingId,
    /// An exam type with no sources cannot form a path.
    NoSources,
}

/// A branch left out of the flattened output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBranch {
    pub depth: Dimension,
    pub reason: SkipReason,
    pub exam_type_id: Option<u32>,
    pub source_id: Option<u32>,
}

/// Result of flattening a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flattened {
    pub paths: Vec<AcademicPath>,
    pub skipped: Vec<SkippedBranch>,
}

impl Flattened {
    pub fn is_clean(&self) -> bool {
        self.skipped
            .iter()
            .all(|branch| branch.reason != SkipReason::MissingId)
    }

    fn skip(&mut self, branch: SkippedBranch) {
        match branch.reason {
            SkipReason::MissingId => warn!(
                depth = %branch.depth,
                exam_type_id = ?branch.exam_type_id,
                source_id = ?branch.source_id,
                "skipping catalog branch without a required id"
            ),
            SkipReason::NoSources => debug!(
                exam_type_id = ?branch.exam_type_id,
                "exam type has no sources"
            ),
        }
        self.skipped.push(branch);
    }
}

fn required(id: Option<u32>) -> Option<u32> {
    id.filter(|id| *id != 0)
}

fn children<T>(collection: &Option<Vec<T>>) -> &[T] {
    collection.as_deref().unwrap_or(&[])
}

pub fn flatten(catalog: &[RawExamCatalog]) -> Flattened {
    let mut out = Flattened::default();

    for exam in catalog {
        let Some(exam_type_id) = required(exam.tipo_examen_id) else {
            out.skip(SkippedBranch {
                depth: Dimension::ExamType,
                reason: SkipReason::MissingId,
                exam_type_id: None,
                source_id: None,
            });
            continue;
        };

        let sources = children(&exam.fuentes);
        if sources.is_empty() {
            out.skip(SkippedBranch {
                depth: Dimension::Source,
                reason: SkipReason::NoSources,
                exam_type_id: Some(exam_type_id),
                source_id: None,
            });
            continue;
        }

        for source in sources {
            let Some(source_id) = required(source.fuente_id) else {
                out.skip(SkippedBranch {
                    depth: Dimension::Source,
                    reason: SkipReason::MissingId,
                    exam_type_id: Some(exam_type_id),
                    source_id: None,
                });
                continue;
            };

            let modalities = children(&source.modalidades);
            if modalities.is_empty() {
                out.paths
                    .push(AcademicPath::source_only(exam_type_id, source_id));
                continue;
            }

            for modality in modalities {
                let Some(modalidad_id) = required(modality.modalidad_id) else {
                    out.skip(SkippedBranch {
                        depth: Dimension::Modalidad,
                        reason: SkipReason::MissingId,
                        exam_type_id: Some(exam_type_id),
                        source_id: Some(source_id),
                    });
                    continue;
                };

                let base = AcademicPath {
                    exam_type_id,
                    source_id,
                    modalidad_id,
                    nivel_id: None,
                    especialidad_id: None,
                    year: None,
                };

                let levels = children(&modality.niveles);
                if levels.is_empty() {
                    out.paths.push(base);
                    continue;
                }

                for level in levels {
                    let at_level = AcademicPath {
                        nivel_id: level.nivel_id,
                        ..base.clone()
                    };

                    let specialties = children(&level.especialidades);
                    if specialties.is_empty() {
                        out.paths.push(at_level);
                        continue;
                    }

                    for specialty in specialties {
                        let at_specialty = AcademicPath {
                            especialidad_id: specialty.especialidad_id,
                            ..at_level.clone()
                        };

                        let years = children(&specialty.years);
                        if years.is_empty() {
                            out.paths.push(at_specialty);
                            continue;
                        }

                        out.paths.extend(years.iter().map(|bucket| AcademicPath {
                            year: Some(bucket.year.clone()),
                            ..at_specialty.clone()
                        }));
                    }
                }
            }
        }
    }

    debug!(
        paths = out.paths.len(),
        skipped = out.skipped.len(),
        "flattened exam catalog"
    );
    out
}

/// `(exam type, source)` pairs reachable by walking the catalog directly.
pub fn exam_source_pairs(catalog: &[RawExamCatalog]) -> BTreeSet<(u32, u32)> {
    catalog
        .iter()
        .filter_map(|exam| required(exam.tipo_examen_id).map(|id| (id, exam)))
        .flat_map(|(exam_type_id, exam)| {
            children(&exam.fuentes)
                .iter()
                .filter_map(move |source| {
                    required(source.fuente_id).map(|source_id| (exam_type_id, source_id))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use acad_model::{RawLevel, RawModality, RawSource, RawSpecialty, YearBucket};

    fn year(year: &str) -> YearBucket {
        YearBucket {
            year: year.to_string(),
            count: 1,
        }
    }

    #[test]
    fn null_specialty_with_years_emits_one_row_per_year() {
        let catalog = vec![RawExamCatalog {
            tipo_examen_id: Some(1),
            fuentes: Some(vec![RawSource {
                fuente_id: Some(10),
                modalidades: Some(vec![RawModality {
                    modalidad_id: Some(1),
                    niveles: Some(vec![RawLevel {
                        nivel_id: Some(11),
                        especialidades: Some(vec![RawSpecialty {
                            especialidad_id: None,
                            years: Some(vec![year("2022"), year("2023")]),
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }];

        let flat = flatten(&catalog);
        assert_eq!(flat.paths.len(), 2);
        assert!(flat.paths.iter().all(|p| p.especialidad_id.is_none()));
        assert!(flat.paths.iter().all(|p| p.nivel_id == Some(11)));
        assert_eq!(flat.paths[0].year.as_deref(), Some("2022"));
        assert!(flat.skipped.is_empty());
    }

    #[test]
    fn zero_specialty_is_not_coerced_to_null() {
        let catalog = vec![RawExamCatalog {
            tipo_examen_id: Some(1),
            fuentes: Some(vec![RawSource {
                fuente_id: Some(10),
                modalidades: Some(vec![RawModality {
                    modalidad_id: Some(1),
                    niveles: Some(vec![RawLevel {
                        nivel_id: Some(0),
                        especialidades: Some(vec![RawSpecialty {
                            especialidad_id: Some(0),
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }];

        let flat = flatten(&catalog);
        assert_eq!(flat.paths.len(), 1);
        assert_eq!(flat.paths[0].nivel_id, Some(0));
        assert_eq!(flat.paths[0].especialidad_id, Some(0));
        assert_eq!(flat.paths[0].year, None);
    }

    #[test]
    fn missing_ids_skip_only_their_branch() {
        let catalog = vec![
            RawExamCatalog {
                tipo_examen_id: None,
                fuentes: Some(vec![RawSource {
                    fuente_id: Some(99),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            RawExamCatalog {
                tipo_examen_id: Some(2),
                fuentes: Some(vec![
                    RawSource {
                        fuente_id: None,
                        ..Default::default()
                    },
                    RawSource {
                        fuente_id: Some(20),
                        modalidades: Some(vec![
                            RawModality {
                                modalidad_id: Some(0),
                                ..Default::default()
                            },
                            RawModality {
                                modalidad_id: Some(3),
                                ..Default::default()
                            },
                        ]),
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            },
        ];

        let flat = flatten(&catalog);
        assert_eq!(flat.paths.len(), 1);
        assert_eq!(flat.paths[0].modalidad_id, 3);
        assert_eq!(flat.skipped.len(), 3);
        assert!(!flat.is_clean());
        assert_eq!(flat.skipped[0].depth, Dimension::ExamType);
        assert_eq!(flat.skipped[2].depth, Dimension::Modalidad);
        assert_eq!(flat.skipped[2].source_id, Some(20));
    }

    #[test]
    fn exam_type_without_sources_is_reported() {
        let catalog = vec![RawExamCatalog {
            tipo_examen_id: Some(3),
            fuentes: Some(vec![]),
            ..Default::default()
        }];
        let flat = flatten(&catalog);
        assert!(flat.paths.is_empty());
        assert!(flat.is_clean());
        assert_eq!(flat.skipped[0].reason, SkipReason::NoSources);
        assert!(exam_source_pairs(&catalog).is_empty());
    }
}
