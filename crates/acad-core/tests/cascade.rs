//! Scenario tests for flattening and cascading resolution.

use std::collections::BTreeSet;

use acad_core::{
    CascadeForm, CascadeResolver, DimensionChain, FormStage, exam_source_pairs, flatten,
};
use acad_model::{AcademicPath, Dimension, OptionValue, RawExamCatalog, Selection};

const CATALOG: &str = include_str!("fixtures/catalog.json");

fn catalog() -> Vec<RawExamCatalog> {
    serde_json::from_str(CATALOG).expect("parse fixture catalog")
}

fn resolver() -> CascadeResolver {
    let flat = flatten(&catalog());
    CascadeResolver::new(flat.paths, DimensionChain::full()).expect("well-formed rows")
}

fn ids(values: &[u32]) -> BTreeSet<OptionValue> {
    values.iter().copied().map(OptionValue::Id).collect()
}

fn years(values: &[&str]) -> BTreeSet<OptionValue> {
    values.iter().map(|y| OptionValue::Year((*y).to_string())).collect()
}

fn question_bank_selection() -> Selection {
    Selection {
        exam_type_id: Some(1),
        source_id: Some(10),
        ..Selection::default()
    }
}

#[test]
fn flattens_fixture_in_tree_order() {
    let flat = flatten(&catalog());
    let rendered: Vec<String> = flat.paths.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "1/10/1/11/-/2022",
            "1/10/1/11/-/2023",
            "1/10/1/14/7/2023",
            "1/10/1/14/8/2024",
            "1/10/2/20/9/2024",
            "1/20/0/-/-/-",
            "2/10/2/-/-/-",
        ]
    );
    assert!(flat.skipped.is_empty());
}

#[test]
fn source_without_modalities_keeps_its_pair() {
    let flat = flatten(&catalog());
    assert!(flat.paths.contains(&AcademicPath::source_only(1, 20)));

    let flattened_pairs: BTreeSet<(u32, u32)> = flat
        .paths
        .iter()
        .map(|p| (p.exam_type_id, p.source_id))
        .collect();
    assert_eq!(flattened_pairs, exam_source_pairs(&catalog()));
}

#[test]
fn levels_of_a_modality() {
    let selection = Selection {
        modalidad_id: Some(1),
        ..Selection::default()
    };
    assert_eq!(
        resolver().available_values(Dimension::Nivel, &selection),
        ids(&[11, 14])
    );
}

#[test]
fn level_with_null_specialty_offers_no_specialties() {
    let selection = Selection {
        modalidad_id: Some(1),
        nivel_id: Some(11),
        ..Selection::default()
    };
    let resolver = resolver();
    assert!(
        resolver
            .available_values(Dimension::Especialidad, &selection)
            .is_empty()
    );
    assert_eq!(
        resolver.available_values(Dimension::Year, &selection),
        years(&["2022", "2023"])
    );
}

#[test]
fn specialty_is_reachable_without_level() {
    let resolver = resolver();
    let selection = Selection {
        modalidad_id: Some(1),
        ..question_bank_selection()
    };
    assert_eq!(
        resolver.available_values(Dimension::Especialidad, &selection),
        ids(&[7, 8])
    );

    let narrowed = Selection {
        nivel_id: Some(14),
        ..selection.clone()
    };
    assert_eq!(
        resolver.available_values(Dimension::Especialidad, &narrowed),
        ids(&[7, 8])
    );

    let with_specialty = Selection {
        especialidad_id: Some(8),
        ..selection
    };
    assert_eq!(
        resolver.available_values(Dimension::Year, &with_specialty),
        years(&["2024"])
    );
}

#[test]
fn dimensions_are_disabled_until_prerequisite_is_chosen() {
    let resolver = resolver();
    let empty = Selection::default();
    assert_eq!(resolver.available_values(Dimension::ExamType, &empty), ids(&[1, 2]));
    assert!(resolver.available_values(Dimension::Source, &empty).is_empty());
    assert!(resolver.available_values(Dimension::Nivel, &empty).is_empty());
    assert!(resolver.available_values(Dimension::Year, &empty).is_empty());
    assert!(!resolver.is_enumerable(Dimension::Modalidad, &empty));
}

#[test]
fn changing_modality_resets_level_and_specialty() {
    let resolver = resolver();
    let selection = Selection {
        modalidad_id: Some(1),
        nivel_id: Some(14),
        especialidad_id: Some(7),
        year: Some("2023".to_string()),
        ..question_bank_selection()
    };
    assert_eq!(resolver.reconcile(&selection), selection);

    let changed = Selection {
        modalidad_id: Some(2),
        ..selection
    };
    let reconciled = resolver.reconcile(&changed);
    assert_eq!(
        reconciled,
        Selection {
            modalidad_id: Some(2),
            ..question_bank_selection()
        }
    );
}

#[test]
fn reconcile_without_ancestors_resets_orphans() {
    let resolver = resolver();
    let orphan = Selection {
        nivel_id: Some(14),
        especialidad_id: Some(7),
        ..Selection::default()
    };
    assert_eq!(resolver.reconcile(&orphan), Selection::default());
}

#[test]
fn source_shared_by_exam_types_is_filtered_by_type() {
    let resolver = resolver();
    let nombramiento = Selection {
        exam_type_id: Some(2),
        source_id: Some(10),
        ..Selection::default()
    };
    assert_eq!(
        resolver.available_values(Dimension::Modalidad, &nombramiento),
        ids(&[2])
    );
    assert!(
        resolver
            .available_values(Dimension::Nivel, &Selection {
                modalidad_id: Some(2),
                ..nombramiento
            })
            .is_empty()
    );
}

#[test]
fn form_walks_through_stages() {
    let mut form = CascadeForm::new(resolver());
    assert_eq!(form.stage(), FormStage::Empty);
    assert!(!form.is_enabled(Dimension::Source));

    assert!(form.select(Dimension::ExamType, 1u32).expect("exam type"));
    assert_eq!(form.stage(), FormStage::TypeChosen);
    assert_eq!(form.options(Dimension::Source), ids(&[10, 20]));

    assert!(form.select(Dimension::Source, 10u32).expect("source"));
    assert_eq!(form.stage(), FormStage::SourceChosen);

    assert!(form.select(Dimension::Modalidad, 1u32).expect("modalidad"));
    assert_eq!(form.stage(), FormStage::ModalityChosen);

    assert!(form.select(Dimension::Especialidad, 7u32).expect("especialidad"));
    assert_eq!(form.stage(), FormStage::SpecialtyReachableWithoutLevel);

    assert!(form.select(Dimension::Nivel, 14u32).expect("nivel"));
    assert_eq!(form.stage(), FormStage::LevelChosen);
    assert_eq!(form.selection().especialidad_id, Some(7));

    assert!(form.select(Dimension::Year, "2023").expect("year"));
    assert_eq!(form.stage(), FormStage::YearChosen);
    assert!(form.is_complete());
}

#[test]
fn form_rejects_unreachable_value_by_resetting() {
    let mut form = CascadeForm::new(resolver());
    form.select(Dimension::ExamType, 1u32).expect("exam type");
    form.select(Dimension::Source, 10u32).expect("source");
    form.select(Dimension::Modalidad, 1u32).expect("modalidad");
    form.select(Dimension::Nivel, 11u32).expect("nivel");

    assert!(!form.select(Dimension::Nivel, 20u32).expect("nivel kind"));
    assert_eq!(form.selection().nivel_id, None);
    assert_eq!(form.selection().modalidad_id, Some(1));
    assert_eq!(form.options(Dimension::Year), years(&["2022", "2023", "2024"]));

    assert!(form.select(Dimension::Year, 5u32).is_err());
}

#[test]
fn form_clear_cascades_down_the_chain() {
    let selection = Selection {
        modalidad_id: Some(1),
        nivel_id: Some(14),
        especialidad_id: Some(8),
        ..question_bank_selection()
    };
    let mut form = CascadeForm::with_selection(resolver(), &selection);
    assert_eq!(form.selection(), &selection);

    form.clear(Dimension::Modalidad);
    assert_eq!(form.selection(), &question_bank_selection());
    form.reset();
    assert_eq!(form.stage(), FormStage::Empty);
}

#[test]
fn years_under_null_level_and_specialty_are_reachable() {
    let catalog: Vec<RawExamCatalog> = serde_json::from_str(
        r#"[{
            "tipoExamenId": 1,
            "fuentes": [{
                "fuenteId": 10,
                "modalidades": [{
                    "modalidadId": 1,
                    "niveles": [{
                        "nivelId": null,
                        "especialidades": [{
                            "especialidadId": null,
                            "years": [{ "year": "2023", "count": 2 }]
                        }]
                    }]
                }]
            }]
        }]"#,
    )
    .expect("parse catalog");
    let flat = flatten(&catalog);
    let rendered: Vec<String> = flat.paths.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["1/10/1/-/-/2023"]);

    let resolver = CascadeResolver::new(flat.paths, DimensionChain::full()).expect("rows");
    let selection = Selection {
        modalidad_id: Some(1),
        ..question_bank_selection()
    };
    assert!(resolver.available_values(Dimension::Nivel, &selection).is_empty());
    assert!(resolver.available_values(Dimension::Especialidad, &selection).is_empty());
    assert_eq!(
        resolver.available_values(Dimension::Year, &selection),
        years(&["2023"])
    );

    let with_year = Selection {
        year: Some("2023".to_string()),
        ..selection
    };
    assert_eq!(resolver.reconcile(&with_year), with_year);
}

#[test]
fn form_ignores_dimensions_outside_its_chain() {
    let flat = flatten(&catalog());
    let resolver = CascadeResolver::new(flat.paths, DimensionChain::academic()).expect("rows");
    let mut form = CascadeForm::new(resolver);

    assert!(!form.select(Dimension::Source, 10u32).expect("source kind"));
    assert_eq!(form.selection().source_id, None);
    assert!(!form.is_enabled(Dimension::Source));
    assert!(form.select(Dimension::Source, "2023").is_err());

    assert!(form.select(Dimension::Modalidad, 1u32).expect("modalidad"));
    assert_eq!(form.options(Dimension::Nivel), ids(&[11, 14]));
}
