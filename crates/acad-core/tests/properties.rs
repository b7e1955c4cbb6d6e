//! Property tests over generated catalogs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use acad_core::{CascadeResolver, DimensionChain, exam_source_pairs, flatten};
use acad_model::{
    Dimension, OptionValue, RawExamCatalog, RawLevel, RawModality, RawSource, RawSpecialty,
    Selection, YearBucket,
};

fn id() -> impl Strategy<Value = Option<u32>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(0)),
        8 => (1u32..5).prop_map(Some),
    ]
}

fn children<T, S>(strategy: S) -> impl Strategy<Value = Option<Vec<T>>>
where
    T: Clone + std::fmt::Debug,
    S: Strategy<Value = T>,
{
    prop_oneof![
        1 => Just(None),
        6 => prop::collection::vec(strategy, 0..3).prop_map(Some),
    ]
}

fn year_bucket() -> impl Strategy<Value = YearBucket> {
    prop::sample::select(vec!["2022", "2023", "2024"]).prop_map(|year| YearBucket {
        year: year.to_string(),
        count: 1,
    })
}

fn specialty() -> impl Strategy<Value = RawSpecialty> {
    (id(), children(year_bucket())).prop_map(|(especialidad_id, years)| RawSpecialty {
        especialidad_id,
        especialidad_nombre: None,
        years,
    })
}

fn level() -> impl Strategy<Value = RawLevel> {
    (id(), children(specialty())).prop_map(|(nivel_id, especialidades)| RawLevel {
        nivel_id,
        nivel_nombre: None,
        especialidades,
    })
}

fn modality() -> impl Strategy<Value = RawModality> {
    (id(), children(level())).prop_map(|(modalidad_id, niveles)| RawModality {
        modalidad_id,
        modalidad_nombre: None,
        niveles,
    })
}

fn source() -> impl Strategy<Value = RawSource> {
    (id(), children(modality())).prop_map(|(fuente_id, modalidades)| RawSource {
        fuente_id,
        fuente_nombre: None,
        modalidades,
    })
}

fn catalog() -> impl Strategy<Value = Vec<RawExamCatalog>> {
    prop::collection::vec(
        (id(), children(source())).prop_map(|(tipo_examen_id, fuentes)| RawExamCatalog {
            tipo_examen_id,
            tipo_examen_nombre: None,
            fuentes,
        }),
        0..4,
    )
}

fn selection() -> impl Strategy<Value = Selection> {
    (
        prop::option::of(0u32..5),
        prop::option::of(0u32..5),
        prop::option::of(0u32..5),
        prop::option::of(0u32..5),
        prop::option::of(0u32..5),
        prop::option::of(prop::sample::select(vec!["2022", "2023", "2024"])),
    )
        .prop_map(
            |(exam_type_id, source_id, modalidad_id, nivel_id, especialidad_id, year)| Selection {
                exam_type_id,
                source_id,
                modalidad_id,
                nivel_id,
                especialidad_id,
                year: year.map(str::to_string),
            },
        )
}

fn resolver(catalog: &[RawExamCatalog]) -> CascadeResolver {
    CascadeResolver::new(flatten(catalog).paths, DimensionChain::full())
        .expect("flattened rows are well formed")
}

proptest! {
    #[test]
    fn flattening_preserves_exam_source_pairs(catalog in catalog()) {
        let flattened: BTreeSet<(u32, u32)> = flatten(&catalog)
            .paths
            .iter()
            .map(|p| (p.exam_type_id, p.source_id))
            .collect();
        prop_assert_eq!(flattened, exam_source_pairs(&catalog));
    }

    #[test]
    fn available_values_never_offer_placeholders(
        catalog in catalog(),
        selection in selection(),
    ) {
        let resolver = resolver(&catalog);
        for dimension in Dimension::ALL {
            for value in resolver.available_values(dimension, &selection) {
                if dimension.is_required() {
                    prop_assert_ne!(value, OptionValue::Id(0));
                }
            }
        }
    }

    #[test]
    fn reconcile_is_idempotent(catalog in catalog(), selection in selection()) {
        let resolver = resolver(&catalog);
        let once = resolver.reconcile(&selection);
        let twice = resolver.reconcile(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn reconciled_values_are_available(catalog in catalog(), selection in selection()) {
        let resolver = resolver(&catalog);
        let reconciled = resolver.reconcile(&selection);
        for dimension in Dimension::ALL {
            if let Some(value) = reconciled.get(dimension) {
                prop_assert!(resolver.available_values(dimension, &reconciled).contains(&value));
            }
        }
    }

    #[test]
    fn adding_an_ancestor_never_widens_descendants(
        catalog in catalog(),
        selection in selection(),
        ancestor in prop::sample::select(Dimension::ALL[..5].to_vec()),
        value in 1u32..5,
    ) {
        let resolver = resolver(&catalog);
        let mut wide = selection;
        wide.clear(ancestor);
        let mut narrow = wide.clone();
        narrow.set(ancestor, OptionValue::Id(value)).expect("id dimension");

        for dimension in Dimension::ALL.into_iter().filter(|d| *d > ancestor) {
            if resolver.is_enumerable(dimension, &wide) && resolver.is_enumerable(dimension, &narrow) {
                let wide_values = resolver.available_values(dimension, &wide);
                let narrow_values = resolver.available_values(dimension, &narrow);
                prop_assert!(narrow_values.is_subset(&wide_values));
            }
        }
    }
}
