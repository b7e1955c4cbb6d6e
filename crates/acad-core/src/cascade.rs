//! Cascading filter resolution over flat catalog rows.
//!
//! Options for a dimension are always derived by filtering the row list with
//! the selected ancestors; there is no secondary index. A dimension whose
//! prerequisite is unselected is disabled and has no options.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, error};

use acad_model::{AcademicPath, Dimension, Level, Modality, ModelError, OptionValue, Selection, Specialty};

use crate::error::{CascadeError, Result};

/// Ordered subset of dimensions a screen filters on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionChain(Vec<Dimension>);

impl DimensionChain {
    /// Sorted into ancestry order and deduplicated.
    pub fn new(dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        let set: BTreeSet<Dimension> = dimensions.into_iter().collect();
        Self(set.into_iter().collect())
    }

    /// Exam type through year (question bank).
    pub fn full() -> Self {
        Self(Dimension::ALL.to_vec())
    }

    /// Exam type through specialty (course and exam editors).
    pub fn exam() -> Self {
        Self(Dimension::ALL[..5].to_vec())
    }

    /// Modality, level, specialty (registration and user access editors).
    pub fn academic() -> Self {
        Self(vec![
            Dimension::Modalidad,
            Dimension::Nivel,
            Dimension::Especialidad,
        ])
    }

    pub fn contains(&self, dimension: Dimension) -> bool {
        self.0.contains(&dimension)
    }

    pub fn position(&self, dimension: Dimension) -> Option<usize> {
        self.0.iter().position(|d| *d == dimension)
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.0
    }

    /// Chain dimensions strictly before `dimension`.
    pub fn ancestors(&self, dimension: Dimension) -> impl Iterator<Item = Dimension> + '_ {
        self.0.iter().copied().filter(move |d| *d < dimension)
    }

    /// `dimension` and every chain dimension after it.
    pub fn tail(&self, dimension: Dimension) -> impl Iterator<Item = Dimension> + '_ {
        self.0.iter().copied().filter(move |d| *d >= dimension)
    }
}

impl Default for DimensionChain {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for DimensionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.0.iter().copied().map(Dimension::label).collect();
        f.write_str(&labels.join(" > "))
    }
}

impl FromStr for DimensionChain {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::full()),
            "exam" => Ok(Self::exam()),
            "academic" => Ok(Self::academic()),
            other => other
                .split(',')
                .map(str::parse::<Dimension>)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Self::new),
        }
    }
}

/// A row the resolver can filter.
pub trait PathRow {
    fn value(&self, dimension: Dimension) -> Option<OptionValue>;

    /// Reject rows missing a required ancestor for this chain.
    fn check(&self, chain: &DimensionChain) -> std::result::Result<(), String> {
        for dimension in chain.dimensions().iter().copied() {
            if !dimension.is_required() {
                continue;
            }
            match self.value(dimension) {
                None => return Err(format!("missing {dimension}")),
                Some(OptionValue::Id(0)) if dimension == Dimension::Modalidad => {
                    let deeper = [Dimension::Nivel, Dimension::Especialidad, Dimension::Year]
                        .into_iter()
                        .find(|d| self.value(*d).is_some());
                    if let Some(deeper) = deeper {
                        return Err(format!("placeholder modalidad with {deeper} set"));
                    }
                }
                Some(OptionValue::Id(0)) => return Err(format!("zero {dimension}")),
                Some(_) => {}
            }
        }
        Ok(())
    }
}

impl PathRow for AcademicPath {
    fn value(&self, dimension: Dimension) -> Option<OptionValue> {
        AcademicPath::value(self, dimension)
    }
}

/// Modality/level/specialty triple derived from the flat entity lists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessRow {
    pub modalidad_id: u32,
    pub nivel_id: Option<u32>,
    pub especialidad_id: Option<u32>,
}

impl PathRow for AccessRow {
    fn value(&self, dimension: Dimension) -> Option<OptionValue> {
        match dimension {
            Dimension::Modalidad => Some(OptionValue::Id(self.modalidad_id)),
            Dimension::Nivel => self.nivel_id.map(OptionValue::Id),
            Dimension::Especialidad => self.especialidad_id.map(OptionValue::Id),
            Dimension::ExamType | Dimension::Source | Dimension::Year => None,
        }
    }
}

/// Expand the flat entity lists into rows for the [`DimensionChain::academic`] chain.
///
/// Parent references are matched by set membership, so a level listed under
/// several modalities is reachable from each of them. Empty branches end in a
/// row at their depth, as the catalog flattener does.
pub fn access_rows(
    modalities: &[Modality],
    levels: &[Level],
    specialties: &[Specialty],
) -> Vec<AccessRow> {
    let mut rows = Vec::new();
    for modality in modalities {
        let mut has_level = false;
        for level in levels.iter().filter(|level| level.belongs_to(modality.id)) {
            has_level = true;
            let mut has_specialty = false;
            for specialty in specialties.iter().filter(|s| s.belongs_to(level.id)) {
                has_specialty = true;
                rows.push(AccessRow {
                    modalidad_id: modality.id,
                    nivel_id: Some(level.id),
                    especialidad_id: Some(specialty.id),
                });
            }
            if !has_specialty {
                rows.push(AccessRow {
                    modalidad_id: modality.id,
                    nivel_id: Some(level.id),
                    especialidad_id: None,
                });
            }
        }
        if !has_level {
            rows.push(AccessRow {
                modalidad_id: modality.id,
                nivel_id: None,
                especialidad_id: None,
            });
        }
    }
    rows
}

/// Dimensions that must be selected (any one of them) before `dimension` is enumerable.
fn prerequisites(dimension: Dimension) -> &'static [Dimension] {
    match dimension {
        Dimension::ExamType => &[],
        Dimension::Source => &[Dimension::ExamType],
        Dimension::Modalidad => &[Dimension::Source],
        Dimension::Nivel | Dimension::Especialidad => &[Dimension::Modalidad],
        // Years may hang directly off a modality when level and specialty are null.
        Dimension::Year => &[Dimension::Modalidad, Dimension::Nivel, Dimension::Especialidad],
    }
}

fn is_placeholder(dimension: Dimension, value: &OptionValue) -> bool {
    dimension.is_required() && *value == OptionValue::Id(0)
}

/// Resolves available options and reconciles selections for one chain.
#[derive(Debug, Clone)]
pub struct CascadeResolver<R = AcademicPath> {
    rows: Vec<R>,
    chain: DimensionChain,
}

impl<R: PathRow> CascadeResolver<R> {
    /// Validate `rows` against `chain`.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::MalformedRow`] for the first row missing a
    /// required ancestor id.
    pub fn new(rows: Vec<R>, chain: DimensionChain) -> Result<Self> {
        for (index, row) in rows.iter().enumerate() {
            if let Err(reason) = row.check(&chain) {
                error!(index, %reason, %chain, "malformed catalog row");
                return Err(CascadeError::MalformedRow { index, reason });
            }
        }
        debug!(rows = rows.len(), %chain, "cascade resolver ready");
        Ok(Self { rows, chain })
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn chain(&self) -> &DimensionChain {
        &self.chain
    }

    /// Whether `dimension` can currently offer options.
    pub fn is_enumerable(&self, dimension: Dimension, selection: &Selection) -> bool {
        let Some(position) = self.chain.position(dimension) else {
            return false;
        };
        if position == 0 {
            return true;
        }
        let required: Vec<Dimension> = prerequisites(dimension)
            .iter()
            .copied()
            .filter(|d| self.chain.contains(*d))
            .collect();
        if required.is_empty() {
            return selection.is_set(self.chain.dimensions()[position - 1]);
        }
        required.into_iter().any(|d| selection.is_set(d))
    }

    /// Values of `dimension` reachable under the selected ancestors.
    ///
    /// Never contains "unspecified" (`None`) or the zero placeholder of a
    /// required dimension. Empty when the dimension is disabled.
    pub fn available_values(
        &self,
        dimension: Dimension,
        selection: &Selection,
    ) -> BTreeSet<OptionValue> {
        if !self.is_enumerable(dimension, selection) {
            return BTreeSet::new();
        }
        let constraints: Vec<(Dimension, OptionValue)> = self
            .chain
            .ancestors(dimension)
            .filter_map(|d| selection.get(d).map(|value| (d, value)))
            .collect();

        self.rows
            .iter()
            .filter(|row| {
                constraints
                    .iter()
                    .all(|(d, value)| row.value(*d).as_ref() == Some(value))
            })
            .filter_map(|row| row.value(dimension))
            .filter(|value| !is_placeholder(dimension, value))
            .collect()
    }

    /// Reset every selected value that is no longer reachable, together with
    /// every later dimension of the chain, until nothing changes.
    ///
    /// Dimensions outside the chain are left as they are.
    pub fn reconcile(&self, selection: &Selection) -> Selection {
        let mut current = selection.clone();
        loop {
            let invalid = self.chain.dimensions().iter().copied().find(|d| {
                current
                    .get(*d)
                    .is_some_and(|value| !self.available_values(*d, &current).contains(&value))
            });
            let Some(invalid) = invalid else {
                return current;
            };
            debug!(dimension = %invalid, "resetting unreachable selection");
            for dimension in self.chain.tail(invalid).collect::<Vec<_>>() {
                current.clear(dimension);
            }
        }
    }
}
