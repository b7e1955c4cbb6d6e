use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, OptionValue};

/// Modality id used for a source that has no modalities attached.
pub const PLACEHOLDER_MODALIDAD_ID: u32 = 0;

/// One fully-qualified route through the exam catalog.
///
/// `None` at a depth means "not specified at this depth": the branch ended
/// there. `Some(0)` is a real value and is kept distinct from `None`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPath {
    pub exam_type_id: u32,
    pub source_id: u32,
    pub modalidad_id: u32,
    pub nivel_id: Option<u32>,
    pub especialidad_id: Option<u32>,
    pub year: Option<String>,
}

impl AcademicPath {
    /// Path that ends at the source (no modalities below it).
    pub fn source_only(exam_type_id: u32, source_id: u32) -> Self {
        Self {
            exam_type_id,
            source_id,
            modalidad_id: PLACEHOLDER_MODALIDAD_ID,
            nivel_id: None,
            especialidad_id: None,
            year: None,
        }
    }

    pub fn value(&self, dimension: Dimension) -> Option<OptionValue> {
        match dimension {
            Dimension::ExamType => Some(OptionValue::Id(self.exam_type_id)),
            Dimension::Source => Some(OptionValue::Id(self.source_id)),
            Dimension::Modalidad => Some(OptionValue::Id(self.modalidad_id)),
            Dimension::Nivel => self.nivel_id.map(OptionValue::Id),
            Dimension::Especialidad => self.especialidad_id.map(OptionValue::Id),
            Dimension::Year => self.year.clone().map(OptionValue::Year),
        }
    }

    pub fn has_placeholder_modalidad(&self) -> bool {
        self.modalidad_id == PLACEHOLDER_MODALIDAD_ID
    }
}

impl fmt::Display for AcademicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt(value: Option<u32>) -> String {
            value.map_or_else(|| "-".to_string(), |id| id.to_string())
        }
        write!(
            f,
            "{}/{}/{}/{}/{}/{}",
            self.exam_type_id,
            self.source_id,
            self.modalidad_id,
            opt(self.nivel_id),
            opt(self.especialidad_id),
            self.year.as_deref().unwrap_or("-")
        )
    }
}
