//! Flat catalog entities as served by the reference-list endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::IdSet;

/// Top-level exam classification.
///
/// The set is fixed by the platform and never fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Ascenso,
    Nombramiento,
    Directivos,
}

impl ExamType {
    pub const ALL: [ExamType; 3] = [Self::Ascenso, Self::Nombramiento, Self::Directivos];

    pub const fn id(self) -> u32 {
        match self {
            Self::Ascenso => 1,
            Self::Nombramiento => 2,
            Self::Directivos => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascenso => "Ascenso",
            Self::Nombramiento => "Nombramiento",
            Self::Directivos => "Directivos",
        }
    }

    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|exam_type| exam_type.id() == id)
            .ok_or(ModelError::UnknownExamType(id))
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Issuing institution of an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modality {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Educational level. Belongs to one or more modalities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "modalidadIds", default)]
    pub modalidad_ids: IdSet,
}

impl Level {
    /// Id of the "no level" sentinel entry.
    pub const NONE_ID: u32 = 0;
    pub const NONE_NAME: &'static str = "NINGUNO";

    pub fn is_none_sentinel(&self) -> bool {
        self.id == Self::NONE_ID || self.name.eq_ignore_ascii_case(Self::NONE_NAME)
    }

    pub fn belongs_to(&self, modalidad_id: u32) -> bool {
        self.modalidad_ids.contains(modalidad_id)
    }
}

/// Subject specialization. Belongs to one or more candidate levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nivelId", default)]
    pub nivel_ids: IdSet,
}

impl Specialty {
    pub fn belongs_to(&self, nivel_id: u32) -> bool {
        self.nivel_ids.contains(nivel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exam_type_ids_round_trip() {
        for exam_type in ExamType::ALL {
            assert_eq!(ExamType::from_id(exam_type.id()), Ok(exam_type));
        }
        assert_eq!(ExamType::from_id(9), Err(ModelError::UnknownExamType(9)));
    }

    #[test]
    fn level_accepts_single_or_many_modalities() {
        let single: Level =
            serde_json::from_str(r#"{"id": 11, "nombre": "INICIAL", "modalidadIds": 1}"#)
                .expect("single");
        let many: Level =
            serde_json::from_str(r#"{"id": 14, "nombre": "PRIMARIA", "modalidadIds": [1, 2]}"#)
                .expect("many");
        assert!(single.belongs_to(1));
        assert!(many.belongs_to(1) && many.belongs_to(2));
        assert!(!single.belongs_to(2));
    }

    #[test]
    fn none_sentinel_level() {
        let level = Level {
            id: Level::NONE_ID,
            name: Level::NONE_NAME.to_string(),
            modalidad_ids: IdSet::single(1),
        };
        assert!(level.is_none_sentinel());
    }

    #[test]
    fn specialty_without_level_has_empty_set() {
        let specialty: Specialty =
            serde_json::from_str(r#"{"id": 5, "nombre": "Matemática", "nivelId": null}"#)
                .expect("specialty");
        assert!(specialty.nivel_ids.is_empty());
    }
}
