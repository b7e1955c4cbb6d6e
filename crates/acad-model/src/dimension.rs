//! Classification dimensions, their option values, and partial selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One level of the classification hierarchy.
///
/// The declaration order is the ancestry order: a dimension can only be
/// constrained by dimensions that compare less than it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    ExamType,
    Source,
    Modalidad,
    Nivel,
    Especialidad,
    Year,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Self::ExamType,
        Self::Source,
        Self::Modalidad,
        Self::Nivel,
        Self::Especialidad,
        Self::Year,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExamType => "examType",
            Self::Source => "source",
            Self::Modalidad => "modalidad",
            Self::Nivel => "nivel",
            Self::Especialidad => "especialidad",
            Self::Year => "year",
        }
    }

    /// Whether values of this dimension are year strings rather than ids.
    pub const fn is_year(self) -> bool {
        matches!(self, Self::Year)
    }

    /// Whether every well-formed path carries a non-zero id here.
    pub const fn is_required(self) -> bool {
        matches!(self, Self::ExamType | Self::Source | Self::Modalidad)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "examtype" | "exam-type" | "exam_type" | "tipoexamen" => Ok(Self::ExamType),
            "source" | "fuente" => Ok(Self::Source),
            "modalidad" | "modality" => Ok(Self::Modalidad),
            "nivel" | "level" => Ok(Self::Nivel),
            "especialidad" | "specialty" => Ok(Self::Especialidad),
            "year" => Ok(Self::Year),
            _ => Err(ModelError::UnknownDimension(s.to_string())),
        }
    }
}

/// A selectable value: an entity id, or a year string for [`Dimension::Year`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Id(u32),
    Year(String),
}

impl OptionValue {
    /// Parse a textual value for the given dimension.
    pub fn parse(dimension: Dimension, text: &str) -> Result<Self> {
        let text = text.trim();
        if dimension.is_year() {
            if text.is_empty() {
                return Err(ModelError::InvalidValue {
                    dimension,
                    value: text.to_string(),
                });
            }
            return Ok(Self::Year(text.to_string()));
        }
        text.parse::<u32>()
            .map(Self::Id)
            .map_err(|_| ModelError::InvalidValue {
                dimension,
                value: text.to_string(),
            })
    }

    pub fn as_id(&self) -> Option<u32> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Year(_) => None,
        }
    }

    pub fn as_year(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Year(year) => Some(year),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Year(year) => f.write_str(year),
        }
    }
}

impl From<u32> for OptionValue {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for OptionValue {
    fn from(year: &str) -> Self {
        Self::Year(year.to_string())
    }
}

/// Partial selection across all dimensions. `None` means "unselected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_type_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidad_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nivel_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidad_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Selection::set`].
    pub fn with(mut self, dimension: Dimension, value: impl Into<OptionValue>) -> Result<Self> {
        self.set(dimension, value.into())?;
        Ok(self)
    }

    pub fn get(&self, dimension: Dimension) -> Option<OptionValue> {
        match dimension {
            Dimension::ExamType => self.exam_type_id.map(OptionValue::Id),
            Dimension::Source => self.source_id.map(OptionValue::Id),
            Dimension::Modalidad => self.modalidad_id.map(OptionValue::Id),
            Dimension::Nivel => self.nivel_id.map(OptionValue::Id),
            Dimension::Especialidad => self.especialidad_id.map(OptionValue::Id),
            Dimension::Year => self.year.clone().map(OptionValue::Year),
        }
    }

    pub fn is_set(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::ExamType => self.exam_type_id.is_some(),
            Dimension::Source => self.source_id.is_some(),
            Dimension::Modalidad => self.modalidad_id.is_some(),
            Dimension::Nivel => self.nivel_id.is_some(),
            Dimension::Especialidad => self.especialidad_id.is_some(),
            Dimension::Year => self.year.is_some(),
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: OptionValue) -> Result<()> {
        match (dimension, value) {
            (Dimension::Year, OptionValue::Year(year)) => self.year = Some(year),
            (Dimension::Year, OptionValue::Id(_)) => {
                return Err(ModelError::ValueKind {
                    dimension,
                    expected: "year",
                });
            }
            (_, OptionValue::Year(_)) => {
                return Err(ModelError::ValueKind {
                    dimension,
                    expected: "id",
                });
            }
            (Dimension::ExamType, OptionValue::Id(id)) => self.exam_type_id = Some(id),
            (Dimension::Source, OptionValue::Id(id)) => self.source_id = Some(id),
            (Dimension::Modalidad, OptionValue::Id(id)) => self.modalidad_id = Some(id),
            (Dimension::Nivel, OptionValue::Id(id)) => self.nivel_id = Some(id),
            (Dimension::Especialidad, OptionValue::Id(id)) => self.especialidad_id = Some(id),
        }
        Ok(())
    }

    pub fn clear(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::ExamType => self.exam_type_id = None,
            Dimension::Source => self.source_id = None,
            Dimension::Modalidad => self.modalidad_id = None,
            Dimension::Nivel => self.nivel_id = None,
            Dimension::Especialidad => self.especialidad_id = None,
            Dimension::Year => self.year = None,
        }
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|dimension| !self.is_set(*dimension))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for dimension in Dimension::ALL {
            let Some(value) = self.get(dimension) else {
                continue;
            };
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{dimension}={value}")?;
            first = false;
        }
        if first {
            f.write_str("(empty)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_order_is_ancestry_order() {
        assert!(Dimension::ExamType < Dimension::Source);
        assert!(Dimension::Nivel < Dimension::Especialidad);
        assert!(Dimension::Especialidad < Dimension::Year);
    }

    #[test]
    fn dimension_parses_aliases() {
        assert_eq!("fuente".parse::<Dimension>(), Ok(Dimension::Source));
        assert_eq!("exam-type".parse::<Dimension>(), Ok(Dimension::ExamType));
        assert_eq!("Nivel".parse::<Dimension>(), Ok(Dimension::Nivel));
        assert!("grado".parse::<Dimension>().is_err());
    }

    #[test]
    fn selection_rejects_mismatched_value_kind() {
        let mut selection = Selection::new();
        assert!(selection.set(Dimension::Year, OptionValue::Id(3)).is_err());
        assert!(selection.set(Dimension::Nivel, "2023".into()).is_err());
        assert!(selection.is_empty());
    }

    #[test]
    fn selection_get_set_clear() {
        let mut selection = Selection::new()
            .with(Dimension::Modalidad, 1u32)
            .and_then(|s| s.with(Dimension::Year, "2024"))
            .expect("valid selection");
        assert_eq!(selection.get(Dimension::Modalidad), Some(OptionValue::Id(1)));
        assert_eq!(selection.get(Dimension::Year), Some(OptionValue::Year("2024".into())));
        assert_eq!(selection.to_string(), "modalidad=1 year=2024");
        selection.clear(Dimension::Year);
        assert!(!selection.is_set(Dimension::Year));
    }

    #[test]
    fn option_value_parse() {
        assert_eq!(OptionValue::parse(Dimension::Nivel, " 14 "), Ok(OptionValue::Id(14)));
        assert!(OptionValue::parse(Dimension::Nivel, "x").is_err());
        assert_eq!(
            OptionValue::parse(Dimension::Year, "2023"),
            Ok(OptionValue::Year("2023".into()))
        );
    }
}
