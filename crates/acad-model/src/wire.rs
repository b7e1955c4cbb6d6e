//! Nested exam catalog as returned by the catalog endpoint.
//!
//! Every id and child collection is optional: the API emits `null` or omits
//! keys freely, and the flattener decides what a missing value means.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExamCatalog {
    #[serde(default)]
    pub tipo_examen_id: Option<u32>,
    #[serde(default)]
    pub tipo_examen_nombre: Option<String>,
    #[serde(default)]
    pub fuentes: Option<Vec<RawSource>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSource {
    #[serde(default)]
    pub fuente_id: Option<u32>,
    #[serde(default)]
    pub fuente_nombre: Option<String>,
    #[serde(default)]
    pub modalidades: Option<Vec<RawModality>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModality {
    #[serde(default)]
    pub modalidad_id: Option<u32>,
    #[serde(default)]
    pub modalidad_nombre: Option<String>,
    #[serde(default)]
    pub niveles: Option<Vec<RawLevel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLevel {
    #[serde(default)]
    pub nivel_id: Option<u32>,
    #[serde(default)]
    pub nivel_nombre: Option<String>,
    #[serde(default)]
    pub especialidades: Option<Vec<RawSpecialty>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpecialty {
    #[serde(default)]
    pub especialidad_id: Option<u32>,
    #[serde(default)]
    pub especialidad_nombre: Option<String>,
    #[serde(default)]
    pub years: Option<Vec<YearBucket>>,
}

/// Year leaf with the number of items filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBucket {
    #[serde(deserialize_with = "year_as_string")]
    pub year: String,
    #[serde(default)]
    pub count: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireYear {
    Text(String),
    Number(i64),
}

fn year_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match WireYear::deserialize(deserializer)? {
        WireYear::Text(text) => text.trim().to_string(),
        WireYear::Number(number) => number.to_string(),
    })
}
