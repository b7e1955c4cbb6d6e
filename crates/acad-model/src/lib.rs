//! Data model for the academic catalog: flat entities, the nested exam
//! catalog as served by the API, flattened paths, and partial selections.

#![deny(unsafe_code)]

pub mod access;
pub mod dimension;
pub mod entity;
pub mod error;
pub mod ids;
pub mod path;
pub mod wire;

pub use access::{ANY_ID, AccessSet, UserAcademicAccess};
pub use dimension::{Dimension, OptionValue, Selection};
pub use entity::{ExamType, Level, Modality, Region, Source, Specialty};
pub use error::{ModelError, Result};
pub use ids::IdSet;
pub use path::{AcademicPath, PLACEHOLDER_MODALIDAD_ID};
pub use wire::{RawExamCatalog, RawLevel, RawModality, RawSource, RawSpecialty, YearBucket};
