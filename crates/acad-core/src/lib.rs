//! Catalog resolution engine.
//!
//! - [`flatten`] turns the nested exam catalog into [`acad_model::AcademicPath`] rows.
//! - [`cascade`] derives the valid options of each dimension from those rows
//!   and reconciles selections that are no longer reachable.
//! - [`form`] keeps the selection state of one filter form.
//! - [`access`] edits user access grants and filters paths by them.

#![deny(unsafe_code)]

pub mod access;
pub mod cascade;
pub mod error;
pub mod flatten;
pub mod form;

pub use access::{AccessEditor, filter_paths};
pub use cascade::{AccessRow, CascadeResolver, DimensionChain, PathRow, access_rows};
pub use error::{CascadeError, Result};
pub use flatten::{Flattened, SkipReason, SkippedBranch, exam_source_pairs, flatten};
pub use form::{CascadeForm, FormStage};
