//! Catalog access granted to a user account.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dimension::Selection;
use crate::path::AcademicPath;

/// Id meaning "any" (or "none") in an access grant.
pub const ANY_ID: u32 = 0;

/// One grant of catalog access. A zero id matches anything at that depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAcademicAccess {
    pub modalidad_id: u32,
    pub nivel_id: u32,
    pub especialidad_id: u32,
}

impl UserAcademicAccess {
    pub fn new(modalidad_id: u32, nivel_id: u32, especialidad_id: u32) -> Self {
        Self {
            modalidad_id,
            nivel_id,
            especialidad_id,
        }
    }

    /// Capture the academic part of a selection; unselected dimensions become [`ANY_ID`].
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            modalidad_id: selection.modalidad_id.unwrap_or(ANY_ID),
            nivel_id: selection.nivel_id.unwrap_or(ANY_ID),
            especialidad_id: selection.especialidad_id.unwrap_or(ANY_ID),
        }
    }

    pub fn permits(&self, path: &AcademicPath) -> bool {
        fn matches(granted: u32, actual: Option<u32>) -> bool {
            granted == ANY_ID || actual == Some(granted)
        }
        (self.modalidad_id == ANY_ID || self.modalidad_id == path.modalidad_id)
            && matches(self.nivel_id, path.nivel_id)
            && matches(self.especialidad_id, path.especialidad_id)
    }
}

/// Deduplicated collection of grants held by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessSet(BTreeSet<UserAcademicAccess>);

impl AccessSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an identical grant is already present.
    pub fn insert(&mut self, access: UserAcademicAccess) -> bool {
        self.0.insert(access)
    }

    pub fn remove(&mut self, access: &UserAcademicAccess) -> bool {
        self.0.remove(access)
    }

    pub fn contains(&self, access: &UserAcademicAccess) -> bool {
        self.0.contains(access)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserAcademicAccess> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any grant covers the path.
    pub fn permits(&self, path: &AcademicPath) -> bool {
        self.0.iter().any(|access| access.permits(path))
    }
}

impl FromIterator<UserAcademicAccess> for AccessSet {
    fn from_iter<I: IntoIterator<Item = UserAcademicAccess>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
