//! Access grants: editing a user's grants and filtering the catalog by them.

use tracing::debug;

use acad_model::{AcademicPath, AccessSet, Selection, UserAcademicAccess};

/// Paths visible to a holder of `access`, in their original order.
pub fn filter_paths(paths: &[AcademicPath], access: &AccessSet) -> Vec<AcademicPath> {
    paths
        .iter()
        .filter(|path| access.permits(path))
        .cloned()
        .collect()
}

/// Grant list being edited in a user form. Persisted by the caller on submit.
#[derive(Debug, Clone, Default)]
pub struct AccessEditor {
    access: AccessSet,
}

impl AccessEditor {
    pub fn new(existing: AccessSet) -> Self {
        Self { access: existing }
    }

    /// Add a grant for the academic part of `selection`.
    ///
    /// Returns `false` when no modality is selected or the grant already exists.
    pub fn add_current(&mut self, selection: &Selection) -> bool {
        if selection.modalidad_id.is_none() {
            return false;
        }
        let entry = UserAcademicAccess::from_selection(selection);
        let added = self.access.insert(entry);
        debug!(?entry, added, "access grant");
        added
    }

    pub fn remove(&mut self, entry: &UserAcademicAccess) -> bool {
        self.access.remove(entry)
    }

    pub fn access(&self) -> &AccessSet {
        &self.access
    }

    pub fn into_access(self) -> AccessSet {
        self.access
    }
}
