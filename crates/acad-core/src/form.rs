//! Selection state of one cascading filter form.

use std::collections::BTreeSet;

use serde::Serialize;

use acad_model::{AcademicPath, Dimension, OptionValue, Selection};

use crate::cascade::{CascadeResolver, PathRow};
use crate::error::Result;

/// How far a form has been filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStage {
    Empty,
    TypeChosen,
    SourceChosen,
    ModalityChosen,
    /// A specialty was picked straight from the modality, with no level.
    SpecialtyReachableWithoutLevel,
    LevelChosen,
    YearChosen,
}

/// Owns a resolver and the current selection; every change is reconciled.
#[derive(Debug, Clone)]
pub struct CascadeForm<R = AcademicPath> {
    resolver: CascadeResolver<R>,
    selection: Selection,
}

impl<R: PathRow> CascadeForm<R> {
    pub fn new(resolver: CascadeResolver<R>) -> Self {
        Self {
            resolver,
            selection: Selection::default(),
        }
    }

    /// Start from an existing selection (e.g. a record being edited).
    ///
    /// Values that are not reachable are dropped immediately.
    pub fn with_selection(resolver: CascadeResolver<R>, selection: &Selection) -> Self {
        let selection = resolver.reconcile(selection);
        Self {
            resolver,
            selection,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn resolver(&self) -> &CascadeResolver<R> {
        &self.resolver
    }

    /// Set `dimension` and reconcile.
    ///
    /// Returns whether the value survived reconciliation. An unreachable value
    /// resets the dimension and its descendants instead of failing. A dimension
    /// outside the chain is never stored.
    ///
    /// # Errors
    ///
    /// Only when the value kind does not fit the dimension (a year for an id
    /// dimension or the reverse).
    pub fn select(&mut self, dimension: Dimension, value: impl Into<OptionValue>) -> Result<bool> {
        let value = value.into();
        let mut next = self.selection.clone();
        next.set(dimension, value.clone())?;
        if !self.resolver.chain().contains(dimension) {
            return Ok(false);
        }
        self.selection = self.resolver.reconcile(&next);
        Ok(self.selection.get(dimension) == Some(value))
    }

    /// Clear `dimension` and every later dimension of the chain.
    pub fn clear(&mut self, dimension: Dimension) {
        let tail: Vec<Dimension> = self.resolver.chain().tail(dimension).collect();
        for dimension in tail {
            self.selection.clear(dimension);
        }
        self.selection.clear(dimension);
    }

    pub fn reset(&mut self) {
        self.selection = Selection::default();
    }

    pub fn options(&self, dimension: Dimension) -> BTreeSet<OptionValue> {
        self.resolver.available_values(dimension, &self.selection)
    }

    /// A dimension is enabled when it has something to offer.
    pub fn is_enabled(&self, dimension: Dimension) -> bool {
        !self.options(dimension).is_empty()
    }

    pub fn stage(&self) -> FormStage {
        let selection = &self.selection;
        if selection.year.is_some() {
            FormStage::YearChosen
        } else if selection.nivel_id.is_some() {
            FormStage::LevelChosen
        } else if selection.especialidad_id.is_some() {
            FormStage::SpecialtyReachableWithoutLevel
        } else if selection.modalidad_id.is_some() {
            FormStage::ModalityChosen
        } else if selection.source_id.is_some() {
            FormStage::SourceChosen
        } else if selection.exam_type_id.is_some() {
            FormStage::TypeChosen
        } else {
            FormStage::Empty
        }
    }

    /// Whether no enabled dimension is left unselected.
    pub fn is_complete(&self) -> bool {
        self.resolver
            .chain()
            .dimensions()
            .iter()
            .all(|d| self.selection.is_set(*d) || !self.is_enabled(*d))
    }
}
